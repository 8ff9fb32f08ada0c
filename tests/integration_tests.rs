//! Integration tests for ART-1 classification behavior.
//!
//! These tests verify the end-to-end guarantees of the resonance search:
//! - Categories stay within the vigilance tolerance of their inputs
//! - Learning only ever touches the resonating winner's weights
//! - Repeated inputs are stable under fast learning
//! - The search exhausts cleanly once every category is committed

use approx::assert_abs_diff_eq;
use art1::{Art1, Config, Pattern};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A classification either names a valid category or reports exhaustion;
/// it can never name a category the network does not have.
#[test]
fn test_classify_returns_valid_index_or_none() {
    let mut network = Art1::new(8, 3, Config::default()).unwrap();
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..50 {
        let bits: Vec<i32> = (0..8).map(|_| i32::from(rng.gen::<bool>())).collect();
        let input = Pattern::from_bits(&bits);
        if let Some(index) = network.classify(&input).unwrap() {
            assert!(index < network.output_size());
        }
    }
}

/// Submitting the same pattern twice must yield the same winner both
/// times: after the first resonance the stored template reproduces the
/// winning match exactly.
#[test]
fn test_repeated_input_reuses_category() {
    let mut network = Art1::new(12, 5, Config::default()).unwrap();
    let input = Pattern::from_bits(&[1, 1, 0, 1, 1, 0, 0, 1, 0, 1, 1, 0]);

    let first = network.classify(&input).unwrap().expect("must resonate");
    let template_after_first = network.top_down_weights().clone();

    let second = network.classify(&input).unwrap().expect("must resonate");

    assert_eq!(first, second);
    // Re-learning the identical pattern rewrites the same values.
    for (a, b) in network
        .top_down_weights()
        .iter()
        .zip(template_after_first.iter())
    {
        assert_abs_diff_eq!(a, b, epsilon = 1e-12);
    }
}

/// After any classification, only the winner's bottom-up column and
/// top-down row may differ from their pre-call values.
#[test]
fn test_weight_locality() {
    let mut network = Art1::new(12, 5, Config::default()).unwrap();
    let first = Pattern::from_bits(&[1, 1, 0, 1, 1, 0, 0, 1, 0, 1, 1, 0]);
    network.classify(&first).unwrap().expect("must resonate");

    let bottom_up_before = network.bottom_up_weights().clone();
    let top_down_before = network.top_down_weights().clone();

    let second = Pattern::from_bits(&[0, 0, 0, 0, 1, 1, 1, 0, 1, 0, 0, 1]);
    let winner = network.classify(&second).unwrap().expect("must resonate");

    for k in 0..network.output_size() {
        if k == winner {
            continue;
        }
        for i in 0..network.input_size() {
            assert_eq!(
                network.bottom_up_weights()[[i, k]],
                bottom_up_before[[i, k]],
                "bottom-up weight ({}, {}) changed without resonating",
                i,
                k
            );
            assert_eq!(
                network.top_down_weights()[[k, i]],
                top_down_before[[k, i]],
                "top-down weight ({}, {}) changed without resonating",
                k,
                i
            );
        }
    }
}

/// With every category committed to a disjoint template at vigilance 1.0,
/// a pattern matching none of them must exhaust the search, and
/// exhaustion must leave all weights untouched.
#[test]
fn test_exhaustion_leaves_weights_unchanged() {
    let config = Config {
        vigilance: 1.0,
        ..Config::default()
    };
    let mut network = Art1::new(4, 2, config).unwrap();

    let a = Pattern::from_bits(&[1, 1, 0, 0]);
    let b = Pattern::from_bits(&[0, 0, 1, 1]);
    assert_eq!(network.classify(&a).unwrap(), Some(0));
    assert_eq!(network.classify(&b).unwrap(), Some(1));

    let bottom_up_before = network.bottom_up_weights().clone();
    let top_down_before = network.top_down_weights().clone();

    // Straddles both templates: neither can reproduce it in full.
    let c = Pattern::from_bits(&[1, 0, 1, 0]);
    let mut output = Pattern::new(2);
    network.compute(&c, &mut output).unwrap();

    assert!(!network.has_winner());
    assert_eq!(network.winner_index(), None);
    assert_eq!(network.winner_score(), -1.0);
    assert_eq!(output.magnitude(), 0.0);
    assert_eq!(network.bottom_up_weights(), &bottom_up_before);
    assert_eq!(network.top_down_weights(), &top_down_before);
}

/// The scenario from the original image-classification run: 12 features,
/// 5 categories, vigilance 0.85. The first image must recruit a category
/// whose template is L / (L - 1 + popcount) at its active positions and
/// 0 elsewhere.
#[test]
fn test_template_values_after_first_resonance() {
    let config = Config {
        vigilance: 0.85,
        ..Config::default()
    };
    let l = config.l;
    let mut network = Art1::new(12, 5, config).unwrap();

    let bits = [1, 1, 0, 1, 1, 0, 0, 1, 0, 1, 1, 0];
    let input = Pattern::from_bits(&bits);
    let popcount: i32 = bits.iter().sum();

    let winner = network.classify(&input).unwrap().expect("must resonate");
    assert!(winner < 5);

    let expected = l / (l - 1.0 + f64::from(popcount));
    for (i, &bit) in bits.iter().enumerate() {
        if bit == 1 {
            assert_abs_diff_eq!(network.category_template(winner)[i], expected, epsilon = 1e-12);
            assert_abs_diff_eq!(network.feature_weights(winner)[i], 1.0);
        } else {
            assert_abs_diff_eq!(network.category_template(winner)[i], 0.0);
            assert_abs_diff_eq!(network.feature_weights(winner)[i], 0.0);
        }
    }
}

/// Re-feeding a pattern the network has already learned must resonate on
/// its category directly: the committed template out-scores both the
/// other committed category and the untrained ones on the first pass.
#[test]
fn test_learned_pattern_resonates_directly() {
    let mut network = Art1::new(12, 5, Config::default()).unwrap();

    let a = Pattern::from_bits(&[1, 1, 0, 1, 1, 0, 0, 1, 0, 1, 1, 0]);
    let b = Pattern::from_bits(&[0, 0, 0, 0, 1, 1, 1, 0, 1, 0, 0, 1]);

    let cat_a = network.classify(&a).unwrap().expect("must resonate");
    let cat_b = network.classify(&b).unwrap().expect("must resonate");
    assert_ne!(cat_a, cat_b);

    assert_eq!(network.classify(&a).unwrap(), Some(cat_a));
    // The winner's score must have topped the competition outright.
    let scores = network.scores();
    for k in 0..network.output_size() {
        assert!(scores[cat_a] >= scores[k]);
    }

    assert_eq!(network.classify(&b).unwrap(), Some(cat_b));
}

/// Distinct-enough inputs must recruit distinct categories instead of
/// overwriting each other, and each must remain recallable afterwards.
#[test]
fn test_dissimilar_inputs_recruit_distinct_categories() {
    let config = Config {
        vigilance: 0.85,
        ..Config::default()
    };
    let mut network = Art1::new(12, 5, config).unwrap();

    let images = [
        [1, 1, 0, 1, 1, 0, 0, 1, 0, 1, 1, 0],
        [0, 0, 0, 0, 1, 1, 1, 0, 1, 0, 0, 1],
        [1, 1, 1, 1, 1, 0, 0, 1, 0, 0, 0, 1],
    ];

    let mut assigned = Vec::new();
    for bits in &images {
        let input = Pattern::from_bits(bits);
        let winner = network.classify(&input).unwrap().expect("must resonate");
        assigned.push(winner);
    }

    assert_eq!(assigned[0], 0);
    assert_ne!(assigned[0], assigned[1]);

    // Recall: every image still maps to the category it trained.
    for (bits, &expected) in images.iter().zip(&assigned) {
        let input = Pattern::from_bits(bits);
        assert_eq!(network.classify(&input).unwrap(), Some(expected));
    }
}

/// The output buffer is fully overwritten on every call: one-hot on
/// resonance, all zeros on exhaustion.
#[test]
fn test_output_buffer_overwritten() {
    let mut network = Art1::new(4, 3, Config::default()).unwrap();
    let input = Pattern::from_bits(&[1, 0, 1, 1]);

    let mut output = Pattern::new(3);
    network.compute(&input, &mut output).unwrap();

    let winner = network.winner_index().expect("must resonate");
    for k in 0..3 {
        assert_eq!(output.get(k), i32::from(k == winner));
    }
}
