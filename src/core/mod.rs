//! Core ART-1 algorithm implementation.
//!
//! This module provides the network structure and the resonance search:
//! - Comparison-layer (F1) activation and binarization
//! - Recognition-layer (F2) competition with reset/inhibition
//! - Vigilance test driving the repeat-until-resonance loop
//! - Fast-learning weight update on resonance
//!
//! ## Resonance Search
//!
//! Each classification runs a closed loop:
//! ```text
//! F1 feed-forward → F2 competition → top-down readback into F1
//!   → similarity = |F1| / |input|
//!   → similarity ≥ vigilance ? learn and stop : inhibit winner and retry
//! ```
//!
//! The loop is bounded by the number of category neurons: every pass
//! either resonates, inhibits one previously-uninhibited neuron, or runs
//! out of candidates.

use crate::pattern::Pattern;
use crate::Config;
use ndarray::{Array1, Array2, ArrayView1};
use std::error::Error;
use std::fmt;

/// Error type for ART-1 operations.
#[derive(Debug, Clone)]
pub enum Art1Error {
    /// Invalid network configuration
    InvalidConfig(String),
    /// Pattern length disagrees with a layer size
    ShapeMismatch(String),
}

impl fmt::Display for Art1Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Art1Error::InvalidConfig(msg) => write!(f, "Invalid config: {}", msg),
            Art1Error::ShapeMismatch(msg) => write!(f, "Shape mismatch: {}", msg),
        }
    }
}

impl Error for Art1Error {}

pub type Art1Result<T> = Result<T, Art1Error>;

/// Threshold an F1 activation into a binary feature value.
///
/// Shared by both comparison-layer passes so the cutoff comparison cannot
/// drift between them. The comparison is strict: an activation exactly at
/// the threshold reads as inactive.
fn binarize(activation: f64, threshold: f64) -> i32 {
    i32::from(activation > threshold)
}

/// An ART-1 network over binary input patterns.
///
/// # Architecture
///
/// - **F1 (comparison) layer:** `input_size` neurons holding the working
///   binary pattern derived from the input and top-down feedback
/// - **F2 (recognition) layer:** `output_size` category neurons competing
///   winner-take-all on bottom-up match scores
/// - **Weights:** `bottom_up` has shape `(input_size, output_size)`,
///   cell `(i, k)` connecting feature `i` to category `k`; `top_down` is
///   its transpose in shape, row `k` holding category `k`'s expectation
///   template over the features
///
/// # Weight Initialization
///
/// Bottom-up weights start at `1`; top-down weights start at
/// `L / (L - 1 + input_size)`, so an untrained category matches any input
/// weakly but passes the vigilance test and can be recruited.
///
/// # Learning
///
/// Classification and learning are one operation: every [`Art1::compute`]
/// call that reaches resonance overwrites the winner's weights with the
/// resonating F1 pattern (fast learning). There is no learning-free
/// inference mode.
#[derive(Debug, Clone)]
pub struct Art1 {
    input_size: usize,
    output_size: usize,
    config: Config,
    /// Bottom-up weights, shape (input_size, output_size)
    bottom_up: Array2<f64>,
    /// Top-down expectation templates, shape (output_size, input_size)
    top_down: Array2<f64>,
    /// F1 working pattern, length input_size
    comparison: Pattern,
    /// F2 one-hot output snapshot, length output_size
    recognition: Pattern,
    /// Raw per-category competition scores from the most recent search
    scores: Array1<f64>,
    /// Category that won the most recent competition, if any
    winner: Option<usize>,
    /// Score of the most recent winner, -1 when there was none
    winner_score: f64,
}

impl Art1 {
    /// Create a network with `input_size` F1 neurons and `output_size`
    /// category neurons.
    ///
    /// # Errors
    /// - `InvalidConfig` if either size is zero, if `config.l <= 1`, or
    ///   if `config.vigilance` is outside `(0, 1]`
    pub fn new(input_size: usize, output_size: usize, config: Config) -> Art1Result<Self> {
        if input_size == 0 || output_size == 0 {
            return Err(Art1Error::InvalidConfig(
                "input_size and output_size must be positive".to_string(),
            ));
        }
        validate_config(&config)?;

        // With bottom-up weights at 1 an untrained category's top-down
        // readback reproduces the input exactly, so a fresh category
        // always passes the vigilance test and can be recruited.
        let top_down_init = config.l / (config.l - 1.0 + input_size as f64);
        let bottom_up = Array2::from_elem((input_size, output_size), 1.0);
        let top_down = Array2::from_elem((output_size, input_size), top_down_init);

        Ok(Self {
            input_size,
            output_size,
            config,
            bottom_up,
            top_down,
            comparison: Pattern::new(input_size),
            recognition: Pattern::new(output_size),
            scores: Array1::zeros(output_size),
            winner: None,
            winner_score: -1.0,
        })
    }

    /// Number of F1 (feature) neurons.
    pub fn input_size(&self) -> usize {
        self.input_size
    }

    /// Number of F2 (category) neurons.
    pub fn output_size(&self) -> usize {
        self.output_size
    }

    /// Current vigilance threshold.
    pub fn vigilance(&self) -> f64 {
        self.config.vigilance
    }

    /// Change the vigilance threshold between classifications.
    ///
    /// # Errors
    /// - `InvalidConfig` if `vigilance` is outside `(0, 1]`
    pub fn set_vigilance(&mut self, vigilance: f64) -> Art1Result<()> {
        if vigilance <= 0.0 || vigilance > 1.0 {
            return Err(Art1Error::InvalidConfig(format!(
                "vigilance must be in (0, 1], got {}",
                vigilance
            )));
        }
        self.config.vigilance = vigilance;
        Ok(())
    }

    /// Category that resonated on the most recent [`Art1::compute`], or
    /// `None` if the search exhausted every candidate.
    pub fn winner_index(&self) -> Option<usize> {
        self.winner
    }

    /// Competition score of the most recent winner, `-1.0` when there
    /// was none.
    pub fn winner_score(&self) -> f64 {
        self.winner_score
    }

    /// True when the most recent [`Art1::compute`] ended in resonance.
    pub fn has_winner(&self) -> bool {
        self.winner.is_some()
    }

    /// Raw per-category scores recorded during the most recent search.
    ///
    /// A neuron inhibited mid-search keeps the score from the pass on
    /// which it was last allowed to compete.
    pub fn scores(&self) -> &Array1<f64> {
        &self.scores
    }

    /// Bottom-up weight matrix, shape `(input_size, output_size)`.
    pub fn bottom_up_weights(&self) -> &Array2<f64> {
        &self.bottom_up
    }

    /// Top-down weight matrix, shape `(output_size, input_size)`.
    pub fn top_down_weights(&self) -> &Array2<f64> {
        &self.top_down
    }

    /// Top-down expectation template of category `k` (row `k` of the
    /// top-down matrix).
    ///
    /// # Panics
    /// Panics if `k >= output_size`.
    pub fn category_template(&self, k: usize) -> ArrayView1<'_, f64> {
        self.top_down.row(k)
    }

    /// Bottom-up weights into category `k` (column `k` of the bottom-up
    /// matrix).
    ///
    /// # Panics
    /// Panics if `k >= output_size`.
    pub fn feature_weights(&self, k: usize) -> ArrayView1<'_, f64> {
        self.bottom_up.column(k)
    }

    /// Classify `input`, learning as a side effect, and write the one-hot
    /// recognition pattern into `output`.
    ///
    /// # Algorithm
    ///
    /// 1. Seed F1 from the raw input (feed-forward pass)
    /// 2. Run the F2 competition over non-inhibited categories
    /// 3. No candidate left → stop exhausted, `output` all zeros
    /// 4. Read the winner's expectation back into F1 and compute
    ///    `similarity = |F1| / |input|`
    /// 5. `similarity ≥ vigilance` → resonance: encode F1 into the
    ///    winner's weights and stop
    /// 6. Otherwise inhibit the winner and go to 2
    ///
    /// Only the resonating winner's weight column/row is ever touched; on
    /// exhaustion no weights change.
    ///
    /// # Errors
    /// - `ShapeMismatch` if `input.len() != input_size` or
    ///   `output.len() != output_size`
    pub fn compute(&mut self, input: &Pattern, output: &mut Pattern) -> Art1Result<()> {
        if input.len() != self.input_size {
            return Err(Art1Error::ShapeMismatch(format!(
                "input length: expected {}, got {}",
                self.input_size,
                input.len()
            )));
        }
        if output.len() != self.output_size {
            return Err(Art1Error::ShapeMismatch(format!(
                "output length: expected {}, got {}",
                self.output_size,
                output.len()
            )));
        }

        // Reset/inhibition state is scoped to this one call.
        let mut inhibited = vec![false; self.output_size];

        loop {
            self.seed_comparison_layer(input);
            self.run_competition(&inhibited);
            output.copy_from(&self.recognition);

            let Some(winner) = self.winner else {
                // Every category inhibited: exhausted, nothing learned.
                return Ok(());
            };

            self.read_back_expectation(input, winner);
            let similarity = self.similarity(input);

            if similarity >= self.config.vigilance {
                self.encode_template(winner);
                return Ok(());
            }

            inhibited[winner] = true;
        }
    }

    /// Classify `input` and return the resonating category, or `None` if
    /// the search exhausted every candidate.
    ///
    /// Convenience wrapper around [`Art1::compute`] with an internal
    /// output buffer; learning still happens.
    ///
    /// # Errors
    /// - `ShapeMismatch` if `input.len() != input_size`
    pub fn classify(&mut self, input: &Pattern) -> Art1Result<Option<usize>> {
        let mut output = Pattern::new(self.output_size);
        self.compute(input, &mut output)?;
        Ok(self.winner)
    }

    /// F1 feed-forward pass, before any category has been selected.
    ///
    /// With no top-down feedback yet, the activation is `2x` for feature
    /// value `x`, so against the 0.5 cutoff the comparison layer starts
    /// as the binarized raw input and the first competition scores the
    /// input itself.
    fn seed_comparison_layer(&mut self, input: &Pattern) {
        for i in 0..self.input_size {
            let activation = 2.0 * f64::from(input.get(i));
            self.comparison
                .set(i, binarize(activation, self.config.activation_threshold));
        }
    }

    /// F2 winner-take-all competition over the non-inhibited categories.
    ///
    /// Each candidate's score is the inner product of its top-down
    /// template and the current F1 pattern. Ties keep the lowest index:
    /// only a strictly greater score replaces the running winner. Leaves
    /// the one-hot result in `self.recognition` and the raw score of
    /// every scanned candidate in `self.scores`.
    fn run_competition(&mut self, inhibited: &[bool]) {
        self.winner = None;
        self.winner_score = -1.0;

        for k in 0..self.output_size {
            if !inhibited[k] {
                let mut sum = 0.0;
                for i in 0..self.input_size {
                    sum += self.top_down[[k, i]] * f64::from(self.comparison.get(i));
                }
                self.scores[k] = sum;

                if sum > self.winner_score {
                    self.winner_score = sum;
                    self.winner = Some(k);
                }
            }

            self.recognition.set(k, 0);
        }

        if let Some(winner) = self.winner {
            self.recognition.set(winner, 1);
        }
    }

    /// F1 feedback pass against a tentative `winner`.
    ///
    /// Re-derives the comparison layer from the raw input plus the
    /// winner's bottom-up contribution, gated by the one-hot recognition
    /// output. The resulting pattern is what the vigilance test measures.
    fn read_back_expectation(&mut self, input: &Pattern, winner: usize) {
        for i in 0..self.input_size {
            let feedback =
                self.bottom_up[[i, winner]] * f64::from(self.recognition.get(winner));
            let x = f64::from(input.get(i));
            let activation = (x + feedback) / (1.0 + x + feedback);
            self.comparison
                .set(i, binarize(activation, self.config.activation_threshold));
        }
    }

    /// Similarity ratio for the vigilance test: `|F1| / |input|`.
    ///
    /// An all-zero input has magnitude 0; the ratio is defined as 0 so
    /// the search exhausts deterministically instead of comparing NaN.
    fn similarity(&self, input: &Pattern) -> f64 {
        let denom = input.magnitude();
        if denom == 0.0 {
            0.0
        } else {
            self.comparison.magnitude() / denom
        }
    }

    /// Fast-learning update: overwrite `winner`'s weights with the
    /// resonating F1 pattern.
    ///
    /// Active features get a bottom-up weight of 1 and a top-down weight
    /// of `L / (L - 1 + |F1|)`; inactive features get 0 on both sides.
    /// The category's template becomes exactly the pattern that last
    /// resonated with it. The denominator stays positive because `L > 1`
    /// is enforced at construction.
    fn encode_template(&mut self, winner: usize) {
        let magnitude = self.comparison.magnitude();
        for i in 0..self.input_size {
            if self.comparison.get(i) == 1 {
                self.bottom_up[[i, winner]] = 1.0;
                self.top_down[[winner, i]] = self.config.l / (self.config.l - 1.0 + magnitude);
            } else {
                self.bottom_up[[i, winner]] = 0.0;
                self.top_down[[winner, i]] = 0.0;
            }
        }
    }
}

fn validate_config(config: &Config) -> Art1Result<()> {
    if config.l <= 1.0 {
        return Err(Art1Error::InvalidConfig(format!(
            "learning constant L must be > 1, got {}",
            config.l
        )));
    }
    if config.vigilance <= 0.0 || config.vigilance > 1.0 {
        return Err(Art1Error::InvalidConfig(format!(
            "vigilance must be in (0, 1], got {}",
            config.vigilance
        )));
    }
    Ok(())
}
