//! ART-1 demo binary.
//!
//! Feeds a set of 12-bit sample images through the network one at a time,
//! printing the weight state before each presentation and the winning
//! category after it. Optionally appends noisy copies of the images to
//! show how vigilance controls whether a perturbed image reuses its
//! original category or recruits a new one.

use art1::{Art1, Config, Pattern};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const INPUT_NEURONS: usize = 12;
const OUTPUT_NEURONS: usize = 5;

const IMAGES: [[i32; INPUT_NEURONS]; 5] = [
    [1, 1, 0, 1, 1, 0, 0, 1, 0, 1, 1, 0],
    [0, 0, 0, 0, 1, 1, 1, 0, 1, 0, 0, 1],
    [1, 1, 1, 1, 1, 0, 0, 1, 0, 0, 0, 1],
    [1, 0, 0, 1, 1, 0, 0, 1, 0, 1, 1, 0],
    [1, 1, 1, 1, 1, 0, 0, 1, 0, 0, 0, 0],
];

#[derive(Parser, Debug)]
#[command(name = "art1-classify", about = "Run an ART-1 network over sample images")]
struct Args {
    /// Vigilance threshold in (0, 1]
    #[arg(long, default_value_t = 0.85)]
    vigilance: f64,

    /// Learning constant L (must be > 1)
    #[arg(long, default_value_t = 2.5)]
    learning_constant: f64,

    /// Probability of flipping each bit when generating noisy copies
    /// (0 disables the noisy second round)
    #[arg(long, default_value_t = 0.0)]
    noise: f64,

    /// RNG seed for noise generation
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn main() {
    let args = Args::parse();

    let config = Config {
        l: args.learning_constant,
        vigilance: args.vigilance,
        ..Config::default()
    };

    let mut network = match Art1::new(INPUT_NEURONS, OUTPUT_NEURONS, config) {
        Ok(network) => network,
        Err(err) => {
            eprintln!("error: {}", err);
            std::process::exit(1);
        }
    };

    let mut images: Vec<Pattern> = IMAGES.iter().map(|bits| Pattern::from_bits(bits)).collect();

    if args.noise > 0.0 {
        let mut rng = StdRng::seed_from_u64(args.seed);
        let noisy: Vec<Pattern> = IMAGES
            .iter()
            .map(|bits| {
                let flipped: Vec<i32> = bits
                    .iter()
                    .map(|&b| if rng.gen::<f64>() < args.noise { 1 - b } else { b })
                    .collect();
                Pattern::from_bits(&flipped)
            })
            .collect();
        images.extend(noisy);
    }

    for (index, image) in images.iter().enumerate() {
        println!("Presenting image #{}\n", index + 1);
        println!("Image encoding: '{}'\n", join_ints(image.as_slice()));

        print_weights(&network);

        let mut output = Pattern::new(OUTPUT_NEURONS);
        if let Err(err) = network.compute(image, &mut output) {
            eprintln!("error: {}", err);
            std::process::exit(1);
        }

        print_scores(&network);

        match network.winner_index() {
            Some(winner) => {
                println!(
                    "\nNeuron #{} won with score {:.2}",
                    winner + 1,
                    network.winner_score()
                );
                println!("The image belongs to class {}", winner + 1);
            }
            None => {
                println!("\nNo neuron reached resonance: all categories exhausted");
            }
        }

        println!("---------------------------------------------------------------\n");
    }

    println!("Network state after training\n");
    print_weights(&network);
    print_scores(&network);
}

fn print_weights(network: &Art1) {
    println!("Comparison-layer (bottom-up) weights:");
    for k in 0..network.output_size() {
        let column: Vec<String> = network
            .feature_weights(k)
            .iter()
            .map(|w| format!("{}", w))
            .collect();
        println!("T{}: {}", k + 1, column.join(" "));
    }

    println!("\nRecognition-layer (top-down) weights:");
    for k in 0..network.output_size() {
        let row: Vec<String> = network
            .category_template(k)
            .iter()
            .map(|w| format!("{:.2}", w))
            .collect();
        println!("B{}: {}", k + 1, row.join(" "));
    }
    println!();
}

fn print_scores(network: &Art1) {
    println!("\nRecognition-layer neuron outputs Sj");
    let header: Vec<String> = (1..=network.output_size()).map(|k| k.to_string()).collect();
    println!("Neuron:\t {}\t", header.join("\t "));
    let scores: Vec<String> = network.scores().iter().map(|s| format!("{:.2}", s)).collect();
    println!("    Sj:\t {}\t", scores.join("\t "));
}

fn join_ints(values: &[i32]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
