//! # ART-1 (Adaptive Resonance Theory, type 1)
//!
//! An unsupervised, incremental classifier for binary feature vectors.
//!
//! ## Overview
//!
//! An ART-1 network groups inputs into categories while guaranteeing that
//! each category's stored template stays within a similarity tolerance
//! (the **vigilance** threshold) of every input assigned to it. An input
//! too different from every existing category recruits a fresh one
//! instead of corrupting a learned template — the network stays stable
//! under new data while remaining plastic.
//!
//! Classification and learning are a single operation: every call runs
//! the resonance search and, on success, rewrites the winning category's
//! template (fast learning). There is no separate training phase.
//!
//! ## Structure
//!
//! - [`core`] — Network structure, resonance search, weight updates
//! - [`pattern`] — Fixed-length binary pattern buffers
//!
//! ## Example
//!
//! ```
//! use art1::{Art1, Config, Pattern};
//!
//! let mut net = Art1::new(4, 2, Config::default()).unwrap();
//! let input = Pattern::from_bits(&[1, 0, 1, 1]);
//! let category = net.classify(&input).unwrap();
//! assert!(category.is_some());
//! ```

pub mod core;
pub mod pattern;

pub use crate::core::{Art1, Art1Error, Art1Result};
pub use crate::pattern::Pattern;

/// Network configuration.
///
/// Validated when an [`Art1`] network is constructed.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Config {
    /// Learning constant L used in weight initialization and the
    /// fast-learning update. Must be > 1. Default 2.5.
    pub l: f64,
    /// Vigilance threshold in (0, 1]. Higher values force finer-grained
    /// categories. Default 0.8.
    pub vigilance: f64,
    /// Cutoff separating active from inactive comparison-layer neurons.
    /// Default 0.5.
    pub activation_threshold: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            l: 2.5,
            vigilance: 0.8,
            activation_threshold: 0.5,
        }
    }
}
