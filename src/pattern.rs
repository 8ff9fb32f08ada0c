//! Fixed-length discrete patterns fed to and produced by the network.
//!
//! A [`Pattern`] is a vector of small integers, normally `0`/`1`. Slots
//! start at `-1` until first written, so a half-filled buffer is
//! distinguishable from a pattern of zeros.

/// Value of a pattern slot before anything has been written to it.
pub const UNSET: i32 = -1;

/// A fixed-length vector of binary feature values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    data: Vec<i32>,
}

impl Pattern {
    /// Create a pattern of `len` slots, all initialized to [`UNSET`].
    pub fn new(len: usize) -> Self {
        Self {
            data: vec![UNSET; len],
        }
    }

    /// Create a pattern from an existing slice of feature values.
    pub fn from_bits(bits: &[i32]) -> Self {
        Self {
            data: bits.to_vec(),
        }
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when the pattern has no slots.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Read the value at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn get(&self, index: usize) -> i32 {
        self.data[index]
    }

    /// Write `value` at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn set(&mut self, index: usize, value: i32) {
        self.data[index] = value;
    }

    /// Sum of all components. For a `{0,1}` pattern this is its Hamming
    /// weight, the "magnitude" used by the vigilance test.
    pub fn magnitude(&self) -> f64 {
        self.data.iter().map(|&v| f64::from(v)).sum()
    }

    /// Borrow the underlying values.
    pub fn as_slice(&self) -> &[i32] {
        &self.data
    }

    /// Overwrite this pattern with the contents of `other`.
    ///
    /// # Panics
    /// Panics if the lengths differ.
    pub fn copy_from(&mut self, other: &Pattern) {
        self.data.copy_from_slice(&other.data);
    }
}
