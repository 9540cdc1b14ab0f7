//! Symbol alphabets: ordered (symbol, frequency) tables.
//!
//! An [`Alphabet`] is the only input the tree builder accepts. It is validated
//! once on construction, so everything downstream can assume:
//! - at least one symbol
//! - every symbol is a non-empty string
//! - every frequency is finite and non-negative
//! - no symbol appears twice
//!
//! Insertion order is preserved. It is part of the input: two alphabets with
//! the same entries in a different order may produce different (equally
//! optimal) trees, because order drives the builder's tie-break tags.

use crate::error::{AlphabetError, Result};
use std::collections::HashSet;

/// One (symbol, frequency) record.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyEntry {
    /// A character or n-gram
    pub symbol: String,

    /// Occurrence count or weight
    pub frequency: f64,
}

impl FrequencyEntry {
    pub fn new(symbol: impl Into<String>, frequency: f64) -> Self {
        Self {
            symbol: symbol.into(),
            frequency,
        }
    }
}

/// A validated, ordered frequency table.
#[derive(Debug, Clone, PartialEq)]
pub struct Alphabet {
    entries: Vec<FrequencyEntry>,
}

impl Alphabet {
    /// Validate and wrap a list of entries.
    ///
    /// # Errors
    /// - `AlphabetError::Empty` if `entries` is empty
    /// - `AlphabetError::EmptySymbol` for a zero-length symbol
    /// - `AlphabetError::InvalidFrequency` for negative, NaN or infinite weights
    /// - `AlphabetError::DuplicateSymbol` if a symbol repeats
    pub fn new(entries: Vec<FrequencyEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(AlphabetError::Empty.into());
        }

        let mut seen = HashSet::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            if entry.symbol.is_empty() {
                return Err(AlphabetError::EmptySymbol { index }.into());
            }
            if !entry.frequency.is_finite() || entry.frequency < 0.0 {
                return Err(AlphabetError::InvalidFrequency {
                    symbol: entry.symbol.clone(),
                    frequency: entry.frequency,
                }
                .into());
            }
            if !seen.insert(entry.symbol.as_str()) {
                return Err(AlphabetError::DuplicateSymbol {
                    symbol: entry.symbol.clone(),
                }
                .into());
            }
        }

        Ok(Self { entries })
    }

    /// Build from `(symbol, frequency)` pairs.
    pub fn from_pairs<S, I>(pairs: I) -> Result<Self>
    where
        S: Into<String>,
        I: IntoIterator<Item = (S, f64)>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(symbol, frequency)| FrequencyEntry::new(symbol, frequency))
                .collect(),
        )
    }

    /// Build from integer counts.
    pub fn from_counts<S, I>(pairs: I) -> Result<Self>
    where
        S: Into<String>,
        I: IntoIterator<Item = (S, u64)>,
    {
        Self::from_pairs(pairs.into_iter().map(|(s, c)| (s, c as f64)))
    }

    pub fn entries(&self) -> &[FrequencyEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a constructed alphabet; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up the frequency of a symbol.
    pub fn frequency(&self, symbol: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.symbol == symbol)
            .map(|e| e.frequency)
    }

    /// Sum of all frequencies.
    pub fn total_frequency(&self) -> f64 {
        self.entries.iter().map(|e| e.frequency).sum()
    }

    /// Length in characters of the longest symbol.
    pub fn max_symbol_len(&self) -> usize {
        self.entries
            .iter()
            .map(|e| e.symbol.chars().count())
            .max()
            .unwrap_or(0)
    }
}
