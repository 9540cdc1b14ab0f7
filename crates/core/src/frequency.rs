//! Frequency models: turning raw text into an [`Alphabet`].
//!
//! Two models are provided:
//! - [`char_frequencies`]: one symbol per distinct character, in order of
//!   first appearance, case preserved.
//! - [`ngram_alphabet`]: every 1-gram, plus the 2- and 3-grams whose share of
//!   all n-grams of their length reaches a percentage threshold. The text is
//!   upper-cased first unless `fold_case` is off.
//!
//! Counting is overlapping: `"AAA"` holds two `"AA"` bigrams.

use crate::alphabet::Alphabet;
use crate::error::{Error, Result};
use std::borrow::Cow;
use std::collections::HashMap;

/// Longest n-gram a model may include.
pub const MAX_NGRAM: usize = 3;

/// Tunables for [`ngram_alphabet`].
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyConfig {
    /// Longest n-gram to include (1..=3)
    pub max_ngram: usize,

    /// Minimum share, in percent, for n-grams with n >= 2
    pub threshold_percent: f64,

    /// Upper-case text before counting
    pub fold_case: bool,
}

impl Default for FrequencyConfig {
    fn default() -> Self {
        Self {
            max_ngram: MAX_NGRAM,
            threshold_percent: 1.0,
            fold_case: true,
        }
    }
}

impl FrequencyConfig {
    /// Apply this model's case folding to `text`.
    ///
    /// Inputs encoded against an n-gram alphabet must go through the same
    /// folding as the corpus did.
    pub fn normalize<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if self.fold_case {
            Cow::Owned(text.to_uppercase())
        } else {
            Cow::Borrowed(text)
        }
    }

    fn validate(&self) -> Result<()> {
        if !(1..=MAX_NGRAM).contains(&self.max_ngram) {
            return Err(Error::Config(format!(
                "max_ngram must be within 1..={MAX_NGRAM}, got {}",
                self.max_ngram
            )));
        }
        if !self.threshold_percent.is_finite() || self.threshold_percent < 0.0 {
            return Err(Error::Config(format!(
                "threshold_percent must be a non-negative number, got {}",
                self.threshold_percent
            )));
        }
        Ok(())
    }
}

/// Count and share of one n-gram.
#[derive(Debug, Clone, PartialEq)]
pub struct NgramCount {
    pub symbol: String,
    pub count: u64,
    /// Share of all n-grams of this length, rounded to 2 decimals
    pub percentage: f64,
}

/// Count each character of `text`, in order of first appearance.
///
/// # Errors
/// `AlphabetError::Empty` for empty text.
pub fn char_frequencies(text: &str) -> Result<Alphabet> {
    let mut index: HashMap<char, usize> = HashMap::new();
    let mut counts: Vec<(String, u64)> = Vec::new();

    for c in text.chars() {
        match index.get(&c) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(c, counts.len());
                counts.push((c.to_string(), 1));
            }
        }
    }

    Alphabet::from_counts(counts)
}

/// All overlapping `n`-grams of `text`, most frequent first.
///
/// Ties keep first-appearance order. `text` is used as given; no folding.
pub fn ngram_frequencies(text: &str, n: usize) -> Vec<NgramCount> {
    let chars: Vec<char> = text.chars().collect();
    if n == 0 || chars.len() < n {
        return Vec::new();
    }

    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<(String, u64)> = Vec::new();

    for window in chars.windows(n) {
        let gram: String = window.iter().collect();
        match index.get(&gram) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(gram.clone(), counts.len());
                counts.push((gram, 1));
            }
        }
    }

    let total = (chars.len() - n + 1) as f64;

    // Stable sort keeps first appearance among equal counts
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    counts
        .into_iter()
        .map(|(symbol, count)| NgramCount {
            symbol,
            count,
            percentage: round2(count as f64 / total * 100.0),
        })
        .collect()
}

/// Build an n-gram alphabet from `corpus`.
///
/// Order: 1-grams, then accepted 2-grams, then accepted 3-grams, each group
/// most frequent first.
///
/// # Errors
/// - `Error::Config` for an out-of-range `max_ngram` or threshold
/// - `AlphabetError::Empty` for an empty corpus
pub fn ngram_alphabet(corpus: &str, config: &FrequencyConfig) -> Result<Alphabet> {
    config.validate()?;
    let text = config.normalize(corpus);

    let mut pairs: Vec<(String, u64)> = Vec::new();
    for n in 1..=config.max_ngram {
        pairs.extend(
            ngram_frequencies(&text, n)
                .into_iter()
                .filter(|g| n == 1 || g.percentage >= config.threshold_percent)
                .map(|g| (g.symbol, g.count)),
        );
    }

    Alphabet::from_counts(pairs)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AlphabetError;

    fn symbols(alphabet: &Alphabet) -> Vec<&str> {
        alphabet.entries().iter().map(|e| e.symbol.as_str()).collect()
    }

    #[test]
    fn test_char_frequencies() {
        let alphabet = char_frequencies("kyou mo kawaii").unwrap();

        assert_eq!(
            symbols(&alphabet),
            vec!["k", "y", "o", "u", " ", "m", "a", "w", "i"]
        );
        assert_eq!(alphabet.frequency("k"), Some(2.0));
        assert_eq!(alphabet.frequency("i"), Some(2.0));
        assert_eq!(alphabet.frequency("a"), Some(2.0));
        assert_eq!(alphabet.total_frequency(), 14.0);
    }

    #[test]
    fn test_char_frequencies_empty() {
        assert!(matches!(
            char_frequencies(""),
            Err(Error::Alphabet(AlphabetError::Empty))
        ));
    }

    #[test]
    fn test_ngram_counts_overlap() {
        let grams = ngram_frequencies("AAAB", 2);
        assert_eq!(grams.len(), 2);
        assert_eq!(grams[0].symbol, "AA");
        assert_eq!(grams[0].count, 2);
        assert_eq!(grams[0].percentage, 66.67);
        assert_eq!(grams[1].symbol, "AB");
        assert_eq!(grams[1].percentage, 33.33);
    }

    #[test]
    fn test_ngram_ties_keep_first_appearance() {
        let grams = ngram_frequencies("BCA", 1);
        let order: Vec<_> = grams.iter().map(|g| g.symbol.as_str()).collect();
        assert_eq!(order, vec!["B", "C", "A"]);
    }

    #[test]
    fn test_ngram_short_text() {
        assert!(ngram_frequencies("AB", 3).is_empty());
        assert!(ngram_frequencies("AB", 0).is_empty());
    }

    #[test]
    fn test_ngram_alphabet_threshold() {
        // 2-grams of "THE THE": TH x2, HE x2, "E " x1, " T" x1 over 6 windows
        let config = FrequencyConfig {
            max_ngram: 2,
            threshold_percent: 20.0,
            fold_case: true,
        };
        let alphabet = ngram_alphabet("the the", &config).unwrap();

        assert_eq!(symbols(&alphabet), vec!["T", "H", "E", " ", "TH", "HE"]);
        assert_eq!(alphabet.frequency("TH"), Some(2.0));
    }

    #[test]
    fn test_ngram_alphabet_without_folding() {
        let config = FrequencyConfig {
            max_ngram: 1,
            fold_case: false,
            ..FrequencyConfig::default()
        };
        let alphabet = ngram_alphabet("aA", &config).unwrap();
        assert_eq!(symbols(&alphabet), vec!["a", "A"]);
    }

    #[test]
    fn test_ngram_alphabet_default_includes_trigrams() {
        let alphabet = ngram_alphabet("abcabcabc", &FrequencyConfig::default()).unwrap();
        assert_eq!(alphabet.max_symbol_len(), 3);
        assert!(alphabet.frequency("ABC").is_some());
        assert!(alphabet.frequency("abc").is_none());
    }

    #[test]
    fn test_invalid_config() {
        let config = FrequencyConfig {
            max_ngram: 4,
            ..FrequencyConfig::default()
        };
        assert!(matches!(ngram_alphabet("abc", &config), Err(Error::Config(_))));

        let config = FrequencyConfig {
            threshold_percent: -1.0,
            ..FrequencyConfig::default()
        };
        assert!(matches!(ngram_alphabet("abc", &config), Err(Error::Config(_))));
    }

    #[test]
    fn test_normalize() {
        let config = FrequencyConfig::default();
        assert_eq!(config.normalize("Keep Out"), "KEEP OUT");

        let config = FrequencyConfig {
            fold_case: false,
            ..FrequencyConfig::default()
        };
        assert!(matches!(config.normalize("x"), Cow::Borrowed("x")));
    }
}
