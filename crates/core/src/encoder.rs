//! Text -> bitstream encoding.
//!
//! Two modes share one code table type:
//!
//! - **Fixed**: one character per code word. Any character without an entry
//!   fails the call.
//! - **Greedy**: at each position, try the longest substring the table could
//!   hold (`max_symbol_len` characters, or fewer near the end), then shorter
//!   ones down to a single character, and emit the first hit. The cursor
//!   advances by the matched length.
//!
//! Greedy matching is linear but not optimal: it never searches for the
//! token split with the fewest total bits. Positions in errors are character
//! offsets into the input, not byte offsets.
//!
//! Neither mode normalizes case; callers that fold case when building the
//! alphabet must fold the input the same way.

use crate::bitstream::Bitstream;
use crate::codes::CodeTable;
use crate::error::{EncodeError, Result};

/// Tokenization strategy for [`encode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncodeMode {
    /// Single characters only
    #[default]
    Fixed,
    /// Longest-match over variable-length symbols
    Greedy,
}

/// Encode `text` with the given mode.
pub fn encode(text: &str, table: &CodeTable, mode: EncodeMode) -> Result<Bitstream> {
    match mode {
        EncodeMode::Fixed => encode_fixed(text, table),
        EncodeMode::Greedy => encode_greedy(text, table),
    }
}

/// Encode one character at a time.
///
/// # Errors
/// `EncodeError::MissingCode` for the first character with no code word.
pub fn encode_fixed(text: &str, table: &CodeTable) -> Result<Bitstream> {
    let mut out = Bitstream::new();
    let mut buf = [0u8; 4];

    for (position, c) in text.chars().enumerate() {
        let symbol: &str = c.encode_utf8(&mut buf);
        let code = table.get(symbol).ok_or_else(|| EncodeError::MissingCode {
            symbol: symbol.to_string(),
            position,
        })?;
        out.extend_from(code);
    }

    Ok(out)
}

/// Encode by greedy longest match.
///
/// # Errors
/// `EncodeError::MissingCode` when not even the single character at the
/// cursor has a code word.
pub fn encode_greedy(text: &str, table: &CodeTable) -> Result<Bitstream> {
    // Byte offset of every char boundary, including the end of the string
    let boundaries: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();
    let char_count = boundaries.len() - 1;
    let max_len = table.max_symbol_len().max(1);

    let mut out = Bitstream::new();
    let mut position = 0;

    while position < char_count {
        let longest = max_len.min(char_count - position);

        let hit = (1..=longest).rev().find_map(|len| {
            let candidate = &text[boundaries[position]..boundaries[position + len]];
            table.get(candidate).map(|code| (len, code))
        });

        match hit {
            Some((len, code)) => {
                out.extend_from(code);
                position += len;
            }
            None => {
                return Err(EncodeError::MissingCode {
                    symbol: text[boundaries[position]..boundaries[position + 1]].to_string(),
                    position,
                }
                .into());
            }
        }
    }

    Ok(out)
}
