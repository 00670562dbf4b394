//! Filename tokenizer.
//!
//! Splits a filename stem into alternating text and number blocks:
//! `"cells_Z004_C1"` becomes texts `["cells_Z", "_C", ""]` and numbers
//! `[4, 1]`. There is always exactly one more text block than numbers, so
//! `texts[0] + numbers[0] + texts[1] + ... + texts[n]` spells the stem again
//! (modulo leading zeros, which are not retained).

/// Alternating text/number decomposition of a filename stem.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FilenameTokens {
    texts: Vec<String>,
    numbers: Vec<u64>,
}

impl FilenameTokens {
    /// Tokenize a stem (a filename with directory and extension removed).
    pub fn parse(stem: &str) -> Self {
        let mut texts = Vec::new();
        let mut numbers = Vec::new();
        let mut text_start = 0;
        let mut chars = stem.char_indices().peekable();

        while let Some((start, ch)) = chars.next() {
            if !ch.is_ascii_digit() {
                continue;
            }

            let mut end = start + 1;
            while let Some(&(pos, next)) = chars.peek() {
                if !next.is_ascii_digit() {
                    break;
                }
                end = pos + 1;
                chars.next();
            }

            texts.push(stem[text_start..start].to_string());
            numbers.push(parse_number(&stem[start..end]));
            text_start = end;
        }

        texts.push(stem[text_start..].to_string());

        Self { texts, numbers }
    }

    /// Non-numeric blocks; always `numbers().len() + 1` entries.
    pub fn texts(&self) -> &[String] {
        &self.texts
    }

    /// Numeric blocks in filename order.
    pub fn numbers(&self) -> &[u64] {
        &self.numbers
    }

    /// Number of numeric blocks.
    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    /// Whether the stem contains no digits.
    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }

    /// The text block immediately preceding numeric block `position`.
    pub fn text_before(&self, position: usize) -> Option<&str> {
        if position < self.numbers.len() {
            self.texts.get(position).map(String::as_str)
        } else {
            None
        }
    }

    /// Whether both stems share the same text blocks, compared case-insensitively.
    pub fn same_texts(&self, other: &FilenameTokens) -> bool {
        self.texts.len() == other.texts.len()
            && self
                .texts
                .iter()
                .zip(&other.texts)
                .all(|(a, b)| a.to_lowercase() == b.to_lowercase())
    }
}

/// Digit runs too long for `u64` saturate to `u64::MAX`.
fn parse_number(digits: &str) -> u64 {
    digits.parse().unwrap_or(u64::MAX)
}

// =============================================================================
// Tests
// =============================================================================
