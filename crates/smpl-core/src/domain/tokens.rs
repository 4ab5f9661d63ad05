//! Token counts, savings arithmetic and the token report.
//!
//! Exact counting needs a BPE vocabulary and lives behind the
//! `ExactTokenizer` port. The approximations here are pure functions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Characters per token for the length-based approximation.
const CHARS_PER_TOKEN: f64 = 4.0;

/// Tokens per whitespace-separated word for the input approximation.
const TOKENS_PER_WORD: f64 = 1.3;

/// `ceil(chars / 4)`.
pub fn approximate_count(text: &str) -> usize {
    (text.chars().count() as f64 / CHARS_PER_TOKEN).ceil() as usize
}

/// `ceil(words * 1.3)`. Empty or all-whitespace text is zero words.
pub fn approximate_input_count(text: &str) -> usize {
    (text.split_whitespace().count() as f64 * TOKENS_PER_WORD).ceil() as usize
}

/// A token count and whether it came from a real tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TokenCount {
    pub count: usize,
    pub exact: bool,
}

impl TokenCount {
    pub const fn exact(count: usize) -> Self {
        Self { count, exact: true }
    }

    pub const fn approximate(count: usize) -> Self {
        Self {
            count,
            exact: false,
        }
    }

    pub const fn qualifier(&self) -> &'static str {
        if self.exact { "exact" } else { "approximate" }
    }
}

impl fmt::Display for TokenCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} tokens ({})", self.count, self.qualifier())
    }
}

/// How many tokens a rewrite saved. Negative when it grew.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TokenSavings {
    pub savings: i64,
    /// Percent of `before`, rounded to one decimal place.
    pub percent: f64,
}

impl TokenSavings {
    pub fn between(before: usize, after: usize) -> Self {
        let savings = before as i64 - after as i64;
        let percent = if before == 0 {
            0.0
        } else {
            (savings as f64 / before as f64 * 1000.0).round() / 10.0
        };
        Self { savings, percent }
    }
}

/// Token counts for one rendering of one input.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TokenStats {
    pub input: TokenCount,
    pub json: TokenCount,
    pub dsl: TokenCount,
    /// Input versus DSL.
    pub savings: TokenSavings,
}

impl TokenStats {
    pub fn new(input: TokenCount, json: TokenCount, dsl: TokenCount) -> Self {
        Self {
            input,
            json,
            dsl,
            savings: TokenSavings::between(input.count, dsl.count),
        }
    }

    /// Plain-text report, as shown after a generation.
    pub fn report(&self) -> String {
        format!(
            "Token Analysis\n\nOriginal Prompt: {}\nJSON Format: {}\nSMPL Compact: {}\n\nSavings: {} tokens ({:.1}%)",
            self.input, self.json, self.dsl, self.savings.savings, self.savings.percent
        )
    }
}
