//! Token accounting across tokenizer families.
//!
//! GPT-family tools are counted exactly through the injected
//! [`ExactTokenizer`]. Claude-family tools, and any call where the exact
//! tokenizer fails, fall back to the length approximations in
//! `domain::tokens`. A failure degrades that one call only; the next call
//! tries the exact tokenizer again.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::application::ports::ExactTokenizer;
use crate::domain::tokens::{approximate_count, approximate_input_count};
use crate::domain::{TokenCount, TokenStats, TokenizerFamily};

#[derive(Clone)]
pub struct TokenAccountant {
    exact: Option<Arc<dyn ExactTokenizer>>,
}

impl TokenAccountant {
    pub fn new(exact: Arc<dyn ExactTokenizer>) -> Self {
        Self { exact: Some(exact) }
    }

    /// An accountant with no exact tokenizer; every count is approximate.
    pub fn approximate_only() -> Self {
        Self { exact: None }
    }

    /// Count generated text (JSON, DSL, exports).
    pub fn count(&self, text: &str, family: TokenizerFamily) -> TokenCount {
        self.count_with(text, family, approximate_count)
    }

    /// Count the user's raw input. The approximation is word-based.
    pub fn count_input(&self, text: &str, family: TokenizerFamily) -> TokenCount {
        self.count_with(text, family, approximate_input_count)
    }

    /// Counts for input, JSON and DSL, plus input-versus-DSL savings.
    pub fn stats(&self, input: &str, json: &str, dsl: &str, family: TokenizerFamily) -> TokenStats {
        let stats = TokenStats::new(
            self.count_input(input, family),
            self.count(json, family),
            self.count(dsl, family),
        );
        debug!(
            input = stats.input.count,
            json = stats.json.count,
            dsl = stats.dsl.count,
            exact = stats.dsl.exact,
            "Token stats computed"
        );
        stats
    }

    fn count_with(
        &self,
        text: &str,
        family: TokenizerFamily,
        approximate: fn(&str) -> usize,
    ) -> TokenCount {
        if family.has_exact_tokenizer() {
            if let Some(exact) = &self.exact {
                match exact.count(text) {
                    Ok(count) => return TokenCount::exact(count),
                    Err(e) => warn!(error = %e, "Exact tokenizer failed, approximating"),
                }
            }
        }
        TokenCount::approximate(approximate(text))
    }
}

impl std::fmt::Debug for TokenAccountant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenAccountant")
            .field("exact", &self.exact.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{MockExactTokenizer, TokenizerError};

    #[test]
    fn gpt_family_uses_exact_tokenizer() {
        let mut mock = MockExactTokenizer::new();
        mock.expect_count().returning(|_| Ok(7));
        let accountant = TokenAccountant::new(Arc::new(mock));

        assert_eq!(
            accountant.count("anything", TokenizerFamily::Gpt),
            TokenCount::exact(7)
        );
    }

    #[test]
    fn claude_family_never_touches_exact_tokenizer() {
        let mut mock = MockExactTokenizer::new();
        mock.expect_count().never();
        let accountant = TokenAccountant::new(Arc::new(mock));

        assert_eq!(
            accountant.count("abcdefgh", TokenizerFamily::Claude),
            TokenCount::approximate(2)
        );
        assert_eq!(
            accountant.count_input("two words", TokenizerFamily::Claude),
            TokenCount::approximate(3)
        );
    }

    #[test]
    fn init_failure_degrades_single_call() {
        let mut mock = MockExactTokenizer::new();
        let mut seq = mockall::Sequence::new();
        mock.expect_count()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(TokenizerError::Init("no vocab".into())));
        mock.expect_count()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(3));
        let accountant = TokenAccountant::new(Arc::new(mock));

        assert_eq!(
            accountant.count("abcdefgh", TokenizerFamily::Gpt),
            TokenCount::approximate(2)
        );
        assert_eq!(
            accountant.count("abcdefgh", TokenizerFamily::Gpt),
            TokenCount::exact(3)
        );
    }

    #[test]
    fn approximate_only_accountant() {
        let accountant = TokenAccountant::approximate_only();
        let stats = accountant.stats("one two three four", "{}", "APP(x){}", TokenizerFamily::Gpt);
        assert!(!stats.input.exact);
        assert_eq!(stats.input.count, 6);
        assert_eq!(stats.dsl.count, 2);
    }
}
