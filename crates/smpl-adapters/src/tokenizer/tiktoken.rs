//! cl100k_base token counting through `tiktoken-rs`.

use once_cell::sync::OnceCell;
use smpl_core::application::ports::{ExactTokenizer, TokenizerError};
use tiktoken_rs::CoreBPE;
use tracing::{debug, warn};

/// Exact counter for the GPT tokenizer family.
///
/// The vocabulary is built on first use and kept for the lifetime of the
/// instance. A failed build is not cached, so a later call tries again.
/// Share one instance behind an `Arc` rather than building several.
#[derive(Default)]
pub struct TiktokenCounter {
    bpe: OnceCell<CoreBPE>,
}

impl TiktokenCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the vocabulary has been built.
    pub fn is_loaded(&self) -> bool {
        self.bpe.get().is_some()
    }

    fn bpe(&self) -> Result<&CoreBPE, TokenizerError> {
        self.bpe.get_or_try_init(|| {
            debug!("Loading cl100k_base vocabulary");
            tiktoken_rs::cl100k_base().map_err(|e| {
                warn!(error = %e, "Failed to load cl100k_base vocabulary");
                TokenizerError::Init(e.to_string())
            })
        })
    }
}

impl ExactTokenizer for TiktokenCounter {
    fn count(&self, text: &str) -> Result<usize, TokenizerError> {
        if text.is_empty() {
            return Ok(0);
        }
        Ok(self.bpe()?.encode_with_special_tokens(text).len())
    }
}

impl std::fmt::Debug for TiktokenCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TiktokenCounter")
            .field("loaded", &self.is_loaded())
            .finish()
    }
}
