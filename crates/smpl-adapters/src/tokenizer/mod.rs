//! Exact tokenizer implementations.

mod tiktoken;

pub use tiktoken::TiktokenCounter;
