//! Language model implementations.

mod openai;
mod prompts;
mod rate_limit;
mod scripted;

pub use openai::{OpenAiClient, OpenAiConfig};
pub use rate_limit::RateLimiter;
pub use scripted::ScriptedModel;

/// Strip one surrounding markdown code fence, if the model added one.
fn unfence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // Drop the info string (`json`, `text`, ...) on the opening line.
    match body.split_once('\n') {
        Some((_, inner)) => inner.trim(),
        None => body.trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::unfence;

    #[test]
    fn unfence_variants() {
        assert_eq!(unfence("  APP(x){}  "), "APP(x){}");
        assert_eq!(unfence("```\nAPP(x){}\n```"), "APP(x){}");
        assert_eq!(unfence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(unfence("```unterminated"), "```unterminated");
    }
}
