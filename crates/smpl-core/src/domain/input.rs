//! Classification of raw freeform input.
//!
//! The detected kind is a hint for the normalization call and a column in the
//! history record. It never changes how the canonical schema is rendered.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

fn pattern(src: &str) -> Regex {
    Regex::new(src).unwrap_or_else(|e| panic!("BUG: invalid detection pattern {src:?}: {e}"))
}

static PRISMA_MODEL: Lazy<Regex> = Lazy::new(|| pattern(r"model\s+\w+\s*\{"));
static SQL_STATEMENT: Lazy<Regex> =
    Lazy::new(|| pattern(r"(?i)CREATE\s+TABLE|SELECT\s+|INSERT\s+INTO|ALTER\s+TABLE"));
static JSX_TAG: Lazy<Regex> = Lazy::new(|| pattern(r"<[A-Z]\w*[\s>]"));
static CODE_KEYWORD: Lazy<Regex> = Lazy::new(|| {
    pattern(r"\b(class|function|const|let|var|import|export|interface|type)\b")
});
static YAML_PAIR: Lazy<Regex> = Lazy::new(|| pattern(r"(?m)^\w+:\s*.+$"));

/// The shape of the text the user pasted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Json,
    Prisma,
    Sql,
    Jsx,
    Code,
    Yaml,
    Text,
}

impl InputKind {
    /// Classify `text`. Checks run in a fixed order and the first hit wins.
    pub fn detect(text: &str) -> Self {
        let trimmed = text.trim();

        if trimmed.starts_with('{') || trimmed.starts_with('[') {
            Self::Json
        } else if PRISMA_MODEL.is_match(trimmed) {
            Self::Prisma
        } else if SQL_STATEMENT.is_match(trimmed) {
            Self::Sql
        } else if JSX_TAG.is_match(trimmed) {
            Self::Jsx
        } else if CODE_KEYWORD.is_match(trimmed) {
            Self::Code
        } else if trimmed.contains('\n') && YAML_PAIR.is_match(trimmed) {
            Self::Yaml
        } else {
            Self::Text
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Prisma => "prisma",
            Self::Sql => "sql",
            Self::Jsx => "jsx",
            Self::Code => "code",
            Self::Yaml => "yaml",
            Self::Text => "text",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Prisma => "Prisma Schema",
            Self::Sql => "SQL",
            Self::Jsx => "React Component",
            Self::Code => "TypeScript/JavaScript",
            Self::Yaml => "YAML",
            Self::Text => "Natural Language",
        }
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_each_kind() {
        assert_eq!(InputKind::detect("  {\"app\": 1}"), InputKind::Json);
        assert_eq!(InputKind::detect("[1, 2]"), InputKind::Json);
        assert_eq!(
            InputKind::detect("model User {\n id Int @id\n}"),
            InputKind::Prisma
        );
        assert_eq!(
            InputKind::detect("create table users (id int)"),
            InputKind::Sql
        );
        assert_eq!(
            InputKind::detect("return <LoginForm onSubmit={x} />"),
            InputKind::Jsx
        );
        assert_eq!(
            InputKind::detect("interface User { name: string }"),
            InputKind::Code
        );
        assert_eq!(
            InputKind::detect("name: todo\nplatform: web"),
            InputKind::Yaml
        );
        assert_eq!(
            InputKind::detect("A todo app where users track tasks"),
            InputKind::Text
        );
    }

    #[test]
    fn single_line_pair_is_text() {
        assert_eq!(InputKind::detect("note: buy milk"), InputKind::Text);
    }

    #[test]
    fn order_decides_overlaps() {
        // Prisma models also contain words the code check would match.
        assert_eq!(
            InputKind::detect("model Post {\n  type String\n}"),
            InputKind::Prisma
        );
    }

    #[test]
    fn labels() {
        assert_eq!(InputKind::Text.label(), "Natural Language");
        assert_eq!(InputKind::Sql.label(), "SQL");
    }
}
