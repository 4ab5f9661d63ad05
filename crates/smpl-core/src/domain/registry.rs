//! Export tool registry.
//!
//! Every export tool is described exactly once by its [`ToolDef`]: display
//! label, export style, tokenizer family, shrink strategy and the format hint
//! used when expanding a DSL back into prose. Everything per-tool that is not
//! template text derives from this table.
//!
//! # Adding a New Tool
//!
//! 1. Add a variant to [`ExportTool`] in `value_objects.rs`
//! 2. Add one [`ToolDef`] entry to [`TOOL_REGISTRY`]
//! 3. Add its template arms in `export/app.rs` and `export/prompt.rs`

use crate::domain::value_objects::{CompressionStrategy, ExportStyle, ExportTool, TokenizerFamily};

/// Describes everything the domain needs to know about one export tool.
#[derive(Debug, Clone, Copy)]
pub struct ToolDef {
    pub tool: ExportTool,

    /// Human-facing name, used in headings and listings.
    pub label: &'static str,

    /// One-line summary shown by `smpl tools`.
    pub description: &'static str,

    pub style: ExportStyle,

    /// Which tokenizer counts this tool's tokens.
    pub family: TokenizerFamily,

    /// How the shrink call compresses a DSL for this tool.
    pub strategy: CompressionStrategy,

    /// How the expand call should lay out the expanded prompt.
    pub expansion_hint: &'static str,
}

/// Single source of truth for export tools, in presentation order.
///
/// `synthesize_all` and `smpl tools` both iterate this table front to back.
pub static TOOL_REGISTRY: &[ToolDef] = &[
    ToolDef {
        tool: ExportTool::Cursor,
        label: "Cursor",
        description: "File-based implementation with explicit paths",
        style: ExportStyle::FileCentric,
        family: TokenizerFamily::Gpt,
        strategy: CompressionStrategy::ReduceNarrative,
        expansion_hint: "Expand into file-based structure with explicit paths and code blocks",
    },
    ToolDef {
        tool: ExportTool::Claude,
        label: "Claude Code",
        description: "Comprehensive implementation with full context",
        style: ExportStyle::Contextual,
        family: TokenizerFamily::Claude,
        strategy: CompressionStrategy::Structured,
        expansion_hint: "Expand with full context, detailed descriptions, and clear sections",
    },
    ToolDef {
        tool: ExportTool::Bolt,
        label: "Bolt.new",
        description: "Full-stack application as one build task",
        style: ExportStyle::SingleTask,
        family: TokenizerFamily::Gpt,
        strategy: CompressionStrategy::Atomic,
        expansion_hint: "Expand into a single clear task description with tech stack",
    },
    ToolDef {
        tool: ExportTool::V0,
        label: "v0.dev",
        description: "UI component design",
        style: ExportStyle::MinimalComponent,
        family: TokenizerFamily::Gpt,
        strategy: CompressionStrategy::Aggressive,
        expansion_hint: "Expand into minimal JSON with component focus",
    },
    ToolDef {
        tool: ExportTool::Replit,
        label: "Replit Agent",
        description: "Step-by-step implementation plan",
        style: ExportStyle::DirectoryFirst,
        family: TokenizerFamily::Gpt,
        strategy: CompressionStrategy::Procedural,
        expansion_hint: "Expand with directory structure and step-by-step implementation",
    },
    ToolDef {
        tool: ExportTool::OpenAi,
        label: "OpenAI",
        description: "Structured checklist implementation",
        style: ExportStyle::Structured,
        family: TokenizerFamily::Gpt,
        strategy: CompressionStrategy::Balanced,
        expansion_hint: "Expand with clear structure and detailed requirements",
    },
    ToolDef {
        tool: ExportTool::Anthropic,
        label: "Anthropic Claude",
        description: "Detailed implementation guide",
        style: ExportStyle::Guide,
        family: TokenizerFamily::Claude,
        strategy: CompressionStrategy::Structured,
        expansion_hint: "Expand with full context, detailed descriptions, and clear sections",
    },
];

// ── Registry lookup API ──────────────────────────────────────────────────────

/// Find the definition for a tool.
///
/// Returns `None` only if the tool is not registered, which
/// `assert_registry_integrity` rules out.
pub fn find_tool(tool: ExportTool) -> Option<&'static ToolDef> {
    TOOL_REGISTRY.iter().find(|def| def.tool == tool)
}

/// All registered tools, in registry order.
pub fn all_tools() -> impl Iterator<Item = ExportTool> {
    TOOL_REGISTRY.iter().map(|def| def.tool)
}

/// Tokenizer family for a tool. Unregistered tools count approximately.
pub fn family_of(tool: ExportTool) -> TokenizerFamily {
    find_tool(tool)
        .map(|def| def.family)
        .unwrap_or(TokenizerFamily::Claude)
}

pub fn strategy_of(tool: ExportTool) -> CompressionStrategy {
    find_tool(tool)
        .map(|def| def.strategy)
        .unwrap_or(CompressionStrategy::Balanced)
}

impl ExportTool {
    pub fn family(&self) -> TokenizerFamily {
        family_of(*self)
    }

    pub fn strategy(&self) -> CompressionStrategy {
        strategy_of(*self)
    }

    pub fn label(&self) -> &'static str {
        find_tool(*self).map(|def| def.label).unwrap_or(self.as_str())
    }

    pub fn style(&self) -> ExportStyle {
        find_tool(*self)
            .map(|def| def.style)
            .unwrap_or(ExportStyle::Structured)
    }
}

/// Assert that the registry is internally consistent.
///
/// Panics with a clear message on any violation. Call it from a test.
#[doc(hidden)]
pub fn assert_registry_integrity() {
    for (i, def) in TOOL_REGISTRY.iter().enumerate() {
        assert!(
            TOOL_REGISTRY[..i].iter().all(|other| other.tool != def.tool),
            "Tool {:?} is registered twice",
            def.tool
        );
        assert!(!def.label.is_empty(), "Tool {:?} has no label", def.tool);
    }

    for tool in [
        ExportTool::Cursor,
        ExportTool::Claude,
        ExportTool::Bolt,
        ExportTool::V0,
        ExportTool::Replit,
        ExportTool::OpenAi,
        ExportTool::Anthropic,
    ] {
        assert!(find_tool(tool).is_some(), "Tool {tool:?} is not registered");
    }
}
