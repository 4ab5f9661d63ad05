//! Export prompt synthesis.
//!
//! Turns a canonical schema (plus its already-rendered DSL and JSON) into the
//! instruction prompt a particular coding assistant works best with. Which
//! template a tool gets is decided by its
//! [`ExportStyle`](crate::domain::value_objects::ExportStyle) in the registry.
//!
//! Synthesis is pure: the same inputs always produce the same text, and it
//! cannot fail.

mod app;
mod prompt;

use std::collections::BTreeMap;

use crate::domain::entities::{AppSchema, PromptSchema};
use crate::domain::registry::all_tools;
use crate::domain::value_objects::ExportTool;

/// One export prompt per tool. Iterates in registry order.
pub type ExportPrompts = BTreeMap<ExportTool, String>;

/// Render the application export prompt for `tool`.
pub fn synthesize(schema: &AppSchema, dsl: &str, json: &str, tool: ExportTool) -> String {
    app::render(&app::Lists::of(schema), schema, dsl, json, tool)
}

/// Render the prompt-mode export prompt for `tool`.
pub fn synthesize_prompt(schema: &PromptSchema, dsl: &str, json: &str, tool: ExportTool) -> String {
    prompt::render(&prompt::Lists::of(schema), schema, dsl, json, tool)
}

/// Render the application export prompt for every registered tool.
pub fn synthesize_all(schema: &AppSchema, dsl: &str, json: &str) -> ExportPrompts {
    let lists = app::Lists::of(schema);
    all_tools()
        .map(|tool| (tool, app::render(&lists, schema, dsl, json, tool)))
        .collect()
}

/// Render the prompt-mode export prompt for every registered tool.
pub fn synthesize_all_prompt(schema: &PromptSchema, dsl: &str, json: &str) -> ExportPrompts {
    let lists = prompt::Lists::of(schema);
    all_tools()
        .map(|tool| (tool, prompt::render(&lists, schema, dsl, json, tool)))
        .collect()
}

fn fenced(lang: &str, body: &str) -> String {
    format!("```{lang}\n{body}\n```")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Action, DataModel, Entity, Field, Page};
    use crate::domain::render;
    use crate::domain::value_objects::Platform;
    use std::collections::HashSet;

    fn schema() -> AppSchema {
        AppSchema::new("TaskMaster", Platform::Web)
            .with_description("Track tasks")
            .with_page(Page::new("home", "feed", "Home").with_components(["header", "task_list"]))
            .with_model(DataModel::new("Task").with_field(Field::new("done", "boolean").optional()))
            .with_action(Action::new("CreateTask", "form.submit").with_steps(["validate", "insert"]))
    }

    #[test]
    fn every_app_export_names_the_app() {
        let s = schema();
        let exports =
            synthesize_all(&s, &render::to_dsl(&s), &render::to_canonical_json(&s));
        assert_eq!(exports.len(), 7);
        for (tool, text) in &exports {
            assert!(text.contains("TaskMaster"), "{tool} export lacks app name");
        }
    }

    #[test]
    fn exports_differ_per_tool() {
        let s = schema();
        let exports =
            synthesize_all(&s, &render::to_dsl(&s), &render::to_canonical_json(&s));
        let distinct: HashSet<_> = exports.values().collect();
        assert_eq!(distinct.len(), exports.len());
    }

    #[test]
    fn registry_order_is_preserved() {
        let s = schema();
        let exports = synthesize_all(&s, "", "");
        let order: Vec<_> = exports.keys().copied().collect();
        assert_eq!(order, all_tools().collect::<Vec<_>>());
    }

    #[test]
    fn synthesis_is_deterministic() {
        let s = schema();
        let dsl = render::to_dsl(&s);
        let json = render::to_canonical_json(&s);
        for tool in all_tools() {
            assert_eq!(
                synthesize(&s, &dsl, &json, tool),
                synthesize(&s, &dsl, &json, tool)
            );
        }
    }

    #[test]
    fn every_prompt_export_names_the_task() {
        let p = PromptSchema::new("Build a login page", "auth")
            .with_entity(Entity::new("LoginForm", "component", "email + password"))
            .with_step("Create form")
            .with_constraint("Accessible");
        let dsl = render::to_prompt_dsl(&p);
        let json = render::to_prompt_json(&p);
        for (tool, text) in synthesize_all_prompt(&p, &dsl, &json) {
            assert!(text.contains("Build a login page"), "{tool} export lacks task");
        }
    }
}
