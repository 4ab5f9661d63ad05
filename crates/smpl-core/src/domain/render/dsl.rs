//! Compact notation.
//!
//! ```text
//! APP(TaskMaster){
//!   platform: web
//!   pages:
//!     home[feed]: header,task_list (protected)
//!   models:
//!     Task: title, done?:boolean
//!   actions:
//!     CreateTask: form.submit -> validate > insert
//! }
//! ```
//!
//! Sections with no elements are left out. The implicit field type `string`
//! is never written.

use crate::domain::entities::{AppSchema, DataModel, Field, PromptSchema};

const SECTION: &str = "  ";
const ITEM: &str = "    ";

pub fn to_dsl(schema: &AppSchema) -> String {
    let mut lines = vec![
        format!("APP({}){{", schema.app_name),
        format!("{SECTION}platform: {}", schema.platform),
    ];

    if !schema.pages.is_empty() {
        lines.push(format!("{SECTION}pages:"));
        for page in &schema.pages {
            let protected = if page.auth_required { " (protected)" } else { "" };
            lines.push(format!(
                "{ITEM}{}[{}]: {}{protected}",
                page.id,
                page.kind,
                page.components.join(",")
            ));
        }
    }

    if !schema.data_models.is_empty() {
        lines.push(format!("{SECTION}models:"));
        for model in &schema.data_models {
            lines.push(format!("{ITEM}{}: {}", model.name, model_fields(model)));
        }
    }

    if !schema.actions.is_empty() {
        lines.push(format!("{SECTION}actions:"));
        for action in &schema.actions {
            lines.push(format!(
                "{ITEM}{}: {} -> {}",
                action.name,
                action.trigger,
                action.steps.join(" > ")
            ));
        }
    }

    lines.push("}".to_string());
    lines.join("\n")
}

fn model_fields(model: &DataModel) -> String {
    model
        .fields
        .iter()
        .map(compact_field)
        .collect::<Vec<_>>()
        .join(", ")
}

fn compact_field(field: &Field) -> String {
    let mut out = field.name.clone();
    if field.optional {
        out.push('?');
    }
    if !field.has_implicit_type() {
        out.push(':');
        out.push_str(&field.kind);
    }
    out
}

pub fn to_prompt_dsl(schema: &PromptSchema) -> String {
    let mut lines = vec![
        format!("PROMPT({}){{", schema.task),
        format!("{SECTION}intent: {}", schema.intent),
    ];

    if let Some(context) = schema.context() {
        lines.push(format!("{SECTION}context: {context}"));
    }

    if !schema.entities.is_empty() {
        lines.push(format!("{SECTION}entities:"));
        for entity in &schema.entities {
            lines.push(format!(
                "{ITEM}{}[{}]: {}",
                entity.name, entity.kind, entity.description
            ));
        }
    }

    if !schema.steps.is_empty() {
        lines.push(format!("{SECTION}steps:"));
        for (i, step) in schema.steps.iter().enumerate() {
            lines.push(format!("{ITEM}{}. {step}", i + 1));
        }
    }

    if !schema.constraints.is_empty() {
        lines.push(format!("{SECTION}constraints:"));
        for constraint in &schema.constraints {
            lines.push(format!("{ITEM}- {constraint}"));
        }
    }

    lines.push("}".to_string());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Action, Entity, Page};
    use crate::domain::value_objects::Platform;

    #[test]
    fn field_notation() {
        assert_eq!(compact_field(&Field::new("title", "string")), "title");
        assert_eq!(compact_field(&Field::new("done", "boolean").optional()), "done?:boolean");
        assert_eq!(compact_field(&Field::new("note", "string").optional()), "note?");
        assert_eq!(compact_field(&Field::new("due", "date")), "due:date");
    }

    #[test]
    fn empty_sections_are_omitted() {
        let schema = AppSchema::new("Bare", Platform::Mobile);
        assert_eq!(to_dsl(&schema), "APP(Bare){\n  platform: mobile\n}");
    }

    #[test]
    fn protected_page_and_multi_trigger() {
        let schema = AppSchema::new("A", Platform::Web)
            .with_page(Page::new("dash", "dashboard", "Dashboard").with_components(["chart"]).protected())
            .with_action(Action::new("Sync", ["page.load", "button.click"]).with_steps(["fetch"]));

        let dsl = to_dsl(&schema);
        assert!(dsl.contains("    dash[dashboard]: chart (protected)\n"));
        assert!(dsl.contains("    Sync: page.load|button.click -> fetch\n"));
        assert!(!dsl.ends_with('\n'));
    }

    #[test]
    fn page_without_components_keeps_separator() {
        let schema = AppSchema::new("A", Platform::Web).with_page(Page::new("x", "blank", "X"));
        assert!(to_dsl(&schema).contains("    x[blank]: \n"));
    }

    #[test]
    fn prompt_dsl_layout() {
        let schema = PromptSchema::new("Build login", "Let users sign in")
            .with_context("Existing React app")
            .with_entity(Entity::new("LoginForm", "component", "email and password"))
            .with_step("Create form")
            .with_step("Wire submit")
            .with_constraint("No external auth");

        assert_eq!(
            to_prompt_dsl(&schema),
            "PROMPT(Build login){\n  intent: Let users sign in\n  context: Existing React app\n  entities:\n    LoginForm[component]: email and password\n  steps:\n    1. Create form\n    2. Wire submit\n  constraints:\n    - No external auth\n}"
        );
    }

    #[test]
    fn prompt_dsl_skips_blank_context() {
        let schema = PromptSchema::new("t", "i").with_context("");
        assert_eq!(to_prompt_dsl(&schema), "PROMPT(t){\n  intent: i\n}");
    }
}
