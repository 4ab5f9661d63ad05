//! Long-form markdown specifications.

use crate::domain::entities::{AppSchema, PromptSchema};

/// Closing section appended to every expanded application spec.
const ARCHITECTURE_FOOTER: &str = "## Technical Architecture

### Frontend
- Component-based UI with typed props
- Responsive layouts for every page
- Client-side routing between pages

### Backend
- One endpoint or handler per action
- Server-side validation of all inputs
- Authentication guard on protected pages

### Database
- One table or collection per data model
- Versioned schema migrations
- Indexes on lookup fields";

pub fn to_expanded_markdown(schema: &AppSchema) -> String {
    let mut lines: Vec<String> = vec![
        format!("# {}", schema.app_name),
        String::new(),
        format!("**Platform:** {}", schema.platform),
        String::new(),
        format!("**Description:** {}", schema.description),
        String::new(),
    ];

    if !schema.pages.is_empty() {
        lines.push("## Pages".into());
        lines.push(String::new());
        for page in &schema.pages {
            lines.push(format!("### {} ({})", page.title, page.id));
            lines.push(format!("- **Type:** {}", page.kind));
            lines.push(format!("- **Components:** {}", page.components.join(", ")));
            if page.auth_required {
                lines.push("- **Authentication:** Required".into());
            }
            lines.push(String::new());
        }
    }

    if !schema.data_models.is_empty() {
        lines.push("## Data Models".into());
        lines.push(String::new());
        for model in &schema.data_models {
            lines.push(format!("### {}", model.name));
            for field in &model.fields {
                let presence = if field.optional { "optional" } else { "required" };
                lines.push(format!("- **{}:** {} ({presence})", field.name, field.kind));
            }
            lines.push(String::new());
        }
    }

    if !schema.actions.is_empty() {
        lines.push("## Actions".into());
        lines.push(String::new());
        for action in &schema.actions {
            lines.push(format!("### {}", action.name));
            lines.push(format!("- **Trigger:** {}", action.trigger.join(", ")));
            lines.push("- **Steps:**".into());
            for (i, step) in action.steps.iter().enumerate() {
                lines.push(format!("  {}. {step}", i + 1));
            }
            lines.push(String::new());
        }
    }

    lines.push(ARCHITECTURE_FOOTER.into());
    lines.join("\n")
}

pub fn to_prompt_markdown(schema: &PromptSchema) -> String {
    let mut lines: Vec<String> = vec![
        format!("# {}", schema.task),
        String::new(),
        format!("**Intent:** {}", schema.intent),
        String::new(),
    ];

    if let Some(context) = schema.context() {
        lines.push(format!("**Context:** {context}"));
        lines.push(String::new());
    }

    if !schema.entities.is_empty() {
        lines.push("## Entities".into());
        lines.push(String::new());
        for entity in &schema.entities {
            lines.push(format!("### {}", entity.name));
            lines.push(format!("- **Type:** {}", entity.kind));
            lines.push(format!("- **Description:** {}", entity.description));
            lines.push(String::new());
        }
    }

    if !schema.steps.is_empty() {
        lines.push("## Steps".into());
        lines.push(String::new());
        for (i, step) in schema.steps.iter().enumerate() {
            lines.push(format!("{}. {step}", i + 1));
        }
        lines.push(String::new());
    }

    if !schema.constraints.is_empty() {
        lines.push("## Constraints".into());
        lines.push(String::new());
        for constraint in &schema.constraints {
            lines.push(format!("- {constraint}"));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Action, DataModel, Entity, Field, Page};
    use crate::domain::value_objects::Platform;

    #[test]
    fn authentication_line_only_for_protected_pages() {
        let schema = AppSchema::new("A", Platform::Web)
            .with_page(Page::new("login", "form", "Login"))
            .with_page(Page::new("dash", "dashboard", "Dashboard").protected());
        let md = to_expanded_markdown(&schema);

        assert_eq!(md.matches("- **Authentication:** Required").count(), 1);
        let dash = md.find("### Dashboard (dash)").unwrap();
        assert!(md[dash..].contains("- **Authentication:** Required"));
    }

    #[test]
    fn field_presence_words() {
        let schema = AppSchema::new("A", Platform::Web).with_model(
            DataModel::new("Task")
                .with_field(Field::new("title", "string"))
                .with_field(Field::new("due", "date").optional()),
        );
        let md = to_expanded_markdown(&schema);
        assert!(md.contains("- **title:** string (required)"));
        assert!(md.contains("- **due:** date (optional)"));
    }

    #[test]
    fn actions_list_numbered_steps_and_joined_triggers() {
        let schema = AppSchema::new("A", Platform::Web)
            .with_action(Action::new("Save", ["click", "shortcut"]).with_steps(["validate", "store"]));
        let md = to_expanded_markdown(&schema);
        assert!(md.contains("- **Trigger:** click, shortcut\n- **Steps:**\n  1. validate\n  2. store"));
    }

    #[test]
    fn empty_sections_omitted_footer_kept() {
        let md = to_expanded_markdown(&AppSchema::new("A", Platform::Web));
        assert!(!md.contains("## Pages"));
        assert!(!md.contains("## Data Models"));
        assert!(!md.contains("## Actions"));
        assert!(md.ends_with(ARCHITECTURE_FOOTER));
    }

    #[test]
    fn prompt_markdown_sections() {
        let schema = PromptSchema::new("Build login", "auth")
            .with_entity(Entity::new("Form", "component", "inputs"))
            .with_step("one")
            .with_constraint("fast");
        let md = to_prompt_markdown(&schema);
        assert!(md.starts_with("# Build login\n\n**Intent:** auth\n\n## Entities"));
        assert!(md.contains("1. one"));
        assert!(md.contains("## Constraints\n\n- fast"));
        assert!(!md.contains("**Context:**"));
    }
}
