//! Prompt-mode export templates.

use super::fenced;
use crate::domain::entities::PromptSchema;
use crate::domain::value_objects::{ExportStyle, ExportTool};

pub(super) struct Lists {
    entities: String,
    steps: String,
    constraints: String,
}

impl Lists {
    pub(super) fn of(schema: &PromptSchema) -> Self {
        Self {
            entities: schema
                .entities
                .iter()
                .map(|e| format!("- {}: {}", e.name, e.description))
                .collect::<Vec<_>>()
                .join("\n"),
            steps: schema
                .steps
                .iter()
                .enumerate()
                .map(|(i, s)| format!("{}. {s}", i + 1))
                .collect::<Vec<_>>()
                .join("\n"),
            constraints: schema
                .constraints
                .iter()
                .map(|c| format!("- {c}"))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

pub(super) fn render(
    lists: &Lists,
    schema: &PromptSchema,
    dsl: &str,
    json: &str,
    tool: ExportTool,
) -> String {
    let heading = format!("# {} - {}", tool.label(), style_title(tool.style()));
    let task = format!("## Task\n{}", schema.task);
    let body = match tool.style() {
        ExportStyle::FileCentric => [
            fenced("", dsl),
            format!("## Specification\n{}", fenced("json", json)),
            format!("## Breakdown\n{}", lists.steps),
            "## Approach\n\
             - One file per concern, typed\n\
             - Functional components\n\
             - Errors handled where they occur"
                .to_string(),
            format!("Constraints:\n{}", lists.constraints),
        ]
        .join("\n\n"),
        ExportStyle::Contextual => [
            format!("## Intent\n{}", schema.intent),
            format!("## Specification\n{}", fenced("json", json)),
            format!("## Steps\n{}", lists.steps),
            format!("## Entities\n{}", lists.entities),
            format!("## Constraints\n{}", lists.constraints),
            "## Guidelines\n\
             1. Separate concerns cleanly\n\
             2. Keep types strict\n\
             3. Validate inputs and handle failures\n\
             4. Cover the edge cases named above"
                .to_string(),
        ]
        .join("\n\n"),
        ExportStyle::SingleTask => [
            format!("## Steps\n{}", lists.steps),
            "## Stack\n- Vite, React, TypeScript\n- Tailwind CSS\n- React Hook Form with Zod"
                .to_string(),
            format!("## Requirements\n{}", lists.constraints),
            format!("## Entities\n{}", lists.entities),
            "Deliver it working end to end, with loading and error states.".to_string(),
        ]
        .join("\n\n"),
        ExportStyle::MinimalComponent => [
            format!("## Components\n{}", lists.entities),
            "## Design\n\
             - shadcn/ui and Tailwind CSS\n\
             - Smooth transitions\n\
             - Responsive at every width"
                .to_string(),
            format!("## Steps\n{}", lists.steps),
            format!("## Constraints\n{}", lists.constraints),
        ]
        .join("\n\n"),
        ExportStyle::DirectoryFirst => [
            fenced("", dsl),
            "## Plan\n\n### Step 1: Setup\nCreate the project and install dependencies."
                .to_string(),
            format!("### Step 2: Implement\n{}", lists.steps),
            format!("### Step 3: Entities\n{}", lists.entities),
            format!("### Step 4: Constraints\n{}", lists.constraints),
            "### Step 5: Test\nRun every flow and fix what breaks.".to_string(),
        ]
        .join("\n\n"),
        ExportStyle::Structured => [
            format!("## Specification\n{}", fenced("json", json)),
            format!("## Steps\n{}", lists.steps),
            format!("## Entities\n{}", lists.entities),
            format!("## Constraints\n{}", lists.constraints),
            "## Standards\n- Strict typing\n- Handled errors\n- Validated forms".to_string(),
        ]
        .join("\n\n"),
        ExportStyle::Guide => [
            format!("## Intent\n{}", schema.intent),
            format!("## Full Specification\n{}", fenced("json", json)),
            format!(
                "## Plan\n\n### Steps\n{}\n\n### Entities\n{}\n\n### Constraints\n{}",
                lists.steps, lists.entities, lists.constraints
            ),
            "## Approach\n\
             1. **Architecture**: clear module boundaries\n\
             2. **Types**: definitions for every structure\n\
             3. **Errors**: feedback the user can act on\n\
             4. **Testing**: edge cases covered"
                .to_string(),
        ]
        .join("\n\n"),
    };
    format!("{heading}\n\n{task}\n\n{body}")
}

fn style_title(style: ExportStyle) -> &'static str {
    match style {
        ExportStyle::FileCentric => "File-Based Task",
        ExportStyle::Contextual => "Comprehensive Task",
        ExportStyle::SingleTask => "Full-Stack Task",
        ExportStyle::MinimalComponent => "UI Task",
        ExportStyle::DirectoryFirst => "Step-by-Step Task",
        ExportStyle::Structured => "Structured Task",
        ExportStyle::Guide => "Detailed Task Guide",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Entity;

    #[test]
    fn lists_number_steps_and_bullet_the_rest() {
        let schema = PromptSchema::new("t", "i")
            .with_entity(Entity::new("Form", "component", "inputs"))
            .with_step("a")
            .with_step("b")
            .with_constraint("fast");
        let lists = Lists::of(&schema);
        assert_eq!(lists.steps, "1. a\n2. b");
        assert_eq!(lists.entities, "- Form: inputs");
        assert_eq!(lists.constraints, "- fast");
    }

    #[test]
    fn v0_prompt_leads_with_components() {
        let schema = PromptSchema::new("Design cards", "i")
            .with_entity(Entity::new("Card", "component", "shows a product"));
        let text = render(&Lists::of(&schema), &schema, "DSL", "{}", ExportTool::V0);
        assert!(text.starts_with("# v0.dev - UI Task\n\n## Task\nDesign cards\n\n## Components\n- Card"));
    }
}
