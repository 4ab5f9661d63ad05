//! Application-mode export templates.

use super::fenced;
use crate::domain::entities::AppSchema;
use crate::domain::value_objects::{ExportStyle, ExportTool};

/// Flattened bullet lists shared by every template, in schema order.
pub(super) struct Lists {
    context: String,
    pages: String,
    models: String,
    actions: String,
}

impl Lists {
    pub(super) fn of(schema: &AppSchema) -> Self {
        let context = format!(
            "App: {}\nPlatform: {}\nDescription: {}",
            schema.app_name, schema.platform, schema.description
        );

        let pages = schema
            .pages
            .iter()
            .map(|p| format!("- {} ({}): {}", p.title, p.kind, p.components.join(", ")))
            .collect::<Vec<_>>()
            .join("\n");

        let models = schema
            .data_models
            .iter()
            .map(|m| {
                let fields = m
                    .fields
                    .iter()
                    .map(|f| {
                        let mark = if f.optional { "?" } else { "" };
                        format!("{}{mark}: {}", f.name, f.kind)
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("- {}: {fields}", m.name)
            })
            .collect::<Vec<_>>()
            .join("\n");

        let actions = schema
            .actions
            .iter()
            .map(|a| format!("- {}: {} -> {}", a.name, a.trigger, a.steps.join(" > ")))
            .collect::<Vec<_>>()
            .join("\n");

        Self {
            context,
            pages,
            models,
            actions,
        }
    }
}

pub(super) fn render(
    lists: &Lists,
    schema: &AppSchema,
    dsl: &str,
    json: &str,
    tool: ExportTool,
) -> String {
    let heading = format!("# {} - {}", tool.label(), style_title(tool.style()));
    let body = match tool.style() {
        ExportStyle::FileCentric => file_centric(lists, schema, dsl),
        ExportStyle::Contextual => contextual(lists, schema, dsl, json),
        ExportStyle::SingleTask => single_task(lists, json),
        ExportStyle::MinimalComponent => minimal_component(lists),
        ExportStyle::DirectoryFirst => directory_first(lists, schema, dsl),
        ExportStyle::Structured => structured(lists, json),
        ExportStyle::Guide => guide(lists, dsl, json),
    };
    format!("{heading}\n\n{}\n\n{body}", lists.context)
}

fn style_title(style: ExportStyle) -> &'static str {
    match style {
        ExportStyle::FileCentric => "File-Based Implementation",
        ExportStyle::Contextual => "Comprehensive Implementation",
        ExportStyle::SingleTask => "Full-Stack Application",
        ExportStyle::MinimalComponent => "UI Component Design",
        ExportStyle::DirectoryFirst => "Step-by-Step Implementation",
        ExportStyle::Structured => "Structured Implementation",
        ExportStyle::Guide => "Detailed Implementation Guide",
    }
}

fn file_centric(lists: &Lists, schema: &AppSchema, dsl: &str) -> String {
    let mut files: Vec<String> = schema
        .pages
        .iter()
        .map(|p| format!("File: src/pages/{}.tsx", p.id))
        .collect();
    files.extend(
        schema
            .data_models
            .iter()
            .map(|m| format!("File: src/types/{}.ts", m.name.to_lowercase())),
    );

    [
        format!("## Project Structure\nCreate these files:\n{}", files.join("\n")),
        format!("## SMPL Specification\n{}", fenced("", dsl)),
        "## Implementation Guide\nFor every file:\n\
         - Strict TypeScript types\n\
         - Functional components with hooks\n\
         - Explicit imports and exports\n\
         - Error boundaries around async views"
            .to_string(),
        format!("Pages:\n{}", lists.pages),
        format!("Data models:\n{}", lists.models),
        format!("Actions:\n{}", lists.actions),
        "Keep each file focused and the types shared.".to_string(),
    ]
    .join("\n\n")
}

fn contextual(lists: &Lists, schema: &AppSchema, dsl: &str, json: &str) -> String {
    [
        format!(
            "## Overview\nA {} application to be built from scratch.",
            schema.platform
        ),
        format!("## Full Schema\n{}", fenced("json", json)),
        format!("## SMPL Notation\n{}", fenced("", dsl)),
        format!(
            "## Requirements\n\n### Pages\n{}\n\n### Data Models\n{}\n\n### User Actions\n{}",
            lists.pages, lists.models, lists.actions
        ),
        "## Approach\n\
         1. Lay out the folder structure\n\
         2. Declare interfaces for every data model\n\
         3. Build shared components, then pages\n\
         4. Choose and wire state management\n\
         5. Add loading and error states to every async path\n\
         6. Keep types strict end to end\n\
         7. Document non-obvious decisions\n\
         8. Check every layout on small screens"
            .to_string(),
        "## Practices\n\
         - Hooks over class components\n\
         - Error boundaries at route level\n\
         - Accessible markup and labels\n\
         - Validate every user input\n\
         - No `any`"
            .to_string(),
    ]
    .join("\n\n")
}

fn single_task(lists: &Lists, json: &str) -> String {
    [
        "## Stack\n\
         - Vite, React, TypeScript\n\
         - Tailwind CSS\n\
         - React Hook Form with Zod validation\n\
         - Hooks or Zustand for state"
            .to_string(),
        format!("## Schema\n{}", fenced("json", json)),
        format!(
            "## Build\n\nPages:\n{}\n\nData Models:\n{}\n\nActions:\n{}",
            lists.pages, lists.models, lists.actions
        ),
        "## Done When\n\
         - Every page renders on mobile and desktop\n\
         - Every form validates before submit\n\
         - Async work shows loading and error states\n\
         - The app builds and deploys without warnings"
            .to_string(),
        "Ship it as one complete, deployable application.".to_string(),
    ]
    .join("\n\n")
}

fn minimal_component(lists: &Lists) -> String {
    [
        "## Design Brief\nModern components built on shadcn/ui and Tailwind CSS.".to_string(),
        format!("## Pages & Components\n{}", lists.pages),
        "## Visual Guidelines\n\
         - Clean layout with clear hierarchy\n\
         - Subtle transitions and hover states\n\
         - Consistent spacing and type scale\n\
         - Contrast that passes accessibility checks"
            .to_string(),
        "## For Each Page\n\
         - Layout shell\n\
         - Interactive elements with feedback\n\
         - Forms with inline validation\n\
         - Lists, cards or tables for data\n\
         - Skeletons while loading"
            .to_string(),
        "Start from shadcn/ui primitives and adapt them to this app.".to_string(),
    ]
    .join("\n\n")
}

fn directory_first(lists: &Lists, schema: &AppSchema, dsl: &str) -> String {
    let order = schema
        .pages
        .iter()
        .enumerate()
        .map(|(i, p)| format!("{}. {} - {}", i + 1, p.title, p.components.join(", ")))
        .collect::<Vec<_>>()
        .join("\n");

    [
        format!("## SMPL\n{}", fenced("", dsl)),
        format!(
            "## File Structure\n{}",
            fenced("", "src/\n  components/\n  pages/\n  types/\n  hooks/\n  utils/")
        ),
        "## Plan\n\n### Step 1: Setup\n\
         - Create the project and install React and TypeScript\n\
         - Add build and lint configuration"
            .to_string(),
        format!("### Step 2: Data Models\nDeclare interfaces:\n{}", lists.models),
        "### Step 3: Shared Components\nBuild reusable pieces before any page.".to_string(),
        format!("### Step 4: Pages\nIn this order:\n{order}"),
        format!("### Step 5: Actions\nImplement:\n{}", lists.actions),
        "### Step 6: Integrate & Test\n\
         - Connect pages to actions\n\
         - Walk through each user flow\n\
         - Fix what breaks"
            .to_string(),
        "Finish each step before starting the next.".to_string(),
    ]
    .join("\n\n")
}

fn structured(lists: &Lists, json: &str) -> String {
    [
        format!(
            "## Structure\n\n### Pages\n{}\n\n### Data Models\n{}\n\n### Actions\n{}",
            lists.pages, lists.models, lists.actions
        ),
        format!("## Schema\n{}", fenced("json", json)),
        "## Checklist\n\
         1. Strict TypeScript throughout\n\
         2. Every page with its listed components\n\
         3. Every data model as a typed interface\n\
         4. Every action wired to state\n\
         5. Error handling on all async calls\n\
         6. Responsive layouts\n\
         7. Validated forms\n\
         8. Error boundaries"
            .to_string(),
        "Match the schema exactly.".to_string(),
    ]
    .join("\n\n")
}

fn guide(lists: &Lists, dsl: &str, json: &str) -> String {
    [
        format!(
            "## Specification\n\n### Schema\n{}\n\n### SMPL Notation\n{}",
            fenced("json", json),
            fenced("", dsl)
        ),
        format!(
            "## Breakdown\n\n### Pages\n{}\n\nEvery listed component belongs on its page and must work.\n\n\
             ### Data Models\n{}\n\nGive each model a TypeScript interface.\n\n\
             ### Actions\n{}\n\nEach action updates state and tells the user what happened.",
            lists.pages, lists.models, lists.actions
        ),
        "## Strategy\n\
         1. **Architecture**: separate data, logic and presentation\n\
         2. **Types**: interfaces for every structure\n\
         3. **Components**: small and composable\n\
         4. **State**: local first, shared only when needed\n\
         5. **Errors**: messages a user can act on\n\
         6. **Performance**: memoize hot paths only\n\
         7. **Accessibility**: WCAG AA\n\
         8. **Testing**: logic testable without the UI"
            .to_string(),
        "## Quality Bar\n\
         - Descriptive names\n\
         - Comments only where logic is subtle\n\
         - Loading states for async work\n\
         - Clear validation feedback"
            .to_string(),
    ]
    .join("\n\n")
}
