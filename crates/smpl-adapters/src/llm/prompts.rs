//! Chat prompts sent to the language model.

use smpl_core::{
    application::ports::{EnhanceRequest, NormalizeRequest},
    domain::{ExportTool, Mode, registry::find_tool},
};

const APP_SYSTEM: &str = r#"You convert any project description into one application schema.

The input can be prose, bullet points, JSON (valid or broken), YAML, SQL,
a Prisma schema, TypeScript, React components or a mix of these.
Infer pages, data models and actions. Infer field types and page types when
they are missing. Reply with the JSON object only, no commentary.

{
  "app_name": string,
  "platform": "web" | "mobile" | "fullstack",
  "description": string,
  "pages": [{ "id": string, "type": string, "title": string, "components": [string], "auth_required": boolean }],
  "data_models": [{ "name": string, "fields": [{ "name": string, "type": string, "optional": boolean }] }],
  "actions": [{ "name": string, "trigger": string, "steps": [string] }]
}"#;

const PROMPT_SYSTEM: &str = r#"You restructure any prompt into one prompt schema.

Find the main task and the goal behind it. List the entities involved with a
type (feature, component, data, tool, concept). Break the work into ordered
steps. Collect every constraint. Add short context only when it helps.
Reply with the JSON object only, no commentary.

{
  "task": string,
  "intent": string,
  "entities": [{ "name": string, "type": string, "description": string }],
  "steps": [string],
  "constraints": [string],
  "context": string
}"#;

pub(super) const SHRINK_SYSTEM: &str = r#"You compress prompts into SMPL DSL.

SMPL DSL uses APP(name){ ... } or PROMPT(task){ ... } blocks with sections
such as pages, models, actions, entities, steps and constraints.
Abbreviate freely (str, num, opt, req), use ? for optional, ! for required,
-> for flow and | for alternatives. Drop filler words and articles.
Keep every piece of information a builder needs. Reply with the DSL only."#;

pub(super) const EXPAND_SYSTEM: &str = r#"You expand compact SMPL DSL into a complete prompt for an AI coding tool.

Read every page, model, action, entity and step in the DSL and describe it in
the format the target tool works best with. Every feature you describe must be
reachable from the user interface; never describe a function nothing calls.
Reply with the prompt only."#;

fn subject(mode: Mode) -> &'static str {
    match mode {
        Mode::App => "application description",
        Mode::Prompt => "prompt",
    }
}

pub(super) fn enhance_system(request: &EnhanceRequest) -> String {
    let subject = subject(request.mode);
    let names = request
        .enhancements
        .iter()
        .map(|e| e.label())
        .collect::<Vec<_>>()
        .join(", ");
    let instructions = request
        .enhancements
        .iter()
        .map(|e| format!("{}: {}", e.label(), e.instructions()))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "You add modern UI/UX improvements to the {subject} you are given.

Rules:
1. Keep every functional requirement exactly as written.
2. List the functional features first, unchanged.
3. Then add one \"UI/UX Enhancements\" section covering all of: {names}.
4. Describe each enhancement once, at a high level. Never repeat it per feature.
5. Name no libraries, CSS classes or animation parameters.
6. Be concise.

Enhancements to apply:
{instructions}

Reply with the enhanced {subject} only, without commentary."
    )
}

pub(super) fn enhance_user(request: &EnhanceRequest, text: &str) -> String {
    format!(
        "Original {}:\n{text}\n\nAdd the requested UI/UX enhancements as a separate section after the unchanged functional requirements.",
        subject(request.mode)
    )
}

pub(super) fn normalize_system(mode: Mode) -> &'static str {
    match mode {
        Mode::App => APP_SYSTEM,
        Mode::Prompt => PROMPT_SYSTEM,
    }
}

pub(super) fn normalize_user(request: &NormalizeRequest, text: &str) -> String {
    match request.mode {
        Mode::App => format!(
            "Input Type: {}\n\nInput Content:\n{text}\n\nConvert this into the application schema. Return only JSON.",
            request.input_kind.label()
        ),
        Mode::Prompt => format!(
            "Input Type: {}\n\nInput Prompt:\n{text}\n\nConvert this into the prompt schema. Return only JSON.",
            request.input_kind.label()
        ),
    }
}

pub(super) fn shrink_user(dsl: &str, tool: ExportTool) -> String {
    let strategy = tool.strategy();
    format!(
        "Tool: {tool}\nCompression Strategy: {strategy}\nStrategy Description: {}\n\nInput to compress:\n{dsl}\n\nCompress this into SMPL DSL using the {strategy} strategy for {}.",
        strategy.description(),
        tool.label()
    )
}

pub(super) fn expand_user(dsl: &str, tool: ExportTool) -> String {
    let hint = find_tool(tool).map(|def| def.expansion_hint).unwrap_or_default();
    format!(
        "Tool: {tool}\nExpansion Format: {}\nFormat Description: {hint}\n\nCompact SMPL input:\n{dsl}\n\nExpand this into a full prompt for {}.",
        tool.style(),
        tool.label()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use smpl_core::domain::Enhancement;

    #[test]
    fn shrink_prompt_names_strategy() {
        let prompt = shrink_user("APP(x){}", ExportTool::V0);
        assert!(prompt.starts_with("Tool: v0\nCompression Strategy: aggressive\n"));
        assert!(prompt.contains("APP(x){}"));
    }

    #[test]
    fn expand_prompt_uses_tool_hint() {
        let prompt = expand_user("APP(x){}", ExportTool::Replit);
        assert!(prompt.contains("Expansion Format: directory-first"));
        assert!(prompt.contains("directory structure"));
    }

    #[test]
    fn enhance_prompt_lists_every_selection() {
        let request = EnhanceRequest {
            text: "notes".into(),
            mode: Mode::Prompt,
            enhancements: vec![Enhancement::ScrollAnimations, Enhancement::TextAnimations],
        };
        let system = enhance_system(&request);
        assert!(system.starts_with("You add modern UI/UX improvements to the prompt you"));
        assert!(system.contains("covering all of: Scroll animations, Text animations."));
        assert!(system.contains(Enhancement::TextAnimations.instructions()));
        assert!(enhance_user(&request, "notes").starts_with("Original prompt:\nnotes"));
    }

    #[test]
    fn normalize_prompt_carries_input_kind() {
        let request = NormalizeRequest::new("CREATE TABLE users (id int)", Mode::App);
        let prompt = normalize_user(&request, &request.text);
        assert!(prompt.starts_with("Input Type: SQL"));
        assert_eq!(normalize_system(Mode::Prompt), PROMPT_SYSTEM);
    }
}
