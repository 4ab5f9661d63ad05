//! End-to-end tests for the generation pipeline and the DSL lifecycle.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{Value, json};
use smpl_core::{
    application::ports::{EnhanceRequest, NormalizeRequest},
    domain::{
        SchemaValidator, TokenSavings, synthesize,
        render::{to_dsl, to_expanded_markdown},
    },
    prelude::*,
};

const TASKMASTER_DSL: &str = "APP(TaskMaster){
  platform: web
  pages:
    home[feed]: header,task-list
  models:
    Task: title, priority
  actions:
    CreateTask: form.submit -> validate > insert > refresh
}";

fn taskmaster() -> Value {
    json!({
        "appName": "TaskMaster",
        "platform": "web",
        "description": "",
        "pages": [{
            "id": "home",
            "type": "feed",
            "title": "Home",
            "components": ["header", "task-list"],
            "authRequired": false
        }],
        "dataModels": [{
            "name": "Task",
            "fields": [
                {"name": "title", "type": "string", "optional": false},
                {"name": "priority", "type": "string", "optional": false}
            ]
        }],
        "actions": [{
            "name": "CreateTask",
            "trigger": "form.submit",
            "steps": ["validate", "insert", "refresh"]
        }]
    })
}

/// Model double that returns a fixed candidate and a fixed rewrite.
struct FakeModel {
    candidate: Value,
    shrunk: String,
    calls: Mutex<Vec<String>>,
}

impl FakeModel {
    fn new(candidate: Value, shrunk: &str) -> Self {
        Self {
            candidate,
            shrunk: shrunk.to_string(),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LanguageModel for FakeModel {
    async fn normalize(&self, request: &NormalizeRequest) -> SmplResult<Value> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("normalize:{}", request.input_kind));
        Ok(self.candidate.clone())
    }

    async fn shrink(&self, _dsl: &str, tool: ExportTool) -> SmplResult<String> {
        self.calls.lock().unwrap().push(format!("shrink:{tool}"));
        Ok(self.shrunk.clone())
    }

    async fn expand(&self, dsl: &str, tool: ExportTool) -> SmplResult<String> {
        self.calls.lock().unwrap().push(format!("expand:{tool}"));
        Ok(format!("# Expanded for {tool}\n\n{dsl}"))
    }

    async fn enhance(&self, request: &EnhanceRequest) -> SmplResult<String> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("enhance:{}", request.enhancements.len()));
        Ok(request.text.clone())
    }
}

fn session_with(model: Arc<FakeModel>) -> SessionService {
    let generator = GenerationService::new(model, TokenAccountant::approximate_only());
    SessionService::new(Arc::new(generator))
}

#[test]
fn taskmaster_renders_expected_dsl() {
    let schema = SchemaValidator::validate_app(&taskmaster()).unwrap();
    assert_eq!(to_dsl(&schema), TASKMASTER_DSL);
}

#[test]
fn protected_page_marks_only_its_line() {
    let mut candidate = taskmaster();
    candidate["pages"][0]["authRequired"] = json!(true);
    let schema = SchemaValidator::validate_app(&candidate).unwrap();

    let dsl = to_dsl(&schema);
    let marked: Vec<&str> = dsl.lines().filter(|l| l.contains("(protected)")).collect();
    assert_eq!(marked, vec!["    home[feed]: header,task-list (protected)"]);
}

#[test]
fn empty_sections_are_omitted() {
    let mut candidate = taskmaster();
    candidate["dataModels"] = json!([]);
    candidate["actions"] = json!([]);
    let schema = SchemaValidator::validate_app(&candidate).unwrap();

    let dsl = to_dsl(&schema);
    assert!(dsl.contains("  pages:\n"));
    assert!(!dsl.contains("models:"));
    assert!(!dsl.contains("actions:"));
}

#[test]
fn field_suffixes_follow_type_and_optionality() {
    let mut candidate = taskmaster();
    candidate["dataModels"][0]["fields"] = json!([
        {"name": "title", "type": "string", "optional": false},
        {"name": "estimate", "type": "number", "optional": true},
        {"name": "notes", "type": "string", "required": false}
    ]);
    let schema = SchemaValidator::validate_app(&candidate).unwrap();

    assert!(to_dsl(&schema).contains("    Task: title, estimate?:number, notes?\n"));
}

#[test]
fn element_order_is_preserved_everywhere() {
    let mut candidate = taskmaster();
    candidate["pages"] = json!([
        {"id": "zeta", "type": "list", "title": "Zeta", "components": []},
        {"id": "alpha", "type": "list", "title": "Alpha", "components": []},
        {"id": "mid", "type": "list", "title": "Mid", "components": []}
    ]);
    let schema = SchemaValidator::validate_app(&candidate).unwrap();

    let dsl = to_dsl(&schema);
    let markdown = to_expanded_markdown(&schema);
    for text in [&dsl, &markdown] {
        let z = text.find("zeta").unwrap();
        let a = text.find("alpha").unwrap();
        let m = text.find("mid").unwrap();
        assert!(z < a && a < m);
    }
}

#[test]
fn rendering_is_idempotent() {
    let schema = CanonicalSchema::validate(Mode::App, &taskmaster()).unwrap();
    assert_eq!(schema.to_dsl(), schema.to_dsl());
    assert_eq!(schema.to_json(), schema.to_json());
    assert_eq!(schema.to_markdown(), schema.to_markdown());

    let dsl = schema.to_dsl();
    let json = schema.to_json();
    assert_eq!(schema.exports(&dsl, &json), schema.exports(&dsl, &json));
}

#[test]
fn savings_with_empty_input_is_zero() {
    let savings = TokenSavings::between(0, 12);
    assert_eq!(savings.percent, 0.0);
    assert!(savings.percent.is_finite());

    let accountant = TokenAccountant::approximate_only();
    let empty = accountant.count("", TokenizerFamily::Claude);
    assert_eq!(empty.count, 0);
    assert!(!empty.exact);
}

#[test]
fn exports_vary_by_tool_but_keep_app_name() {
    let schema = SchemaValidator::validate_app(&taskmaster()).unwrap();
    let dsl = to_dsl(&schema);
    let json = schema_json(&schema);

    let cursor = synthesize(&schema, &dsl, &json, ExportTool::Cursor);
    let v0 = synthesize(&schema, &dsl, &json, ExportTool::V0);
    assert_ne!(cursor, v0);
    assert!(cursor.contains("TaskMaster"));
    assert!(v0.contains("TaskMaster"));
}

fn schema_json(schema: &AppSchema) -> String {
    smpl_core::domain::render::to_canonical_json(schema)
}

#[tokio::test]
async fn generate_shrink_restore_round_trip() {
    let model = Arc::new(FakeModel::new(taskmaster(), "APP(TaskMaster){home,Task,CreateTask}"));
    let session = session_with(Arc::clone(&model));

    let Settled::Applied(generated) = session
        .generate("A task tracker with a feed", Mode::App, ExportTool::Cursor)
        .await
        .unwrap()
    else {
        panic!("generation was discarded");
    };
    assert_eq!(generated.dsl(), TASKMASTER_DSL);
    assert_eq!(generated.state, DslState::Pristine);

    let Settled::Applied(shrunk) = session.shrink(Mode::App, ExportTool::Cursor).await.unwrap()
    else {
        panic!("shrink was discarded");
    };
    assert_eq!(shrunk.state, DslState::Modified);
    assert_ne!(shrunk.dsl(), TASKMASTER_DSL);
    assert!(shrunk.stats.unwrap().dsl.count < generated.stats.unwrap().dsl.count);

    let restored = session.restore(Mode::App).unwrap();
    assert_eq!(restored.dsl().as_bytes(), generated.dsl().as_bytes());
    assert_eq!(restored.state, DslState::Pristine);

    assert_eq!(
        model.calls(),
        vec!["normalize:text".to_string(), "shrink:cursor".to_string()]
    );
}

#[tokio::test]
async fn expand_does_not_touch_the_dsl() {
    let model = Arc::new(FakeModel::new(taskmaster(), "unused"));
    let session = session_with(model);
    session
        .generate("tasks", Mode::App, ExportTool::Claude)
        .await
        .unwrap();

    let Settled::Applied(expanded) = session.expand(Mode::App, ExportTool::Claude).await.unwrap()
    else {
        panic!("expand was discarded");
    };
    assert_eq!(expanded.dsl(), TASKMASTER_DSL);
    assert_eq!(expanded.state, DslState::Pristine);
    assert!(expanded.slots.expanded.starts_with("# Expanded for claude"));
}

#[tokio::test]
async fn generation_result_carries_every_export() {
    let model = Arc::new(FakeModel::new(taskmaster(), "unused"));
    let service = GenerationService::new(model, TokenAccountant::approximate_only());

    let result = service
        .generate("model Task { id Int }", Mode::App, ExportTool::Replit)
        .await
        .unwrap();

    assert_eq!(result.input_kind, InputKind::Prisma);
    assert_eq!(result.slots.exports.len(), 7);
    assert!(result.slots.exports.values().all(|e| e.contains("TaskMaster")));
    assert!(result.token_stats.report().starts_with("Token Analysis\n\n"));
}
