use serde_json::{Map, Value};
use tracing::debug;

use crate::domain::{
    entities::{AppSchema, PromptSchema},
    error::DomainError,
    value_objects::Platform,
};

type Object = Map<String, Value>;

/// Structural validation at the ingestion boundary.
///
/// Only the top level is checked: required keys exist and have the right JSON
/// type. Elements inside `pages`, `data_models`, `actions` and `entities` are
/// taken as-is and coerced leniently during deserialization. Nothing here
/// panics; every failure is a [`DomainError`].
pub struct SchemaValidator;

impl SchemaValidator {
    /// Validate a candidate application schema and build the canonical form.
    pub fn validate_app(candidate: &Value) -> Result<AppSchema, DomainError> {
        let obj = as_object(candidate)?;

        let app_name = require_string(obj, &["app_name", "appName"])?;
        if app_name.trim().is_empty() {
            return Err(DomainError::invalid_schema("'app_name' must not be empty"));
        }
        require_string(obj, &["description"])?;

        let platform = require_string(obj, &["platform"])?;
        platform.parse::<Platform>().map_err(|_| {
            DomainError::invalid_schema(format!(
                "'platform' must be one of web, mobile, fullstack (got '{platform}')"
            ))
        })?;

        require_array(obj, &["pages"])?;
        require_array(obj, &["data_models", "dataModels"])?;
        require_array(obj, &["actions"])?;

        let schema: AppSchema = serde_json::from_value(candidate.clone())
            .map_err(|e| DomainError::invalid_schema(e.to_string()))?;

        let dupes = schema.duplicate_identifiers();
        if !dupes.is_empty() {
            debug!(duplicates = ?dupes, "Schema contains duplicate identifiers");
        }
        Ok(schema)
    }

    /// Validate a candidate prompt schema and build the canonical form.
    pub fn validate_prompt(candidate: &Value) -> Result<PromptSchema, DomainError> {
        let obj = as_object(candidate)?;

        require_string(obj, &["task"])?;
        require_string(obj, &["intent"])?;
        require_array(obj, &["entities"])?;
        require_array(obj, &["steps"])?;
        require_array(obj, &["constraints"])?;

        match obj.get("context") {
            None | Some(Value::Null) | Some(Value::String(_)) => {}
            Some(_) => {
                return Err(DomainError::invalid_schema(
                    "'context' must be a string when present",
                ));
            }
        }

        serde_json::from_value(candidate.clone())
            .map_err(|e| DomainError::invalid_schema(e.to_string()))
    }

    /// Parse raw JSON text, then validate it as an application schema.
    pub fn parse_app(text: &str) -> Result<AppSchema, DomainError> {
        let value: Value = serde_json::from_str(text)?;
        Self::validate_app(&value)
    }

    /// Parse raw JSON text, then validate it as a prompt schema.
    pub fn parse_prompt(text: &str) -> Result<PromptSchema, DomainError> {
        let value: Value = serde_json::from_str(text)?;
        Self::validate_prompt(&value)
    }
}

fn as_object(candidate: &Value) -> Result<&Object, DomainError> {
    candidate
        .as_object()
        .ok_or_else(|| DomainError::invalid_schema("expected a JSON object"))
}

/// First present key among `keys` (canonical name first, then aliases).
fn lookup<'a>(obj: &'a Object, keys: &[&'static str]) -> Option<&'a Value> {
    keys.iter().find_map(|k| obj.get(*k))
}

fn require_string<'a>(obj: &'a Object, keys: &[&'static str]) -> Result<&'a str, DomainError> {
    match lookup(obj, keys) {
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(DomainError::invalid_schema(format!(
            "'{}' must be a string",
            keys[0]
        ))),
        None => Err(DomainError::MissingRequiredField { field: keys[0] }),
    }
}

fn require_array(obj: &Object, keys: &[&'static str]) -> Result<(), DomainError> {
    match lookup(obj, keys) {
        Some(Value::Array(_)) => Ok(()),
        Some(_) => Err(DomainError::invalid_schema(format!(
            "'{}' must be an array",
            keys[0]
        ))),
        None => Err(DomainError::MissingRequiredField { field: keys[0] }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal_app() -> Value {
        json!({
            "app_name": "TaskMaster",
            "platform": "web",
            "description": "",
            "pages": [],
            "data_models": [],
            "actions": []
        })
    }

    #[test]
    fn accepts_minimal_app() {
        let schema = SchemaValidator::validate_app(&minimal_app()).unwrap();
        assert_eq!(schema.app_name, "TaskMaster");
        assert_eq!(schema.platform, Platform::Web);
    }

    #[test]
    fn rejects_non_object() {
        let err = SchemaValidator::validate_app(&json!([1, 2])).unwrap_err();
        assert_eq!(err, DomainError::invalid_schema("expected a JSON object"));
    }

    #[test]
    fn rejects_desktop_platform() {
        let mut v = minimal_app();
        v["platform"] = json!("desktop");
        assert!(matches!(
            SchemaValidator::validate_app(&v),
            Err(DomainError::InvalidSchema { .. })
        ));
    }

    #[test]
    fn rejects_empty_app_name() {
        let mut v = minimal_app();
        v["app_name"] = json!("  ");
        assert!(SchemaValidator::validate_app(&v).is_err());
    }

    #[test]
    fn rejects_non_array_pages() {
        let mut v = minimal_app();
        v["pages"] = json!("home");
        let err = SchemaValidator::validate_app(&v).unwrap_err();
        assert_eq!(err, DomainError::invalid_schema("'pages' must be an array"));
    }

    #[test]
    fn missing_collection_is_reported_by_name() {
        let mut v = minimal_app();
        v.as_object_mut().unwrap().remove("actions");
        assert_eq!(
            SchemaValidator::validate_app(&v).unwrap_err(),
            DomainError::MissingRequiredField { field: "actions" }
        );
    }

    #[test]
    fn accepts_camel_case_producer() {
        let v = json!({
            "appName": "Notes",
            "platform": "mobile",
            "description": "notes",
            "pages": [],
            "dataModels": [],
            "actions": []
        });
        assert_eq!(SchemaValidator::validate_app(&v).unwrap().app_name, "Notes");
    }

    #[test]
    fn prompt_context_must_be_string_or_null() {
        let mut v = json!({
            "task": "t", "intent": "i",
            "entities": [], "steps": [], "constraints": [],
            "context": null
        });
        assert!(SchemaValidator::validate_prompt(&v).is_ok());

        v["context"] = json!(5);
        assert!(SchemaValidator::validate_prompt(&v).is_err());
    }

    #[test]
    fn parse_reports_syntax_errors() {
        assert!(matches!(
            SchemaValidator::parse_app("{ not json"),
            Err(DomainError::MalformedJson { .. })
        ));
    }
}
