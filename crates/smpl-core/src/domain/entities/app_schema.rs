//! Canonical application blueprint.
//!
//! `AppSchema` is the single source of truth every other format is derived
//! from. Sequence order is significant: the DSL, the expanded spec and every
//! export prompt present pages, models and actions in exactly this order.
//!
//! Deserialization accepts both producer shapes seen upstream (snake_case or
//! camelCase keys, `trigger` or `triggers`, `optional` or `required`) and
//! folds them into this one representation. Serialization always emits the
//! canonical snake_case shape.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer, ser::SerializeSeq};
use serde_json::Value;

use super::lenient;
use crate::domain::value_objects::Platform;

/// One application blueprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSchema {
    #[serde(alias = "appName")]
    pub app_name: String,
    pub platform: Platform,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::elements")]
    pub pages: Vec<Page>,
    #[serde(
        default,
        alias = "dataModels",
        deserialize_with = "lenient::elements"
    )]
    pub data_models: Vec<DataModel>,
    #[serde(default, deserialize_with = "lenient::elements")]
    pub actions: Vec<Action>,
}

impl AppSchema {
    /// Start an empty schema for the given app name and platform.
    pub fn new(app_name: impl Into<String>, platform: Platform) -> Self {
        Self {
            app_name: app_name.into(),
            platform,
            description: String::new(),
            pages: Vec::new(),
            data_models: Vec::new(),
            actions: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_page(mut self, page: Page) -> Self {
        self.pages.push(page);
        self
    }

    pub fn with_model(mut self, model: DataModel) -> Self {
        self.data_models.push(model);
        self
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    /// Identifiers that occur more than once across pages, models or actions.
    ///
    /// Duplicates are rendered as given; this exists for diagnostics only.
    pub fn duplicate_identifiers(&self) -> Vec<String> {
        fn dupes<'a>(ids: impl Iterator<Item = &'a str>, out: &mut Vec<String>) {
            let mut seen = std::collections::HashSet::new();
            for id in ids {
                if !seen.insert(id) && !out.iter().any(|d| d == id) {
                    out.push(id.to_string());
                }
            }
        }

        let mut out = Vec::new();
        dupes(self.pages.iter().map(|p| p.id.as_str()), &mut out);
        dupes(self.data_models.iter().map(|m| m.name.as_str()), &mut out);
        dupes(self.actions.iter().map(|a| a.name.as_str()), &mut out);
        out
    }
}

/// A screen or route of the application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(rename = "type", default, deserialize_with = "lenient::string")]
    pub kind: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub components: Vec<String>,
    #[serde(
        default,
        alias = "authRequired",
        deserialize_with = "lenient::flag"
    )]
    pub auth_required: bool,
}

impl Page {
    pub fn new(id: impl Into<String>, kind: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            title: title.into(),
            components: Vec::new(),
            auth_required: false,
        }
    }

    pub fn with_components<I, S>(mut self, components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.components = components.into_iter().map(Into::into).collect();
        self
    }

    pub fn protected(mut self) -> Self {
        self.auth_required = true;
        self
    }
}

/// A persisted entity of the application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataModel {
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::elements")]
    pub fields: Vec<Field>,
}

impl DataModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }
}

/// Type tag treated as the implicit default by the compact notation.
pub const IMPLICIT_FIELD_TYPE: &str = "string";

/// A single attribute of a data model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawField")]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub optional: bool,
    /// Opaque pass-through; never interpreted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl Field {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            optional: false,
            default: None,
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn with_default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    /// `true` when the type tag is the implicit `string`.
    pub fn has_implicit_type(&self) -> bool {
        self.kind == IMPLICIT_FIELD_TYPE
    }
}

/// Ingestion shape for [`Field`]: one producer emits `optional`, the other
/// `required`. `optional` wins when both are present.
#[derive(Deserialize)]
struct RawField {
    #[serde(default, deserialize_with = "lenient::string")]
    name: String,
    #[serde(rename = "type", default)]
    kind: Option<Value>,
    #[serde(default)]
    optional: Option<Value>,
    #[serde(default)]
    required: Option<Value>,
    #[serde(default, alias = "defaultValue")]
    default: Option<Value>,
}

impl From<RawField> for Field {
    fn from(raw: RawField) -> Self {
        let optional = match (raw.optional, raw.required) {
            (Some(opt), _) => lenient::flag_of(&opt),
            (None, Some(req)) => !lenient::flag_of(&req),
            (None, None) => false,
        };
        Self {
            name: raw.name,
            kind: raw
                .kind
                .map(|k| lenient::text_of(&k))
                .unwrap_or_else(|| IMPLICIT_FIELD_TYPE.to_string()),
            optional,
            default: raw.default.filter(|v| !v.is_null()),
        }
    }
}

/// A user-triggered workflow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, alias = "triggers")]
    pub trigger: Trigger,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub steps: Vec<String>,
}

impl Action {
    pub fn new(name: impl Into<String>, trigger: impl Into<Trigger>) -> Self {
        Self {
            name: name.into(),
            trigger: trigger.into(),
            steps: Vec::new(),
        }
    }

    pub fn with_steps<I, S>(mut self, steps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.steps = steps.into_iter().map(Into::into).collect();
        self
    }
}

/// What starts an action: one event, or an ordered set of events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    Single(String),
    Multiple(Vec<String>),
}

impl Trigger {
    /// Trigger names in order.
    pub fn names(&self) -> Vec<&str> {
        match self {
            Self::Single(name) => vec![name.as_str()],
            Self::Multiple(names) => names.iter().map(String::as_str).collect(),
        }
    }

    /// Join the trigger names with `separator`.
    pub fn join(&self, separator: &str) -> String {
        match self {
            Self::Single(name) => name.clone(),
            Self::Multiple(names) => names.join(separator),
        }
    }
}

impl Default for Trigger {
    fn default() -> Self {
        Self::Single(String::new())
    }
}

impl From<&str> for Trigger {
    fn from(s: &str) -> Self {
        Self::Single(s.to_string())
    }
}

impl From<String> for Trigger {
    fn from(s: String) -> Self {
        Self::Single(s)
    }
}

impl From<Vec<String>> for Trigger {
    fn from(names: Vec<String>) -> Self {
        Self::Multiple(names)
    }
}

impl<const N: usize> From<[&str; N]> for Trigger {
    fn from(names: [&str; N]) -> Self {
        Self::Multiple(names.iter().map(|s| s.to_string()).collect())
    }
}

/// Compact notation form: multiple triggers are alternatives, joined by `|`.
impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.join("|"))
    }
}

impl Serialize for Trigger {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Single(name) => serializer.serialize_str(name),
            Self::Multiple(names) => {
                let mut seq = serializer.serialize_seq(Some(names.len()))?;
                for name in names {
                    seq.serialize_element(name)?;
                }
                seq.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Trigger {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Array(items) => Self::Multiple(items.iter().map(lenient::text_of).collect()),
            other => Self::Single(lenient::text_of(&other)),
        })
    }
}
