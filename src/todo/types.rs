//! Todo record and request payloads.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A stored todo item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Todo {
    /// System-assigned id, increasing and never reused.
    pub id: i32,
    /// Title given at creation.
    pub title: String,
    /// Completion flag, false on creation.
    pub done: bool,
}

/// Body of `POST /api/todos`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateTodo {
    /// Title of the new item. Required; any truthy scalar is accepted and
    /// stored as text.
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub title: Option<Value>,
}

impl CreateTodo {
    /// Build a payload from a plain string title.
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(Value::String(title.into())),
        }
    }

    /// The title as stored text, or `None` when it counts as missing.
    ///
    /// `null`, `false`, `0` and `""` are missing. Other strings, numbers and
    /// `true` become their text form. Arrays and objects have no sensible
    /// text form for a title and are treated as missing too.
    pub fn title(&self) -> Option<String> {
        match self.title.as_ref()? {
            Value::Null | Value::Bool(false) => None,
            Value::Bool(true) => Some("true".to_string()),
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => number_text(n),
            Value::Array(_) | Value::Object(_) => None,
        }
    }
}

/// Text form of a JSON number, `None` for zero.
fn number_text(n: &Number) -> Option<String> {
    if let Some(i) = n.as_i64() {
        return (i != 0).then(|| i.to_string());
    }
    if let Some(u) = n.as_u64() {
        return Some(u.to_string());
    }
    n.as_f64()
        .filter(|f| *f != 0.0 && !f.is_nan())
        .map(|f| f.to_string())
}
