/*
[INPUT]:  Task API schema and serde requirements
[OUTPUT]: TaskRecord / TaskId with lenient deserialization
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new task fields are added
*/

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a task as sent by the remote source.
///
/// The API has returned both numeric and string ids; both are kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TaskId(pub String);

impl TaskId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TaskId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        serde_helpers::deserialize_id(deserializer).map(TaskId)
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// One task as received from the remote source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: TaskId,
    #[serde(default, deserialize_with = "serde_helpers::deserialize_string_or_default")]
    pub title: String,
    /// Free-form status text. Anything that is not a JSON string becomes `None`.
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<String>,
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(
        default,
        alias = "dueDate",
        deserialize_with = "serde_helpers::deserialize_lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<String>,
    #[serde(default, alias = "userId", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<TaskId>,
}

impl TaskRecord {
    pub fn new(id: impl Into<String>, title: impl Into<String>, status: Option<&str>) -> Self {
        Self {
            id: TaskId::new(id),
            title: title.into(),
            status: status.map(str::to_string),
            description: None,
            due_date: None,
            user_id: None,
        }
    }

    /// Status with absent and whitespace-only values collapsed to `None`.
    pub fn known_status(&self) -> Option<&str> {
        self.status.as_deref().filter(|status| !status.trim().is_empty())
    }
}

mod serde_helpers {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        match value {
            Value::String(raw) => Ok(raw),
            Value::Number(number) => Ok(number.to_string()),
            _ => Err(serde::de::Error::custom("task id must be a string or number")),
        }
    }

    pub fn deserialize_string_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserialize_lenient_string(deserializer).map(Option::unwrap_or_default)
    }

    pub fn deserialize_lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        match value {
            Value::String(raw) => Ok(Some(raw)),
            _ => Ok(None),
        }
    }
}
