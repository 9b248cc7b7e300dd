//! Topic and question/answer domain models.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Identifier of a topic set. Valid ids start at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopicId(pub u32);

impl TopicId {
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TopicId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(TopicId)
    }
}

impl From<u32> for TopicId {
    fn from(id: u32) -> Self {
        TopicId(id)
    }
}

/// A topic entry in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicDescriptor {
    pub id: TopicId,
    pub name: String,
}

impl TopicDescriptor {
    pub fn new(id: impl Into<TopicId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A single interview question with its model answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct QaItem {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
}

impl QaItem {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }

    /// Text placed on the clipboard by the copy action.
    pub fn copy_text(&self) -> String {
        format!("Q: {}\nA: {}", self.question, self.answer)
    }
}

/// The parsed contents of one `set{id}.json` resource.
///
/// Two shapes are accepted:
///
/// ```text
/// [ { "question": "...", "answer": "..." }, ... ]
/// { "setName": "JavaScript", "data": [ { "question": "...", "answer": "..." } ] }
/// ```
///
/// Anything else parses as an unnamed, empty document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TopicDocument {
    pub set_name: Option<String>,
    pub items: Vec<QaItem>,
}

impl TopicDocument {
    /// Shape-checks an already parsed JSON value.
    ///
    /// Elements that are not objects, or whose fields are not strings, keep
    /// their slot as an empty item so positions (and therefore QuestionIds)
    /// of the remaining items are unaffected.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Array(entries) => Self {
                set_name: None,
                items: entries.into_iter().map(item_from_value).collect(),
            },
            Value::Object(mut map) => {
                let set_name = match map.get("setName") {
                    Some(Value::String(name)) => Some(name.clone()),
                    _ => None,
                };
                let items = match map.remove("data") {
                    Some(Value::Array(entries)) => {
                        entries.into_iter().map(item_from_value).collect()
                    }
                    _ => Vec::new(),
                };
                Self { set_name, items }
            }
            _ => Self::default(),
        }
    }

    /// Parses raw JSON text. Invalid JSON is an error; a valid but
    /// unexpected shape is an empty document.
    pub fn from_json_str(content: &str) -> crate::Result<Self> {
        let value: Value = serde_json::from_str(content)?;
        Ok(Self::from_value(value))
    }
}

fn item_from_value(value: Value) -> QaItem {
    let text = |v: Option<&Value>| match v {
        Some(Value::String(s)) => s.clone(),
        _ => String::new(),
    };
    match value {
        Value::Object(map) => QaItem {
            question: text(map.get("question")),
            answer: text(map.get("answer")),
        },
        _ => QaItem::default(),
    }
}
