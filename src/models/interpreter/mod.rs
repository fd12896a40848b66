//! Interpreter model.
//!
//! Interpreters are the people placed on event rosters. The id is opaque and
//! stable; everything else is editable display data.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque, stable interpreter identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InterpreterId(pub String);

impl InterpreterId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InterpreterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for InterpreterId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Gender {
    #[default]
    F,
    M,
}

/// An interpreter in the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interpreter {
    pub id: InterpreterId,
    /// Short name used on buttons and chips
    pub name: String,
    pub full_name: String,
    #[serde(default)]
    pub gender: Gender,
    /// Name printed on the interpreter's ID badge
    pub id_name: String,
    /// Job role on rosters; `None` means the first catalog position
    #[serde(default)]
    pub position: Option<String>,
}

impl Interpreter {
    /// Create an interpreter, substituting the directory defaults for blank fields.
    pub fn new(id: InterpreterId, name: &str, full_name: &str) -> Self {
        Self {
            id,
            name: non_blank_or(name, "Unnamed"),
            full_name: non_blank_or(full_name, "Unnamed"),
            gender: Gender::default(),
            id_name: "None".to_string(),
            position: None,
        }
    }

    pub fn with_id_name(mut self, id_name: &str) -> Self {
        self.id_name = non_blank_or(id_name, "None");
        self
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = gender;
        self
    }

    /// Position shown on the roster, falling back to `default_position`.
    pub fn position_or<'a>(&'a self, default_position: &'a str) -> &'a str {
        self.position.as_deref().unwrap_or(default_position)
    }
}

fn non_blank_or(value: &str, fallback: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}
