use serde::{Deserialize, Serialize};

use crate::json_util::parse_string;

/// Small titled value rendered in a table inside an attachment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    #[serde(
        default,
        deserialize_with = "parse_string",
        skip_serializing_if = "String::is_empty"
    )]
    pub title: String,
    #[serde(
        default,
        deserialize_with = "parse_string",
        skip_serializing_if = "String::is_empty"
    )]
    pub value: String,
    /// Hint that the field is narrow enough to sit next to another one.
    #[serde(default, skip_serializing_if = "is_false")]
    pub short: bool,
}

impl Field {
    #[must_use]
    pub fn new(title: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
            short: false,
        }
    }

    #[must_use]
    pub fn short(mut self) -> Self {
        self.short = true;
        self
    }
}

const fn is_false(b: &bool) -> bool {
    !*b
}
