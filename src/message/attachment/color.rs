use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Color bar shown alongside an attachment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Color {
    Good,
    Warning,
    Danger,
    /// Any other value, usually a hex triplet such as `#439FE0`.
    Custom(String),
}

impl Color {
    #[must_use]
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Custom(format!("#{r:02X}{g:02X}{b:02X}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Good => "good",
            Self::Warning => "warning",
            Self::Danger => "danger",
            Self::Custom(s) => s,
        }
    }
}

impl From<String> for Color {
    fn from(s: String) -> Self {
        match s.as_str() {
            "good" => Self::Good,
            "warning" => Self::Warning,
            "danger" => Self::Danger,
            _ => Self::Custom(s),
        }
    }
}

impl From<&str> for Color {
    fn from(s: &str) -> Self {
        Self::from(s.to_owned())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::from)
    }
}
