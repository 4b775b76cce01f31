mod color;
mod field;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::json_util::{parse_color, parse_string, parse_timestamp, parse_vec};

pub use color::Color;
pub use field::Field;

/// Richly formatted block rendered below the message text.
///
/// Every string left empty is dropped from the payload, as is a zero
/// timestamp and an empty field list.
///
/// See <https://api.slack.com/docs/attachments>
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Plain text summary for clients that cannot render attachments
    #[serde(default, deserialize_with = "parse_string", skip_serializing_if = "String::is_empty")]
    pub fallback: String,
    #[serde(default, deserialize_with = "parse_color", skip_serializing_if = "is_unset")]
    pub color: Option<Color>,
    #[serde(default, deserialize_with = "parse_string", skip_serializing_if = "String::is_empty")]
    pub author_name: String,
    #[serde(default, deserialize_with = "parse_string", skip_serializing_if = "String::is_empty")]
    pub author_link: String,
    #[serde(default, deserialize_with = "parse_string", skip_serializing_if = "String::is_empty")]
    pub author_icon: String,
    /// Larger, bold text at the top of the attachment
    #[serde(default, deserialize_with = "parse_string", skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "parse_string", skip_serializing_if = "String::is_empty")]
    pub title_link: String,
    #[serde(default, deserialize_with = "parse_string", skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(default, deserialize_with = "parse_vec", skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<Field>,
    #[serde(default, deserialize_with = "parse_string", skip_serializing_if = "String::is_empty")]
    pub image_url: String,
    #[serde(default, deserialize_with = "parse_string", skip_serializing_if = "String::is_empty")]
    pub thumb_url: String,
    #[serde(default, deserialize_with = "parse_string", skip_serializing_if = "String::is_empty")]
    pub footer: String,
    #[serde(default, deserialize_with = "parse_string", skip_serializing_if = "String::is_empty")]
    pub footer_icon: String,
    /// Unix seconds
    #[serde(
        rename = "ts",
        default,
        deserialize_with = "parse_timestamp",
        skip_serializing_if = "is_zero"
    )]
    pub timestamp: i64,
}

impl Attachment {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_color(color: impl Into<Color>) -> Self {
        Self {
            color: Some(color.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn good() -> Self {
        Self::with_color(Color::Good)
    }

    #[must_use]
    pub fn warning() -> Self {
        Self::with_color(Color::Warning)
    }

    #[must_use]
    pub fn danger() -> Self {
        Self::with_color(Color::Danger)
    }

    /// Appends a field; fields render in insertion order.
    pub fn add_field(&mut self, field: Field) {
        self.fields.push(field);
    }

    pub fn set_timestamp<Tz: TimeZone>(&mut self, time: &DateTime<Tz>) {
        self.timestamp = time.timestamp();
    }

    pub fn set_timestamp_now(&mut self) {
        self.set_timestamp(&Utc::now());
    }

    #[must_use]
    pub fn field(mut self, field: Field) -> Self {
        self.add_field(field);
        self
    }

    #[must_use]
    pub fn timestamp<Tz: TimeZone>(mut self, time: &DateTime<Tz>) -> Self {
        self.set_timestamp(time);
        self
    }

    #[must_use]
    pub fn color(mut self, color: impl Into<Color>) -> Self {
        self.color = Some(color.into());
        self
    }

    #[must_use]
    pub fn fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = fallback.into();
        self
    }

    #[must_use]
    pub fn author(
        mut self,
        name: impl Into<String>,
        link: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        self.author_name = name.into();
        self.author_link = link.into();
        self.author_icon = icon.into();
        self
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn title_link(mut self, link: impl Into<String>) -> Self {
        self.title_link = link.into();
        self
    }

    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    #[must_use]
    pub fn image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = url.into();
        self
    }

    #[must_use]
    pub fn thumb_url(mut self, url: impl Into<String>) -> Self {
        self.thumb_url = url.into();
        self
    }

    #[must_use]
    pub fn footer(mut self, footer: impl Into<String>, icon: impl Into<String>) -> Self {
        self.footer = footer.into();
        self.footer_icon = icon.into();
        self
    }
}

/// `Some("")` counts as unset, the same way an empty string field does
fn is_unset(color: &Option<Color>) -> bool {
    color.as_ref().is_none_or(|c| c.as_str().is_empty())
}

const fn is_zero(ts: &i64) -> bool {
    *ts == 0
}
