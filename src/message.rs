mod attachment;

use serde::{Deserialize, Serialize};

use crate::json_util::{parse_string, parse_vec};

pub use attachment::{Attachment, Color, Field};

/// Message to send to Slack's Incoming WebHook API.
///
/// `text` is always sent. Every other field is left out of the payload
/// while empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default, deserialize_with = "parse_string")]
    pub text: String,
    /// Overrides the default channel of the hook, e.g. `#general` or `@user`
    #[serde(default, deserialize_with = "parse_string", skip_serializing_if = "String::is_empty")]
    pub channel: String,
    #[serde(
        rename = "username",
        default,
        deserialize_with = "parse_string",
        skip_serializing_if = "String::is_empty"
    )]
    pub user_name: String,
    #[serde(default, deserialize_with = "parse_string", skip_serializing_if = "String::is_empty")]
    pub icon_url: String,
    /// Emoji code such as `:ghost:`; sent as well when `icon_url` is set
    #[serde(default, deserialize_with = "parse_string", skip_serializing_if = "String::is_empty")]
    pub icon_emoji: String,
    #[serde(default, deserialize_with = "parse_vec", skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

impl Message {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Appends an attachment; attachments render in insertion order.
    ///
    /// No limit is enforced here, oversized payloads are rejected by Slack.
    pub fn attach(&mut self, attachment: Attachment) {
        self.attachments.push(attachment);
    }

    #[must_use]
    pub fn attachment(mut self, attachment: Attachment) -> Self {
        self.attach(attachment);
        self
    }

    #[must_use]
    pub fn channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = channel.into();
        self
    }

    #[must_use]
    pub fn username(mut self, user_name: impl Into<String>) -> Self {
        self.user_name = user_name.into();
        self
    }

    #[must_use]
    pub fn icon_url(mut self, url: impl Into<String>) -> Self {
        self.icon_url = url.into();
        self
    }

    #[must_use]
    pub fn icon_emoji(mut self, emoji: impl Into<String>) -> Self {
        self.icon_emoji = emoji.into();
        self
    }

    /// Encodes the message into the JSON payload expected by the hook.
    ///
    /// # Errors
    /// Only if `serde_json` fails to encode, which the types here never trigger.
    pub fn to_json(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone as _, Utc};
    use serde_json::json;

    use super::*;

    fn full_message() -> Message {
        let time = Utc.with_ymd_and_hms(2018, 1, 2, 3, 4, 5).unwrap();
        Message::new("testing text")
            .channel("#hook-testing")
            .username("slackhook tester")
            .icon_url("https://example.com/avatar.png")
            .icon_emoji(":ghost:")
            .attachment(
                Attachment::good()
                    .fallback("fallback")
                    .author("author", "https://example.com/author", "https://example.com/a.png")
                    .title("attachment title")
                    .title_link("https://example.com/title")
                    .text("text")
                    .field(Field::new("field title", "field value"))
                    .field(Field::new("short field", "42").short())
                    .image_url("https://example.com/image.gif")
                    .thumb_url("https://example.com/thumb.gif")
                    .footer("footer text", "https://example.com/foot.png")
                    .timestamp(&time),
            )
    }

    #[test]
    fn text_only_message() {
        assert_eq!(
            String::from_utf8(Message::new("hello").to_json().unwrap()).unwrap(),
            r#"{"text":"hello"}"#
        );
    }

    #[test]
    fn empty_text_is_still_sent() {
        assert_eq!(
            serde_json::to_value(Message::default()).unwrap(),
            json!({"text": ""})
        );
    }

    #[test]
    fn wire_names_follow_webhook_api() {
        let message = Message::new("hi").username("bot").icon_emoji(":robot_face:");
        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({"text": "hi", "username": "bot", "icon_emoji": ":robot_face:"})
        );
    }

    #[test]
    fn attachments_keep_insertion_order() {
        let mut message = Message::new("build finished");
        message.attach(Attachment::good().title("first"));
        message.attach(Attachment::danger().title("second"));
        message.attach(Attachment::warning().title("third"));

        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(
            value["attachments"],
            json!([
                {"color": "good", "title": "first"},
                {"color": "danger", "title": "second"},
                {"color": "warning", "title": "third"},
            ])
        );
    }

    #[test]
    fn fully_populated_message_uses_schema_key_order() {
        let json = String::from_utf8(full_message().to_json().unwrap()).unwrap();
        let expected = concat!(
            r##"{"text":"testing text","channel":"#hook-testing","username":"slackhook tester","##,
            r#""icon_url":"https://example.com/avatar.png","icon_emoji":":ghost:","#,
            r#""attachments":[{"fallback":"fallback","color":"good","author_name":"author","#,
            r#""author_link":"https://example.com/author","author_icon":"https://example.com/a.png","#,
            r#""title":"attachment title","title_link":"https://example.com/title","text":"text","#,
            r#""fields":[{"title":"field title","value":"field value"},"#,
            r#"{"title":"short field","value":"42","short":true}],"#,
            r#""image_url":"https://example.com/image.gif","thumb_url":"https://example.com/thumb.gif","#,
            r#""footer":"footer text","footer_icon":"https://example.com/foot.png","ts":1514862245}]}"#,
        );
        assert_eq!(json, expected);
    }

    #[test]
    fn decode_then_encode_is_byte_identical() {
        let original = full_message().to_json().unwrap();
        let decoded: Message = serde_json::from_slice(&original).unwrap();
        assert_eq!(decoded, full_message());
        assert_eq!(decoded.to_json().unwrap(), original);
    }

    #[test]
    fn missing_fields_deserialize_to_defaults() {
        let message: Message = serde_json::from_str(r#"{"text": "hi", "attachments": null}"#).unwrap();
        assert_eq!(message, Message::new("hi"));
    }
}
