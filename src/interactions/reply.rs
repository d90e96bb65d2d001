//! Interaction response builder
//!
//! Handlers return an [`InteractionResponse`]; this module turns it into the
//! wire body. Replies without files are plain JSON. Replies with files are
//! `multipart/form-data` with the JSON in a `payload_json` part and one part per
//! file.
//!
//! - **Version**: 1.2.1
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.2.1: Control characters stripped from attachment names
//! - 1.2.0: Multipart encoding for attachments
//! - 1.1.0: Field values truncated to the Discord field limit
//! - 1.0.0: JSON replies, deferred updates and pong

use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{json, Map, Value};
use serenity::builder::CreateEmbed;
use serenity::model::channel::MessageFlags;
use uuid::Uuid;

use crate::core::embeds::embed_json;
use crate::core::truncate_for_field;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub name: String,
    pub data: Vec<u8>,
}

impl Attachment {
    pub fn new(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            name: clean_file_name(&name.into()),
            data: data.into(),
        }
    }
}

/// Drop quotes and control characters so a name cannot break out of a
/// multipart header line
pub fn clean_file_name(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '"' && !c.is_control())
        .collect()
}

/// Message body of a reply
#[derive(Debug, Clone, Default)]
pub struct ReplyData {
    pub content: Option<String>,
    pub embeds: Vec<CreateEmbed>,
    /// `None` leaves the existing components of an updated message alone
    pub components: Option<Vec<Value>>,
    pub ephemeral: bool,
    pub files: Vec<Attachment>,
    /// Autocomplete choices
    pub choices: Option<Vec<Value>>,
}

impl ReplyData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn embed(mut self, embed: CreateEmbed) -> Self {
        self.embeds.push(embed);
        self
    }

    pub fn components(mut self, rows: Vec<Value>) -> Self {
        self.components = Some(rows);
        self
    }

    pub fn ephemeral(mut self) -> Self {
        self.ephemeral = true;
        self
    }

    pub fn ephemeral_if(mut self, hide: bool) -> Self {
        self.ephemeral |= hide;
        self
    }

    pub fn file(mut self, file: Attachment) -> Self {
        self.files.push(file);
        self
    }

    pub fn to_json(&self) -> Value {
        let mut map = Map::new();

        if let Some(content) = &self.content {
            map.insert("content".into(), Value::String(content.clone()));
        }
        if !self.embeds.is_empty() {
            let embeds = self.embeds.iter().map(embed_json).map(clamp_fields).collect();
            map.insert("embeds".into(), Value::Array(embeds));
        }
        if let Some(rows) = &self.components {
            map.insert("components".into(), Value::Array(rows.clone()));
        }
        if self.ephemeral {
            map.insert("flags".into(), json!(MessageFlags::EPHEMERAL.bits()));
        }
        if !self.files.is_empty() {
            let attachments = self
                .files
                .iter()
                .enumerate()
                .map(|(id, file)| json!({ "id": id, "filename": file.name }))
                .collect();
            map.insert("attachments".into(), Value::Array(attachments));
        }
        if let Some(choices) = &self.choices {
            map.insert("choices".into(), Value::Array(choices.clone()));
        }

        Value::Object(map)
    }
}

fn clamp_fields(mut embed: Value) -> Value {
    if let Some(fields) = embed.get_mut("fields").and_then(Value::as_array_mut) {
        for field in fields {
            if let Some(value) = field.get("value").and_then(Value::as_str) {
                let clamped = truncate_for_field(value);
                field["value"] = Value::String(clamped);
            }
        }
    }
    embed
}

/// Interaction callback types the bot answers with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ResponseKind {
    Pong = 1,
    ChannelMessage = 4,
    DeferredUpdate = 6,
    UpdateMessage = 7,
    Autocomplete = 8,
}

#[derive(Debug, Clone)]
pub struct InteractionResponse {
    pub kind: ResponseKind,
    pub data: Option<ReplyData>,
}

impl InteractionResponse {
    pub fn pong() -> Self {
        Self {
            kind: ResponseKind::Pong,
            data: None,
        }
    }

    /// New message in the channel
    pub fn message(data: ReplyData) -> Self {
        Self {
            kind: ResponseKind::ChannelMessage,
            data: Some(data),
        }
    }

    /// Edit the message the clicked component belongs to
    pub fn update(data: ReplyData) -> Self {
        Self {
            kind: ResponseKind::UpdateMessage,
            data: Some(data),
        }
    }

    /// Acknowledge a component click without changing anything
    pub fn deferred_update() -> Self {
        Self {
            kind: ResponseKind::DeferredUpdate,
            data: None,
        }
    }

    pub fn autocomplete(choices: Vec<Value>) -> Self {
        Self {
            kind: ResponseKind::Autocomplete,
            data: Some(ReplyData {
                choices: Some(choices),
                ..ReplyData::default()
            }),
        }
    }

    pub fn to_json(&self) -> Value {
        let mut body = json!({ "type": self.kind as u8 });
        if let Some(data) = &self.data {
            body["data"] = data.to_json();
        }
        body
    }

    fn files(&self) -> &[Attachment] {
        self.data.as_ref().map(|data| data.files.as_slice()).unwrap_or(&[])
    }

    pub fn encode(&self) -> EncodedBody {
        let payload = self.to_json().to_string();
        let files = self.files();
        if files.is_empty() {
            return EncodedBody {
                content_type: "application/json".to_string(),
                body: payload.into_bytes(),
            };
        }
        encode_multipart(&payload, files, &format!("quinze-{}", Uuid::new_v4().simple()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedBody {
    pub content_type: String,
    pub body: Vec<u8>,
}

/// Multipart body with `payload_json` first, then one part per file
pub fn encode_multipart(payload: &str, files: &[Attachment], boundary: &str) -> EncodedBody {
    let mut body = Vec::new();

    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(b"Content-Disposition: form-data; name=\"payload_json\"\r\n");
    body.extend_from_slice(b"Content-Type: application/json\r\n\r\n");
    body.extend_from_slice(payload.as_bytes());
    body.extend_from_slice(b"\r\n");

    for file in files {
        let name = clean_file_name(&file.name);
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{name}\"; filename=\"{name}\"\r\n")
                .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(&file.data);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());

    EncodedBody {
        content_type: format!("multipart/form-data; boundary={boundary}"),
        body,
    }
}

impl IntoResponse for InteractionResponse {
    fn into_response(self) -> Response {
        let EncodedBody { content_type, body } = self.encode();
        (StatusCode::OK, [(CONTENT_TYPE, content_type)], body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FIELD_LIMIT;

    #[test]
    fn test_pong() {
        assert_eq!(InteractionResponse::pong().to_json(), json!({ "type": 1 }));
    }

    #[test]
    fn test_deferred_update_has_no_data() {
        assert_eq!(
            InteractionResponse::deferred_update().to_json(),
            json!({ "type": 6 })
        );
    }

    #[test]
    fn test_ephemeral_message() {
        let json = InteractionResponse::message(ReplyData::new().content("nope").ephemeral()).to_json();
        assert_eq!(json["type"], 4);
        assert_eq!(json["data"]["content"], "nope");
        assert_eq!(json["data"]["flags"], 64);
        assert!(json["data"].get("components").is_none());
    }

    #[test]
    fn test_update_with_cleared_components() {
        let json = InteractionResponse::update(ReplyData::new().components(vec![])).to_json();
        assert_eq!(json["type"], 7);
        assert_eq!(json["data"]["components"], json!([]));
    }

    #[test]
    fn test_autocomplete_empty_choices() {
        let json = InteractionResponse::autocomplete(vec![]).to_json();
        assert_eq!(json, json!({ "type": 8, "data": { "choices": [] } }));
    }

    #[test]
    fn test_long_field_values_are_clamped() {
        let mut embed = CreateEmbed::default();
        embed.field("Towers", "x".repeat(3000), false);
        let json = ReplyData::new().embed(embed).to_json();

        let value = json["embeds"][0]["fields"][0]["value"].as_str().unwrap();
        assert!(value.len() <= FIELD_LIMIT);
    }

    #[test]
    fn test_json_encoding_without_files() {
        let encoded = InteractionResponse::message(ReplyData::new().content("hi")).encode();
        assert_eq!(encoded.content_type, "application/json");

        let body: Value = serde_json::from_slice(&encoded.body).unwrap();
        assert_eq!(body["data"]["content"], "hi");
    }

    #[test]
    fn test_multipart_encoding_with_files() {
        let response = InteractionResponse::message(
            ReplyData::new()
                .content("see attached")
                .file(Attachment::new("paths.txt", "0-0-0")),
        );
        let encoded = response.encode();
        assert!(encoded
            .content_type
            .starts_with("multipart/form-data; boundary=quinze-"));

        let body = String::from_utf8(encoded.body).unwrap();
        assert!(body.contains("name=\"payload_json\""));
        assert!(body.contains("name=\"paths.txt\"; filename=\"paths.txt\""));
        assert!(body.contains("\"filename\":\"paths.txt\""));
        assert!(body.contains("0-0-0"));
        assert!(body.trim_end().ends_with("--"));
    }

    #[test]
    fn test_file_name_cannot_inject_headers() {
        assert_eq!(clean_file_name("a\"b\r\nX-Evil: 1\t.txt"), "abX-Evil: 1.txt");

        let file = Attachment {
            name: "x\r\n\r\n\"y.txt".to_string(),
            data: b"Z".to_vec(),
        };
        let body = String::from_utf8(encode_multipart("{}", &[file], "b").body).unwrap();
        assert!(body.contains("Content-Disposition: form-data; name=\"xy.txt\"; filename=\"xy.txt\"\r\n"));
        assert_eq!(body.matches("\r\n\r\n").count(), 2);

        assert_eq!(Attachment::new("paths\n.txt", "").name, "paths.txt");
    }

    #[test]
    fn test_multipart_layout() {
        let encoded = encode_multipart("{}", &[Attachment::new("a.txt", "A")], "b");
        let expected = "--b\r\n\
            Content-Disposition: form-data; name=\"payload_json\"\r\n\
            Content-Type: application/json\r\n\r\n\
            {}\r\n\
            --b\r\n\
            Content-Disposition: form-data; name=\"a.txt\"; filename=\"a.txt\"\r\n\
            Content-Type: application/octet-stream\r\n\r\n\
            A\r\n\
            --b--\r\n";
        assert_eq!(String::from_utf8(encoded.body).unwrap(), expected);
        assert_eq!(encoded.content_type, "multipart/form-data; boundary=b");
    }
}
