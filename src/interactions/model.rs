//! Inbound interaction payloads
//!
//! Webhook bodies are parsed into these types rather than serenity's gateway
//! models, which expect fields Discord omits from HTTP interactions. Only the
//! fields the bot reads are modelled; everything else is ignored.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Modal submissions and autocomplete
//! - 1.0.0: Ping, command and component interactions

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// Option type codes used when walking nested command options
pub const OPTION_SUB_COMMAND: u8 = 1;
pub const OPTION_SUB_COMMAND_GROUP: u8 = 2;

/// Select menu component type
pub const COMPONENT_STRING_SELECT: u8 = 3;

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub username: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Member {
    pub user: Option<User>,
}

/// Link from a bot message back to the command invocation that produced it
#[derive(Debug, Clone, Deserialize)]
pub struct MessageInteraction {
    pub name: String,
    pub user: User,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub content: String,
    /// Raw action rows, kept as JSON so handlers can edit and echo them back
    #[serde(default)]
    pub components: Vec<Value>,
    pub interaction: Option<MessageInteraction>,
}

impl Message {
    /// Name of the command that created this message
    ///
    /// Subcommand invocations are recorded as `"2tc search"`; only the
    /// top-level name is returned.
    pub fn origin_command(&self) -> Option<&str> {
        self.interaction
            .as_ref()
            .and_then(|origin| origin.name.split(' ').next())
            .filter(|name| !name.is_empty())
    }

    /// User who ran the original command
    pub fn origin_user_id(&self) -> Option<&str> {
        self.interaction.as_ref().map(|origin| origin.user.id.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommandDataOption {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(default)]
    pub value: Option<Value>,
    #[serde(default)]
    pub options: Vec<CommandDataOption>,
    #[serde(default)]
    pub focused: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommandData {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub options: Vec<CommandDataOption>,
}

impl CommandData {
    /// Name of the invoked subcommand, if any
    pub fn subcommand(&self) -> Option<&str> {
        let first = self.options.first()?;
        match first.kind {
            OPTION_SUB_COMMAND => Some(first.name.as_str()),
            OPTION_SUB_COMMAND_GROUP => first
                .options
                .first()
                .filter(|sub| sub.kind == OPTION_SUB_COMMAND)
                .map(|sub| sub.name.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ComponentData {
    pub custom_id: String,
    pub component_type: u8,
    #[serde(default)]
    pub values: Vec<String>,
}

impl ComponentData {
    pub fn is_select(&self) -> bool {
        self.component_type == COMPONENT_STRING_SELECT
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModalField {
    pub custom_id: String,
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModalRow {
    #[serde(default)]
    pub components: Vec<ModalField>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModalData {
    pub custom_id: String,
    #[serde(default)]
    pub components: Vec<ModalRow>,
}

impl ModalData {
    /// Value of the text input with the given custom id
    pub fn value(&self, custom_id: &str) -> Option<&str> {
        self.components
            .iter()
            .flat_map(|row| row.components.iter())
            .find(|field| field.custom_id == custom_id)
            .map(|field| field.value.as_str())
    }
}

#[derive(Debug, Clone)]
pub enum InteractionData {
    Ping,
    Command(CommandData),
    Component(ComponentData),
    Autocomplete,
    Modal(ModalData),
}

#[derive(Debug, Clone, Deserialize)]
struct RawInteraction {
    #[serde(rename = "type")]
    kind: u8,
    #[serde(default)]
    id: String,
    #[serde(default)]
    application_id: String,
    #[serde(default)]
    token: String,
    guild_id: Option<String>,
    data: Option<Value>,
    member: Option<Member>,
    user: Option<User>,
    message: Option<Message>,
}

/// One inbound webhook event
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "RawInteraction")]
pub struct Interaction {
    pub id: String,
    pub application_id: String,
    /// Continuation token for followup webhooks
    pub token: String,
    pub guild_id: Option<String>,
    pub member: Option<Member>,
    pub user: Option<User>,
    pub message: Option<Message>,
    pub data: InteractionData,
}

impl Interaction {
    pub fn from_slice(body: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(body)
    }

    /// User who triggered this interaction
    ///
    /// Guild interactions carry the user inside `member`, DMs carry it directly.
    pub fn invoker(&self) -> Option<&User> {
        self.member
            .as_ref()
            .and_then(|member| member.user.as_ref())
            .or(self.user.as_ref())
    }

    pub fn invoker_id(&self) -> Option<&str> {
        self.invoker().map(|user| user.id.as_str())
    }

    pub fn kind_name(&self) -> &'static str {
        match self.data {
            InteractionData::Ping => "ping",
            InteractionData::Command(_) => "command",
            InteractionData::Component(_) => "component",
            InteractionData::Autocomplete => "autocomplete",
            InteractionData::Modal(_) => "modal",
        }
    }
}

impl TryFrom<RawInteraction> for Interaction {
    type Error = String;

    fn try_from(raw: RawInteraction) -> Result<Self, Self::Error> {
        let data = match raw.kind {
            1 => InteractionData::Ping,
            2 => InteractionData::Command(take_data(raw.data)?),
            3 => InteractionData::Component(take_data(raw.data)?),
            4 => InteractionData::Autocomplete,
            5 => InteractionData::Modal(take_data(raw.data)?),
            other => return Err(format!("unknown interaction type {other}")),
        };

        Ok(Self {
            id: raw.id,
            application_id: raw.application_id,
            token: raw.token,
            guild_id: raw.guild_id,
            member: raw.member,
            user: raw.user,
            message: raw.message,
            data,
        })
    }
}

fn take_data<T: DeserializeOwned>(data: Option<Value>) -> Result<T, String> {
    let data = data.ok_or_else(|| "interaction is missing data".to_string())?;
    serde_json::from_value(data).map_err(|e| e.to_string())
}
