//! Shared types for sender identity resolution

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

pub const BOT_LABEL: &str = "Bot";
pub const TEAM_LABEL: &str = "Baboo Team";
pub const UNKNOWN_USER_LABEL: &str = "Unknown User";
pub const LOCAL_EXPERT_SUFFIX: &str = " - Local Expert";
pub const TRAVELER_SUFFIX: &str = " - Traveler";

/// Role of an internal account. Travelers never hold accounts, but the
/// value is accepted so that a viewer can be reported as one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Expert,
    Bot,
    Traveler,
    #[serde(other)]
    Other,
}

/// Authenticated account as handed over by the session layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: Option<Role>,
}

/// What kind of message is being sent, with the context each kind needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MessageKind {
    Bot,
    System,
    User,
    External {
        #[serde(default)]
        traveler_name: Option<String>,
        #[serde(default)]
        expert_name: Option<String>,
    },
}

/// Display identity stored under the `from` attribute of a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayLabel {
    Bot,
    Team,
    LocalExpert(String),
    Traveler(String),
    UnknownUser,
    Custom(String),
}

impl DisplayLabel {
    /// Map a stored label back to its sender category.
    ///
    /// Checked in order: exact "Bot", exact "Baboo Team", then the
    /// " - Local Expert" and " - Traveler" markers. Anything else is external.
    pub fn category_of(stored: &str) -> SenderCategory {
        if stored == BOT_LABEL {
            SenderCategory::Bot
        } else if stored == TEAM_LABEL {
            SenderCategory::Admin
        } else if stored.contains("- Local Expert") {
            SenderCategory::Expert
        } else if stored.contains("- Traveler") {
            SenderCategory::Traveler
        } else {
            SenderCategory::External
        }
    }

    pub fn category(&self) -> SenderCategory {
        match self {
            DisplayLabel::Bot => SenderCategory::Bot,
            DisplayLabel::Team => SenderCategory::Admin,
            DisplayLabel::LocalExpert(_) => SenderCategory::Expert,
            DisplayLabel::Traveler(_) => SenderCategory::Traveler,
            DisplayLabel::UnknownUser => SenderCategory::External,
            DisplayLabel::Custom(text) => Self::category_of(text),
        }
    }
}

impl fmt::Display for DisplayLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayLabel::Bot => f.write_str(BOT_LABEL),
            DisplayLabel::Team => f.write_str(TEAM_LABEL),
            DisplayLabel::LocalExpert(name) => write!(f, "{}{}", name, LOCAL_EXPERT_SUFFIX),
            DisplayLabel::Traveler(name) => write!(f, "{}{}", name, TRAVELER_SUFFIX),
            DisplayLabel::UnknownUser => f.write_str(UNKNOWN_USER_LABEL),
            DisplayLabel::Custom(text) => f.write_str(text),
        }
    }
}

/// Rendering category of a message sender. Never used for authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SenderCategory {
    Bot,
    Admin,
    Expert,
    Traveler,
    External,
    User,
}

impl From<&Role> for SenderCategory {
    fn from(role: &Role) -> Self {
        match role {
            Role::Admin => SenderCategory::Admin,
            Role::Expert => SenderCategory::Expert,
            Role::Bot => SenderCategory::Bot,
            Role::Traveler => SenderCategory::Traveler,
            Role::Other => SenderCategory::User,
        }
    }
}

/// Message as returned by the conversation provider.
///
/// `attributes` is kept raw: the provider usually hands it over as a JSON
/// string, sometimes as an object, and older messages may carry nothing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub attributes: Option<Value>,
}

/// What the UI needs to render a message header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayInfo {
    pub display_name: String,
    pub category: SenderCategory,
    pub is_viewer: bool,
}

/// Returns the trimmed value when it carries any text
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
