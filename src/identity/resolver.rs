use serde_json::{Map, Value};

use super::attributes::{parse_attribute_map, FROM_KEY};
use super::types::{non_blank, DisplayLabel, MessageKind, Role, User};

/// Compute the `from` label for an outgoing message.
///
/// First match wins:
/// 1. bot and system messages are always "Bot", whoever sends them;
/// 2. external messages name the traveler, else the expert, else "Bot";
/// 3. user messages dispatch on the sender's role;
/// 4. with no sender, "Unknown User".
pub fn resolve_from_label(user: Option<&User>, kind: &MessageKind) -> DisplayLabel {
    let label = match kind {
        MessageKind::Bot | MessageKind::System => DisplayLabel::Bot,
        MessageKind::External { traveler_name, expert_name } => {
            if let Some(traveler) = non_blank(traveler_name.as_deref()) {
                DisplayLabel::Traveler(traveler.to_string())
            } else if let Some(expert) = non_blank(expert_name.as_deref()) {
                DisplayLabel::LocalExpert(expert.to_string())
            } else {
                DisplayLabel::Bot
            }
        }
        MessageKind::User => match user {
            Some(user) => label_for_role(user),
            None => DisplayLabel::UnknownUser,
        },
    };

    tracing::debug!(?kind, label = %label, "resolved from label");
    label
}

fn label_for_role(user: &User) -> DisplayLabel {
    match user.role {
        Some(Role::Admin) => DisplayLabel::Team,
        Some(Role::Expert) => DisplayLabel::LocalExpert(user.name.clone()),
        Some(Role::Bot) => DisplayLabel::Bot,
        _ if !user.name.is_empty() => DisplayLabel::Traveler(user.name.clone()),
        _ => DisplayLabel::UnknownUser,
    }
}

/// Label to send with a message. A non-blank label supplied by the caller
/// is used verbatim; otherwise it is resolved from the sender.
pub fn resolve_outgoing_label(
    explicit: Option<&str>,
    user: Option<&User>,
    kind: &MessageKind,
) -> String {
    match explicit.filter(|label| !label.trim().is_empty()) {
        Some(label) => label.to_string(),
        None => resolve_from_label(user, kind).to_string(),
    }
}

/// Merge `from` into an existing attribute payload and serialize it the way
/// the conversation provider stores attributes. Unreadable payloads are
/// replaced by a fresh map.
pub fn attach_from_attribute(existing: Option<&Value>, label: &str) -> String {
    let mut map = match parse_attribute_map(existing) {
        Ok(Some(map)) => map,
        Ok(None) => Map::new(),
        Err(e) => {
            tracing::warn!("Discarding unreadable message attributes: {}", e);
            Map::new()
        }
    };

    map.insert(FROM_KEY.to_string(), Value::String(label.to_string()));
    Value::Object(map).to_string()
}
