use super::attributes::{parse_attributes, FromAttribute};
use super::classifier::{classify_author, AuthorClass};
use super::resolver::resolve_from_label;
use super::types::{
    DisplayInfo, DisplayLabel, Message, MessageKind, SenderCategory, User, BOT_LABEL, TEAM_LABEL,
};
use crate::config::IdentityConfig;

/// Work out how a received message should be rendered for `viewer`.
///
/// A stored `from` label always wins. Without one, a message written by the
/// viewer is relabelled from the viewer's own account, and anything else
/// falls back to classifying the raw author string.
pub fn resolve_display_info(
    message: &Message,
    viewer: Option<&User>,
    identity: &IdentityConfig,
) -> DisplayInfo {
    let author = message.author.as_deref();
    let is_viewer = match (author, viewer) {
        (Some(author), Some(viewer)) if !author.is_empty() => {
            author == viewer.email || author == viewer.name
        }
        _ => false,
    };

    let stored = parse_attributes(message.attributes.as_ref());
    if let FromAttribute::Malformed(e) = &stored {
        tracing::warn!(author = ?author, "Ignoring malformed message attributes: {}", e);
    }

    if let Some(label) = stored.label() {
        return DisplayInfo {
            display_name: label.to_string(),
            category: DisplayLabel::category_of(label),
            is_viewer,
        };
    }

    if let (true, Some(viewer)) = (is_viewer, viewer) {
        return DisplayInfo {
            display_name: resolve_from_label(Some(viewer), &MessageKind::User).to_string(),
            category: viewer.role.as_ref().map(SenderCategory::from).unwrap_or(SenderCategory::User),
            is_viewer,
        };
    }

    let class = classify_author(author);
    if class == AuthorClass::Bot {
        return DisplayInfo {
            display_name: BOT_LABEL.to_string(),
            category: SenderCategory::Bot,
            is_viewer,
        };
    }

    let author = author.unwrap_or_default();
    if identity.is_legacy_admin(author) {
        return DisplayInfo {
            display_name: TEAM_LABEL.to_string(),
            category: SenderCategory::Admin,
            is_viewer,
        };
    }

    DisplayInfo {
        display_name: author.to_string(),
        category: class.into(),
        is_viewer,
    }
}

/// Resolve a whole conversation history, keeping message order
pub fn resolve_display_batch(
    messages: &[Message],
    viewer: Option<&User>,
    identity: &IdentityConfig,
) -> Vec<DisplayInfo> {
    messages
        .iter()
        .map(|message| resolve_display_info(message, viewer, identity))
        .collect()
}
