use serde::{Deserialize, Serialize};

use super::types::SenderCategory;

const BOT_PATTERNS: &[&str] = &["bot", "system", "support_bot_"];
const EXTERNAL_PATTERNS: &[&str] = &["make", "webhook", "external"];

/// Coarse author class for messages that carry no stored label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthorClass {
    Bot,
    External,
    User,
}

impl From<AuthorClass> for SenderCategory {
    fn from(class: AuthorClass) -> Self {
        match class {
            AuthorClass::Bot => SenderCategory::Bot,
            AuthorClass::External => SenderCategory::External,
            AuthorClass::User => SenderCategory::User,
        }
    }
}

/// Classify a raw author string by pattern.
///
/// A missing or empty author is a system message. Bot patterns are checked
/// before external ones, so "external_bot" is a bot.
pub fn classify_author(author: Option<&str>) -> AuthorClass {
    let author = match author {
        Some(a) if !a.is_empty() => a,
        _ => return AuthorClass::Bot,
    };

    if author == "system" {
        return AuthorClass::Bot;
    }

    let lowered = author.to_lowercase();
    if BOT_PATTERNS.iter().any(|p| lowered.contains(p)) {
        AuthorClass::Bot
    } else if EXTERNAL_PATTERNS.iter().any(|p| lowered.contains(p)) {
        AuthorClass::External
    } else {
        AuthorClass::User
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bot_authors() {
        assert_eq!(classify_author(Some("SUPPORT_BOT_7")), AuthorClass::Bot);
        assert_eq!(classify_author(Some("system")), AuthorClass::Bot);
        assert_eq!(classify_author(Some("System Notice")), AuthorClass::Bot);
        assert_eq!(classify_author(Some("chatbot")), AuthorClass::Bot);
    }

    #[test]
    fn test_missing_author_is_bot() {
        assert_eq!(classify_author(None), AuthorClass::Bot);
        assert_eq!(classify_author(Some("")), AuthorClass::Bot);
    }

    #[test]
    fn test_external_authors() {
        assert_eq!(classify_author(Some("make_webhook_1")), AuthorClass::External);
        assert_eq!(classify_author(Some("Make.com")), AuthorClass::External);
        assert_eq!(classify_author(Some("EXTERNAL-sync")), AuthorClass::External);
    }

    #[test]
    fn test_bot_wins_over_external() {
        assert_eq!(classify_author(Some("external_bot")), AuthorClass::Bot);
    }

    #[test]
    fn test_plain_users() {
        assert_eq!(classify_author(Some("jane@x.com")), AuthorClass::User);
        assert_eq!(classify_author(Some("+15551234567")), AuthorClass::User);
    }
}
