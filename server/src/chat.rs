//! Bounded chat transcript.

use shared::{ChatEntry, MAX_CHAT, MAX_CHAT_LEN};

/// Append-only message buffer that keeps the newest [`MAX_CHAT`] entries.
/// The buffer grows to twice the limit before it is trimmed back.
#[derive(Debug, Default)]
pub struct ChatLog {
    entries: Vec<ChatEntry>,
}

impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message, truncated to [`MAX_CHAT_LEN`] characters. Empty
    /// messages are ignored.
    pub fn append(&mut self, name: &str, text: &str) {
        if text.is_empty() {
            return;
        }

        self.entries.push(ChatEntry {
            name: name.to_string(),
            text: text.chars().take(MAX_CHAT_LEN).collect(),
        });

        if self.entries.len() > MAX_CHAT * 2 {
            let excess = self.entries.len() - MAX_CHAT;
            self.entries.drain(..excess);
        }
    }

    /// The newest entries, oldest first.
    pub fn recent(&self) -> Vec<ChatEntry> {
        let start = self.entries.len().saturating_sub(MAX_CHAT);
        self.entries[start..].to_vec()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_recent() {
        let mut chat = ChatLog::new();
        chat.append("alice", "hi");
        chat.append("bob", "hello");

        let recent = chat.recent();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].name, "alice");
        assert_eq!(recent[1].text, "hello");
    }

    #[test]
    fn test_empty_message_ignored() {
        let mut chat = ChatLog::new();
        chat.append("alice", "");
        assert!(chat.is_empty());
    }

    #[test]
    fn test_long_message_truncated_by_chars() {
        let mut chat = ChatLog::new();
        chat.append("alice", &"오".repeat(MAX_CHAT_LEN + 50));
        assert_eq!(chat.recent()[0].text.chars().count(), MAX_CHAT_LEN);
    }

    #[test]
    fn test_recent_returns_newest_window() {
        let mut chat = ChatLog::new();
        for i in 0..150 {
            chat.append("bot", &i.to_string());
        }

        let recent = chat.recent();
        assert_eq!(recent.len(), MAX_CHAT);
        assert_eq!(recent[0].text, "50");
        assert_eq!(recent[MAX_CHAT - 1].text, "149");
    }

    #[test]
    fn test_buffer_is_trimmed() {
        let mut chat = ChatLog::new();
        for i in 0..(MAX_CHAT * 2 + 1) {
            chat.append("bot", &i.to_string());
        }

        assert_eq!(chat.len(), MAX_CHAT);
        assert_eq!(chat.recent()[MAX_CHAT - 1].text, (MAX_CHAT * 2).to_string());
    }
}
