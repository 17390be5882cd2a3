use crate::api::models::Message;
use crate::dashboard::format::{format_time, or_empty};
use crate::dashboard::section::Section;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConversationKind {
    Chat,
    Sms,
}

impl ConversationKind {
    pub fn path_prefix(self) -> &'static str {
        match self {
            ConversationKind::Chat => "chat",
            ConversationKind::Sms => "sms",
        }
    }

    /// The list section the viewer is opened from.
    pub fn section(self) -> Section {
        match self {
            ConversationKind::Chat => Section::Chats,
            ConversationKind::Sms => Section::Sms,
        }
    }

    pub fn error_text(self) -> &'static str {
        match self {
            ConversationKind::Chat => "Error loading chat",
            ConversationKind::Sms => "Error loading SMS",
        }
    }

    fn is_outgoing(self, message: &Message) -> bool {
        match self {
            ConversationKind::Chat => message.sender.as_deref() == Some("You"),
            ConversationKind::Sms => message.sms_type.as_deref() == Some("sent"),
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelState {
    #[default]
    Closed,
    Opening,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Incoming,
    Outgoing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bubble {
    pub text: String,
    pub time: String,
    pub direction: Direction,
}

impl Bubble {
    pub fn from_message(kind: ConversationKind, message: &Message) -> Self {
        Self {
            text: or_empty(message.text.as_deref()),
            time: format_time(message.timestamp()),
            direction: if kind.is_outgoing(message) {
                Direction::Outgoing
            } else {
                Direction::Incoming
            },
        }
    }
}

/// Everything a conversation viewer shows.
#[derive(Debug, Clone, Default)]
pub struct ConversationPanel {
    pub state: PanelState,
    pub title: String,
    pub bubbles: Vec<Bubble>,
    pub error: Option<String>,
}

impl ConversationPanel {
    pub fn is_visible(&self) -> bool {
        self.state != PanelState::Closed
    }

    pub(crate) fn reset_for(&mut self, title: &str) {
        self.state = PanelState::Opening;
        self.title = title.to_string();
        self.bubbles.clear();
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(sender: Option<&str>, sms_type: Option<&str>) -> Message {
        Message {
            text: Some("hey".into()),
            time: Some("2024-01-01T08:15:00Z".into()),
            sender: sender.map(Into::into),
            sms_type: sms_type.map(Into::into),
            ..Default::default()
        }
    }

    #[test]
    fn chat_direction_follows_sender() {
        let out = Bubble::from_message(ConversationKind::Chat, &message(Some("You"), None));
        let inc = Bubble::from_message(ConversationKind::Chat, &message(Some("Bob"), None));
        assert_eq!(out.direction, Direction::Outgoing);
        assert_eq!(inc.direction, Direction::Incoming);
        assert_eq!(out.time, "8:15 AM");
    }

    #[test]
    fn sms_direction_follows_sms_type() {
        let out = Bubble::from_message(ConversationKind::Sms, &message(None, Some("sent")));
        let inc = Bubble::from_message(ConversationKind::Sms, &message(Some("You"), Some("inbox")));
        assert_eq!(out.direction, Direction::Outgoing);
        assert_eq!(inc.direction, Direction::Incoming);
    }

    #[test]
    fn reset_clears_previous_thread() {
        let mut panel = ConversationPanel {
            state: PanelState::Open,
            title: "Old".into(),
            bubbles: vec![Bubble::from_message(ConversationKind::Chat, &message(None, None))],
            error: Some("boom".into()),
        };
        panel.reset_for("New");
        assert_eq!(panel.state, PanelState::Opening);
        assert_eq!(panel.title, "New");
        assert!(panel.bubbles.is_empty());
        assert!(panel.error.is_none());
        assert!(panel.is_visible());
    }
}
