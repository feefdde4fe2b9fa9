use std::fmt;

/// Who authored a message turn. Persisted as the `is_ai` boolean column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageRole {
    User,
    Assistant,
}

impl MessageRole {
    pub fn from_is_ai(is_ai: bool) -> Self {
        if is_ai {
            MessageRole::Assistant
        } else {
            MessageRole::User
        }
    }

    pub fn is_ai(&self) -> bool {
        matches!(self, MessageRole::Assistant)
    }

    /// Label used when rendering conversation history into a prompt.
    pub fn prompt_label(&self) -> &'static str {
        match self {
            MessageRole::User => "User",
            MessageRole::Assistant => "AI",
        }
    }
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.prompt_label())
    }
}
