use super::{ConversationId, UserId};
use chrono::{DateTime, Utc};

/// One ongoing support thread, owned by a user. Created lazily on the
/// first chat turn and never explicitly closed.
#[derive(Debug, Clone)]
pub struct Conversation {
    pub id: ConversationId,
    pub user_id: UserId,
    pub title: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    pub fn new(user_id: UserId, title: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: ConversationId::new(),
            user_id,
            title,
            created_at: now,
            updated_at: now,
        }
    }
}
