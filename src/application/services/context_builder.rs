use crate::domain::Message;

/// Renders the prompt sent to the completion provider: a fixed persona
/// preamble, the conversation history, and the new user message.
///
/// History is bounded to the most recent `window` entries; anything older
/// is silently dropped. That truncation is the growth cap for prompts, not
/// an oversight.
#[derive(Debug, Clone)]
pub struct ContextBuilder {
    persona: String,
    window: usize,
}

impl ContextBuilder {
    pub fn new(persona: String, window: usize) -> Self {
        Self { persona, window }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Pure function of the supplied history; `history` is expected in
    /// ascending creation order and must not include `new_user_message`.
    pub fn build_prompt(&self, history: &[Message], new_user_message: &str) -> String {
        let start = history.len().saturating_sub(self.window);
        let recent = &history[start..];

        let mut prompt = String::with_capacity(self.persona.len() + 256);
        prompt.push_str(&self.persona);
        prompt.push_str("\n\n");

        if !recent.is_empty() {
            prompt.push_str("Conversation history:\n");
            for message in recent {
                prompt.push_str(message.role.prompt_label());
                prompt.push_str(": ");
                prompt.push_str(&message.content);
                prompt.push('\n');
            }
            prompt.push('\n');
        }

        prompt.push_str("User: ");
        prompt.push_str(new_user_message);
        prompt
    }
}
