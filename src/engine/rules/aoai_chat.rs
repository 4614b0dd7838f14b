//! Shape rule for Azure OpenAI chat/completion payloads
//!
//! AOAI endpoints accept either a completion-style `prompt` string or a
//! chat-style `messages` list. `prompt` wins when both are present.

use serde_json::Value;

use super::{
    ShapeRule, Violation, MSG_MESSAGES_NOT_LIST, MSG_PROMPT_NOT_STRING,
    MSG_PROMPT_OR_MESSAGES_MISSING,
};
use crate::model::Capability;

/// Checks the `prompt`-or-`messages` shape expected by AOAI endpoints
#[derive(Debug, Clone, Copy, Default)]
pub struct AoaiChatRule;

impl AoaiChatRule {
    /// Create a new AOAI-chat shape rule
    pub fn new() -> Self {
        Self
    }
}

impl ShapeRule for AoaiChatRule {
    fn capability(&self) -> Capability {
        Capability::AoaiChat
    }

    fn check(&self, payload: &Value) -> Vec<Violation> {
        let mut violations = Vec::new();

        match payload.get("prompt") {
            Some(prompt) => {
                if !prompt.is_string() {
                    violations.push(Violation::new(Capability::AoaiChat, MSG_PROMPT_NOT_STRING));
                }
            }
            None => match payload.get("messages") {
                Some(messages) => {
                    if !messages.is_array() {
                        violations
                            .push(Violation::new(Capability::AoaiChat, MSG_MESSAGES_NOT_LIST));
                    }
                }
                None => violations.push(Violation::new(
                    Capability::AoaiChat,
                    MSG_PROMPT_OR_MESSAGES_MISSING,
                )),
            },
        }

        violations
    }
}
