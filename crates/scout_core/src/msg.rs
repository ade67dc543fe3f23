use std::time::Instant;

use crate::ChatId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// A text message or command from a chat.
    TextReceived {
        chat_id: ChatId,
        text: String,
        at: Instant,
    },
    /// An inline keyboard button was pressed; `data` is the button's callback data.
    ButtonPressed {
        chat_id: ChatId,
        data: String,
        at: Instant,
    },
    /// The transport knows the conversation is over.
    SessionEnded { chat_id: ChatId },
    /// Periodic housekeeping; evicts idle sessions.
    Tick { now: Instant },
}
