use crate::{Button, ChatId, FilterState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Reply {
        chat_id: ChatId,
        text: String,
    },
    ShowMenu {
        chat_id: ChatId,
        prompt: String,
        buttons: Vec<Button>,
    },
    /// Run the search pipeline with this snapshot and send the outcome to the chat.
    RunSearch {
        chat_id: ChatId,
        filters: FilterState,
    },
}
