use async_trait::async_trait;
use scout_core::{Button, ChatId};
use scout_engine::Document;

use crate::telegram::{InlineKeyboardMarkup, TelegramClient, TelegramError};

/// Outbound side of a chat: what the effect runner needs to talk back to users.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<(), TelegramError>;

    async fn send_menu(
        &self,
        chat_id: ChatId,
        prompt: &str,
        buttons: &[Button],
    ) -> Result<(), TelegramError>;

    async fn send_document(
        &self,
        chat_id: ChatId,
        document: &Document,
        buttons: &[Button],
    ) -> Result<(), TelegramError>;

    /// Stops the client-side spinner on a pressed button.
    async fn acknowledge(&self, callback_id: &str) -> Result<(), TelegramError>;
}

#[async_trait]
impl ChatTransport for TelegramClient {
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<(), TelegramError> {
        self.send_message(chat_id, text, None).await.map(drop)
    }

    async fn send_menu(
        &self,
        chat_id: ChatId,
        prompt: &str,
        buttons: &[Button],
    ) -> Result<(), TelegramError> {
        let markup = InlineKeyboardMarkup::from_buttons(buttons);
        self.send_message(chat_id, prompt, Some(&markup))
            .await
            .map(drop)
    }

    async fn send_document(
        &self,
        chat_id: ChatId,
        document: &Document,
        buttons: &[Button],
    ) -> Result<(), TelegramError> {
        let markup = (!buttons.is_empty())
            .then(|| InlineKeyboardMarkup::from_buttons(buttons));
        TelegramClient::send_document(self, chat_id, document, markup.as_ref())
            .await
            .map(drop)
    }

    async fn acknowledge(&self, callback_id: &str) -> Result<(), TelegramError> {
        self.answer_callback_query(callback_id).await.map(drop)
    }
}
