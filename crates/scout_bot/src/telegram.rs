//! Minimal Telegram Bot API client: long polling plus the four calls the bot needs.

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use scout_core::{Button, ChatId};
use scout_engine::Document;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Extra time on top of the long-poll timeout before a request is abandoned.
const POLL_GRACE: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum TelegramError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("telegram api error {code:?}: {description}")]
    Api {
        code: Option<i64>,
        description: String,
    },
    #[error("encoding request: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
    error_code: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
    pub callback_query: Option<CallbackQuery>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Chat {
    pub id: ChatId,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub data: Option<String>,
    /// Message the keyboard was attached to; absent for inline-mode messages.
    pub message: Option<Message>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineKeyboardButton {
    pub text: String,
    pub callback_data: String,
}

impl InlineKeyboardMarkup {
    /// One button per row, in the given order.
    pub fn from_buttons(buttons: &[Button]) -> Self {
        Self {
            inline_keyboard: buttons
                .iter()
                .map(|button| {
                    vec![InlineKeyboardButton {
                        text: button.text.clone(),
                        callback_data: button.callback_data.clone(),
                    }]
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TelegramClient {
    http: reqwest::Client,
    /// `{api_url}/bot{token}`
    endpoint: String,
}

impl TelegramClient {
    pub fn new(api_url: &str, token: &str, poll_timeout: Duration) -> Result<Self, TelegramError> {
        let http = reqwest::Client::builder()
            .timeout(poll_timeout + POLL_GRACE)
            .build()?;
        Ok(Self {
            http,
            endpoint: format!("{}/bot{}", api_url.trim_end_matches('/'), token),
        })
    }

    pub async fn get_updates(
        &self,
        offset: i64,
        timeout_secs: u64,
    ) -> Result<Vec<Update>, TelegramError> {
        self.call(
            "getUpdates",
            &json!({
                "offset": offset,
                "timeout": timeout_secs,
                "allowed_updates": ["message", "callback_query"],
            }),
        )
        .await
    }

    /// Long polling only works while no webhook is registered.
    pub async fn delete_webhook(&self) -> Result<bool, TelegramError> {
        self.call("deleteWebhook", &json!({})).await
    }

    pub async fn send_message(
        &self,
        chat_id: ChatId,
        text: &str,
        markup: Option<&InlineKeyboardMarkup>,
    ) -> Result<Message, TelegramError> {
        let mut body = json!({ "chat_id": chat_id, "text": text });
        if let Some(markup) = markup {
            body["reply_markup"] = serde_json::to_value(markup)?;
        }
        self.call("sendMessage", &body).await
    }

    pub async fn send_document(
        &self,
        chat_id: ChatId,
        document: &Document,
        markup: Option<&InlineKeyboardMarkup>,
    ) -> Result<Message, TelegramError> {
        let part = Part::bytes(document.bytes.clone())
            .file_name(document.filename.clone());
        let mut form = Form::new()
            .text("chat_id", chat_id.to_string())
            .part("document", part);
        if let Some(markup) = markup {
            form = form.text("reply_markup", serde_json::to_string(markup)?);
        }
        let response = self
            .http
            .post(self.method_url("sendDocument"))
            .multipart(form)
            .send()
            .await?;
        unwrap_response(response.json().await?)
    }

    pub async fn answer_callback_query(
        &self,
        callback_query_id: &str,
    ) -> Result<bool, TelegramError> {
        self.call(
            "answerCallbackQuery",
            &json!({ "callback_query_id": callback_query_id }),
        )
        .await
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        body: &serde_json::Value,
    ) -> Result<T, TelegramError> {
        let response = self
            .http
            .post(self.method_url(method))
            .json(body)
            .send()
            .await?;
        unwrap_response(response.json().await?)
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/{}", self.endpoint, method)
    }
}

fn unwrap_response<T>(response: ApiResponse<T>) -> Result<T, TelegramError> {
    match response {
        ApiResponse {
            ok: true,
            result: Some(result),
            ..
        } => Ok(result),
        ApiResponse {
            description,
            error_code,
            ..
        } => Err(TelegramError::Api {
            code: error_code,
            description: description.unwrap_or_else(|| "missing result".to_string()),
        }),
    }
}
