use std::sync::{Arc, Mutex, PoisonError};

use scout_core::{load_more_button, update, AppState, ChatId, Effect, FilterState, Msg};
use scout_engine::{RequestResult, SearchPipeline};
use scout_logging::{scout_info, scout_warn};

use crate::transport::ChatTransport;

/// Executes effects produced by `update` against the search pipeline and the chat.
pub struct EffectRunner {
    pipeline: Arc<SearchPipeline>,
    transport: Arc<dyn ChatTransport>,
}

impl EffectRunner {
    pub fn new(pipeline: Arc<SearchPipeline>, transport: Arc<dyn ChatTransport>) -> Self {
        Self {
            pipeline,
            transport,
        }
    }

    /// Runs effects in order. Delivery failures are logged and do not stop later effects.
    pub async fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Reply { chat_id, text } => {
                    if let Err(err) = self.transport.send_text(chat_id, &text).await {
                        scout_warn!("reply to chat {} failed: {}", chat_id, err);
                    }
                }
                Effect::ShowMenu {
                    chat_id,
                    prompt,
                    buttons,
                } => {
                    if let Err(err) = self.transport.send_menu(chat_id, &prompt, &buttons).await {
                        scout_warn!("menu for chat {} failed: {}", chat_id, err);
                    }
                }
                Effect::RunSearch { chat_id, filters } => self.search(chat_id, &filters).await,
            }
        }
    }

    pub async fn acknowledge(&self, callback_id: &str) {
        if let Err(err) = self.transport.acknowledge(callback_id).await {
            scout_warn!("answering callback {} failed: {}", callback_id, err);
        }
    }

    async fn search(&self, chat_id: ChatId, filters: &FilterState) {
        scout_info!(
            "chat {} search query={:?} exp={} area={} page={}",
            chat_id,
            filters.query,
            filters.experience,
            filters.area,
            filters.page
        );
        let delivered = match self.pipeline.run(filters).await {
            RequestResult::Success(document) => {
                self.transport
                    .send_document(chat_id, &document, &[load_more_button()])
                    .await
            }
            RequestResult::Failure(message) => self.transport.send_text(chat_id, &message).await,
        };
        if let Err(err) = delivered {
            scout_warn!(
                "delivering search result to chat {} failed: {}",
                chat_id,
                err
            );
        }
    }
}

/// Routing state plus the runner for its effects.
///
/// The lock is held only around the pure `update` call, never across an await.
pub struct Bot {
    state: Mutex<AppState>,
    runner: EffectRunner,
}

impl Bot {
    pub fn new(state: AppState, runner: EffectRunner) -> Self {
        Self {
            state: Mutex::new(state),
            runner,
        }
    }

    pub fn dispatch(&self, msg: Msg) -> Vec<Effect> {
        let mut guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let state = std::mem::take(&mut *guard);
        let (state, effects) = update(state, msg);
        *guard = state;
        effects
    }

    pub async fn handle(&self, msg: Msg) {
        let effects = self.dispatch(msg);
        self.runner.run(effects).await;
    }

    pub async fn acknowledge(&self, callback_id: &str) {
        self.runner.acknowledge(callback_id).await;
    }

    pub fn session_count(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .sessions()
            .len()
    }
}
