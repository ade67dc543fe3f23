//! Long-polling loop: turns Telegram updates into core messages.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use scout_core::Msg;
use scout_logging::{scout_debug, scout_info, scout_warn};
use tokio::task::{JoinHandle, JoinSet};

use crate::effects::Bot;
use crate::telegram::{TelegramClient, TelegramError, Update};

/// How often idle sessions are swept.
pub const TICK_INTERVAL: Duration = Duration::from_secs(60);
const ERROR_BACKOFF: Duration = Duration::from_secs(5);

/// Maps one update to a core message. Updates without text or callback data are ignored.
pub fn route(update: &Update, at: Instant) -> Option<Msg> {
    if let Some(callback) = &update.callback_query {
        let chat_id = callback.message.as_ref()?.chat.id;
        let data = callback.data.clone()?;
        return Some(Msg::ButtonPressed { chat_id, data, at });
    }
    let message = update.message.as_ref()?;
    Some(Msg::TextReceived {
        chat_id: message.chat.id,
        text: message.text.clone()?,
        at,
    })
}

pub struct Poller {
    client: Arc<TelegramClient>,
    bot: Arc<Bot>,
    timeout_secs: u64,
    offset: i64,
}

impl Poller {
    pub fn new(client: Arc<TelegramClient>, bot: Arc<Bot>, timeout_secs: u64) -> Self {
        Self {
            client,
            bot,
            timeout_secs,
            offset: 0,
        }
    }

    /// Offset to confirm on the next `getUpdates` call.
    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// One `getUpdates` round. Each update is handled on its own task in `tasks`.
    pub async fn poll_once(&mut self, tasks: &mut JoinSet<()>) -> Result<usize, TelegramError> {
        let updates = self
            .client
            .get_updates(self.offset, self.timeout_secs)
            .await?;
        let count = updates.len();
        for update in updates {
            self.offset = self.offset.max(update.update_id + 1);
            let callback_id = update.callback_query.as_ref().map(|cb| cb.id.clone());
            let msg = route(&update, Instant::now());
            if msg.is_none() && callback_id.is_none() {
                scout_debug!("ignoring update {}", update.update_id);
                continue;
            }
            let bot = Arc::clone(&self.bot);
            tasks.spawn(async move {
                if let Some(id) = callback_id {
                    bot.acknowledge(&id).await;
                }
                if let Some(msg) = msg {
                    bot.handle(msg).await;
                }
            });
        }
        Ok(count)
    }

    /// Polls until `shutdown` resolves, then waits for in-flight updates.
    pub async fn run_until<F>(mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        let ticker = spawn_ticker(Arc::clone(&self.bot));
        let mut tasks = JoinSet::new();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                polled = self.poll_once(&mut tasks) => {
                    if let Err(err) = polled {
                        scout_warn!("getUpdates failed: {}", err);
                        tokio::time::sleep(ERROR_BACKOFF).await;
                    }
                }
            }
            while tasks.try_join_next().is_some() {}
        }

        ticker.abort();
        scout_info!("shutting down, {} update(s) in flight", tasks.len());
        while tasks.join_next().await.is_some() {}
    }
}

fn spawn_ticker(bot: Arc<Bot>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(TICK_INTERVAL);
        // The first tick completes immediately.
        interval.tick().await;
        loop {
            interval.tick().await;
            let before = bot.session_count();
            bot.dispatch(Msg::Tick {
                now: Instant::now(),
            });
            let evicted = before.saturating_sub(bot.session_count());
            if evicted > 0 {
                scout_info!("evicted {} idle session(s)", evicted);
            }
        }
    })
}
