use std::sync::Arc;

use anyhow::Context;
use scout_core::AppState;
use scout_engine::{
    ChromePdfConverter, DocumentConverter, DocumentFormat, HhExtractor, HtmlPassthrough,
    Renderer, ReqwestFetcher, SearchPipeline,
};
use scout_logging::{scout_error, scout_info};

use crate::config::BotConfig;
use crate::effects::{Bot, EffectRunner};
use crate::poller::Poller;
use crate::telegram::TelegramClient;

pub fn build_pipeline(config: &BotConfig) -> anyhow::Result<SearchPipeline> {
    let fetcher = ReqwestFetcher::new(config.fetch_settings())
        .context("building http client")?;
    let extractor = HhExtractor::new().context("compiling selectors")?;
    let converter: Arc<dyn DocumentConverter> = match config.document_format {
        DocumentFormat::Pdf => Arc::new(ChromePdfConverter::new()),
        DocumentFormat::Html => Arc::new(HtmlPassthrough),
    };
    let renderer = Renderer::new(config.template_source(), converter)?;
    Ok(SearchPipeline::new(
        config.search_url.clone(),
        Arc::new(fetcher),
        Arc::new(extractor),
        Arc::new(renderer),
    ))
}

/// Runs the bot until Ctrl-C.
pub async fn run(config: BotConfig, token: String) -> anyhow::Result<()> {
    let pipeline = build_pipeline(&config)?;
    let client = Arc::new(TelegramClient::new(
        &config.telegram_api_url,
        &token,
        config.poll_timeout(),
    )?);
    client
        .delete_webhook()
        .await
        .context("removing webhook before polling")?;

    let runner = EffectRunner::new(Arc::new(pipeline), client.clone());
    let bot = Arc::new(Bot::new(
        AppState::with_session_ttl(config.session_ttl()),
        runner,
    ));

    scout_info!(
        "polling for updates; format={:?} search_url={}",
        config.document_format,
        config.search_url
    );
    Poller::new(client, bot, config.poll_timeout_secs)
        .run_until(async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                scout_error!("cannot listen for ctrl-c: {}", err);
                std::future::pending::<()>().await;
            }
        })
        .await;
    scout_info!("stopped");
    Ok(())
}
