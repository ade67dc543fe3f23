use scout_bot::config::{self, BotConfig};
use scout_bot::{app, logging};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = BotConfig::from_env()?;
    logging::initialize(config.log_destination);
    let token = config::bot_token_from_env()?;
    app::run(config, token).await
}
