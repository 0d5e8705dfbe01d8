use anyhow::{ensure, Result};
use dashbot::cancel::CancelToken;
use dashbot::detect::TemplateDetector;
use dashbot::gesture::SwipeExecutor;
use dashbot::reactor::ReactionLoop;
use dashbot::source::ScreenSource;
use dashbot_core::BotConfig;
use dashbot_cv::{TemplateCache, TemplateMatcher};
use std::path::Path;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = match std::env::args().nth(1) {
        Some(path) => BotConfig::load(Path::new(&path))?,
        None => BotConfig::default(),
    };

    let cache = TemplateCache::load(
        &config.template_dir,
        config.bindings.iter().map(|b| b.pattern.as_str()),
    );
    ensure!(
        !cache.is_empty(),
        "none of the configured templates could be loaded from {}",
        config.template_dir.display()
    );

    let cancel = CancelToken::new();
    let handler_token = cancel.clone();
    ctrlc::set_handler(move || handler_token.cancel())?;

    let source = ScreenSource::new(config.region)?;
    let executor = SwipeExecutor::new(config.region, config.swipe_duration())?;

    info!(
        region = ?config.region,
        bindings = config.bindings.len(),
        templates = cache.len(),
        interval_secs = config.interval_secs,
        "bot running, press Ctrl+C to stop"
    );

    let detector = TemplateDetector::new(cache, TemplateMatcher::new(config.threshold));
    let mut bot = ReactionLoop::new(
        source,
        detector,
        executor,
        config.bindings.clone(),
        config.interval(),
        cancel,
    );
    bot.run()?;

    info!("bot stopped");
    Ok(())
}
