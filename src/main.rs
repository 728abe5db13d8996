use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use splitlog::config::{self, Config};
use splitlog::logging::{LogRouter, RouterLayer};

fn main() -> Result<()> {
    let config_path = config::config_file_path();
    let first_run = !config_path.exists();
    let stored = Config::load_from(&config_path)?;
    let config = stored.clone().apply_env();
    let mask = config.level_mask()?;

    // Routing is fixed here, before the router is shared
    let mut router = LogRouter::new().with_format(config.record_format());
    let log_file = router
        .initialize(mask, &config.logs_dir)
        .map_err(|e| anyhow::anyhow!(e.friendly_message("Failed to initialize logging")))?;
    let router = Arc::new(router);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "trace".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(RouterLayer::new(Arc::clone(&router)))
        .init();

    tracing::info!("Logging to: {}", log_file.path.display());
    if first_run {
        match stored.save_to(&config_path) {
            Ok(()) => tracing::info!("Wrote default config to {}", config_path.display()),
            Err(e) => tracing::warn!("Could not write default config: {:#}", e),
        }
    }
    splitlog::trace!(router, "level mask {:#06b}", router.active_level());
    splitlog::warning!(router, "levels '{}' resolved to mask {}", config.levels, mask);

    for line in std::io::stdin().lines() {
        let line = line.context("Failed to read stdin")?;
        match line.split_once(' ') {
            Some(("trace", rest)) => splitlog::trace!(router, "{}", rest),
            Some(("warning", rest)) => splitlog::warning!(router, "{}", rest),
            Some(("error", rest)) => splitlog::error!(router, "{}", rest),
            Some(("fatal", rest)) => splitlog::fatal!(router, "{}", rest),
            _ => splitlog::info!(router, "{}", line),
        }
    }

    router
        .stop()
        .map_err(|e| anyhow::anyhow!(e.friendly_message("Failed to close log file")))?;
    Ok(())
}
