use anyhow::{Context, Result};
use particles_config::config::{Settings, command};
use particles_config::server;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = command().get_matches();
    let settings = Settings::from_matches(&matches).context("Failed to load settings")?;

    log::info!("particles-server starting on {}", settings.bind);
    if let Some(seed) = settings.seed {
        log::info!("Random configurations seeded with {}", seed);
    }

    server::serve(settings).await
}
