use std::sync::Arc;

use attachment_backend::{server, types::Environment};
use tracing_subscriber::{filter::LevelFilter, fmt, EnvFilter};
use url_signer::UrlSigner;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let environment = Environment::from_env();

    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(environment.tracing_level()).into())
        .from_env_lossy();

    // Configure logging format based on environment
    // Use JSON format for staging/production, regular format for development
    match environment {
        Environment::Production | Environment::Staging => {
            fmt().json().with_env_filter(env_filter).init();
        }
        Environment::Development => {
            fmt().with_env_filter(env_filter).init();
        }
    }

    let url_signer = Arc::new(UrlSigner::new(environment.signer_config()?)?);

    server::start(environment, url_signer).await
}
