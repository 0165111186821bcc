use std::sync::Arc;

use redis::Client as RedisClient;

mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod graceful_shutdown;

pub use domain::{entities, use_cases};
pub use interfaces::{handlers, routes};
pub use infrastructure::{assets, email, limiter, utils};

use assets::store::{AssetStore, HttpAssetStore};
use email::resend::{EmailSender, ResendMailer};
use limiter::store::{RateLimitStore, RedisRateLimitStore};

pub struct AppState {
    pub assets: Arc<dyn AssetStore>,
    pub mailer: Arc<dyn EmailSender>,
    pub rate_limit_store: Option<Arc<dyn RateLimitStore>>,
    pub config: settings::AppConfig,
}

impl AppState {
    pub fn new(config: &settings::AppConfig) -> Self {
        let http = reqwest::Client::new();

        let assets: Arc<dyn AssetStore> = Arc::new(HttpAssetStore::new(
            http.clone(),
            &config.asset_store_url,
        ));
        let mailer: Arc<dyn EmailSender> = Arc::new(ResendMailer::new(http, config));

        let rate_limit_store = config.redis_url.as_ref().and_then(|url| {
            RedisClient::open(url.as_str())
                .map_err(|e| tracing::error!("Redis connection error: {}", e))
                .ok()
                .map(|client| {
                    Arc::new(RedisRateLimitStore::new(client)) as Arc<dyn RateLimitStore>
                })
        });

        AppState {
            assets,
            mailer,
            rate_limit_store,
            config: config.clone(),
        }
    }
}
