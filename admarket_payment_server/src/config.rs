use std::env;

use log::*;
#[cfg(feature = "stripe")]
use stripe_tools::StripeConfig;

const DEFAULT_APG_HOST: &str = "127.0.0.1";
const DEFAULT_APG_PORT: u16 = 8360;
const DEFAULT_APG_DATABASE_URL: &str = "sqlite://data/admarket.db";

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Settings for the hosted card-checkout workflow. `None` disables the card checkout route;
    /// crypto payments and catalog reads are unaffected.
    #[cfg(feature = "stripe")]
    pub stripe_config: Option<StripeConfig>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_APG_HOST.to_string(),
            port: DEFAULT_APG_PORT,
            database_url: DEFAULT_APG_DATABASE_URL.to_string(),
            #[cfg(feature = "stripe")]
            stripe_config: None,
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("APG_HOST").ok().unwrap_or_else(|| DEFAULT_APG_HOST.into());
        let port = env::var("APG_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for APG_PORT. {e} Using the default, {DEFAULT_APG_PORT}, instead."
                    );
                    DEFAULT_APG_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_APG_PORT);
        let database_url = env::var("APG_DATABASE_URL").ok().unwrap_or_else(|| {
            warn!("🪛️ APG_DATABASE_URL is not set. Using the default, {DEFAULT_APG_DATABASE_URL}, instead.");
            DEFAULT_APG_DATABASE_URL.to_string()
        });
        #[cfg(feature = "stripe")]
        let stripe_config = match env::var("APG_STRIPE_WEBHOOK_URL") {
            Ok(url) => Some(StripeConfig::new(&url)),
            Err(_) => {
                warn!("🪛️ APG_STRIPE_WEBHOOK_URL is not set. The card checkout route is disabled.");
                None
            },
        };
        Self {
            host,
            port,
            database_url,
            #[cfg(feature = "stripe")]
            stripe_config,
        }
    }
}
