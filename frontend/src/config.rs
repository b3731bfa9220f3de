use common::config::{AppConfig, APP_CONFIG_PATH};
use gloo_net::http::Request;
use log::{info, warn};

/// Fetches the launcher's runtime configuration. Any failure falls back to
/// the built-in defaults so the app still starts when opened without the
/// launcher.
pub async fn load_app_config() -> AppConfig {
    let response = match Request::get(APP_CONFIG_PATH).send().await {
        Ok(response) if response.ok() => response,
        Ok(response) => {
            warn!("{APP_CONFIG_PATH} answered {}, using defaults", response.status());
            return AppConfig::default();
        }
        Err(err) => {
            warn!("could not fetch {APP_CONFIG_PATH}: {err}, using defaults");
            return AppConfig::default();
        }
    };

    match response.json::<AppConfig>().await {
        Ok(config) => {
            info!("parsing service at {}", config.api_base_url);
            config
        }
        Err(err) => {
            warn!("invalid {APP_CONFIG_PATH}: {err}, using defaults");
            AppConfig::default()
        }
    }
}
