mod config;
mod services;

use crate::config::LauncherConfig;
use actix_web::{web, App, HttpServer};
use env_logger::Env;
use log::{error, info, warn};
use std::io;
use std::thread;
use std::time::Duration;

/// Routes of the launcher. The embedded bundle catches everything else.
fn configure(cfg: &mut web::ServiceConfig) {
    services::app_config::configure_routes(cfg);
    cfg.default_service(web::route().to(services::embedded::serve_embedded));
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = LauncherConfig::from_env().map_err(|err| {
        error!("{err}");
        io::Error::new(io::ErrorKind::InvalidInput, err)
    })?;
    let url = config.url();

    if config.open_browser {
        let url = url.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(500));
            if let Err(err) = webbrowser::open(&url) {
                warn!("could not open a browser at {url}: {err}");
            }
        });
    }

    info!("Server running at {}", url);
    info!("Parsing service at {}", config.app.api_base_url);

    let app_config = web::Data::new(config.app.clone());
    HttpServer::new(move || App::new().app_data(app_config.clone()).configure(configure))
        .bind((config.host.as_str(), config.port))?
        .run()
        .await
}
