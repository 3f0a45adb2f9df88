use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use env_logger::Env;
use log::{info, warn};
use parse_relay::config::RelayConfig;
use parse_relay::job_controller::state::JobsState;
use parse_relay::parsing_api::{LlamaParseClient, ParsingApi};
use parse_relay::services;
use std::sync::Arc;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = RelayConfig::from_env().map_err(std::io::Error::other)?;
    if config.api_key.is_none() {
        warn!("LLAMA_API_KEY environment variable not set; remote calls will be rejected");
    }

    let client = LlamaParseClient::new(
        config.api_base_url.clone(),
        config.api_key.clone(),
        config.remote_timeout,
    )
    .map_err(std::io::Error::other)?;
    let api: web::Data<dyn ParsingApi> = web::Data::from(Arc::new(client) as Arc<dyn ParsingApi>);
    let jobs = web::Data::new(JobsState::new(config.max_tracked_jobs));

    let bind = (config.host.clone(), config.port);
    info!(
        "Relay listening on http://{}:{}, forwarding to {}",
        bind.0, bind.1, config.api_base_url
    );
    info!("Allowed origins: {}", config.allowed_origins.join(", "));
    let settings = web::Data::new(config);

    HttpServer::new(move || {
        App::new()
            .wrap(services::cors_policy(&settings))
            .wrap(Logger::default())
            .app_data(jobs.clone())
            .app_data(api.clone())
            .app_data(settings.clone())
            .configure(services::configure)
    })
    .bind(bind)?
    .run()
    .await
}
