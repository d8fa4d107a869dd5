use actix_web::{App, HttpServer, middleware::Logger, web};
use anyhow::Context;
use chrono::Local; // timestamp in log lines
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter
use std::sync::Arc;

use algodesk_admin::{
    config::Config,
    dashboard::{FileSessionStore, SessionStore},
    external::ApiClient,
    handlers,
    middlewares::{AuthGateMiddleware, create_cors},
    services::ConsoleService,
    swagger::swagger_config,
};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    let config = Config::from_toml().context("failed to load configuration")?;

    let client = ApiClient::new(&config.api).context("failed to build HTTP client")?;
    let store: Arc<dyn SessionStore> =
        Arc::new(FileSessionStore::new(&config.session.store_path));
    let console = ConsoleService::new(client, store.clone(), config.dashboard.clone());

    log::info!(
        "Starting admin gateway at {}:{} (backend {})",
        config.server.host,
        config.server.port,
        config.api.base_url
    );

    let allowed_origins = config.server.allowed_origins.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(AuthGateMiddleware::new(store.clone()))
            .wrap(create_cors(&allowed_origins))
            .wrap(Logger::default())
            .app_data(web::Data::new(console.clone()))
            .configure(swagger_config)
            .configure(handlers::auth_config)
            .service(web::scope("/api/v1").configure(handlers::resources_config))
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await?;

    Ok(())
}
