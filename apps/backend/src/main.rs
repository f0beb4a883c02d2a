use actix_web::{web, App, HttpServer};
use mafia_backend::config::app::AppConfig;
use mafia_backend::infra::state::build_state;
use mafia_backend::middleware::cors::cors_middleware;
use mafia_backend::middleware::request_trace::RequestTrace;
use mafia_backend::routes;
use tracing::info;

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    let app_state = match build_state()
        .with_store_config(&config.store)
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            eprintln!("❌ Failed to build application state: {e}");
            std::process::exit(1);
        }
    };

    info!(
        host = %config.host,
        port = config.port,
        store = app_state.sessions.store_kind(),
        "Starting Mafia session server"
    );

    let data = web::Data::new(app_state);
    let cors_origins = config.cors_origins.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware(&cors_origins))
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
