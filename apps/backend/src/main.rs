use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use meme_clash::config::app::AppConfig;
use meme_clash::infra::state::build_state;
use meme_clash::middleware::request_trace::RequestTrace;
use meme_clash::routes;
use meme_clash::scheduler::PhaseRunner;
use meme_clash::telemetry;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };
    telemetry::init_tracing(config.log_format);

    let app_state = match build_state().with_config(config.clone()).build() {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "Failed to build application state");
            std::process::exit(1);
        }
    };

    let runner = Arc::new(PhaseRunner::new(app_state.flow.clone(), config.phase_tick));
    if let Err(e) = runner.recover().await {
        error!(error = %e, "Failed to recover phase deadlines");
    }
    let cancel = CancellationToken::new();
    let runner_task = {
        let runner = runner.clone();
        let cancel = cancel.clone();
        tokio::spawn(async move { runner.run(cancel).await })
    };

    info!(host = %config.host, port = config.port, "Starting Meme Clash backend");

    let data = web::Data::new(app_state);
    let server = HttpServer::new(move || {
        App::new()
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run();

    let result = server.await;

    cancel.cancel();
    if let Err(e) = runner_task.await {
        error!(error = %e, "Phase runner task panicked");
    }
    result
}
