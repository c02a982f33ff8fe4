use std::sync::Arc;

use carga_platform::api;
use carga_platform::api::grpc::GrpcMarketplaceService;
use carga_platform::api::grpc::pb::marketplace_service_server::MarketplaceServiceServer;
use carga_platform::config::Config;
use carga_platform::error::AppError;
use carga_platform::state::AppState;
use tonic::transport::Server as TonicServer;
use tower_http::services::ServeDir;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(config.log_level.clone()))
        .with_target(false)
        .compact()
        .init();

    let app_state = if config.seed_demo_data {
        AppState::seeded(config.event_buffer_size, config.notification_history)
    } else {
        AppState::new(config.event_buffer_size, config.notification_history)
    };
    let shared_state = Arc::new(app_state);

    let app = api::rest::router(shared_state.clone())
        .fallback_service(ServeDir::new(&config.static_dir))
        .layer(api::rest::cors_layer(&config.cors_origins)?);

    let grpc_addr = format!("0.0.0.0:{}", config.grpc_port)
        .parse()
        .map_err(|err| AppError::Internal(format!("invalid grpc address: {err}")))?;
    let grpc_service = GrpcMarketplaceService::new(shared_state.clone());

    tokio::spawn(async move {
        tracing::info!(grpc_port = %grpc_addr, "grpc server started");
        if let Err(err) = TonicServer::builder()
            .add_service(MarketplaceServiceServer::new(grpc_service))
            .serve(grpc_addr)
            .await
        {
            tracing::error!(error = %err, "grpc server failed");
        }
    });

    let bind_addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|err| AppError::Internal(format!("failed to bind {bind_addr}: {err}")))?;

    tracing::info!(
        http_port = config.http_port,
        static_dir = %config.static_dir,
        "http server started"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| AppError::Internal(format!("server error: {err}")))?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
