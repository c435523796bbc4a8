use crate::cli::commands::ServeArgs;
use crate::config::AppConfig;
use crate::errors::VoiceError;
use crate::api;
use tokio_util::sync::CancellationToken;
use tracing::info;

pub async fn handle_serve(args: ServeArgs, config: AppConfig) -> Result<(), VoiceError> {
    info!(host = %args.host, port = args.port, "Starting API server");

    let state = api::create_app_state(config, &args.db).await?;
    info!(chain = ?state.resolver.chain(), "Provider cascade configured");
    let app = api::build_router(state);

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    let shutdown = CancellationToken::new();
    let trigger = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutdown requested");
            trigger.cancel();
        }
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await
        .map_err(|e| VoiceError::Internal(format!("Server error: {}", e)))?;

    Ok(())
}
