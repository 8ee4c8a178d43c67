use api::config::Config;
use api::state::AppState;
use lambda_http::{run, Error};
use std::env::set_var;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenvy::dotenv().ok();

    let on_lambda = std::env::var("AWS_LAMBDA_RUNTIME_API").is_ok();
    if on_lambda {
        set_var("AWS_LAMBDA_HTTP_IGNORE_STAGE_IN_PATH", "true");

        // required to enable CloudWatch error logging by the runtime
        lambda_http::tracing::init_default_subscriber();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .init();
    }

    let config = Config::from_env()?;
    info!(
        users_table = %config.users_table,
        validate_timezone = config.validate_timezone,
        legacy_double_encoding = config.legacy_double_encoding,
        "configuration loaded"
    );

    let app = api::create_app(AppState::from_config(&config)?);

    if on_lambda {
        return run(app).await;
    }

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
