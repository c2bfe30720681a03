use medicall_service::{Config, create_app};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing; `LOG_FORMAT=pretty` for development, JSON otherwise
fn init_tracing() {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "medicall_service=debug,tower_http=debug".into());

    match log_format.as_str() {
        "pretty" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_target(true)
                        .with_level(true),
                )
                .init();
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = Config::from_env();
    let app = create_app(&config);

    let listener = TcpListener::bind(config.bind_address.as_str()).await?;
    let addr = listener.local_addr()?;

    info!("Medicall service starting on {}", addr);
    info!("Dispatch endpoint: POST http://{}/medicall", addr);
    info!("Patient analysis endpoint: POST http://{}/analyze-patient", addr);
    info!(model = %config.model, "Using generative model");

    axum::serve(listener, app).await?;

    Ok(())
}
