use cookbook_api::create_router;
use cookbook_app::{AppConfig, AppContext};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let app_context = match AppContext::from_config(&config).await {
        Ok(ctx) => ctx,
        Err(e) => {
            tracing::error!("Failed to start: {}", e);
            std::process::exit(1);
        }
    };

    let app = create_router(app_context, config.secure_cookies);

    tracing::info!("Listening on http://{}", config.bind_addr);
    tracing::info!("Security: write limit 10/min, 100/hour per user");

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app.into_make_service())
        .await
        .expect("Server error");
}
