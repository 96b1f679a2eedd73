use judgment_scorekeeper::api::router::create_router;
use judgment_scorekeeper::api::state::AppState;
use judgment_scorekeeper::config::AppConfig;
use judgment_scorekeeper::healthcheck;

#[tokio::main]
async fn main() {
    // Handle --health-check flag for container HEALTHCHECK.
    if std::env::args().any(|a| a == "--health-check") {
        let addr = format!("127.0.0.1:{}", AppConfig::from_env().port);
        match healthcheck::check(&addr).await {
            Ok(()) => std::process::exit(0),
            Err(e) => {
                eprintln!("Health check failed: {e}");
                std::process::exit(1);
            }
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "judgment_scorekeeper=info,tower_http=info".into()),
        )
        .init();

    if let Err(e) = run(AppConfig::from_env()).await {
        tracing::error!("server stopped: {e}");
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> std::io::Result<()> {
    let bind_addr = config.bind_addr();
    let state = AppState::new(config);
    let app = create_router(state);

    tracing::info!(
        "judgment-scorekeeper v{} starting on {bind_addr}",
        env!("CARGO_PKG_VERSION")
    );

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await
}
