//! # Payment Gateway
//!
//! Thin HTTP facade over the Stripe Payment Intents and Checkout APIs.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export STRIPE_SECRET_KEY=sk_test_...
//!
//! # Run the server (port 5000 unless PORT is set)
//! payment-gateway
//! ```

use pay_api::{routes, AppConfig, AppState, LogFormat};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env();
    init_tracing(config.log_format);

    // Print banner
    print_banner();

    // Initialize application state
    let state = AppState::with_stripe(config);

    let addr = state.config.socket_addr()?;
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!("Payment processor: {}", state.provider_name());

    // Create router
    let app = routes::create_router(state);

    info!("Payment API server running on port {}", addr.port());

    if !is_prod {
        info!("Health: GET http://{}/health", addr);
        info!("Intents: POST http://{}/api/payments/create-intent", addr);
        info!("Checkout: POST http://{}/api/payments/create-checkout-session", addr);
        info!("Mock: POST http://{}/api/payments/process", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();

    match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(filter)
            .init(),
        LogFormat::Text => tracing_subscriber::registry()
            .with(fmt::layer())
            .with(filter)
            .init(),
    }
}

fn print_banner() {
    println!(
        r#"
  Payment Gateway
  ━━━━━━━━━━━━━━━━━━━━━━━
  Version: {}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
