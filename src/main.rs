use axum::Router;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::net::TcpListener;

use eticket_server::config::SmtpConfig;
use eticket_server::mailer::Mailer;
use eticket_server::routes::create_routes;
use eticket_server::AppState;

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let smtp = SmtpConfig::from_env();
    match &smtp.host {
        Some(host) => tracing::info!("Mail relay configured for {}:{}", host, smtp.port),
        None => tracing::warn!(
            "SMTP_HOST is not set; ticket delivery will fail until the relay is configured"
        ),
    }

    let state = AppState {
        mailer: Mailer::new(smtp),
    };

    let app: Router = create_routes(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], 3001));
    tracing::info!("🚀 Server running at http://{}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app).await.expect("Server failed");
}
