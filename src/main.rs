// roomedit - Edit hotel room photos with natural-language prompts via Gemini
// Author: kelexine (https://github.com/kelexine)

use anyhow::Result;
use clap::Parser;
use roomedit::cli::{run_edit, Args, Command};
use roomedit::config::AppConfig;
use roomedit::editor::ImageEditor;
use roomedit::server::create_router;
use roomedit::utils::logging;
use std::net::SocketAddr;
use tokio::signal;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Phase 1: Load configuration
    let mut config = AppConfig::load()?;
    if let Some(model) = &args.model {
        config.gemini.model = model.clone();
    }

    // Phase 2: Initialize logging
    logging::init(&config.logging)?;
    info!("Starting roomedit v{}", env!("CARGO_PKG_VERSION"));

    // Phase 3: Fail fast on a missing credential, before any request
    config.validate()?;
    let editor = ImageEditor::from_config(&config.gemini)?;
    info!("Using model {} at {}", editor.model(), config.gemini.api_base_url);

    match args.command.unwrap_or(Command::Serve) {
        Command::Edit(edit_args) => {
            run_edit(&editor, &edit_args).await?;
        }
        Command::Serve => serve(config, editor).await?,
    }

    Ok(())
}

async fn serve(config: AppConfig, editor: ImageEditor) -> Result<()> {
    // Phase 4: Build and start HTTP server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let app = create_router(config, editor);

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Phase 5: Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
