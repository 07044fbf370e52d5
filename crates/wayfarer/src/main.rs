use anyhow::Result;
use clap::Parser;
use listenfd::ListenFd;
use tokio::{net::TcpListener, signal};

use wayfarer::{
    app::create_app,
    config::Config,
    handlers::dev::watch_for_reload,
    site::Site,
    state::AppState,
    telemetry::init_tracing,
    template::TemplateStore,
};

/// Wayfarer - server-rendered travel site
#[derive(Parser, Debug)]
#[command(name = "wayfarer")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Host address to bind the server to
    #[arg(long, short = 'H', default_value = "0.0.0.0", env = "HOST")]
    host: String,

    /// Port to listen on
    #[arg(long, short, default_value = "3000", env = "PORT")]
    port: u16,

    #[command(flatten)]
    config: Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing();

    let config = cli.config;
    let templates = TemplateStore::for_mode(config.mode, &config.template_path()).await?;
    let site = Site::init(&config, templates).await?;

    let state = AppState::new(site.pipeline.clone(), config.mode).with_ssr_pool(site.pool);

    // Kept alive for the lifetime of the server
    let _watcher = if config.mode.is_development() {
        let mut paths = vec![config.server_entry_path()];
        paths.extend(
            site.pipeline
                .templates()
                .watched_path()
                .map(|p| p.to_path_buf()),
        );
        Some(watch_for_reload(&paths, state.clone())?)
    } else {
        None
    };

    let static_dir = config.static_dir_path();
    let app = create_app(state.clone(), &static_dir);

    // Auto-reload support via listenfd
    let mut listenfd = ListenFd::from_env();
    let listener = match listenfd.take_tcp_listener(0)? {
        // If we are given a tcp listener on listen fd 0, use that one
        Some(listener) => {
            listener.set_nonblocking(true)?;
            TcpListener::from_std(listener)?
        }
        // Otherwise fall back to CLI-specified host:port
        None => {
            let addr = format!("{}:{}", cli.host, cli.port);
            TcpListener::bind(&addr).await?
        }
    };

    tracing::info!(
        mode = ?config.mode,
        static_dir = %static_dir.display(),
        "listening on {}",
        listener.local_addr()?
    );

    // Run the server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(state))
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Wait for shutdown signals (Ctrl+C or SIGTERM) and notify SSE handlers.
async fn shutdown_signal(state: AppState) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
    }

    // Signal SSE handlers to close their connections
    state.signal_shutdown();
}
