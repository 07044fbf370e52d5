use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use wayfarer::{
    config::Config,
    prerender::{enumerate_routes, prerender_all},
    site::Site,
    telemetry::init_tracing,
    template::TemplateStore,
};
use wayfarer_core::page::DEFAULT_STATIC_ROUTES;

/// Wayfarer pre-renderer - snapshot site routes to static HTML
#[derive(Parser, Debug)]
#[command(name = "wayfarer-prerender")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Output directory; each route is written to `<out>/<route>/index.html`
    #[arg(long, short, default_value = "dist/static", env = "WAYFARER_PRERENDER_OUT")]
    out: PathBuf,

    /// Static route to render (repeatable, replaces the default list)
    #[arg(long = "route", short = 'r')]
    routes: Vec<String>,

    /// Exit with status 1 if any route failed
    #[arg(long)]
    fail_on_error: bool,

    #[command(flatten)]
    config: Config,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "Pre-render aborted");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    // Snapshots never carry the dev reload client
    let templates = TemplateStore::load(&cli.config.template_path()).await?;
    let site = Site::init(&cli.config, templates).await?;

    let static_routes = if cli.routes.is_empty() {
        DEFAULT_STATIC_ROUTES.iter().map(|r| r.to_string()).collect()
    } else {
        cli.routes
    };

    let routes = enumerate_routes(site.repo.as_ref(), &static_routes).await;
    let report = prerender_all(&site.pipeline, &routes, &cli.out).await;

    for failure in &report.failures {
        tracing::warn!(route = %failure.route, error = %failure.error, "Route failed");
    }

    if cli.fail_on_error && !report.is_success() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
