use std::path::PathBuf;

use clap::{Args, ValueEnum};
use wayfarer_ssr::{SsrCoreError, SsrPoolConfig};

/// Rendering mode, chosen once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Template and render entry re-read on every request, browser auto-reload.
    Development,
    /// Pre-built template and render entry loaded once.
    Production,
}

impl Mode {
    pub fn is_development(self) -> bool {
        self == Mode::Development
    }

    /// `NODE_ENV` seen by the render entry.
    pub fn node_env(self) -> &'static str {
        match self {
            Mode::Development => "development",
            Mode::Production => "production",
        }
    }
}

/// Site configuration shared by the server and the pre-renderer.
///
/// Every path has a mode-dependent default, see the accessor methods.
#[derive(Args, Debug, Clone)]
pub struct Config {
    /// Rendering mode
    #[arg(long, value_enum, default_value = "production", env = "WAYFARER_MODE")]
    pub mode: Mode,

    /// Base URL of the hosted content database
    #[arg(long, env = "SUPABASE_URL")]
    pub supabase_url: Option<String>,

    /// Public (anon) API key of the content database
    #[arg(long, env = "SUPABASE_ANON_KEY", hide_env_values = true)]
    pub supabase_anon_key: Option<String>,

    /// JSON file with content records, used instead of the database
    #[arg(long, env = "WAYFARER_CONTENT_FIXTURE")]
    pub content_fixture: Option<PathBuf>,

    /// HTML template with the `<!--ssr-outlet-->` and `<!--ssr-head-->` markers
    #[arg(long, env = "WAYFARER_TEMPLATE")]
    pub template: Option<PathBuf>,

    /// Server render entry (pre-built JavaScript bundle)
    #[arg(long, env = "WAYFARER_SERVER_ENTRY")]
    pub server_entry: Option<PathBuf>,

    /// Directory of static assets served next to the pages
    #[arg(long, env = "WAYFARER_STATIC_DIR")]
    pub static_dir: Option<PathBuf>,

    /// Number of SSR worker threads (default: available parallelism)
    #[arg(long, env = "SSR_WORKERS")]
    pub ssr_workers: Option<usize>,

    /// Render timeout in milliseconds
    #[arg(long, default_value = "10000", env = "SSR_RENDER_TIMEOUT_MS")]
    pub render_timeout_ms: u64,
}

impl Config {
    /// Configuration with every optional value unset.
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            supabase_url: None,
            supabase_anon_key: None,
            content_fixture: None,
            template: None,
            server_entry: None,
            static_dir: None,
            ssr_workers: None,
            render_timeout_ms: 10_000,
        }
    }

    /// Template path: the source `index.html` in development, the client
    /// build output in production.
    pub fn template_path(&self) -> PathBuf {
        self.template.clone().unwrap_or_else(|| match self.mode {
            Mode::Development => PathBuf::from("index.html"),
            Mode::Production => PathBuf::from("dist/client/index.html"),
        })
    }

    pub fn server_entry_path(&self) -> PathBuf {
        self.server_entry
            .clone()
            .unwrap_or_else(|| PathBuf::from("dist/server/entry-server.js"))
    }

    /// Static assets: the source `public/` directory in development, the
    /// client build output in production.
    pub fn static_dir_path(&self) -> PathBuf {
        self.static_dir.clone().unwrap_or_else(|| match self.mode {
            Mode::Development => PathBuf::from("public"),
            Mode::Production => PathBuf::from("dist/client"),
        })
    }

    /// Validated SSR pool configuration.
    pub fn pool_config(&self) -> Result<SsrPoolConfig, SsrCoreError> {
        let worker_count = self.ssr_workers.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

        SsrPoolConfig::new(
            worker_count,
            100,
            self.render_timeout_ms,
            self.mode.node_env().to_string(),
        )
    }
}
