//! Opt-in diagnostics for hosts embedding the generator.
//!
//! Spans follow the generation call tree: one `generate_mapping_body` span per
//! request, one `generate_mapping` span per nested type pair. The tree format
//! is the one to read when a member comes out unmapped unexpectedly.
//!
//! ```bash
//! MAPGEN_LOG=mapgen_solver=trace MAPGEN_LOG_FORMAT=tree my-host
//! MAPGEN_LOG=mapgen_solver::conversions=debug my-host
//! ```

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

pub const LOG_ENV: &str = "MAPGEN_LOG";
pub const LOG_FORMAT_ENV: &str = "MAPGEN_LOG_FORMAT";
const RUST_LOG_ENV: &str = "RUST_LOG";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    /// Indented by span nesting, via `tracing-tree`.
    Tree,
    Json,
}

impl LogFormat {
    /// Case-insensitive; anything unrecognised is `Text`.
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("tree") {
            Self::Tree
        } else if value.eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Text
        }
    }
}

/// Filter directives plus output format, resolved from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub directives: String,
    pub format: LogFormat,
}

impl LogSettings {
    /// `MAPGEN_LOG` wins over `RUST_LOG`. `None` when neither is set, in
    /// which case nothing should be installed.
    pub fn resolve(
        mapgen_log: Option<String>,
        rust_log: Option<String>,
        format: Option<&str>,
    ) -> Option<Self> {
        let directives = mapgen_log.or(rust_log)?;
        Some(Self {
            directives,
            format: format.map(LogFormat::parse).unwrap_or_default(),
        })
    }

    pub fn from_env() -> Option<Self> {
        let format = std::env::var(LOG_FORMAT_ENV).ok();
        Self::resolve(
            std::env::var(LOG_ENV).ok(),
            std::env::var(RUST_LOG_ENV).ok(),
            format.as_deref(),
        )
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::builder().parse_lossy(&self.directives)
    }

    /// Install the global subscriber, writing to stderr. Returns `false` if
    /// the host already installed one.
    pub fn install(&self) -> bool {
        let registry = Registry::default().with(self.filter());
        let installed = match self.format {
            LogFormat::Tree => registry
                .with(
                    tracing_tree::HierarchicalLayer::default()
                        .with_indent_amount(2)
                        .with_indent_lines(true)
                        .with_deferred_spans(true)
                        .with_span_retrace(true)
                        .with_targets(true),
                )
                .try_init(),
            LogFormat::Json => registry
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .try_init(),
            LogFormat::Text => registry
                .with(fmt::layer().with_writer(std::io::stderr))
                .try_init(),
        };
        installed.is_ok()
    }
}

/// Install tracing if `MAPGEN_LOG` or `RUST_LOG` asks for it.
pub fn init_tracing() {
    if let Some(settings) = LogSettings::from_env() {
        settings.install();
    }
}
