//! Log output for intersection runs.
//!
//! Installs a `tracing` subscriber printing the structured events emitted by
//! the automaton crate (`intersection_start`, `fold`, `intersection_end`, ...).

use std::sync::OnceLock;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use costreg_config::CostRegConfig;

static INIT: OnceLock<()> = OnceLock::new();

/// Directive applied on top of `RUST_LOG` when no other filter is given.
pub const DEFAULT_DIRECTIVE: &str = "costreg_automaton=info";

/// Initializes log output with [`DEFAULT_DIRECTIVE`].
///
/// Safe to call multiple times - only the first call has effect.
pub fn init() {
    init_with_filter(DEFAULT_DIRECTIVE);
}

/// Initializes log output with the configured filter, if any.
pub fn init_from_config(config: &CostRegConfig) {
    init_with_filter(config.log_filter.as_deref().unwrap_or(DEFAULT_DIRECTIVE));
}

/// Initializes log output with `directives` (comma-separated, `RUST_LOG`
/// syntax) added to the environment filter. Directives that fail to parse
/// are skipped.
pub fn init_with_filter(directives: &str) {
    INIT.get_or_init(|| {
        let mut filter = EnvFilter::from_default_env();
        for directive in directives.split(',').map(str::trim).filter(|d| !d.is_empty()) {
            if let Ok(directive) = directive.parse() {
                filter = filter.add_directive(directive);
            }
        }

        // another subscriber may already be installed by the host application
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .try_init();
    });
}

/// Whether one of the `init*` functions has run.
pub fn is_initialized() -> bool {
    INIT.get().is_some()
}
