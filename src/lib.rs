pub mod application;
pub mod cli;
pub mod domain;

pub use domain::*;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber. Safe to call more than once.
pub fn init_tracing(verbose: bool) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let directive = if verbose { "fiado=debug" } else { "fiado=warn" };
        let filter = EnvFilter::from_default_env()
            .add_directive(directive.parse().expect("static filter directive"));

        fmt().with_env_filter(filter).init();
    });
}
