//! Logging setup shared by the binaries

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Install the global subscriber.
///
/// `RUST_LOG` wins over the configured level. Output goes to stderr so that
/// command output on stdout stays clean.
pub fn init(config: &LoggingConfig, extra_directives: &[&str]) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let mut directives = vec![format!("studyplan={}", config.level)];
        directives.extend(extra_directives.iter().map(|d| d.to_string()));
        EnvFilter::new(directives.join(","))
    });

    let registry = tracing_subscriber::registry().with(filter);

    if config.format.eq_ignore_ascii_case("json") {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
