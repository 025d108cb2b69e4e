//! Tracing setup for the `splom-sketch` binary.
//!
//! Diagnostics go to stderr so that stdout only carries the confirmation
//! lines.  `RUST_LOG` overrides the default `warn` filter.

/// Installs a compact `tracing` subscriber when the `telemetry` feature is
/// enabled.
///
/// Returns `false` when nothing was installed (feature disabled, or a
/// global subscriber already exists).
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact();

        return builder.try_init().is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
