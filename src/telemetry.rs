//! Tracing setup for binaries and host applications embedding `bar-chart-rs`.
//!
//! The library itself only emits `tracing` events; installing a subscriber is
//! left to the caller. With the `telemetry` feature enabled these helpers
//! install a compact `fmt` subscriber filtered through `RUST_LOG`.

/// Installs a compact subscriber using `RUST_LOG`, falling back to `info`.
///
/// Returns `false` when the feature is disabled or a global subscriber is
/// already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_fallback("info")
}

/// Same as [`init_default_tracing`] with a caller-chosen fallback directive,
/// e.g. `"bar_chart=debug"`.
#[must_use]
pub fn init_tracing_with_fallback(fallback_directive: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback_directive));

        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback_directive;
        false
    }
}
