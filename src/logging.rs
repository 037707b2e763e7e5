use tracing_subscriber::EnvFilter;

/// Initialize tracing from the CLI verbosity count.
///
/// `-v` maps to info, `-vv` to debug, `-vvv` and beyond to trace; the
/// default is warn. The filter applies to every pluvio workspace crate, and
/// a `RUST_LOG` environment variable takes precedence when set.
pub fn init(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let targets = [
        "pluvio",
        "pluvio_bins",
        "pluvio_dsd",
        "pluvio_gamma",
        "pluvio_moments",
        "pluvio_radar",
    ];
    let default_filter = targets
        .iter()
        .map(|t| format!("{t}={level}"))
        .collect::<Vec<_>>()
        .join(",");

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
