use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Helper macro for logging elapsed time at trace level.
///
/// Usage:
/// ```rust,ignore
/// let start = Instant::now();
/// // ... some work ...
/// trace_time!(start, "operation_name");
/// // Or with additional fields:
/// trace_time!(start, "operation_name", nodes = graph.node_count());
/// ```
#[macro_export]
macro_rules! trace_time {
    ($start:expr, $name:expr) => {
        tracing::trace!(elapsed = ?$start.elapsed(), $name);
    };
    ($start:expr, $name:expr $(, $field:ident = $value:expr)*) => {
        tracing::trace!(elapsed = ?$start.elapsed(), $($field = $value),*, $name);
    };
}

/// Initialize structured logging for a front end embedding the engine
///
/// `BGA_LOG` wins over `RUST_LOG`; both win over the flags. Events go to
/// stderr, one flattened JSON object per line when `log_json` is set.
pub fn init_tracing(
    verbose: bool,
    log_level: Option<&str>,
    log_json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_env("BGA_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(verbose, log_level)));

    let output = fmt::layer().with_writer(std::io::stderr).with_ansi(false);
    let output = if log_json {
        output.json().flatten_event(true).boxed()
    } else {
        output.compact().with_target(false).boxed()
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(output)
        .try_init()?;
    Ok(())
}

/// Filter directive for the flags, scoping bare levels to this crate
fn filter_directive(verbose: bool, log_level: Option<&str>) -> String {
    match log_level {
        Some(level) if level.contains('=') => level.to_string(),
        Some(level) => format!("bga={}", level),
        None if verbose => "bga=debug".to_string(),
        None => "bga=warn".to_string(),
    }
}
