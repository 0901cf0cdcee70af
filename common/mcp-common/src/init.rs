//! Tracing setup shared by the workspace binaries

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing for a binary.
///
/// Logs go to stderr because the MCP server speaks its protocol over stdout.
/// `RUST_LOG` is honoured; on top of it the given crate is raised to a level
/// picked from `verbosity` (0 = info, 1 = debug, 2+ = trace).
///
/// Set `LOG_FORMAT=json` for JSON lines instead of human-readable text.
pub fn init_tracing(crate_name: &str, verbosity: u8) -> anyhow::Result<()> {
    let filter = EnvFilter::from_default_env()
        .add_directive(level_directive(crate_name, verbosity).parse()?);

    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);

    if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()?;
    }

    Ok(())
}

fn level_directive(crate_name: &str, verbosity: u8) -> String {
    let level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    format!("{}={}", crate_name, level)
}
