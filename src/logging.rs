use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const LOG_ENV: &str = "PDNS_MCP_LOG";

/// Default filter directive for the given debug flag.
pub fn default_directive(debug: bool) -> &'static str {
    if debug {
        "powerdns_mcp=debug"
    } else {
        "powerdns_mcp=info"
    }
}

/// Installs the global subscriber. Output goes to stderr only: stdout
/// carries the MCP protocol stream.
pub fn init_tracing(debug: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(debug)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .compact()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .try_init()?;

    Ok(())
}
