use anyhow::Context;
use clap::Parser;
use mathcheck_server::{serve, Config};
use std::path::PathBuf;

/// Verification service for algebra exercises.
#[derive(Debug, Parser)]
#[command(name = "mathcheck-server", version, about)]
struct Cli {
    /// Configuration file (defaults to `mathcheck.toml` in the working directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to listen on, overriding the configuration
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on, overriding the configuration
    #[arg(short, long)]
    port: Option<u16>,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Log analysis details
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Applies the flags that override the configuration.
    fn apply(&self, config: &mut Config) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if self.quiet {
            config.log.level = "error".to_owned();
        } else if self.verbose {
            config.log.level = "debug".to_owned();
        }
    }
}

fn init_tracing(level: &str) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_env("MATHCHECK_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    // a missing `.env` file is not an error
    let _ = dotenvy::dotenv();

    let mut config = Config::load(cli.config.as_deref()).context("failed to load the configuration")?;
    cli.apply(&mut config);
    init_tracing(&config.log.level)?;

    serve(config).context("the server stopped")
}

fn main() {
    if let Err(error) = run() {
        eprintln!("mathcheck-server error: {error:#}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn clap_command_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_override_the_configuration() {
        let cli = Cli::try_parse_from(["mathcheck-server", "--host", "0.0.0.0", "-p", "9000", "-v"])
            .expect("cli should parse");
        let mut config = Config::default();
        cli.apply(&mut config);
        assert_eq!(config.address(), "0.0.0.0:9000");
        assert_eq!(config.log.level, "debug");
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        assert!(Cli::try_parse_from(["mathcheck-server", "-q", "-v"]).is_err());
    }
}
