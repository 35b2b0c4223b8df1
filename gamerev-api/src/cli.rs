//! Command-line arguments and logging setup shared by the gamerev binaries

use std::path::PathBuf;

use clap::Args;
use gamerev_common::config::ConfigOverrides;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service options; each may also come from a `GAMEREV_*` variable
#[derive(Args, Debug, Clone, Default)]
pub struct ServiceArgs {
    /// Port to listen on
    #[arg(short, long, env = "GAMEREV_PORT")]
    pub port: Option<u16>,

    /// Address to bind
    #[arg(long, env = "GAMEREV_HOST")]
    pub host: Option<String>,

    /// Path to the SQLite database file
    #[arg(short, long, env = "GAMEREV_DATABASE")]
    pub database: Option<PathBuf>,

    /// TOML config file
    #[arg(short, long, env = "GAMEREV_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "GAMEREV_LOG_LEVEL")]
    pub log_level: Option<String>,
}

impl From<ServiceArgs> for ConfigOverrides {
    fn from(args: ServiceArgs) -> Self {
        ConfigOverrides {
            host: args.host,
            port: args.port,
            database_path: args.database,
            log_level: args.log_level,
            config_file: args.config,
        }
    }
}

/// Filter directive enabling `level` for the calling binary and the gamerev crates
pub fn log_directive(bin_target: &str, level: &str) -> String {
    let mut targets = vec![bin_target, "gamerev_api", "gamerev_common", "tower_http"];
    targets.dedup();
    targets
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Install the global tracing subscriber
///
/// `bin_target` is the calling binary's crate name (`env!("CARGO_CRATE_NAME")`).
/// `RUST_LOG` wins over `level`.
pub fn init_tracing(bin_target: &str, level: &str) {
    let default_directive = log_directive(bin_target, level);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_directive.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use serial_test::serial;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(flatten)]
        service: ServiceArgs,
    }

    #[test]
    fn test_log_directive_includes_binary_target() {
        assert_eq!(
            log_directive("gamerev_seed", "info"),
            "gamerev_seed=info,gamerev_api=info,gamerev_common=info,tower_http=info"
        );
        assert_eq!(
            log_directive("gamerev_api", "debug"),
            "gamerev_api=debug,gamerev_common=debug,tower_http=debug"
        );
        assert!(log_directive("gamerev_seed", "info")
            .parse::<EnvFilter>()
            .is_ok());
    }

    #[test]
    #[serial]
    fn test_flags_become_overrides() {
        std::env::remove_var("GAMEREV_PORT");
        let cli = TestCli::parse_from(["gamerev-api", "--port", "6000", "--host", "0.0.0.0"]);
        let overrides = ConfigOverrides::from(cli.service);

        assert_eq!(overrides.port, Some(6000));
        assert_eq!(overrides.host.as_deref(), Some("0.0.0.0"));
        assert!(overrides.database_path.is_none());
    }

    #[test]
    #[serial]
    fn test_env_fills_missing_flags() {
        std::env::set_var("GAMEREV_PORT", "7001");
        let cli = TestCli::parse_from(["gamerev-api"]);
        std::env::remove_var("GAMEREV_PORT");

        assert_eq!(cli.service.port, Some(7001));
    }

    #[test]
    #[serial]
    fn test_flag_beats_env() {
        std::env::set_var("GAMEREV_PORT", "7001");
        let cli = TestCli::parse_from(["gamerev-api", "-p", "7002"]);
        std::env::remove_var("GAMEREV_PORT");

        assert_eq!(cli.service.port, Some(7002));
    }
}
