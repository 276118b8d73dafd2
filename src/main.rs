use anyhow::Result;
use bbctl::build_info::BuildInfo;
use bbctl::commands::{UpdateOptions, update};
use clap::{CommandFactory, FromArgMatches, Parser};
use std::path::PathBuf;

/// bbctl - Beeper bridge manager
///
/// Manages self-hosted bridges for Beeper.
///
/// Examples:
///   bbctl update                  # Replace bbctl with the latest nightly build
///   bbctl update --skip-restart   # Update without restarting the bridge service
#[derive(Parser, Debug)]
#[command(author, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Update bbctl to the latest nightly build
    Update(UpdateArgs),
}

#[derive(clap::Args, Debug)]
pub struct UpdateArgs {
    /// Where the new binary is installed
    #[arg(long, env = "BBCTL_INSTALL_PATH", value_name = "PATH")]
    pub install_path: Option<PathBuf>,

    /// Where the current binary is moved before updating (defaults to ~/bbctl.bak)
    #[arg(long, env = "BBCTL_BACKUP_PATH", value_name = "PATH")]
    pub backup_path: Option<PathBuf>,

    /// Base URL the platform artifacts are downloaded from
    #[arg(long, env = "BBCTL_DOWNLOAD_BASE_URL", value_name = "URL")]
    pub download_base_url: Option<String>,

    /// Service restarted after the update (systemd unit or launchd label)
    #[arg(long, env = "BBCTL_SERVICE", value_name = "NAME")]
    pub service: Option<String>,

    /// Do not restart the service after updating
    #[arg(long)]
    pub skip_restart: bool,

    /// Seconds any helper command may run before it is killed
    #[arg(long = "timeout", env = "BBCTL_COMMAND_TIMEOUT", value_name = "SECS")]
    pub command_timeout: Option<u64>,

    /// Seconds the download may take before it is aborted
    #[arg(long, env = "BBCTL_DOWNLOAD_TIMEOUT", value_name = "SECS")]
    pub download_timeout: Option<u64>,
}

impl From<UpdateArgs> for UpdateOptions {
    fn from(args: UpdateArgs) -> Self {
        Self {
            install_path: args.install_path,
            backup_path: args.backup_path,
            download_base_url: args.download_base_url,
            service: args.service,
            skip_restart: args.skip_restart,
            command_timeout: args.command_timeout,
            download_timeout: args.download_timeout,
        }
    }
}

fn parse_cli(build: BuildInfo) -> Result<Cli> {
    let matches = Cli::command().version(build.version).get_matches();
    Ok(Cli::from_arg_matches(&matches)?)
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let build = BuildInfo::current();
    let cli = parse_cli(build)?;
    let runtime = bbctl::runtime::RealRuntime;

    match cli.command {
        Commands::Update(args) => update(runtime, build, args.into()).await?,
    }
    Ok(())
}
