use clap::{Parser, Subcommand};
use spark_interpreter_context::LaunchContext;
use spark_interpreter_launcher::util::{initialize_logging, print_startup_string};
use spark_interpreter_launcher::{
    built_info, ExecProcessSpawner, LauncherConfig, SparkInterpreterLauncher,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[clap(about = built_info::PKG_DESCRIPTION, author = built_info::PKG_AUTHORS)]
struct Opts {
    /// Launcher config, by default the first of `conf/spark-launcher.yaml` and
    /// `/etc/zeppelin/spark-launcher.yaml` that exists
    #[clap(long, global = true, value_parser)]
    config: Option<PathBuf>,
    #[clap(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print how the interpreter of a launch request would be started
    Print {
        /// YAML file containing the launch request
        #[clap(value_parser)]
        request: PathBuf,
    },
    /// Start the interpreter of a launch request and wait for it to exit
    Run {
        /// YAML file containing the launch request
        #[clap(value_parser)]
        request: PathBuf,
    },
}

fn read_launch_context(path: &Path) -> anyhow::Result<LaunchContext> {
    let raw = std::fs::read_to_string(path)?;
    Ok(raw.parse()?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let opts = Opts::parse();
    initialize_logging("SPARK_LAUNCHER_LOG");
    let config = LauncherConfig::load(opts.config.as_deref())?;
    let launcher = SparkInterpreterLauncher::from_config(config, ExecProcessSpawner);

    match opts.cmd {
        Command::Print { request } => {
            let context = read_launch_context(&request)?;
            println!("{}", serde_yaml::to_string(&launcher.plan(&context)?)?);
        }
        Command::Run { request } => {
            print_startup_string(
                built_info::PKG_DESCRIPTION,
                built_info::PKG_VERSION,
                built_info::GIT_VERSION,
                built_info::TARGET,
                built_info::BUILT_TIME_UTC,
                built_info::RUSTC_VERSION,
            );

            let context = read_launch_context(&request)?;
            let mut process = launcher.launch(&context)?;
            process.start()?;
            let status = process.wait().await?;
            if !status.success() {
                anyhow::bail!(
                    "interpreter process {} failed with {}",
                    context.interpreter_setting_name,
                    status
                );
            }
        }
    }

    Ok(())
}
