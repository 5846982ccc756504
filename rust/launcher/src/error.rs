use snafu::Snafu;
use std::path::PathBuf;

#[derive(Snafu, Debug)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("failed to read launcher config {}", path.display()))]
    ReadConfig {
        source: std::io::Error,
        path: PathBuf,
    },
    #[snafu(display("failed to parse launcher config {}", path.display()))]
    ParseConfig {
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[snafu(display("failed to resolve the current directory"))]
    CurrentDir { source: std::io::Error },
    #[snafu(display("failed to list local repository {}", path.display()))]
    ListLocalRepo {
        source: std::io::Error,
        path: PathBuf,
    },
    #[snafu(display("failed to read local repository entry {}", path.display()))]
    ReadLocalRepoEntry {
        source: std::io::Error,
        path: PathBuf,
    },
    #[snafu(display("failed to spawn interpreter process with runner {}", runner.display()))]
    SpawnInterpreterProcess {
        source: std::io::Error,
        runner: PathBuf,
    },
    #[snafu(display("failed to wait for interpreter process {}", interpreter_setting_name))]
    WaitInterpreterProcess {
        source: std::io::Error,
        interpreter_setting_name: String,
    },
    #[snafu(display("interpreter process {} has not been started", interpreter_setting_name))]
    ProcessNotStarted { interpreter_setting_name: String },
}
