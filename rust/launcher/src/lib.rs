//! Launches Spark interpreter processes.
//!
//! [`SparkInterpreterLauncher`] turns a [`LaunchContext`](spark_interpreter_context::LaunchContext)
//! into a [`ProcessRequest`]: the `spark-submit` arguments for the deploy mode of the interpreter
//! setting, the process environment and the directories of the setting. A [`ProcessSpawner`] then
//! turns the request into a process.
pub mod arguments;
pub mod config;
pub mod environment;
pub mod error;
pub mod launcher;
pub mod local_repo;
pub mod process;
pub mod util;
pub mod version;

pub use config::LauncherConfig;
pub use error::Error;
pub use launcher::SparkInterpreterLauncher;
pub use process::{ExecInterpreterProcess, ExecProcessSpawner, ProcessRequest, ProcessSpawner};

pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}
