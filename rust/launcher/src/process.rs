//! Spawning of interpreter processes.
//!
//! The launcher only describes the process it wants as a [`ProcessRequest`]. Turning that into a
//! running process is up to a [`ProcessSpawner`], so that embedders can plug in their own process
//! management. [`ExecProcessSpawner`] runs the interpreter runner script of the installation.
use crate::arguments::SparkArguments;
use crate::error::{
    Error, ProcessNotStartedSnafu, SpawnInterpreterProcessSnafu, WaitInterpreterProcessSnafu,
};
use serde::{Serialize, Serializer};
use snafu::{OptionExt, ResultExt};
use spark_interpreter_context::DeployMode;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::Duration;
use tokio::process::{Child, Command};
use tracing::{debug, info, warn};

/// Everything needed to start a single interpreter process.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessRequest {
    pub interpreter_setting_name: String,
    pub interpreter_group_id: String,
    pub deploy_mode: DeployMode,
    pub interpreter_dir: PathBuf,
    pub local_repo_dir: PathBuf,
    pub runner: PathBuf,
    pub arguments: SparkArguments,
    pub env: BTreeMap<String, String>,
    #[serde(serialize_with = "serialize_millis")]
    pub connect_timeout: Duration,
    pub user_impersonate: bool,
    pub user_name: String,
    pub event_server_host: String,
    pub event_server_port: u16,
    pub port_range: String,
}

fn serialize_millis<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(duration.as_millis() as u64)
}

pub trait ProcessSpawner {
    type Process;

    /// Create the handle of a process. The process is not necessarily running afterwards.
    fn create(&self, request: ProcessRequest) -> Result<Self::Process, Error>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ExecProcessSpawner;

impl ProcessSpawner for ExecProcessSpawner {
    type Process = ExecInterpreterProcess;

    fn create(&self, request: ProcessRequest) -> Result<Self::Process, Error> {
        Ok(ExecInterpreterProcess::new(request))
    }
}

/// An interpreter process run through the interpreter runner script.
///
/// The child is killed when the handle is stopped or dropped.
#[derive(Debug)]
pub struct ExecInterpreterProcess {
    request: ProcessRequest,
    child: Option<Child>,
}

impl ExecInterpreterProcess {
    pub fn new(request: ProcessRequest) -> Self {
        ExecInterpreterProcess {
            request,
            child: None,
        }
    }

    pub fn request(&self) -> &ProcessRequest {
        &self.request
    }

    pub fn env(&self) -> &BTreeMap<String, String> {
        &self.request.env
    }

    pub fn connect_timeout(&self) -> Duration {
        self.request.connect_timeout
    }

    pub fn is_user_impersonated(&self) -> bool {
        self.request.user_impersonate
    }

    pub fn interpreter_dir(&self) -> &PathBuf {
        &self.request.interpreter_dir
    }

    pub fn local_repo_dir(&self) -> &PathBuf {
        &self.request.local_repo_dir
    }

    /// OS process id, while the process is running.
    pub fn id(&self) -> Option<u32> {
        self.child.as_ref().and_then(Child::id)
    }

    pub fn command(&self) -> Command {
        let request = &self.request;
        let mut command = Command::new(&request.runner);
        command
            .arg("-d")
            .arg(&request.interpreter_dir)
            .arg("-c")
            .arg(&request.event_server_host)
            .arg("-p")
            .arg(request.event_server_port.to_string())
            .arg("-r")
            .arg(&request.port_range)
            .arg("-i")
            .arg(&request.interpreter_group_id)
            .arg("-l")
            .arg(&request.local_repo_dir)
            .arg("-g")
            .arg(&request.interpreter_setting_name);
        if request.user_impersonate {
            command.arg("-u").arg(&request.user_name);
        }
        command.envs(&request.env).kill_on_drop(true);
        command
    }

    /// Spawn the process. Starting a process that is already running does nothing.
    pub fn start(&mut self) -> Result<(), Error> {
        if self.child.is_some() {
            debug!(
                "Interpreter process {} is already running",
                self.request.interpreter_setting_name
            );
            return Ok(());
        }

        let child = self.command().spawn().context(SpawnInterpreterProcessSnafu {
            runner: &self.request.runner,
        })?;
        info!(
            "Started interpreter process {} with pid {:?}",
            self.request.interpreter_setting_name,
            child.id()
        );
        self.child = Some(child);
        Ok(())
    }

    /// Wait for the process to exit.
    pub async fn wait(&mut self) -> Result<ExitStatus, Error> {
        let child = self.child.as_mut().context(ProcessNotStartedSnafu {
            interpreter_setting_name: &self.request.interpreter_setting_name,
        })?;
        let status = child.wait().await.context(WaitInterpreterProcessSnafu {
            interpreter_setting_name: &self.request.interpreter_setting_name,
        })?;
        self.child = None;

        info!(
            "Interpreter process {} exited with {}",
            self.request.interpreter_setting_name, status
        );
        Ok(status)
    }

    /// Kill the process if it is running.
    pub fn stop(&mut self) {
        if let Some(mut child) = self.child.take() {
            info!(
                "Stopping interpreter process {}",
                self.request.interpreter_setting_name
            );
            if let Err(err) = child.start_kill() {
                warn!(
                    "Failed to kill interpreter process {}: {}",
                    self.request.interpreter_setting_name, err
                );
            }
        }
    }
}

impl Drop for ExecInterpreterProcess {
    fn drop(&mut self) {
        self.stop();
    }
}
