//! The launch pipeline: from a [`LaunchContext`] to an interpreter process.
use crate::arguments::ArgumentBuilder;
use crate::config::LauncherConfig;
use crate::environment::{compose_environment, connect_timeout, ResolvedPaths};
use crate::error::Error;
use crate::local_repo;
use crate::process::{ProcessRequest, ProcessSpawner};
use crate::version::{BuiltVersion, StaticVersion, VersionProvider};
use spark_interpreter_context::{DeployMode, LaunchContext};
use std::sync::Arc;
use tracing::{debug, info};

pub struct SparkInterpreterLauncher<S> {
    config: LauncherConfig,
    version: Arc<dyn VersionProvider>,
    spawner: S,
}

impl<S: ProcessSpawner> SparkInterpreterLauncher<S> {
    pub fn new(config: LauncherConfig, version: Arc<dyn VersionProvider>, spawner: S) -> Self {
        SparkInterpreterLauncher {
            config,
            version,
            spawner,
        }
    }

    /// A launcher whose version is `zeppelinVersion` from the config, or the built version.
    pub fn from_config(config: LauncherConfig, spawner: S) -> Self {
        let version: Arc<dyn VersionProvider> = match &config.zeppelin_version {
            Some(version) => Arc::new(StaticVersion::new(version)),
            None => Arc::new(BuiltVersion),
        };
        Self::new(config, version, spawner)
    }

    pub fn config(&self) -> &LauncherConfig {
        &self.config
    }

    pub fn version(&self) -> &str {
        self.version.version()
    }

    /// Work out how the interpreter of `context` has to be started, without starting it.
    pub fn plan(&self, context: &LaunchContext) -> Result<ProcessRequest, Error> {
        let properties = context.normalized_properties();
        let mode = properties.deploy_mode();
        let paths = ResolvedPaths::resolve(&self.config, context);
        debug!(
            "Interpreter setting {} resolves to deploy mode {} with master {}",
            context.interpreter_setting_name,
            mode,
            properties.master()
        );

        let local_repo_artifacts = match mode {
            DeployMode::YarnCluster => local_repo::list_artifacts(&paths.local_repo_dir)?,
            DeployMode::Local | DeployMode::YarnClient | DeployMode::Other => Vec::new(),
        };
        let proxy_user = (context.user_impersonate() && self.config.impersonate_spark_proxy_user)
            .then(|| context.user_name.as_str());

        let arguments = ArgumentBuilder {
            zeppelin_home: &self.config.zeppelin_home,
            version: self.version.version(),
            default_scala_version: &self.config.scala_version,
            app_name: &context.interpreter_group_id,
            proxy_user,
            local_repo_artifacts: &local_repo_artifacts,
        }
        .build(mode, &properties);
        let env = compose_environment(mode, &properties, &arguments);

        Ok(ProcessRequest {
            interpreter_setting_name: context.interpreter_setting_name.clone(),
            interpreter_group_id: context.interpreter_group_id.clone(),
            deploy_mode: mode,
            interpreter_dir: paths.interpreter_dir,
            local_repo_dir: paths.local_repo_dir,
            runner: self.config.interpreter_runner_path(),
            arguments,
            env,
            connect_timeout: connect_timeout(&properties, self.config.connect_timeout()),
            user_impersonate: context.user_impersonate(),
            user_name: context.user_name.clone(),
            event_server_host: context.event_server_host.clone(),
            event_server_port: context.event_server_port,
            port_range: self.config.interpreter_port_range.clone(),
        })
    }

    /// Plan the launch of `context` and hand it to the spawner.
    pub fn launch(&self, context: &LaunchContext) -> Result<S::Process, Error> {
        let request = self.plan(context)?;
        info!(
            "Launching interpreter {} of group {} in {} mode",
            request.interpreter_setting_name, request.interpreter_group_id, request.deploy_mode
        );
        self.spawner.create(request)
    }
}
