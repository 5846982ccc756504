//! Composition of the environment of an interpreter process.
use crate::arguments::SparkArguments;
use crate::config::LauncherConfig;
use serde::Serialize;
use spark_interpreter_context::constants::{ZEPPELIN_SPARK_CONF, ZEPPELIN_SPARK_YARN_CLUSTER};
use spark_interpreter_context::{DeployMode, LaunchContext, NormalizedProperties};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

/// Directories of an interpreter setting, derived from the launcher config.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedPaths {
    pub interpreter_dir: PathBuf,
    pub local_repo_dir: PathBuf,
}

impl ResolvedPaths {
    pub fn resolve(config: &LauncherConfig, context: &LaunchContext) -> Self {
        ResolvedPaths {
            interpreter_dir: config
                .interpreter_root()
                .join(&context.interpreter_setting_group),
            local_repo_dir: config
                .local_repo_root()
                .join(&context.interpreter_setting_id),
        }
    }
}

pub fn compose_environment(
    mode: DeployMode,
    properties: &NormalizedProperties,
    arguments: &SparkArguments,
) -> BTreeMap<String, String> {
    let mut env = properties.environment();
    env.insert(ZEPPELIN_SPARK_CONF.to_string(), arguments.to_string());
    if mode == DeployMode::YarnCluster {
        env.insert(ZEPPELIN_SPARK_YARN_CLUSTER.to_string(), "true".to_string());
    }
    env
}

/// The connect timeout override of the properties in milliseconds, or `default`.
pub fn connect_timeout(properties: &NormalizedProperties, default: Duration) -> Duration {
    match properties.connect_timeout() {
        None => default,
        Some(raw) => match raw.trim().parse::<u64>() {
            Ok(millis) => Duration::from_millis(millis),
            Err(err) => {
                warn!(
                    "Ignoring invalid connect timeout [{}]: {}, using default of {}ms",
                    raw,
                    err,
                    default.as_millis()
                );
                default
            }
        },
    }
}
