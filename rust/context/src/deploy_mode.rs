use crate::constants::*;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Topology a Spark interpreter process is deployed in.
#[derive(
    Clone, Copy, Debug, Deserialize, Display, EnumIter, Eq, Hash, PartialEq, Serialize,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum DeployMode {
    Local,
    YarnClient,
    YarnCluster,
    Other,
}

impl DeployMode {
    /// Classify `master` and `spark.submit.deployMode`.
    ///
    /// The legacy `yarn-client` and `yarn-cluster` masters win over whatever deploy mode is
    /// given. A plain `yarn` master needs an explicit deploy mode; without one (or with an
    /// unknown one) the result is [`DeployMode::Other`], as for every master we do not know.
    pub fn resolve(master: &str, submit_deploy_mode: Option<&str>) -> Self {
        match (master, submit_deploy_mode) {
            (master, _) if master.starts_with(MASTER_LOCAL_PREFIX) => DeployMode::Local,
            (MASTER_YARN_CLIENT, _) => DeployMode::YarnClient,
            (MASTER_YARN_CLUSTER, _) => DeployMode::YarnCluster,
            (MASTER_YARN, Some(DEPLOY_MODE_CLIENT)) => DeployMode::YarnClient,
            (MASTER_YARN, Some(DEPLOY_MODE_CLUSTER)) => DeployMode::YarnCluster,
            _ => DeployMode::Other,
        }
    }
}
