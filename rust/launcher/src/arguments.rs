//! This module builds the `spark-submit` arguments of an interpreter process.
//!
//! Every deploy mode gets the application name, the master and the user's `spark.*` properties.
//! On top of that the YARN modes ship SparkR and enable Python workers, and YARN cluster mode
//! additionally ships the interpreter jars and a logging config with the driver, since the driver
//! then runs on a cluster node instead of next to the launcher.

use serde::Serialize;
use spark_interpreter_context::constants::*;
use spark_interpreter_context::{DeployMode, NormalizedProperties};
use std::collections::BTreeMap;
use std::fmt::{self, Display};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Separates the tokens of serialized arguments.
///
/// Values are not escaped. A user value containing the delimiter is passed through as is, and
/// splits into extra tokens on the receiving side.
pub const TOKEN_DELIMITER: char = '|';

const CONF_FLAG: &str = "--conf";
const PROXY_USER_FLAG: &str = "--proxy-user";

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SparkArgument {
    ProxyUser(String),
    Conf { key: String, value: String },
}

impl SparkArgument {
    pub fn conf(key: impl Into<String>, value: impl Into<String>) -> Self {
        SparkArgument::Conf {
            key: key.into(),
            value: value.into(),
        }
    }

    /// The flag and its value, as passed on the command line.
    pub fn tokens(&self) -> [String; 2] {
        match self {
            SparkArgument::ProxyUser(user) => [PROXY_USER_FLAG.to_string(), user.clone()],
            SparkArgument::Conf { key, value } => {
                [CONF_FLAG.to_string(), format!("{}={}", key, value)]
            }
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct SparkArguments(Vec<SparkArgument>);

impl SparkArguments {
    pub fn iter(&self) -> impl Iterator<Item = &SparkArgument> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The value of the `--conf` entry for `key`, if any.
    pub fn conf(&self, key: &str) -> Option<&str> {
        self.0.iter().find_map(|argument| match argument {
            SparkArgument::Conf { key: k, value } if k == key => Some(value.as_str()),
            _ => None,
        })
    }

    pub fn tokens(&self) -> Vec<String> {
        self.0.iter().flat_map(SparkArgument::tokens).collect()
    }
}

impl Display for SparkArguments {
    /// Writes all tokens joined by [`TOKEN_DELIMITER`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens().iter().enumerate() {
            if i > 0 {
                write!(f, "{}", TOKEN_DELIMITER)?;
            }
            f.write_str(token)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a SparkArguments {
    type Item = &'a SparkArgument;
    type IntoIter = std::slice::Iter<'a, SparkArgument>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Split serialized arguments back into their tokens.
pub fn split_tokens(serialized: &str) -> Vec<&str> {
    if serialized.is_empty() {
        return Vec::new();
    }
    serialized.split(TOKEN_DELIMITER).collect()
}

/// Everything besides the deploy mode and the interpreter properties that the arguments depend on.
#[derive(Clone, Debug)]
pub struct ArgumentBuilder<'a> {
    pub zeppelin_home: &'a Path,
    /// Installation version, part of the names of the bundled interpreter jars.
    pub version: &'a str,
    /// Used unless the interpreter properties declare a scala version.
    pub default_scala_version: &'a str,
    pub app_name: &'a str,
    pub proxy_user: Option<&'a str>,
    /// Only shipped in YARN cluster mode.
    pub local_repo_artifacts: &'a [PathBuf],
}

impl<'a> ArgumentBuilder<'a> {
    pub fn build(&self, mode: DeployMode, properties: &NormalizedProperties) -> SparkArguments {
        let mut conf: BTreeMap<String, String> = properties
            .spark_conf()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        conf.insert(SPARK_APP_NAME.to_string(), self.app_name.to_string());
        conf.insert(SPARK_MASTER.to_string(), properties.master().to_string());

        match mode {
            DeployMode::Local | DeployMode::Other => {}
            DeployMode::YarnClient => self.add_yarn_conf(&mut conf, properties),
            DeployMode::YarnCluster => {
                self.add_yarn_conf(&mut conf, properties);
                self.add_yarn_cluster_conf(&mut conf, properties);
            }
        }

        for (key, value) in &conf {
            if value.contains(TOKEN_DELIMITER) {
                warn!(
                    "Value of {} contains the argument delimiter {:?} and will be split by the interpreter",
                    key, TOKEN_DELIMITER
                );
            }
        }

        let mut arguments = Vec::with_capacity(conf.len() + 1);
        if let Some(user) = self.proxy_user {
            arguments.push(SparkArgument::ProxyUser(user.to_string()));
        }
        arguments.extend(
            conf.into_iter()
                .map(|(key, value)| SparkArgument::Conf { key, value }),
        );
        SparkArguments(arguments)
    }

    fn add_yarn_conf(&self, conf: &mut BTreeMap<String, String>, properties: &NormalizedProperties) {
        let sparkr_archive = format!(
            "{}#{}",
            self.sparkr_lib_dir(properties).join(SPARKR_ARCHIVE).display(),
            SPARKR_ARCHIVE_ALIAS
        );
        append_to_list(conf, SPARK_YARN_DIST_ARCHIVES, [sparkr_archive]);
        // Python workers are enabled for every interpreter of the group, not only pyspark
        conf.insert(SPARK_YARN_IS_PYTHON.to_string(), "true".to_string());

        // A legacy yarn-client / yarn-cluster master already implies the deploy mode
        match properties.explicit_deploy_mode() {
            Some(deploy_mode) => {
                conf.insert(SPARK_SUBMIT_DEPLOY_MODE.to_string(), deploy_mode.to_string())
            }
            None => conf.remove(SPARK_SUBMIT_DEPLOY_MODE),
        };
    }

    fn add_yarn_cluster_conf(
        &self,
        conf: &mut BTreeMap<String, String>,
        properties: &NormalizedProperties,
    ) {
        // A restarted driver would come up without the interpreter state
        conf.insert(SPARK_YARN_MAX_APP_ATTEMPTS.to_string(), "1".to_string());
        conf.insert(
            SPARK_YARN_WAIT_APP_COMPLETION.to_string(),
            "false".to_string(),
        );

        let scala_version = properties
            .scala_version()
            .unwrap_or(self.default_scala_version);
        let jars = self
            .local_repo_artifacts
            .iter()
            .map(|artifact| artifact.display().to_string())
            .chain([
                self.scala_jar(scala_version).display().to_string(),
                self.shaded_interpreter_jar().display().to_string(),
            ]);
        append_to_list(conf, SPARK_JARS, jars);

        // The driver does not see the launcher's log4j configuration
        let log4j_properties = self
            .zeppelin_home
            .join("conf")
            .join(YARN_CLUSTER_LOG4J_PROPERTIES);
        append_to_list(conf, SPARK_FILES, [log4j_properties.display().to_string()]);
    }

    /// `$SPARK_HOME/R/lib`, or the copy bundled with the Spark interpreter without a Spark home.
    fn sparkr_lib_dir(&self, properties: &NormalizedProperties) -> PathBuf {
        match properties.spark_home() {
            Some(spark_home) => Path::new(spark_home).join("R").join("lib"),
            None => self.spark_interpreter_dir().join("R").join("lib"),
        }
    }

    fn spark_interpreter_dir(&self) -> PathBuf {
        self.zeppelin_home
            .join("interpreter")
            .join(SPARK_INTERPRETER_GROUP)
    }

    fn scala_jar(&self, scala_version: &str) -> PathBuf {
        self.spark_interpreter_dir()
            .join(format!("scala-{}", scala_version))
            .join(format!(
                "spark-scala-{}-{}.jar",
                scala_version, self.version
            ))
    }

    fn shaded_interpreter_jar(&self) -> PathBuf {
        self.zeppelin_home.join("interpreter").join(format!(
            "{}-{}.jar",
            SHADED_INTERPRETER_JAR_PREFIX, self.version
        ))
    }
}

/// Append `values` to the comma separated list stored under `key`.
fn append_to_list(
    conf: &mut BTreeMap<String, String>,
    key: &str,
    values: impl IntoIterator<Item = String>,
) {
    let list = conf
        .get(key)
        .cloned()
        .into_iter()
        .chain(values)
        .collect::<Vec<_>>()
        .join(",");
    conf.insert(key.to_string(), list);
}
