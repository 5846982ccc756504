//! This module provides the launch context of a Spark interpreter and the helpers that classify
//! its properties.
pub mod constants;
pub mod deploy_mode;
pub mod properties;

pub use deploy_mode::DeployMode;
pub use properties::NormalizedProperties;

use serde::{Deserialize, Serialize};
use snafu::{ResultExt, Snafu};
use std::collections::BTreeMap;
use std::str::FromStr;

#[derive(Snafu, Debug)]
pub enum Error {
    #[snafu(display("failed to parse launch context"))]
    ParseLaunchContext { source: serde_yaml::Error },
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterpreterOption {
    #[serde(default)]
    pub user_impersonate: bool,
}

/// Everything known about a single request to launch an interpreter process.
///
/// A context is created once per launch and only handed out by reference afterwards.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchContext {
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
    #[serde(default)]
    pub option: InterpreterOption,
    pub user_name: String,
    /// Used as the Spark application name.
    pub interpreter_group_id: String,
    /// Names the local repository directory of the setting.
    pub interpreter_setting_id: String,
    /// Names the interpreter directory below the installation root.
    pub interpreter_setting_group: String,
    pub interpreter_setting_name: String,
    #[serde(default)]
    pub event_server_port: u16,
    #[serde(default = "default_event_server_host")]
    pub event_server_host: String,
}

fn default_event_server_host() -> String {
    "localhost".to_string()
}

impl LaunchContext {
    pub fn normalized_properties(&self) -> NormalizedProperties {
        NormalizedProperties::normalize(&self.properties)
    }

    pub fn user_impersonate(&self) -> bool {
        self.option.user_impersonate
    }
}

impl FromStr for LaunchContext {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_yaml::from_str(s).context(ParseLaunchContextSnafu)
    }
}
