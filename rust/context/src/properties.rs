//! Normalization of the raw properties of an interpreter setting.
//!
//! Properties with an empty value count as absent and are dropped here, so nothing downstream
//! has to tell "unset" from "set to nothing".
use crate::constants::*;
use crate::DeployMode;
use lazy_static::lazy_static;
use std::collections::{BTreeMap, BTreeSet};

lazy_static! {
    /// Properties that are exported to the interpreter process environment.
    static ref ENVIRONMENT_KEYS: BTreeSet<&'static str> = [SPARK_HOME].into_iter().collect();
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct NormalizedProperties {
    properties: BTreeMap<String, String>,
}

impl NormalizedProperties {
    pub fn normalize<I, K, V>(raw: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        NormalizedProperties {
            properties: raw
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .filter(|(_, value)| !value.is_empty())
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.properties
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// `spark.master`, falling back to the legacy `master` key and then to `local[*]`.
    pub fn master(&self) -> &str {
        self.get(SPARK_MASTER)
            .or_else(|| self.get(LEGACY_MASTER))
            .unwrap_or(DEFAULT_MASTER)
    }

    pub fn submit_deploy_mode(&self) -> Option<&str> {
        self.get(SPARK_SUBMIT_DEPLOY_MODE)
    }

    /// The deploy mode, if it was chosen through `spark.submit.deployMode` rather than implied by
    /// a legacy `yarn-client` / `yarn-cluster` master.
    pub fn explicit_deploy_mode(&self) -> Option<&str> {
        self.submit_deploy_mode()
            .filter(|_| self.master() == MASTER_YARN)
    }

    pub fn deploy_mode(&self) -> DeployMode {
        DeployMode::resolve(self.master(), self.submit_deploy_mode())
    }

    pub fn files(&self) -> Option<&str> {
        self.get(SPARK_FILES)
    }

    pub fn jars(&self) -> Option<&str> {
        self.get(SPARK_JARS)
    }

    pub fn spark_home(&self) -> Option<&str> {
        self.get(SPARK_HOME)
    }

    pub fn scala_version(&self) -> Option<&str> {
        self.get(ZEPPELIN_SCALA_VERSION)
    }

    /// The raw connect timeout override. Parsing is left to the caller, which knows the default.
    pub fn connect_timeout(&self) -> Option<&str> {
        self.get(ZEPPELIN_CONNECT_TIMEOUT)
    }

    /// All `spark.*` properties, which are handed to Spark as configuration.
    pub fn spark_conf(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.iter()
            .filter(|(key, _)| key.starts_with(SPARK_CONF_PREFIX))
    }

    /// The properties that are exported as environment variables of the interpreter process.
    pub fn environment(&self) -> BTreeMap<String, String> {
        self.iter()
            .filter(|(key, _)| ENVIRONMENT_KEYS.contains(*key))
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn raw_properties() -> BTreeMap<String, String> {
        [
            (SPARK_HOME, "/opt/spark"),
            ("ENV_1", ""),
            ("property_1", "value_1"),
            (SPARK_MASTER, "local[*]"),
            (SPARK_FILES, "file_1"),
            (SPARK_JARS, ""),
            ("spark.executor.memory", "2g"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn test_empty_values_are_dropped() {
        let properties = NormalizedProperties::normalize(&raw_properties());
        assert_eq!(properties.len(), 5);
        assert_eq!(properties.get("ENV_1"), None);
        assert_eq!(properties.jars(), None);
        assert_eq!(properties.files(), Some("file_1"));
    }

    #[test]
    fn test_environment_only_contains_recognized_keys() {
        let properties = NormalizedProperties::normalize(&raw_properties());
        let env = properties.environment();
        assert_eq!(env.len(), 1);
        assert_eq!(env.get(SPARK_HOME), Some(&"/opt/spark".to_string()));
        assert!(!env.contains_key("property_1"));
        assert!(!env.contains_key("ENV_1"));
    }

    #[test]
    fn test_spark_conf_only_contains_spark_keys() {
        let properties = NormalizedProperties::normalize(&raw_properties());
        let conf = properties.spark_conf().collect::<Vec<_>>();
        assert_eq!(
            conf,
            vec![
                ("spark.executor.memory", "2g"),
                (SPARK_FILES, "file_1"),
                (SPARK_MASTER, "local[*]"),
            ]
        );
    }

    #[test]
    fn test_master_fallbacks() {
        let properties = NormalizedProperties::normalize([(LEGACY_MASTER, "yarn-client")]);
        assert_eq!(properties.master(), "yarn-client");
        assert_eq!(properties.deploy_mode(), DeployMode::YarnClient);

        let properties =
            NormalizedProperties::normalize([(LEGACY_MASTER, "yarn-client"), (SPARK_MASTER, "")]);
        assert_eq!(properties.master(), "yarn-client");

        let properties = NormalizedProperties::normalize([(SPARK_MASTER, "")]);
        assert_eq!(properties.master(), DEFAULT_MASTER);
        assert_eq!(properties.deploy_mode(), DeployMode::Local);
    }

    #[test]
    fn test_explicit_deploy_mode() {
        let explicit = NormalizedProperties::normalize([
            (SPARK_MASTER, MASTER_YARN),
            (SPARK_SUBMIT_DEPLOY_MODE, DEPLOY_MODE_CLUSTER),
        ]);
        assert_eq!(explicit.explicit_deploy_mode(), Some(DEPLOY_MODE_CLUSTER));

        let legacy = NormalizedProperties::normalize([
            (SPARK_MASTER, MASTER_YARN_CLUSTER),
            (SPARK_SUBMIT_DEPLOY_MODE, DEPLOY_MODE_CLUSTER),
        ]);
        assert_eq!(legacy.submit_deploy_mode(), Some(DEPLOY_MODE_CLUSTER));
        assert_eq!(legacy.explicit_deploy_mode(), None);
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent(raw in proptest::collection::btree_map("[a-zA-Z_.]{0,8}", "[a-z{}]{0,3}", 0..16)) {
            let once = NormalizedProperties::normalize(&raw);
            let twice = NormalizedProperties::normalize(once.iter());
            prop_assert_eq!(&once, &twice);
            prop_assert!(once.iter().all(|(_, value)| !value.is_empty()));
        }
    }
}
