//! The version of the running installation, used to name the interpreter jars shipped to the
//! cluster.
use crate::built_info;

pub trait VersionProvider: Send + Sync {
    fn version(&self) -> &str;
}

/// The version this launcher was built as.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltVersion;

impl VersionProvider for BuiltVersion {
    fn version(&self) -> &str {
        built_info::PKG_VERSION
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StaticVersion(String);

impl StaticVersion {
    pub fn new(version: impl Into<String>) -> Self {
        StaticVersion(version.into())
    }
}

impl VersionProvider for StaticVersion {
    fn version(&self) -> &str {
        &self.0
    }
}
