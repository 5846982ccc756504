//! This module contains the configuration of the launcher itself, as opposed to the properties of
//! the interpreter setting that is launched.

use crate::error::{CurrentDirSnafu, Error, ParseConfigSnafu, ReadConfigSnafu};
use serde::{Deserialize, Serialize};
use snafu::ResultExt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Locations searched for a launcher config when none is given explicitly, in order.
pub const CONFIG_PATHS: &[&str] = &[
    "conf/spark-launcher.yaml",
    "/etc/zeppelin/spark-launcher.yaml",
];

const ZEPPELIN_HOME_ENV: &str = "ZEPPELIN_HOME";
const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 600_000;
const DEFAULT_PORT_RANGE: &str = ":";
const DEFAULT_SCALA_VERSION: &str = "2.11";

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LauncherConfig {
    /// Root of the installation, containing `interpreter/`, `conf/` and `bin/`.
    pub zeppelin_home: PathBuf,
    /// Defaults to `<zeppelinHome>/local-repo`.
    pub local_repo: Option<PathBuf>,
    /// Defaults to `<zeppelinHome>/bin/interpreter.sh`.
    pub interpreter_runner: Option<PathBuf>,
    /// Milliseconds to wait for a launched interpreter to connect back.
    pub connect_timeout: u64,
    pub interpreter_port_range: String,
    /// Whether impersonated users are passed to Spark as `--proxy-user`.
    pub impersonate_spark_proxy_user: bool,
    /// Scala binding used when the interpreter setting does not declare one.
    pub scala_version: String,
    /// Overrides the version used to name the bundled interpreter jars.
    pub zeppelin_version: Option<String>,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        LauncherConfig {
            zeppelin_home: std::env::var_os(ZEPPELIN_HOME_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            local_repo: None,
            interpreter_runner: None,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT_MS,
            interpreter_port_range: DEFAULT_PORT_RANGE.to_string(),
            impersonate_spark_proxy_user: true,
            scala_version: DEFAULT_SCALA_VERSION.to_string(),
            zeppelin_version: None,
        }
    }
}

impl LauncherConfig {
    /// A default config rooted at `zeppelin_home`.
    pub fn with_zeppelin_home(zeppelin_home: impl Into<PathBuf>) -> Self {
        LauncherConfig {
            zeppelin_home: zeppelin_home.into(),
            ..LauncherConfig::default()
        }
    }

    /// Load the config from `path` if given, otherwise from the first existing file in
    /// [`CONFIG_PATHS`]. Without any config file the defaults are used.
    ///
    /// Relative directories are resolved against the current directory.
    pub fn load(path: Option<&Path>) -> Result<Self, Error> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => match CONFIG_PATHS.iter().map(Path::new).find(|path| path.is_file()) {
                Some(path) => Self::from_file(path)?,
                None => {
                    debug!(
                        "No launcher config found in {:?}, using defaults",
                        CONFIG_PATHS
                    );
                    LauncherConfig::default()
                }
            },
        };
        config.into_absolute()
    }

    /// Resolve relative directories against the current directory.
    pub fn into_absolute(mut self) -> Result<Self, Error> {
        let cwd = std::env::current_dir().context(CurrentDirSnafu)?;
        self.zeppelin_home = absolute(&cwd, self.zeppelin_home);
        self.local_repo = self.local_repo.map(|path| absolute(&cwd, path));
        self.interpreter_runner = self.interpreter_runner.map(|path| absolute(&cwd, path));
        Ok(self)
    }

    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let raw = std::fs::read_to_string(path).context(ReadConfigSnafu { path })?;
        let config = serde_yaml::from_str(&raw).context(ParseConfigSnafu { path })?;
        info!("Loaded launcher config from {}", path.display());
        Ok(config)
    }

    pub fn local_repo_root(&self) -> PathBuf {
        self.local_repo
            .clone()
            .unwrap_or_else(|| self.zeppelin_home.join("local-repo"))
    }

    pub fn interpreter_runner_path(&self) -> PathBuf {
        self.interpreter_runner
            .clone()
            .unwrap_or_else(|| self.zeppelin_home.join("bin").join("interpreter.sh"))
    }

    pub fn interpreter_root(&self) -> PathBuf {
        self.zeppelin_home.join("interpreter")
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout)
    }
}

fn absolute(cwd: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else if path == Path::new(".") {
        cwd.to_path_buf()
    } else {
        cwd.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_derived_paths() {
        let config = LauncherConfig::with_zeppelin_home("/opt/zeppelin");
        assert_eq!(
            config.local_repo_root(),
            PathBuf::from("/opt/zeppelin/local-repo")
        );
        assert_eq!(
            config.interpreter_runner_path(),
            PathBuf::from("/opt/zeppelin/bin/interpreter.sh")
        );
        assert_eq!(
            config.interpreter_root(),
            PathBuf::from("/opt/zeppelin/interpreter")
        );
        assert_eq!(config.connect_timeout(), Duration::from_secs(600));
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: LauncherConfig = serde_yaml::from_str(
            r#"
zeppelinHome: /opt/zeppelin
localRepo: /var/lib/zeppelin/repo
connectTimeout: 30000
impersonateSparkProxyUser: false
"#,
        )
        .unwrap();

        assert_eq!(
            config.local_repo_root(),
            PathBuf::from("/var/lib/zeppelin/repo")
        );
        assert_eq!(config.connect_timeout(), Duration::from_secs(30));
        assert!(!config.impersonate_spark_proxy_user);
        assert_eq!(config.interpreter_port_range, DEFAULT_PORT_RANGE);
        assert_eq!(config.scala_version, DEFAULT_SCALA_VERSION);
        assert_eq!(config.zeppelin_version, None);
    }

    #[test]
    fn test_load_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "zeppelinHome: /srv/zeppelin").unwrap();
        writeln!(file, "interpreterRunner: /srv/zeppelin/bin/run.sh").unwrap();

        let config = LauncherConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.zeppelin_home, PathBuf::from("/srv/zeppelin"));
        assert_eq!(
            config.interpreter_runner_path(),
            PathBuf::from("/srv/zeppelin/bin/run.sh")
        );
    }

    #[test]
    fn test_relative_directories_are_made_absolute() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "zeppelinHome: .").unwrap();
        writeln!(file, "localRepo: repo").unwrap();
        writeln!(file, "interpreterRunner: /srv/zeppelin/bin/run.sh").unwrap();

        let cwd = std::env::current_dir().unwrap();
        let config = LauncherConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.zeppelin_home, cwd);
        assert_eq!(config.local_repo_root(), cwd.join("repo"));
        assert_eq!(
            config.interpreter_runner_path(),
            PathBuf::from("/srv/zeppelin/bin/run.sh")
        );
        assert!(config.interpreter_root().is_absolute());
    }

    #[test]
    fn test_default_home_is_made_absolute() {
        let config = LauncherConfig::with_zeppelin_home("zeppelin")
            .into_absolute()
            .unwrap();
        assert!(config.zeppelin_home.is_absolute());
        assert!(config.zeppelin_home.ends_with("zeppelin"));
        assert!(config.local_repo_root().is_absolute());
        assert!(config.interpreter_runner_path().is_absolute());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = LauncherConfig::load(Some(dir.path().join("missing.yaml").as_path()));
        assert!(matches!(result, Err(Error::ReadConfig { .. })));
    }

    #[test]
    fn test_load_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "connectTimeout: soon").unwrap();

        let result = LauncherConfig::load(Some(file.path()));
        assert!(matches!(result, Err(Error::ParseConfig { .. })));
    }
}
