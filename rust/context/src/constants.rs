// launch properties
pub const SPARK_HOME: &str = "SPARK_HOME";
pub const SPARK_CONF_PREFIX: &str = "spark.";
pub const SPARK_APP_NAME: &str = "spark.app.name";
pub const SPARK_MASTER: &str = "spark.master";
pub const LEGACY_MASTER: &str = "master";
pub const SPARK_SUBMIT_DEPLOY_MODE: &str = "spark.submit.deployMode";
pub const SPARK_FILES: &str = "spark.files";
pub const SPARK_JARS: &str = "spark.jars";
pub const ZEPPELIN_CONNECT_TIMEOUT: &str = "zeppelin.interpreter.connect.timeout";
pub const ZEPPELIN_SCALA_VERSION: &str = "zeppelin.spark.scala.version";
// yarn
pub const SPARK_YARN_DIST_ARCHIVES: &str = "spark.yarn.dist.archives";
pub const SPARK_YARN_IS_PYTHON: &str = "spark.yarn.isPython";
pub const SPARK_YARN_MAX_APP_ATTEMPTS: &str = "spark.yarn.maxAppAttempts";
pub const SPARK_YARN_WAIT_APP_COMPLETION: &str = "spark.yarn.submit.waitAppCompletion";
// masters and deploy modes
pub const DEFAULT_MASTER: &str = "local[*]";
pub const MASTER_LOCAL_PREFIX: &str = "local";
pub const MASTER_YARN: &str = "yarn";
pub const MASTER_YARN_CLIENT: &str = "yarn-client";
pub const MASTER_YARN_CLUSTER: &str = "yarn-cluster";
pub const DEPLOY_MODE_CLIENT: &str = "client";
pub const DEPLOY_MODE_CLUSTER: &str = "cluster";
// process environment
pub const ZEPPELIN_SPARK_CONF: &str = "ZEPPELIN_SPARK_CONF";
pub const ZEPPELIN_SPARK_YARN_CLUSTER: &str = "ZEPPELIN_SPARK_YARN_CLUSTER";
// bundled artifacts
pub const SPARK_INTERPRETER_GROUP: &str = "spark";
pub const SPARKR_ARCHIVE: &str = "sparkr.zip";
pub const SPARKR_ARCHIVE_ALIAS: &str = "sparkr";
pub const YARN_CLUSTER_LOG4J_PROPERTIES: &str = "log4j_yarn_cluster.properties";
pub const SHADED_INTERPRETER_JAR_PREFIX: &str = "zeppelin-interpreter-shaded";
