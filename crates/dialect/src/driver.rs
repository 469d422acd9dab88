//! JDBC driver identity and jar discovery.

use tracing::debug;

/// Fully-qualified class name of the Timestream JDBC driver.
pub const JDBC_DRIVER_CLASS: &str = "software.amazon.timestream.jdbc.TimestreamDriver";

pub const JDBC_DRIVER_VERSION: &str = "2.0.0";

/// File name of the shaded driver jar shipped for [`JDBC_DRIVER_VERSION`].
pub const JDBC_JAR_NAME: &str = "amazon-timestream-jdbc-2.0.0-shaded.jar";

/// URL handed to the driver; all settings travel as properties.
pub const JDBC_URL: &str = "jdbc:timestream://";

/// Find the first colon-delimited `class_path` entry that names the driver jar.
pub fn find_jar_in_class_path(class_path: &str) -> Option<String> {
    let found = class_path
        .split(':')
        .find(|entry| entry.contains(JDBC_JAR_NAME))
        .map(str::to_string);
    debug!(found = ?found, "Searched CLASSPATH for driver jar");
    found
}
