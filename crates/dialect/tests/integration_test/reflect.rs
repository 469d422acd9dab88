//! Tests for metadata reflection against a mock bridge connection.

use timestream_dialect::reflect::{describe_sql, show_tables_sql, SHOW_DATABASES};
use timestream_dialect::*;

use crate::mock::{rs, MockBridge, MockConnection, MockRoleAssumer};

fn sensors_connection() -> MockConnection {
    MockConnection::new(Some("sensors"))
        .respond(
            SHOW_DATABASES,
            rs(&["Database"], &[&[Some("sensors")], &[Some("billing")]]),
        )
        .respond(
            &show_tables_sql("sensors"),
            rs(&["Table"], &[&[Some("IoTMulti")], &[Some("DevOps")]]),
        )
        .respond(
            &show_tables_sql("billing"),
            rs(&["Table"], &[&[Some("invoices")]]),
        )
        .respond(
            &describe_sql("sensors", "IoTMulti"),
            rs(
                &["Column", "Type", "Timestream attribute type"],
                &[
                    &[Some("device_id"), Some("varchar(256)"), Some("DIMENSION")],
                    &[Some("time"), Some("timestamp"), Some("TIMESTAMP")],
                    &[Some("load"), Some("double"), Some("MULTI")],
                    &[Some("shape"), Some("geometry"), Some("MULTI")],
                ],
            ),
        )
}

fn reflector() -> MetadataReflector<MockConnection> {
    MetadataReflector::new(sensors_connection(), 16)
}

#[tokio::test]
async fn test_schema_names() {
    let r = reflector();
    let names = r.get_schema_names().await.unwrap();
    assert_eq!(names, vec!["sensors", "billing"]);
    assert_eq!(r.connection().executed(), vec![SHOW_DATABASES.to_string()]);
}

#[tokio::test]
async fn test_table_names_default_and_explicit_schema() {
    let r = reflector();
    assert_eq!(r.get_table_names(None).await.unwrap(), vec!["IoTMulti", "DevOps"]);
    assert_eq!(r.get_table_names(Some("billing")).await.unwrap(), vec!["invoices"]);
    assert_eq!(
        r.connection().executed(),
        vec!["SHOW TABLES FROM sensors".to_string(), "SHOW TABLES FROM billing".to_string()]
    );
}

#[tokio::test]
async fn test_no_schema_available() {
    let r = MetadataReflector::new(MockConnection::new(None), 16);
    let err = r.get_table_names(None).await.unwrap_err();
    assert!(matches!(err, DialectError::NoSchema));
    assert!(r.connection().executed().is_empty());
}

#[tokio::test]
async fn test_has_table_uses_table_listing() {
    let r = reflector();
    assert!(r.has_table("IoTMulti", None).await.unwrap());
    assert!(!r.has_table("iotmulti", None).await.unwrap());
    assert!(!r.has_table("invoices", Some("sensors")).await.unwrap());
    // Second and third calls are cache hits for the same schema.
    assert_eq!(r.connection().executed().len(), 1);
}

#[tokio::test]
async fn test_columns() {
    let r = reflector();
    let cols = r.get_columns("IoTMulti", None).await.unwrap();

    assert_eq!(cols.len(), 4);
    assert_eq!(cols[0].name, "device_id");
    assert_eq!(cols[0].sql_type, SqlType::STRING);
    assert_eq!(cols[0].ordinal_position, 1);
    assert!(cols[0].nullable);
    assert_eq!(cols[1].sql_type, SqlType::Timestamp);
    assert_eq!(cols[2].sql_type, SqlType::Float);
    assert_eq!(cols[3].sql_type, SqlType::Null);
    assert_eq!(cols[3].ordinal_position, 4);
    assert!(cols.iter().all(|c| c.default.is_none() && c.comment.is_none()));
}

#[tokio::test]
async fn test_repeated_calls_are_cached() {
    let r = reflector();
    let first = r.get_columns("IoTMulti", Some("sensors")).await.unwrap();
    let second = r.get_columns("IoTMulti", None).await.unwrap();
    assert_eq!(first, second);
    r.get_schema_names().await.unwrap();
    r.get_schema_names().await.unwrap();

    assert_eq!(
        r.connection().executed(),
        vec![describe_sql("sensors", "IoTMulti"), SHOW_DATABASES.to_string()]
    );
    assert_eq!(r.cache().hits(), 2);
}

#[tokio::test]
async fn test_cache_disabled_always_queries() {
    let r = MetadataReflector::new(sensors_connection(), 0);
    r.get_schema_names().await.unwrap();
    r.get_schema_names().await.unwrap();
    assert_eq!(r.connection().executed().len(), 2);
}

#[tokio::test]
async fn test_new_connection_gets_fresh_cache() {
    let dialect = TimestreamDialect::with_role_assumer(
        DialectConfig {
            driver_path: Some("/opt/driver.jar".into()),
            ..DialectConfig::default()
        },
        Box::new(MockRoleAssumer::default()),
    );
    let bridge = MockBridge::new(sensors_connection);
    let url = "awstimestream://timestream.us-east-1.amazonaws.com";

    let first = dialect.connect(&bridge, url).await.unwrap();
    first.get_schema_names().await.unwrap();
    assert_eq!(first.cache().len(), 1);

    let second = dialect.connect(&bridge, url).await.unwrap();
    assert!(second.cache().is_empty());
    second.get_schema_names().await.unwrap();
    assert_eq!(second.connection().executed(), vec![SHOW_DATABASES.to_string()]);
}

#[tokio::test]
async fn test_bridge_errors_propagate() {
    let r = reflector();
    let err = r.get_columns("missing", None).await.unwrap_err();
    match err {
        DialectError::Bridge(e) => assert!(e.message.contains("DESCRIBE sensors.missing")),
        other => panic!("expected bridge error, got {other:?}"),
    }
    // Failures are not cached.
    assert!(r.get_columns("missing", None).await.is_err());
    assert_eq!(r.connection().executed().len(), 2);
}

#[tokio::test]
async fn test_unsupported_constraints_are_empty() {
    let r = reflector();
    for table in ["IoTMulti", "nope"] {
        assert!(r.get_foreign_keys(table, None).await.unwrap().is_empty());
        assert!(r.get_pk_constraint(table, Some("billing")).await.unwrap().is_empty());
        assert!(r.get_indexes(table, None).await.unwrap().is_empty());
    }
    assert!(r.connection().executed().is_empty());
}
