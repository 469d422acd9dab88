//! Tests for the type compiler and the store-type mapping it shares with
//! reflection.

use timestream_core::{lookup_store_type, TYPE_MAPPINGS};
use timestream_dialect::*;

#[test]
fn test_type_compiler_via_dialect() {
    let dialect = TimestreamDialect::new(DialectConfig::default());
    let compiler = dialect.type_compiler();

    assert_eq!(compiler.process(&SqlType::Integer).unwrap(), "INTEGER");
    assert_eq!(compiler.process(&SqlType::Double).unwrap(), "DOUBLE");
    assert_eq!(
        compiler.process(&SqlType::Varchar { length: Some(2048) }).unwrap(),
        "VARCHAR(2048)"
    );

    let err = compiler.process(&SqlType::NVarchar).unwrap_err();
    assert_eq!(err.to_string(), "Data type `NVARCHAR` is not supported");
}

#[test]
fn test_every_mapped_store_type_compiles() {
    // Reflected columns must always be renderable back into DDL.
    let compiler = TypeCompiler;
    for (store_name, ty) in TYPE_MAPPINGS {
        assert_eq!(lookup_store_type(store_name), *ty);
        assert!(compiler.process(ty).is_ok(), "{store_name} -> {ty:?} failed to compile");
    }
}

#[test]
fn test_preparers() {
    let dialect = TimestreamDialect::new(DialectConfig::default());
    assert_eq!(dialect.preparer().strategy(), QuoteStrategy::Never);
    assert_eq!(dialect.preparer().quote("order"), "order");
    assert_eq!(dialect.ddl_preparer().quote("order"), "`order`");
}

#[test]
fn test_statement_compiler_rewrites_char_length() {
    let dialect = TimestreamDialect::new(DialectConfig::default());
    assert_eq!(
        dialect.statement_compiler().function_call("char_length", &["device_id"]),
        "length(device_id)"
    );
}
