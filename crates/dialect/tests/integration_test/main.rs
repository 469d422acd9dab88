//! Integration tests for timestream-dialect.
//!
//! These run entirely against in-memory bridges and role assumers; no AWS
//! credentials or JVM are required.

mod compiler;
mod mock;
mod reflect;
