//! In-memory stand-ins for the bridge driver and STS.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use timestream_dialect::credentials::AssumedCredentials;
use timestream_dialect::*;

pub struct MockConnection {
    pub responses: HashMap<String, ResultSet>,
    pub schema: Option<String>,
    pub executed: Arc<Mutex<Vec<String>>>,
}

impl MockConnection {
    pub fn new(schema: Option<&str>) -> Self {
        Self {
            responses: HashMap::new(),
            schema: schema.map(str::to_string),
            executed: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn respond(mut self, sql: &str, rs: ResultSet) -> Self {
        self.responses.insert(sql.to_string(), rs);
        self
    }

    pub fn executed(&self) -> Vec<String> {
        self.executed.lock().unwrap().clone()
    }
}

#[async_trait]
impl BridgeConnection for MockConnection {
    async fn execute(&self, sql: &str) -> Result<ResultSet, BridgeError> {
        self.executed.lock().unwrap().push(sql.to_string());
        self.responses
            .get(sql)
            .cloned()
            .ok_or_else(|| BridgeError::programming(format!("unexpected statement: {sql}")))
    }

    fn schema_name(&self) -> Option<String> {
        self.schema.clone()
    }
}

/// Bridge that hands out fresh connections built by `factory` and records
/// the arguments it was called with.
pub struct MockBridge<F> {
    pub factory: F,
    pub seen: Mutex<Vec<ConnectArgs>>,
}

impl<F> MockBridge<F>
where
    F: Fn() -> MockConnection + Send + Sync,
{
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            seen: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl<F> JdbcBridge for MockBridge<F>
where
    F: Fn() -> MockConnection + Send + Sync,
{
    type Connection = MockConnection;

    async fn connect(&self, args: ConnectArgs) -> Result<MockConnection, BridgeError> {
        self.seen.lock().unwrap().push(args);
        Ok((self.factory)())
    }
}

/// Role assumer returning fixed credentials and recording each call.
#[derive(Default)]
pub struct MockRoleAssumer {
    pub calls: Arc<Mutex<Vec<(String, Option<String>)>>>,
    pub fail_with: Option<String>,
}

#[async_trait]
impl RoleAssumer for MockRoleAssumer {
    async fn assume_role(
        &self,
        role_arn: &str,
        region: Option<&str>,
    ) -> timestream_core::Result<AssumedCredentials> {
        self.calls
            .lock()
            .unwrap()
            .push((role_arn.to_string(), region.map(str::to_string)));
        if let Some(msg) = &self.fail_with {
            return Err(DialectError::CredentialExchange(msg.clone().into()));
        }
        Ok(AssumedCredentials {
            access_key_id: "ASIATEMPKEY".into(),
            secret_access_key: "temp-secret".into(),
            session_token: "temp-token".into(),
            expiration: None,
        })
    }
}

pub fn rs(columns: &[&str], rows: &[&[Option<&str>]]) -> ResultSet {
    ResultSet::new(
        columns.iter().map(|c| c.to_string()).collect(),
        rows.iter()
            .map(|r| r.iter().map(|c| c.map(str::to_string)).collect())
            .collect(),
    )
}
