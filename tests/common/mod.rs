//! Scripted service doubles shared by the integration tests.
//!
//! Each double records its calls into a shared log so tests can assert on
//! ordering across services, and replies with a pre-programmed outcome.
#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::Value;
use std::sync::{Arc, Mutex};

use picx::auth::{AuthTokens, IdentityProvider, SignUpOutcome};
use picx::config::{ApiConfig, AppConfig, AuthConfig, Config, StorageConfig};
use picx::error::{AppError, GraphQlErrorEntry, Result};
use picx::graphql::{AuthMode, GraphApi};
use picx::storage::ObjectStore;

pub type CallLog = Arc<Mutex<Vec<String>>>;

pub fn call_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

/// A pre-programmed reply for one kind of call.
#[derive(Debug, Clone)]
pub enum Reply {
    Data(Value),
    Network(String),
    GraphQl(String),
}

impl Reply {
    fn to_result(&self) -> Result<Value> {
        match self {
            Reply::Data(value) => Ok(value.clone()),
            Reply::Network(message) => Err(AppError::Network(message.clone())),
            Reply::GraphQl(message) => Err(AppError::GraphQl(vec![GraphQlErrorEntry {
                message: message.clone(),
                error_type: None,
                path: None,
            }])),
        }
    }
}

fn operation_name(document: &str) -> &str {
    document
        .split_whitespace()
        .nth(1)
        .and_then(|name| name.split('(').next())
        .unwrap_or("unknown")
}

/// GraphQL endpoint double.
pub struct ScriptedApi {
    pub log: CallLog,
    pub on_query: Reply,
    pub on_mutate: Reply,
    pub last_mutation: Mutex<Option<Value>>,
}

impl ScriptedApi {
    pub fn new(log: CallLog, on_query: Reply, on_mutate: Reply) -> Self {
        Self {
            log,
            on_query,
            on_mutate,
            last_mutation: Mutex::new(None),
        }
    }
}

#[async_trait]
impl GraphApi for ScriptedApi {
    async fn query(&self, document: &str, _variables: Value) -> Result<Value> {
        self.log
            .lock()
            .unwrap()
            .push(format!("query:{}", operation_name(document)));
        self.on_query.to_result()
    }

    async fn mutate(&self, document: &str, variables: Value, auth: AuthMode) -> Result<Value> {
        assert!(
            matches!(auth, AuthMode::UserPool(_)),
            "writes must carry the user-pool identity"
        );
        self.log
            .lock()
            .unwrap()
            .push(format!("mutate:{}", operation_name(document)));
        *self.last_mutation.lock().unwrap() = Some(variables);
        self.on_mutate.to_result()
    }
}

/// Object store double.
pub struct ScriptedStore {
    pub log: CallLog,
    pub fail_put: bool,
}

impl ScriptedStore {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            fail_put: false,
        }
    }

    pub fn failing(log: CallLog) -> Self {
        Self {
            log,
            fail_put: true,
        }
    }
}

#[async_trait]
impl ObjectStore for ScriptedStore {
    async fn put_object(&self, key: &str, _bytes: &[u8], _content_type: &str) -> Result<()> {
        self.log.lock().unwrap().push(format!("put:{key}"));
        if self.fail_put {
            Err(AppError::Storage("upload rejected".into()))
        } else {
            Ok(())
        }
    }

    fn object_url(&self, key: &str) -> String {
        format!("https://images.test/{key}")
    }
}

/// Identity-provider double. Every sign-up succeeds with the configured
/// confirmation state; every sign-in yields a fixed token.
pub struct ScriptedProvider {
    pub log: CallLog,
    pub confirmed: bool,
}

impl ScriptedProvider {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            confirmed: true,
        }
    }
}

#[async_trait]
impl IdentityProvider for ScriptedProvider {
    async fn sign_up(&self, username: &str, _email: &str, _password: &str) -> Result<SignUpOutcome> {
        self.log.lock().unwrap().push(format!("sign_up:{username}"));
        Ok(SignUpOutcome {
            confirmed: self.confirmed,
        })
    }

    async fn sign_in(&self, username: &str, _password: &str) -> Result<AuthTokens> {
        self.log.lock().unwrap().push(format!("sign_in:{username}"));
        Ok(AuthTokens {
            access_token: "access-token".into(),
            expires_in: 3600,
        })
    }
}

pub const TEST_SESSION_SECRET: &str = "integration-test-secret";

pub fn test_config() -> Config {
    Config {
        app: AppConfig {
            env: "test".into(),
            host: "127.0.0.1".into(),
            port: 0,
        },
        api: ApiConfig {
            endpoint: "http://localhost:20002/graphql".into(),
            api_key: "da2-fakeApiId123456".into(),
        },
        storage: StorageConfig {
            bucket: "picx-images".into(),
            region: "us-east-1".into(),
            endpoint: None,
            public_base_url: Some("https://images.test".into()),
            access_key_id: None,
            secret_access_key: None,
        },
        auth: AuthConfig {
            user_pool_endpoint: "http://localhost:20003".into(),
            client_id: "test-client".into(),
            session_secret: TEST_SESSION_SECRET.into(),
            session_ttl_secs: 3600,
        },
    }
}

pub fn post_json(id: &str, title: &str) -> Value {
    serde_json::json!({
        "id": id,
        "title": title,
        "contents": format!("contents of {id}"),
        "upvotes": 0,
        "downvotes": 0,
        "owner": "alice"
    })
}
