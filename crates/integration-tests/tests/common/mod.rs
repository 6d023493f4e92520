//! Shared fixtures: a demo server with transactional values

#![allow(dead_code)]

use rpcscope_api_rpc::{MethodRegistry, RpcServer, RpcServerConfig};
use rpcscope_core::application::FactoryProvider;
use rpcscope_core::port::{Finalize, PlainEncoder, Resolvable};
use rpcscope_core::{CallError, RpcError};
use rpcscope_daemon::{register_builtins, register_providers, ServerInfo};
use rpcscope_sdk::RpcScopeClient;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

pub type Log = Arc<Mutex<Vec<String>>>;

/// Transaction: commits on a clean call, rolls back when anything failed
pub struct Tx {
    log: Log,
    fail: AtomicBool,
}

impl Resolvable for Tx {}

impl Tx {
    pub fn break_next_finalize(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }
}

impl Finalize for Tx {
    fn finalize(&self, prior: &[CallError]) -> Result<(), CallError> {
        let action = if prior.is_empty() { "commit" } else { "rollback" };
        if self.fail.load(Ordering::SeqCst) {
            return Err(CallError::msg(format!("{} failed", action)));
        }
        self.log.lock().unwrap().push(format!("tx:{}", action));
        Ok(())
    }
}

/// Session opened on top of a transaction
pub struct Session {
    pub id: usize,
    log: Log,
    _tx: Arc<Tx>,
}

impl Resolvable for Session {}

impl Finalize for Session {
    fn finalize(&self, _prior: &[CallError]) -> Result<(), CallError> {
        self.log.lock().unwrap().push(format!("session:{}:close", self.id));
        Ok(())
    }
}

pub struct Identity {
    pub name: String,
}

impl Resolvable for Identity {}

#[derive(Deserialize)]
struct LoginParams {
    name: String,
}

pub struct Harness {
    pub client: RpcScopeClient,
    pub log: Log,
    pub sessions_opened: Arc<AtomicUsize>,
    handle: jsonrpsee::server::ServerHandle,
}

impl Drop for Harness {
    fn drop(&mut self) {
        let _ = self.handle.stop();
    }
}

pub async fn start() -> Harness {
    let log: Log = Arc::default();
    let sessions_opened = Arc::new(AtomicUsize::new(0));

    let mut provider = FactoryProvider::new();
    register_providers(
        &mut provider,
        Arc::new(ServerInfo {
            version: "it",
            started_at: Instant::now(),
        }),
    );
    let tx_log = log.clone();
    provider.register_finalizing::<Tx, _>(move |_| {
        Ok(Arc::new(Tx {
            log: tx_log.clone(),
            fail: AtomicBool::new(false),
        }))
    });
    let session_log = log.clone();
    let opened = sessions_opened.clone();
    provider.register_finalizing::<Session, _>(move |ctx| {
        let tx = ctx.require::<Tx>()?;
        Ok(Arc::new(Session {
            id: opened.fetch_add(1, Ordering::SeqCst),
            log: session_log.clone(),
            _tx: tx,
        }))
    });
    provider.register::<Identity, _>(|_| Err(RpcError::unauthenticated().into()));

    let mut registry = MethodRegistry::new(Arc::new(PlainEncoder));
    registry
        .register("db/commit.v1", |ctx, _, _| {
            ctx.require::<Tx>()?;
            let session = ctx.require::<Session>()?;
            Ok(json!({ "session": session.id }))
        })
        .unwrap()
        .register("db/broken_commit.v1", |ctx, _, _| {
            ctx.require::<Tx>()?.break_next_finalize();
            Ok(Value::Null)
        })
        .unwrap()
        .register("db/denied.v1", |ctx, _, _| {
            ctx.require::<Tx>()?;
            Err(RpcError::unauthorized().into())
        })
        .unwrap()
        .register("db/denied_broken.v1", |ctx, _, _| {
            ctx.require::<Tx>()?.break_next_finalize();
            Err(RpcError::unauthorized().into())
        })
        .unwrap()
        .register("account/whoami.v1", |ctx, _, _| {
            let identity = ctx.require::<Identity>()?;
            Ok(json!(identity.name))
        })
        .unwrap()
        .register_typed("account/login.v1", |ctx, params: LoginParams| {
            ctx.invalidate_type::<Identity>();
            ctx.store_value(Arc::new(Identity { name: params.name }))?;
            ctx.call_method("account/whoami.v1", Value::Null, None)
        })
        .unwrap()
        .register("audit/forked.v1", |ctx, _, _| {
            ctx.store_value(Arc::new(Identity {
                name: "caller".to_string(),
            }))?;
            let mut child = ctx.fork();
            let outcome = child.call_method("account/whoami.v1", Value::Null, None);
            let child_error = child.finalize(outcome.err().and_then(|e| e.as_failure().cloned()));
            let parent = ctx.call_method("account/whoami.v1", Value::Null, None)?;
            Ok(json!({
                "child_code": child_error.and_then(|e| e.as_rpc().map(|r| r.code)),
                "parent": parent,
            }))
        })
        .unwrap();
    register_builtins(&mut registry).unwrap();

    let config = RpcServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        call_timeout: Duration::from_secs(5),
    };
    let server = RpcServer::new(config, Arc::new(registry), Arc::new(provider));
    let (addr, handle) = server.start().await.unwrap();

    let client = RpcScopeClient::connect(format!("http://{}", addr))
        .await
        .unwrap();

    Harness {
        client,
        log,
        sessions_opened,
        handle,
    }
}

pub fn entries(log: &Log) -> Vec<String> {
    log.lock().unwrap().clone()
}
