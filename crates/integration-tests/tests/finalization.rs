//! Finalization and error remodeling as seen by a client

mod common;

use rpcscope_core::domain::code;
use rpcscope_core::RpcError;
use serde_json::Value;
use std::sync::atomic::Ordering;

#[tokio::test]
async fn test_clean_call_commits_in_reverse_order() {
    let harness = common::start().await;

    let out: Value = harness
        .client
        .call("db/commit.v1", Value::Null)
        .await
        .unwrap();

    assert_eq!(out["session"], 0);
    assert_eq!(
        common::entries(&harness.log),
        vec!["session:0:close".to_string(), "tx:commit".to_string()]
    );
    assert_eq!(harness.sessions_opened.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_handler_error_rolls_back_and_passes_through() {
    let harness = common::start().await;

    let err = harness
        .client
        .call::<_, Value>("db/denied.v1", Value::Null)
        .await
        .unwrap_err();

    assert_eq!(err.as_rpc(), Some(&RpcError::unauthorized()));
    assert_eq!(common::entries(&harness.log), vec!["tx:rollback".to_string()]);
}

#[tokio::test]
async fn test_cleanup_failure_after_success_is_internal_error() {
    let harness = common::start().await;

    let err = harness
        .client
        .call::<_, Value>("db/broken_commit.v1", Value::Null)
        .await
        .unwrap_err();

    let rpc = err.as_rpc().unwrap();
    assert_eq!(rpc.code, code::INTERNAL_ERROR);
    assert_eq!(rpc.details().len(), 1);
    assert_eq!(rpc.details()[0].debug(), Some("commit failed"));
}

#[tokio::test]
async fn test_handler_and_cleanup_failures_are_itemized() {
    let harness = common::start().await;

    let err = harness
        .client
        .call::<_, Value>("db/denied_broken.v1", Value::Null)
        .await
        .unwrap_err();

    let rpc = err.as_rpc().unwrap();
    assert_eq!(rpc.code, code::INTERNAL_ERROR);
    assert_eq!(rpc.details().len(), 2);
    assert_eq!(rpc.details()[0], RpcError::unauthorized());
    assert_eq!(rpc.details()[1].debug(), Some("rollback failed"));

    let summary = rpc.debug().unwrap();
    assert!(summary.contains("Unauthorized"));
    assert!(summary.contains("rollback failed"));
}
