//! Cancellation and deadline integration tests.
//!
//! The slow service holds every request far longer than the cancellation
//! window, so a prompt return proves the client stopped waiting.

use std::time::{Duration, Instant};

use auth_client::{CancelReason, ClientError, Context};
use axum::http::Method;
use axum::Router;

use crate::common::{good_credentials, TestEnv, GOOD_SESSION};

/// How long the slow service stalls.
const STALL: Duration = Duration::from_secs(10);
/// How long a cancelled call may take to return.
const WINDOW: Duration = Duration::from_secs(2);

fn assert_cancelled(err: &ClientError, reason: CancelReason) {
    assert!(
        matches!(err, ClientError::Cancelled(r) if *r == reason),
        "expected {reason}, got: {err:?}"
    );
}

/// Cancels `handle` shortly after the request has been sent.
fn cancel_soon(handle: auth_client::CancelHandle) {
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        handle.cancel();
    });
}

/// A context cancelled up front fails every operation without a request.
#[tokio::test]
async fn test_cancelled_before_start() -> anyhow::Result<()> {
    let env = TestEnv::slow(STALL).await?;
    let (ctx, handle) = Context::with_cancel();
    handle.cancel();

    let err = env.client.read_session(&ctx, GOOD_SESSION).await.unwrap_err();
    assert_cancelled(&err, CancelReason::Cancelled);

    let err = env
        .client
        .create_session_token(&ctx, &good_credentials())
        .await
        .unwrap_err();
    assert_cancelled(&err, CancelReason::Cancelled);

    let err = env
        .client
        .create_session(&ctx, &good_credentials())
        .await
        .unwrap_err();
    assert_cancelled(&err, CancelReason::Cancelled);

    Ok(())
}

/// Cancelling mid-request returns promptly for read_session.
#[tokio::test]
async fn test_read_session_cancelled_in_flight() -> anyhow::Result<()> {
    let env = TestEnv::slow(STALL).await?;
    let (ctx, handle) = Context::with_cancel();
    cancel_soon(handle);

    let started = Instant::now();
    let err = env.client.read_session(&ctx, GOOD_SESSION).await.unwrap_err();

    assert_cancelled(&err, CancelReason::Cancelled);
    assert!(started.elapsed() < WINDOW, "took {:?}", started.elapsed());
    Ok(())
}

/// Cancelling mid-request returns promptly for create_session_token.
#[tokio::test]
async fn test_create_session_token_cancelled_in_flight() -> anyhow::Result<()> {
    let env = TestEnv::slow(STALL).await?;
    let (ctx, handle) = Context::with_cancel();
    cancel_soon(handle);

    let started = Instant::now();
    let result = env.client.create_session_token(&ctx, &good_credentials()).await;

    let err = result.expect_err("no token should be returned");
    assert_cancelled(&err, CancelReason::Cancelled);
    assert!(started.elapsed() < WINDOW, "took {:?}", started.elapsed());
    Ok(())
}

/// Cancelling mid-request returns promptly for create_session.
#[tokio::test]
async fn test_create_session_cancelled_in_flight() -> anyhow::Result<()> {
    let env = TestEnv::slow(STALL).await?;
    let (ctx, handle) = Context::with_cancel();
    cancel_soon(handle);

    let started = Instant::now();
    let result = env.client.create_session(&ctx, &good_credentials()).await;

    let err = result.expect_err("no session should be returned");
    assert_cancelled(&err, CancelReason::Cancelled);
    assert!(started.elapsed() < WINDOW, "took {:?}", started.elapsed());
    Ok(())
}

/// A deadline that passes mid-request is reported as such.
#[tokio::test]
async fn test_deadline_exceeded() -> anyhow::Result<()> {
    let env = TestEnv::slow(STALL).await?;
    let ctx = Context::with_timeout(Duration::from_millis(100));

    let started = Instant::now();
    let err = env.client.read_session(&ctx, GOOD_SESSION).await.unwrap_err();

    assert_cancelled(&err, CancelReason::DeadlineExceeded);
    assert!(!err.is_rejected());
    assert!(started.elapsed() < WINDOW, "took {:?}", started.elapsed());
    Ok(())
}

/// A fast service finishes well inside a generous deadline.
#[tokio::test]
async fn test_deadline_not_reached() -> anyhow::Result<()> {
    let env = TestEnv::slow(Duration::from_millis(10)).await?;
    let ctx = Context::with_timeout(Duration::from_secs(5));

    let token = env
        .client
        .create_session_token(&ctx, &good_credentials())
        .await?;
    assert_eq!(token, GOOD_SESSION);
    Ok(())
}

/// Cancellation between the two steps of create_session surfaces from the
/// read step; the token already issued is left alone.
#[tokio::test]
async fn test_create_session_cancelled_during_read() -> anyhow::Result<()> {
    let router = Router::new().fallback(|method: Method| async move {
        if method == Method::GET {
            tokio::time::sleep(STALL).await;
        }
        GOOD_SESSION
    });
    let env = TestEnv::with_router(router).await?;
    let (ctx, handle) = Context::with_cancel();
    cancel_soon(handle);

    let started = Instant::now();
    let err = env
        .client
        .create_session(&ctx, &good_credentials())
        .await
        .unwrap_err();

    assert_cancelled(&err, CancelReason::Cancelled);
    assert!(started.elapsed() < WINDOW, "took {:?}", started.elapsed());
    Ok(())
}
