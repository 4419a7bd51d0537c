use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use super::*;

#[tokio::test]
async fn completed_operation_returns_its_result() {
    let mut scope = ViewScope::new("datasets");
    let task = scope.spawn(async { Ok::<_, ClientError>(7) });

    assert_eq!(task.join().await.expect("result"), 7);
}

#[tokio::test]
async fn dropping_scope_aborts_in_flight_operation() {
    let applied = Arc::new(AtomicBool::new(false));
    let mut scope = ViewScope::new("monitoring");
    let flag = applied.clone();
    let task = scope.spawn(async move {
        tokio::time::sleep(Duration::from_secs(5)).await;
        flag.store(true, Ordering::SeqCst);
        Ok::<_, ClientError>(())
    });
    assert_eq!(scope.in_flight(), 1);

    drop(scope);

    let err = task.join().await.expect_err("aborted");
    assert!(matches!(err, ClientError::Cancelled));
    assert!(!applied.load(Ordering::SeqCst));
}

#[tokio::test]
async fn errors_pass_through_unchanged() {
    let mut scope = ViewScope::new("reports");
    let task = scope.spawn(async { Err::<(), _>(ClientError::Validation("nope".into())) });

    let err = task.join().await.expect_err("error");
    assert_eq!(err.display_message(), "nope");
}
