use super::*;

fn pending_with(id: u64) -> (Pending, oneshot::Receiver<Result<Value, CdpError>>) {
    let pending: Pending = Arc::new(Mutex::new(HashMap::new()));
    let (tx, rx) = oneshot::channel();
    pending.lock().insert(id, tx);
    (pending, rx)
}

fn response(json: &str) -> CdpResponse {
    serde_json::from_str(json).unwrap()
}

#[test]
fn test_dispatch_result_to_waiter() {
    let (pending, mut rx) = pending_with(4);
    dispatch_response(response(r#"{"id": 4, "result": {"value": 1}}"#), &pending);

    let result = rx.try_recv().unwrap().unwrap();
    assert_eq!(result["value"], 1);
    assert!(pending.lock().is_empty());
}

#[test]
fn test_dispatch_error_to_waiter() {
    let (pending, mut rx) = pending_with(9);
    dispatch_response(
        response(r#"{"id": 9, "error": {"code": -32000, "message": "Could not find object with given id"}}"#),
        &pending,
    );

    let err = rx.try_recv().unwrap().unwrap_err();
    assert!(err.is_stale_object());
}

#[test]
fn test_dispatch_missing_result_is_null() {
    let (pending, mut rx) = pending_with(2);
    dispatch_response(response(r#"{"id": 2}"#), &pending);
    assert_eq!(rx.try_recv().unwrap().unwrap(), Value::Null);
}

#[test]
fn test_dispatch_ignores_events_and_unknown_ids() {
    let (pending, mut rx) = pending_with(1);
    dispatch_response(response(r#"{"method": "Runtime.consoleAPICalled", "params": {}}"#), &pending);
    dispatch_response(response(r#"{"id": 77, "result": {}}"#), &pending);

    assert!(rx.try_recv().is_err());
    assert_eq!(pending.lock().len(), 1);
}

#[test]
fn test_session_id_from_result() {
    let id = session_id_from(&json!({"sessionId": "ABC123"})).unwrap();
    assert_eq!(id, "ABC123");

    let err = session_id_from(&json!({})).unwrap_err();
    assert!(matches!(err, CdpError::InvalidResponse(_)));
}
