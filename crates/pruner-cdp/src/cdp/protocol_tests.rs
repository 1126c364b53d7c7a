use super::*;

#[test]
fn test_cdp_request_serialize() {
    let req = CdpRequest {
        id: 7,
        method: "Runtime.evaluate".to_string(),
        params: Some(serde_json::json!({"expression": "location.href"})),
        session_id: Some("S1".to_string()),
    };
    let json = serde_json::to_string(&req).unwrap();
    assert!(json.contains("Runtime.evaluate"));
    assert!(json.contains("\"sessionId\":\"S1\""));
}

#[test]
fn test_cdp_request_omits_empty_fields() {
    let req = CdpRequest {
        id: 1,
        method: "Target.getTargets".to_string(),
        params: None,
        session_id: None,
    };
    let json = serde_json::to_string(&req).unwrap();
    assert!(!json.contains("params"));
    assert!(!json.contains("sessionId"));
}

#[test]
fn test_cdp_response_deserialize() {
    let json = r#"{"id": 1, "result": {"sessionId": "abc"}}"#;
    let resp: CdpResponse = serde_json::from_str(json).unwrap();
    assert_eq!(resp.id, Some(1));
    assert!(resp.result.is_some());
    assert!(resp.error.is_none());
}

#[test]
fn test_cdp_error_response_deserialize() {
    let json = r#"{"id": 3, "error": {"code": -32000, "message": "Could not find object with given id"}}"#;
    let resp: CdpResponse = serde_json::from_str(json).unwrap();
    let error = resp.error.unwrap();
    assert_eq!(error.code, -32000);
    assert!(error.message.contains("Could not find object"));
}

#[test]
fn test_cdp_event_deserialize() {
    let json = r#"{"method": "Page.frameNavigated", "params": {}, "sessionId": "S1"}"#;
    let resp: CdpResponse = serde_json::from_str(json).unwrap();
    assert!(resp.id.is_none());
    assert_eq!(resp.method.as_deref(), Some("Page.frameNavigated"));
}

#[test]
fn test_page_info_deserialize() {
    let json = r#"{
        "id": "page123",
        "type": "page",
        "title": "Liked Music - YouTube Music",
        "url": "https://music.youtube.com/playlist?list=LM",
        "webSocketDebuggerUrl": "ws://localhost:9222/devtools/page/page123"
    }"#;
    let info: PageInfo = serde_json::from_str(json).unwrap();
    assert_eq!(info.id, "page123");
    assert!(info.is_tab());
}

#[test]
fn test_service_worker_is_not_a_tab() {
    let json = r#"{"id": "w1", "type": "service_worker", "url": "https://music.youtube.com/sw.js"}"#;
    let info: PageInfo = serde_json::from_str(json).unwrap();
    assert!(!info.is_tab());
    assert_eq!(info.title, "");
}

#[test]
fn test_browser_version_deserialize() {
    let json = r#"{
        "Browser": "Chrome/131.0.6778.86",
        "Protocol-Version": "1.3",
        "User-Agent": "Mozilla/5.0",
        "webSocketDebuggerUrl": "ws://localhost:9222/devtools/browser/abc"
    }"#;
    let version: BrowserVersion = serde_json::from_str(json).unwrap();
    assert_eq!(version.protocol_version, "1.3");
    assert!(version.web_socket_debugger_url.ends_with("/abc"));
}

#[test]
fn test_remote_object_nullish() {
    let null: RemoteObject =
        serde_json::from_str(r#"{"type": "object", "subtype": "null", "value": null}"#).unwrap();
    assert!(null.is_nullish());

    let undefined: RemoteObject = serde_json::from_str(r#"{"type": "undefined"}"#).unwrap();
    assert!(undefined.is_nullish());

    let node: RemoteObject = serde_json::from_str(
        r#"{"type": "object", "subtype": "node", "objectId": "1.2.3", "description": "button"}"#,
    )
    .unwrap();
    assert!(!node.is_nullish());
    assert_eq!(node.object_id.as_deref(), Some("1.2.3"));
}

#[test]
fn test_property_descriptor_index() {
    let prop: PropertyDescriptor = serde_json::from_str(
        r#"{"name": "12", "enumerable": true, "value": {"type": "object", "objectId": "x"}}"#,
    )
    .unwrap();
    assert_eq!(prop.array_index(), Some(12));

    let length: PropertyDescriptor =
        serde_json::from_str(r#"{"name": "length", "value": {"type": "number", "value": 3}}"#).unwrap();
    assert_eq!(length.array_index(), None);
}

#[test]
fn test_key_event_type_serialize() {
    let json = serde_json::to_string(&KeyEventType::KeyDown).unwrap();
    assert_eq!(json, "\"keyDown\"");
}
