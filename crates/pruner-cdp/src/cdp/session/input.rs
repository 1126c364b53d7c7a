//! Keyboard input for CDP page session.

use serde_json::json;
use tracing::debug;

use crate::cdp::error::CdpError;
use crate::cdp::protocol::KeyEventType;

use super::core::PageSession;

impl PageSession {
    /// Press and release a named key (e.g. `Escape`).
    pub async fn press_key(&self, key: &str) -> Result<(), CdpError> {
        for event_type in [KeyEventType::KeyDown, KeyEventType::KeyUp] {
            self.call("Input.dispatchKeyEvent", Some(key_event(event_type, key)))
                .await?;
        }

        debug!("Pressed {}", key);
        Ok(())
    }
}

pub(super) fn key_event(event_type: KeyEventType, key: &str) -> serde_json::Value {
    let mut params = json!({
        "type": event_type,
        "key": key,
        "code": key,
    });

    if let Some(code) = virtual_key_code(key) {
        params["windowsVirtualKeyCode"] = json!(code);
        params["nativeVirtualKeyCode"] = json!(code);
    }

    params
}

/// Windows virtual key codes for the non-printing keys we send.
pub(super) fn virtual_key_code(key: &str) -> Option<u32> {
    match key {
        "Escape" => Some(27),
        "Enter" => Some(13),
        "Tab" => Some(9),
        "End" => Some(35),
        "Home" => Some(36),
        _ => None,
    }
}
