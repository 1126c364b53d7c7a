//! JavaScript execution operations for CDP page session.

use serde_json::{Value, json};

use crate::cdp::error::CdpError;
use crate::cdp::protocol::{PropertyDescriptor, RemoteObject};

use super::core::PageSession;

impl PageSession {
    /// Evaluate a JavaScript expression and return its value.
    pub async fn evaluate(&self, expression: &str) -> Result<Value, CdpError> {
        let result = self
            .call(
                "Runtime.evaluate",
                Some(json!({
                    "expression": expression,
                    "returnByValue": true,
                    "awaitPromise": true,
                })),
            )
            .await?;

        value_of(result)
    }

    /// Evaluate JavaScript and return a remote object held in `group`.
    pub async fn evaluate_handle(
        &self,
        expression: &str,
        group: &str,
    ) -> Result<RemoteObject, CdpError> {
        let result = self
            .call(
                "Runtime.evaluate",
                Some(json!({
                    "expression": expression,
                    "returnByValue": false,
                    "objectGroup": group,
                })),
            )
            .await?;

        remote_object_of(result)
    }

    /// Call a function with `this` bound to a remote object and return its value.
    pub async fn call_function_on(
        &self,
        object_id: &str,
        function: &str,
        args: Vec<Value>,
    ) -> Result<Value, CdpError> {
        let params = call_params(object_id, function, args, true);
        let result = self.call("Runtime.callFunctionOn", Some(params)).await?;
        value_of(result)
    }

    /// Call a function with `this` bound to a remote object and return the
    /// result as a remote object held in `group`.
    pub async fn call_function_on_handle(
        &self,
        object_id: &str,
        function: &str,
        args: Vec<Value>,
        group: &str,
    ) -> Result<RemoteObject, CdpError> {
        let params = handle_params(object_id, function, args, group);
        let result = self.call("Runtime.callFunctionOn", Some(params)).await?;
        remote_object_of(result)
    }

    /// Release every remote object in `group`. Property values fetched from a
    /// grouped object belong to the same group.
    pub async fn release_object_group(&self, group: &str) -> Result<(), CdpError> {
        self.call(
            "Runtime.releaseObjectGroup",
            Some(json!({ "objectGroup": group })),
        )
        .await?;
        Ok(())
    }

    /// Own properties of a remote object.
    pub async fn get_properties(&self, object_id: &str) -> Result<Vec<PropertyDescriptor>, CdpError> {
        let result = self
            .call(
                "Runtime.getProperties",
                Some(json!({
                    "objectId": object_id,
                    "ownProperties": true,
                })),
            )
            .await?;

        let props: Vec<PropertyDescriptor> = serde_json::from_value(result["result"].clone())?;
        Ok(props)
    }

    /// Remote objects held in a remote array, in index order.
    pub async fn array_elements(&self, array: &RemoteObject) -> Result<Vec<RemoteObject>, CdpError> {
        let Some(object_id) = array.object_id.as_deref() else {
            return Ok(Vec::new());
        };

        let props = self.get_properties(object_id).await?;
        Ok(collect_indexed(props))
    }
}

pub(super) fn call_params(object_id: &str, function: &str, args: Vec<Value>, by_value: bool) -> Value {
    let mut params = json!({
        "objectId": object_id,
        "functionDeclaration": function,
        "returnByValue": by_value,
        "awaitPromise": true,
    });

    if !args.is_empty() {
        params["arguments"] = json!(args.into_iter().map(|v| json!({"value": v})).collect::<Vec<_>>());
    }

    params
}

pub(super) fn handle_params(object_id: &str, function: &str, args: Vec<Value>, group: &str) -> Value {
    let mut params = call_params(object_id, function, args, false);
    params["objectGroup"] = json!(group);
    params
}

pub(super) fn check_exception(result: &Value) -> Result<(), CdpError> {
    if let Some(exception) = result.get("exceptionDetails") {
        let text = exception["exception"]["description"]
            .as_str()
            .or_else(|| exception["text"].as_str())
            .unwrap_or("Unknown error");
        return Err(CdpError::JavaScript(text.to_string()));
    }
    Ok(())
}

fn value_of(result: Value) -> Result<Value, CdpError> {
    check_exception(&result)?;
    Ok(result["result"]["value"].clone())
}

fn remote_object_of(result: Value) -> Result<RemoteObject, CdpError> {
    check_exception(&result)?;
    let remote_obj: RemoteObject = serde_json::from_value(result["result"].clone())?;
    Ok(remote_obj)
}

/// Indexed entries that carry an object id, ordered by index.
pub(super) fn collect_indexed(props: Vec<PropertyDescriptor>) -> Vec<RemoteObject> {
    let mut indexed: Vec<(usize, RemoteObject)> = props
        .into_iter()
        .filter_map(|p| {
            let index = p.array_index()?;
            let value = p.value?;
            value.object_id.as_ref()?;
            Some((index, value))
        })
        .collect();
    indexed.sort_by_key(|(i, _)| *i);
    indexed.into_iter().map(|(_, v)| v).collect()
}
