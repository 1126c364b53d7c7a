//! Request/response contract between a command dispatcher and the pruner.

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::batch::{BatchResult, Pruner};
use crate::page::HostPage;
use crate::rules::ActionMatcher;
use crate::scanner::ScanResult;

/// Command sent by a dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Request {
    ScanDuplicates,
    DeleteDuplicates,
}

/// One duplicate as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateView {
    pub title: String,
    pub artists: String,
    /// Empty when the row had no extractable id.
    pub video_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanSummary {
    pub total_tracks: usize,
    pub duplicate_count: usize,
    pub duplicates: Vec<DuplicateView>,
}

impl<R> From<&ScanResult<R>> for ScanSummary {
    fn from(result: &ScanResult<R>) -> Self {
        Self {
            total_tracks: result.total_tracks,
            duplicate_count: result.duplicate_count,
            duplicates: result
                .duplicates
                .iter()
                .map(|t| DuplicateView {
                    title: t.title.clone(),
                    artists: t.artists.clone(),
                    video_id: t.video_id.clone(),
                })
                .collect(),
        }
    }
}

/// Payload of a successful response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Delete(BatchResult),
    Scan(ScanSummary),
}

/// `{ ok: true, result }` or `{ ok: false, error }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ResponseBody>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Response {
    pub fn success(body: ResponseBody) -> Self {
        Self {
            ok: true,
            result: Some(body),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            result: None,
            error: Some(error.into()),
        }
    }
}

impl<P: HostPage, M: ActionMatcher> Pruner<P, M> {
    /// Serve one dispatcher command.
    pub async fn handle(&self, request: Request) -> Response {
        info!(?request, "Handling command");
        match request {
            Request::ScanDuplicates => match self.scan().await {
                Ok(result) => Response::success(ResponseBody::Scan(ScanSummary::from(&result))),
                Err(e) => {
                    error!(error = %e, "Scan failed");
                    Response::failure(non_empty(e.to_string(), "Scan failed."))
                }
            },
            Request::DeleteDuplicates => match self.run().await {
                Ok(result) => Response::success(ResponseBody::Delete(result)),
                Err(e) => {
                    error!(error = %e, "Delete failed");
                    Response::failure(non_empty(e.to_string(), "Delete failed."))
                }
            },
        }
    }
}

fn non_empty(message: String, fallback: &str) -> String {
    if message.is_empty() {
        fallback.to_string()
    } else {
        message
    }
}
