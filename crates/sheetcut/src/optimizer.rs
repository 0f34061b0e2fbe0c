//! The boundary to the remote cut optimizer.
//!
//! The optimizer receives the sheet size and the element sizes and answers
//! with one placement per element it managed to fit. Each call completes
//! exactly once, with either a [`CutResponse`] or an [`OptimizerError`].
//!
//! - [`Optimizer`] - The trait every optimizer backend implements
//! - [`http::HttpOptimizer`] - JSON over HTTP backend

pub mod http;

use std::{fmt, future::Future};

use serde::{Deserialize, Deserializer, Serialize};

use sheetcut_core::{element::ElementId, placement::Placement};

/// Message shown when the optimizer failed without explaining why.
pub const GENERIC_FAILURE_MESSAGE: &str = "Optimization failed";

/// The request sent to the optimizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CutRequest {
    pub sheet_width: f32,
    pub sheet_height: f32,
    pub elements: Vec<RequestElement>,
}

/// An element as seen by the optimizer: only its id and size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestElement {
    pub id: ElementId,
    pub width: f32,
    pub height: f32,
}

/// The optimizer's answer.
///
/// A missing or `null` placement list reads as empty.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CutResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub placements: Vec<Placement>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Placement>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<Placement>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// A failed optimizer call.
///
/// Both fields are optional because transport failures carry neither a
/// status nor a message.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OptimizerError {
    status: Option<u16>,
    message: Option<String>,
}

impl OptimizerError {
    pub fn new(status: Option<u16>, message: Option<String>) -> Self {
        Self { status, message }
    }

    /// Creates an error carrying only a message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: Some(message.into()),
        }
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Returns the message reported by the optimizer, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns the text to show to the user.
    ///
    /// Falls back to [`GENERIC_FAILURE_MESSAGE`] when the optimizer gave no
    /// usable message.
    pub fn user_message(&self) -> &str {
        self.message
            .as_deref()
            .filter(|message| !message.is_empty())
            .unwrap_or(GENERIC_FAILURE_MESSAGE)
    }
}

impl fmt::Display for OptimizerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "{} (status {status})", self.user_message()),
            None => f.write_str(self.user_message()),
        }
    }
}

impl std::error::Error for OptimizerError {}

/// A backend computing placements for a cut request.
pub trait Optimizer {
    /// Sends `request` and resolves once with the response or the failure.
    fn optimize(
        &self,
        request: &CutRequest,
    ) -> impl Future<Output = Result<CutResponse, OptimizerError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_format() {
        let request = CutRequest {
            sheet_width: 2000.0,
            sheet_height: 1000.0,
            elements: vec![RequestElement {
                id: ElementId::new(1),
                width: 500.0,
                height: 300.0,
            }],
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "sheetWidth": 2000.0,
                "sheetHeight": 1000.0,
                "elements": [{ "id": 1, "width": 500.0, "height": 300.0 }],
            })
        );
    }

    #[test]
    fn test_response_without_placements_is_empty() {
        let response: CutResponse = serde_json::from_str("{}").unwrap();
        assert!(response.placements.is_empty());

        let response: CutResponse = serde_json::from_str(r#"{"placements":null}"#).unwrap();
        assert!(response.placements.is_empty());

        let response: CutResponse = serde_json::from_str(
            r#"{"placements":[{"id":2,"x":500,"y":0,"width":400,"height":200}]}"#,
        )
        .unwrap();
        assert_eq!(response.placements.len(), 1);
        assert_eq!(response.placements[0].id(), Some(ElementId::new(2)));
    }

    #[test]
    fn test_user_message_fallback() {
        assert_eq!(OptimizerError::default().user_message(), GENERIC_FAILURE_MESSAGE);
        assert_eq!(
            OptimizerError::new(Some(400), Some(String::new())).user_message(),
            GENERIC_FAILURE_MESSAGE
        );
        assert_eq!(
            OptimizerError::with_message("Invalid dimensions").user_message(),
            "Invalid dimensions"
        );
    }

    #[test]
    fn test_display_includes_status() {
        let err = OptimizerError::new(Some(400), Some("Invalid dimensions".to_string()));
        assert_eq!(err.to_string(), "Invalid dimensions (status 400)");
    }
}
