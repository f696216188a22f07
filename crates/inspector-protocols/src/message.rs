//! Messages exchanged between the page, the background host and the viewer.
//!
//! The wire form matches the extension's runtime messages:
//!
//! ```json
//! {"action": "openInspector", "elementData": { ... }}
//! {"action": "getElementData"}
//! ```

use serde::{Deserialize, Serialize};

use crate::error::RelayError;
use crate::types::ElementSnapshot;

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;

/// Request sent to the background host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum RelayRequest {
    /// Store a snapshot and open a viewer for it.
    #[serde(rename_all = "camelCase")]
    OpenInspector { element_data: Box<ElementSnapshot> },

    /// Return the most recently stored snapshot.
    GetElementData,
}

impl RelayRequest {
    pub fn open_inspector(snapshot: ElementSnapshot) -> Self {
        Self::OpenInspector {
            element_data: Box::new(snapshot),
        }
    }

    /// Wire name of the action.
    pub fn action(&self) -> &'static str {
        match self {
            Self::OpenInspector { .. } => "openInspector",
            Self::GetElementData => "getElementData",
        }
    }

    /// Parse and validate a raw message.
    pub fn from_json(raw: &str) -> Result<Self, RelayError> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        Self::from_value(value)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, RelayError> {
        let action = value
            .get("action")
            .and_then(|a| a.as_str())
            .ok_or_else(|| RelayError::InvalidMessage("missing action".to_string()))?;

        if !matches!(action, "openInspector" | "getElementData") {
            return Err(RelayError::InvalidMessage(format!(
                "unknown action: {}",
                action
            )));
        }

        serde_json::from_value(value).map_err(|e| RelayError::InvalidMessage(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, RelayError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Reply from the background host.
#[derive(Debug, Clone, PartialEq)]
pub enum RelayResponse {
    /// The snapshot was stored and a viewer requested.
    Delivered,
    /// The stored snapshot, if any.
    ElementData(Option<Box<ElementSnapshot>>),
}

impl RelayResponse {
    /// Wire form of the reply; `Delivered` carries no payload.
    pub fn into_json(self) -> Result<Option<String>, RelayError> {
        match self {
            Self::Delivered => Ok(None),
            Self::ElementData(data) => {
                let response = ElementDataResponse::from(data);
                Ok(Some(serde_json::to_string(&response)?))
            }
        }
    }
}

/// Wire form of the `getElementData` reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementDataResponse {
    pub element_data: Option<ElementSnapshot>,
}

impl From<Option<Box<ElementSnapshot>>> for ElementDataResponse {
    fn from(data: Option<Box<ElementSnapshot>>) -> Self {
        Self {
            element_data: data.map(|snapshot| *snapshot),
        }
    }
}
