//! Search channel wire format.
//!
//! The client sends one request frame right after the channel opens:
//!
//! ```json
//! {"startNode": "Einstein", "endNode": "Newton"}
//! ```
//!
//! The server then streams tagged frames:
//!
//! ```json
//! {"type": "node_explored", "data": {"level": 1, "node": "Tesla"}}
//! {"type": "path_found", "data": {"path": ["Einstein", "Tesla", "Newton"], "length": 2}}
//! {"type": "error", "data": "no path found"}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DecodeError;

/// Outgoing request frame.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
	/// Id of the start person.
	pub start_node: String,
	/// Id of the end person.
	pub end_node: String,
}

impl SearchRequest {
	/// Request a path from `start` to `end`.
	pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
		Self {
			start_node: start.into(),
			end_node: end.into(),
		}
	}

	/// JSON text sent once the channel opens.
	pub fn to_frame(&self) -> Result<String, serde_json::Error> {
		serde_json::to_string(self)
	}
}

/// Payload of `node_explored`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct NodeExplored {
	/// BFS depth reported by the server, if any.
	#[serde(default)]
	pub level: Option<u32>,
	/// Id of the explored node.
	pub node: String,
}

/// Payload of `path_found`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct PathFound {
	/// Node ids from start to end.
	pub path: Vec<String>,
	/// Step count reported by the server, if any.
	#[serde(default)]
	pub length: Option<usize>,
}

impl PathFound {
	/// Step count as reported by the server, or derived from the path.
	pub fn steps(&self) -> usize {
		self.length
			.unwrap_or_else(|| self.path.len().saturating_sub(1))
	}
}

/// A decoded server frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ServerEvent {
	/// The search visited a node.
	NodeExplored(NodeExplored),
	/// The search finished with a path.
	PathFound(PathFound),
	/// Server-side failure; the text is shown as-is.
	Error(String),
}

#[derive(Deserialize)]
struct RawFrame {
	#[serde(rename = "type")]
	kind: String,
	#[serde(default)]
	data: Value,
}

impl ServerEvent {
	/// Decode one text frame. Unknown tags are reported separately from
	/// malformed JSON so callers can word them differently.
	pub fn decode(text: &str) -> Result<Self, DecodeError> {
		let raw: RawFrame = serde_json::from_str(text).map_err(DecodeError::Malformed)?;
		let invalid = |source: serde_json::Error| DecodeError::InvalidPayload {
			kind: raw.kind.clone(),
			source,
		};
		match raw.kind.as_str() {
			"node_explored" => serde_json::from_value(raw.data.clone())
				.map(ServerEvent::NodeExplored)
				.map_err(invalid),
			"path_found" => serde_json::from_value(raw.data.clone())
				.map(ServerEvent::PathFound)
				.map_err(invalid),
			"error" => match &raw.data {
				Value::String(message) => Ok(ServerEvent::Error(message.clone())),
				other => Ok(ServerEvent::Error(other.to_string())),
			},
			_ => Err(DecodeError::UnknownType(raw.kind.clone())),
		}
	}
}
