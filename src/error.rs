//! Error types for search validation, transport, frame decoding and the
//! catalog API.

use thiserror::Error;

/// Reasons a search request is rejected before touching the transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
	#[error("both a start and an end person are required")]
	/// Start or end is blank.
	MissingEndpoint,

	#[error("start and end person must differ")]
	/// Start and end are the same person.
	SameEndpoints,
}

/// Failures of the search channel itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
	#[error("failed to open channel: {0}")]
	/// The channel could not be created.
	Open(String),

	#[error("failed to send frame: {0}")]
	/// A frame could not be written.
	Send(String),

	#[error("channel is not open")]
	/// The channel is closed or still connecting.
	NotOpen,
}

/// A server frame that could not be turned into an event.
#[derive(Debug, Error)]
pub enum DecodeError {
	#[error("malformed frame: {0}")]
	/// Not JSON, or not a `{type, data}` envelope.
	Malformed(#[source] serde_json::Error),

	#[error("unknown message type: {0}")]
	/// Well-formed envelope with a `type` this client does not know.
	UnknownType(String),

	#[error("invalid {kind} payload: {source}")]
	/// Known type with a `data` field of the wrong shape.
	InvalidPayload {
		/// The frame's `type` tag.
		kind: String,
		#[source]
		/// Why the payload did not parse.
		source: serde_json::Error,
	},

	#[error("binary frames are not supported")]
	/// A binary frame arrived where text was expected.
	Binary,
}

/// Catalog and snapshot request failures.
#[derive(Debug, Error)]
pub enum ApiError {
	#[error("request failed: {0}")]
	/// The browser could not perform the request.
	Request(String),

	#[error("unexpected status code: {0}")]
	/// The server answered with a non-2xx status.
	Status(u16),

	#[error("failed to read response body: {0}")]
	/// The response body could not be read.
	Body(String),

	#[error("failed to decode response: {0}")]
	/// The body was not the expected JSON.
	Decode(#[from] serde_json::Error),
}
