//! Live path-search explorer.
//!
//! Turns the stream of search-progress frames from the pathfinding server
//! into an incrementally growing graph:
//! - [`layout`]: stable, hash-derived node positions
//! - [`model`]: node/edge store with change notification
//! - [`scene`]: category rules applied on top of the model
//! - [`protocol`]: request and event frames
//! - [`transport`]: channel traits and the WebSocket implementation
//! - [`session`]: the search state machine
//! - [`handle`]: reactive access from Leptos components

pub mod handle;
pub mod layout;
pub mod model;
pub mod protocol;
pub mod scene;
pub mod session;
pub mod transport;

pub use handle::ExplorerHandle;
pub use layout::{LayoutAssigner, LayoutConfig, Point};
pub use model::{EdgeCategory, GraphChange, GraphModel, NodeCategory, NodePatch};
pub use protocol::{SearchRequest, ServerEvent};
pub use scene::{Adjacency, Scene};
pub use session::{Explorer, LogEntry, Phase, Severity};
pub use transport::{Channel, Connector, Generation, TransportEvent};
