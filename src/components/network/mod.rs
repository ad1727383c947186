//! Live network view of the search.
//!
//! Renders the explorer's graph model on an HTML canvas with:
//! - Deterministic positions taken from the model, never simulated
//! - Auto-fit while the graph grows, pan and zoom once the user takes over
//! - Smooth highlight transitions on hover, with catalog degree when known
//! - Category legend and an explored-node counter
//!
//! # Example
//!
//! ```ignore
//! let explorer = ExplorerHandle::new("ws://localhost:8080/ws", LayoutConfig::default());
//! view! { <NetworkCanvas explorer=explorer theme=Theme::midnight() /> }
//! ```

mod component;
mod render;
pub mod scale;
mod state;
pub mod theme;

pub use component::NetworkCanvas;
pub use state::{ViewState, ViewTransform, observed_count};
pub use theme::Theme;
