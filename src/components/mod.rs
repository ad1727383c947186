//! Leptos components: pickers, search controls, the network canvas and the log.

pub mod log_viewer;
pub mod network;
pub mod search_bar;
pub mod searchable_dropdown;

pub use log_viewer::LogViewer;
pub use network::NetworkCanvas;
pub use search_bar::SearchBar;
pub use searchable_dropdown::SearchableDropdown;
