//! pathscope: live visualization of a remote path search.
//!
//! Pick two people from the catalog and watch the pathfinding server explore
//! the relationship graph. Exploration and path events stream in over a
//! WebSocket and are drawn incrementally on a canvas with stable,
//! hash-derived positions.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen_futures::spawn_local;

pub mod api;
pub mod components;
pub mod config;
pub mod error;
pub mod explorer;

pub use api::Person;
pub use components::network::Theme;
pub use components::{LogViewer, NetworkCanvas, SearchBar};
pub use config::AppConfig;
pub use explorer::ExplorerHandle;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("pathscope: logging initialized");
}

/// Fetch the catalog adjacency in the background. Only used for hover
/// details, so failures are logged and otherwise ignored.
fn load_snapshot(explorer: ExplorerHandle, api_base: String) {
	spawn_local(async move {
		let mobile_mode = api::ClientHints::detect().prefers_reduced_payload();
		match api::fetch_graph(&api_base, mobile_mode).await {
			Ok(Some(adjacency)) => {
				info!("pathscope: loaded catalog graph with {} people", adjacency.len());
				explorer.update(|e| e.scene_mut().set_snapshot(adjacency));
			}
			Ok(None) => info!("pathscope: catalog graph skipped by server"),
			Err(e) => warn!("pathscope: failed to load catalog graph: {}", e),
		}
	});
}

/// Main application component.
/// Reads the runtime config from the DOM and wires the pickers, the network
/// view and the log to one shared explorer.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = AppConfig::load();
	let explorer = ExplorerHandle::new(&config.ws_url, config.layout.clone());
	let start = RwSignal::new(None::<Person>);
	let end = RwSignal::new(None::<Person>);

	// Selected endpoints show up on the canvas before any search runs.
	Effect::new(move |_| {
		let from = start.get().map(|p| p.name);
		let to = end.get().map(|p| p.name);
		explorer.update(|e| e.set_endpoints(from.as_deref(), to.as_deref()));
	});

	load_snapshot(explorer, config.api_base.clone());

	on_cleanup(move || {
		explorer.update(|e| e.cancel());
	});

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Pathscope" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="app">
			<header class="app-header">
				<h1>"Pathscope"</h1>
				<p class="subtitle">"Find how two people are connected. Scroll to zoom, drag to pan, double-click to fit."</p>
			</header>
			<SearchBar
				explorer=explorer
				start=start
				end=end
				api_base=config.api_base
				debounce_ms=config.debounce_ms
				page_size=config.page_size
			/>
			<main class="app-main">
				<div class="graph-panel">
					<NetworkCanvas explorer=explorer theme=Theme::by_name(&config.theme) />
				</div>
				<aside class="log-panel">
					<LogViewer explorer=explorer />
				</aside>
			</main>
		</div>
	}
}
