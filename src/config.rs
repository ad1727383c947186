//! Runtime configuration.
//!
//! Read once at startup from a `<script id="app-config" type="application/json">`
//! element so a deployment can point the client at its own server without a
//! rebuild. Every field is optional.

use log::{info, warn};
use serde::Deserialize;
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

use crate::explorer::LayoutConfig;

/// DOM id of the configuration element.
pub const CONFIG_ELEMENT_ID: &str = "app-config";

/// Client settings. Missing fields take their defaults.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct AppConfig {
	/// Base URL of the HTTP API (`/api/people`, `/api/graph`).
	pub api_base: String,
	/// Search channel endpoint.
	pub ws_url: String,
	/// Quiet period before a typed catalog query is sent.
	pub debounce_ms: u64,
	/// Items revealed per near-bottom scroll in the picker.
	pub page_size: usize,
	/// Canvas theme name, see [`crate::components::network::Theme::by_name`].
	pub theme: String,
	/// Node placement tunables.
	pub layout: LayoutConfig,
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			api_base: "http://localhost:8080".to_string(),
			ws_url: "ws://localhost:8080/ws".to_string(),
			debounce_ms: 300,
			page_size: 50,
			theme: "default".to_string(),
			layout: LayoutConfig::default(),
		}
	}
}

impl AppConfig {
	/// Parse the JSON body of the config element.
	pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(text)
	}

	/// Load from the DOM, falling back to defaults.
	pub fn load() -> Self {
		let Some(text) = config_text() else {
			return Self::default();
		};
		match Self::from_json(&text) {
			Ok(config) => {
				info!("pathscope: config loaded, api at {}", config.api_base);
				config
			}
			Err(e) => {
				warn!("pathscope: invalid config, using defaults: {}", e);
				Self::default()
			}
		}
	}
}

fn config_text() -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(CONFIG_ELEMENT_ID)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn missing_fields_use_defaults() {
		let config = AppConfig::from_json(r#"{"ws_url":"wss://example.org/ws","layout":{"level_radius":40}}"#).unwrap();
		assert_eq!(config.ws_url, "wss://example.org/ws");
		assert_eq!(config.api_base, "http://localhost:8080");
		assert_eq!(config.debounce_ms, 300);
		assert_eq!(config.page_size, 50);
		assert_eq!(config.layout.level_radius, 40.0);
		assert_eq!(config.layout.path_step_radius, 220.0);
	}

	#[test]
	fn rejects_wrong_types() {
		assert!(AppConfig::from_json(r#"{"debounce_ms":"soon"}"#).is_err());
	}
}
