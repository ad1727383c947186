//! HTTP client for the catalog and graph snapshot endpoints.
//!
//! Requests go through the browser `fetch`. The pure helpers here (URL
//! building, stale-response sequencing, pagination, reduced-payload
//! detection) carry the logic and are tested natively.

use js_sys::Reflect;
use log::debug;
use serde::{Deserialize, Serialize};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use crate::error::ApiError;
use crate::explorer::Adjacency;

/// A selectable catalog entry.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Person {
	/// Display name, also the node id on the search graph.
	pub name: String,
}

/// Distance from the bottom of a scroll container that counts as "near".
pub const NEAR_BOTTOM_PX: f64 = 32.0;

/// Catalog search URL. An empty query lists everyone.
pub fn people_url(base: &str, query: &str) -> String {
	let base = base.trim_end_matches('/');
	let query = query.trim();
	if query.is_empty() {
		format!("{}/api/people", base)
	} else {
		format!("{}/api/people?q={}", base, urlencoding::encode(query))
	}
}

/// Snapshot URL, asking for a reduced payload when `mobile_mode` is set.
pub fn graph_url(base: &str, mobile_mode: bool) -> String {
	let base = base.trim_end_matches('/');
	if mobile_mode {
		format!("{}/api/graph?mobileMode=1", base)
	} else {
		format!("{}/api/graph", base)
	}
}

/// Hands out increasing tickets; only the newest one is current. Responses
/// carrying an older ticket belong to a superseded query and are dropped.
#[derive(Clone, Copy, Debug, Default)]
pub struct RequestSequencer {
	latest: u64,
}

impl RequestSequencer {
	/// Ticket for a new request; every older ticket stops being current.
	pub fn issue(&mut self) -> u64 {
		self.latest += 1;
		self.latest
	}

	/// Whether `ticket` belongs to the newest request.
	pub fn is_current(&self, ticket: u64) -> bool {
		ticket == self.latest
	}
}

/// Client-side "load more" window over a result list.
#[derive(Clone, Copy, Debug)]
pub struct Paginator {
	visible: usize,
	step: usize,
}

impl Paginator {
	/// Window showing `step` items, growing by `step` at a time.
	pub fn new(step: usize) -> Self {
		let step = step.max(1);
		Self {
			visible: step,
			step,
		}
	}

	/// Number of items currently revealed.
	pub fn visible(&self) -> usize {
		self.visible
	}

	/// Back to the first page, e.g. after a new query.
	pub fn reset(&mut self) {
		self.visible = self.step;
	}

	/// Reveal one more page. Returns false once everything is visible.
	pub fn reveal_more(&mut self, total: usize) -> bool {
		if self.visible >= total {
			return false;
		}
		self.visible = (self.visible + self.step).min(total);
		true
	}

	/// The visible prefix of `items`.
	pub fn window<'a, T>(&self, items: &'a [T]) -> &'a [T] {
		&items[..self.visible.min(items.len())]
	}
}

/// Whether a scroll container is within [`NEAR_BOTTOM_PX`] of its end.
pub fn near_bottom(scroll_top: f64, client_height: f64, scroll_height: f64) -> bool {
	scroll_top + client_height >= scroll_height - NEAR_BOTTOM_PX
}

/// Device and network hints that decide whether the full snapshot is worth
/// downloading.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClientHints {
	/// `navigator.connection.saveData`.
	pub save_data: bool,
	/// `navigator.connection.effectiveType`, e.g. `4g`.
	pub effective_type: Option<String>,
	/// Approximate RAM in GB (`navigator.deviceMemory`).
	pub device_memory: Option<f64>,
	/// `navigator.hardwareConcurrency`.
	pub logical_cpus: Option<f64>,
}

impl ClientHints {
	/// Read the hints from `navigator`. Missing APIs leave fields unset.
	pub fn detect() -> Self {
		let Some(navigator) = web_sys::window().map(|w| w.navigator()) else {
			return Self::default();
		};
		let cpus = navigator.hardware_concurrency();
		let navigator = JsValue::from(navigator);
		let connection = Reflect::get(&navigator, &JsValue::from_str("connection"))
			.ok()
			.filter(|c| c.is_object());
		let field = |target: &JsValue, name: &str| Reflect::get(target, &JsValue::from_str(name)).ok();

		let save_data = connection
			.as_ref()
			.and_then(|c| field(c, "saveData"))
			.and_then(|v| v.as_bool())
			.unwrap_or(false);
		let effective_type = connection
			.as_ref()
			.and_then(|c| field(c, "effectiveType"))
			.and_then(|v| v.as_string());
		let device_memory = field(&navigator, "deviceMemory").and_then(|v| v.as_f64());

		Self {
			save_data,
			effective_type,
			device_memory,
			logical_cpus: (cpus > 0.0).then_some(cpus),
		}
	}

	/// True on constrained devices or networks.
	pub fn prefers_reduced_payload(&self) -> bool {
		self.save_data
			|| matches!(self.effective_type.as_deref(), Some("slow-2g" | "2g"))
			|| self.device_memory.is_some_and(|gb| gb <= 2.0)
			|| self.logical_cpus.is_some_and(|n| n <= 2.0)
	}
}

fn js_error(value: JsValue) -> String {
	value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

/// GET `url` and return the body, or `None` for `204 No Content`.
async fn fetch_text(url: &str) -> Result<Option<String>, ApiError> {
	let window = web_sys::window().ok_or_else(|| ApiError::Request("no window".into()))?;
	let response: Response = JsFuture::from(window.fetch_with_str(url))
		.await
		.map_err(|e| ApiError::Request(js_error(e)))?
		.dyn_into()
		.map_err(|e| ApiError::Request(js_error(e)))?;

	if response.status() == 204 {
		return Ok(None);
	}
	if !response.ok() {
		return Err(ApiError::Status(response.status()));
	}
	let body = response.text().map_err(|e| ApiError::Body(js_error(e)))?;
	let text = JsFuture::from(body)
		.await
		.map_err(|e| ApiError::Body(js_error(e)))?
		.as_string()
		.ok_or_else(|| ApiError::Body("response body is not text".into()))?;
	Ok(Some(text))
}

/// Catalog search. An empty query returns the server's default listing.
pub async fn search_people(base: &str, query: &str) -> Result<Vec<Person>, ApiError> {
	let url = people_url(base, query);
	debug!("pathscope: GET {}", url);
	match fetch_text(&url).await? {
		Some(text) => Ok(serde_json::from_str(&text)?),
		None => Ok(Vec::new()),
	}
}

/// Full adjacency snapshot. `None` when the server skips it.
pub async fn fetch_graph(base: &str, mobile_mode: bool) -> Result<Option<Adjacency>, ApiError> {
	let url = graph_url(base, mobile_mode);
	debug!("pathscope: GET {}", url);
	match fetch_text(&url).await? {
		Some(text) => Ok(Some(serde_json::from_str(&text)?)),
		None => Ok(None),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn people_url_encodes_query() {
		assert_eq!(people_url("http://h:8080/", ""), "http://h:8080/api/people");
		assert_eq!(
			people_url("http://h:8080", " Ada Lovelace "),
			"http://h:8080/api/people?q=Ada%20Lovelace"
		);
		assert_eq!(graph_url("http://h", true), "http://h/api/graph?mobileMode=1");
		assert_eq!(graph_url("http://h", false), "http://h/api/graph");
	}

	#[test]
	fn only_latest_ticket_is_current() {
		let mut sequencer = RequestSequencer::default();
		let first = sequencer.issue();
		let second = sequencer.issue();
		assert!(!sequencer.is_current(first));
		assert!(sequencer.is_current(second));
	}

	#[test]
	fn paginator_reveals_in_steps() {
		let mut pages = Paginator::new(50);
		let items: Vec<u32> = (0..120).collect();
		assert_eq!(pages.window(&items).len(), 50);
		assert!(pages.reveal_more(items.len()));
		assert_eq!(pages.window(&items).len(), 100);
		assert!(pages.reveal_more(items.len()));
		assert_eq!(pages.visible(), 120);
		assert!(!pages.reveal_more(items.len()));
		pages.reset();
		assert_eq!(pages.window(&items[..10]).len(), 10);
	}

	#[test]
	fn near_bottom_threshold() {
		assert!(near_bottom(668.0, 300.0, 1000.0));
		assert!(!near_bottom(600.0, 300.0, 1000.0));
	}

	#[test]
	fn reduced_payload_heuristic() {
		assert!(!ClientHints::default().prefers_reduced_payload());
		let hints = |f: fn(&mut ClientHints)| {
			let mut h = ClientHints {
				effective_type: Some("4g".into()),
				device_memory: Some(8.0),
				logical_cpus: Some(8.0),
				..ClientHints::default()
			};
			f(&mut h);
			h.prefers_reduced_payload()
		};
		assert!(!hints(|_| {}));
		assert!(hints(|h| h.save_data = true));
		assert!(hints(|h| h.effective_type = Some("2g".into())));
		assert!(hints(|h| h.device_memory = Some(1.0)));
		assert!(hints(|h| h.logical_cpus = Some(2.0)));
	}

	#[test]
	fn snapshot_payload_shape() {
		let adjacency: Adjacency = serde_json::from_str(r#"{"Alice":["Bob"],"Bob":["Alice","Carol"]}"#).unwrap();
		assert_eq!(adjacency["Bob"].len(), 2);
		let people: Vec<Person> = serde_json::from_str(r#"[{"name":"Ada"}]"#).unwrap();
		assert_eq!(people, [Person { name: "Ada".into() }]);
	}
}
