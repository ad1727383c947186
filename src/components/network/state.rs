//! View state for the network canvas.
//!
//! Positions come from the graph model and never move; this module only
//! tracks how the model is looked at: the pan/zoom transform, auto-fit,
//! and hover highlight with smooth intensity transitions.

use std::collections::{HashMap, HashSet};

use crate::explorer::GraphModel;
use crate::explorer::model::Bounds;

use super::scale::{ScaleConfig, ScaledValues};

/// Screen padding kept around the graph when fitting.
pub const FIT_PADDING: f64 = 48.0;

/// Zoom limits shared by wheel zoom and auto-fit.
pub const MIN_ZOOM: f64 = 0.05;
/// Largest zoom the wheel can reach.
pub const MAX_ZOOM: f64 = 10.0;

/// Largest zoom auto-fit will pick, so a lone endpoint is not blown up.
const MAX_FIT_ZOOM: f64 = 2.0;

/// Pan and zoom transform applied to the entire graph view.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewTransform {
	/// Horizontal translation in screen pixels.
	pub x: f64,
	/// Vertical translation in screen pixels.
	pub y: f64,
	/// Zoom factor (1.0 = 100%).
	pub k: f64,
}

impl ViewTransform {
	/// Transform that centers `bounds` in a `width` x `height` viewport.
	/// With no bounds the world origin is centered at 100%.
	pub fn fit(bounds: Option<Bounds>, width: f64, height: f64, padding: f64) -> Self {
		let Some(bounds) = bounds else {
			return Self {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			};
		};
		let avail_w = (width - 2.0 * padding).max(1.0);
		let avail_h = (height - 2.0 * padding).max(1.0);
		let k = (avail_w / bounds.width().max(1.0))
			.min(avail_h / bounds.height().max(1.0))
			.clamp(MIN_ZOOM, MAX_FIT_ZOOM);
		let center = bounds.center();
		Self {
			x: width / 2.0 - center.x * k,
			y: height / 2.0 - center.y * k,
			k,
		}
	}

	/// Zoom by `factor` keeping the screen point (`sx`, `sy`) fixed.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) {
		let new_k = (self.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = new_k / self.k;
		self.x = sx - (sx - self.x) * ratio;
		self.y = sy - (sy - self.y) * ratio;
		self.k = new_k;
	}
}

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	/// A drag is in progress.
	pub active: bool,
	/// Pointer position when the pan started.
	pub start_x: f64,
	/// Pointer y when the pan started.
	pub start_y: f64,
	/// Transform offset when the pan started.
	pub transform_start_x: f64,
	/// Transform y when the pan started.
	pub transform_start_y: f64,
}

/// Minimum time (seconds) a highlight must be held before it can fade out.
/// This prevents flashing when the mouse briefly touches a hover zone.
const MIN_HOLD_TIME: f64 = 0.12;

/// Per-node highlight intensities that ease towards the hovered node and its
/// neighbors.
///
/// Uses exponential smoothing for natural-feeling transitions that slow down
/// as they approach their target.
#[derive(Clone, Debug, Default)]
pub struct HighlightState {
	hovered: Option<String>,
	target_set: HashSet<String>,
	node_intensity: HashMap<String, f64>,
	hover_ring_intensity: HashMap<String, f64>,
	hold_timer: HashMap<String, f64>,
	cached_max: f64,
}

impl HighlightState {
	/// Id of the node under the pointer.
	pub fn hovered(&self) -> Option<&str> {
		self.hovered.as_deref()
	}

	/// Update the hovered node and recompute the target set from the model.
	/// Returns true if the hovered node changed.
	pub fn set_hover(&mut self, node: Option<&str>, graph: &GraphModel) -> bool {
		if self.hovered.as_deref() == node {
			return false;
		}

		self.hovered = node.map(str::to_string);
		self.target_set.clear();

		if let Some(id) = node {
			self.target_set.insert(id.to_string());
			self.target_set
				.extend(graph.neighbors(id).map(str::to_string));
			for id in &self.target_set {
				self.hold_timer.insert(id.clone(), MIN_HOLD_TIME);
			}
		}
		true
	}

	/// Animate all node intensities towards their targets.
	pub fn tick(&mut self, dt: f64) {
		const FADE_IN_SPEED: f64 = 6.0;
		const FADE_OUT_SPEED: f64 = 4.0;

		let fade_in_factor = 1.0 - (-FADE_IN_SPEED * dt).exp();
		let fade_out_decay = (-FADE_OUT_SPEED * dt).exp();

		for id in &self.target_set {
			let intensity = self.node_intensity.entry(id.clone()).or_insert(0.0);
			*intensity += (1.0 - *intensity) * fade_in_factor;
		}

		if let Some(id) = &self.hovered {
			let intensity = self.hover_ring_intensity.entry(id.clone()).or_insert(0.0);
			*intensity += (1.0 - *intensity) * fade_in_factor;
		}

		let target_set = &self.target_set;
		self.hold_timer.retain(|id, timer| {
			if target_set.contains(id) {
				true
			} else {
				*timer -= dt;
				*timer > 0.0
			}
		});

		let hold_timer = &self.hold_timer;
		let mut new_max: f64 = 0.0;
		self.node_intensity.retain(|id, intensity| {
			if !target_set.contains(id) && !hold_timer.contains_key(id) {
				*intensity *= fade_out_decay;
			}
			new_max = new_max.max(*intensity);
			target_set.contains(id) || *intensity > 0.005
		});

		let hovered = &self.hovered;
		self.hover_ring_intensity.retain(|id, intensity| {
			if hovered.as_ref() == Some(id) {
				return true;
			}
			if !hold_timer.contains_key(id) {
				*intensity *= fade_out_decay;
			}
			*intensity > 0.005
		});

		self.cached_max = new_max;
	}

	/// Current highlight of a node, 0.0 to 1.0.
	pub fn node_intensity(&self, id: &str) -> f64 {
		self.node_intensity.get(id).copied().unwrap_or(0.0)
	}

	/// Opacity of the hover ring around a node.
	pub fn hover_ring_intensity(&self, id: &str) -> f64 {
		self.hover_ring_intensity.get(id).copied().unwrap_or(0.0)
	}

	/// Geometric mean of the endpoint intensities.
	pub fn edge_intensity(&self, a: &str, b: &str) -> f64 {
		(self.node_intensity(a) * self.node_intensity(b)).sqrt()
	}

	/// Largest node intensity after the last tick. Zero means nothing is lit.
	pub fn max_intensity(&self) -> f64 {
		self.cached_max
	}

	/// Drop all highlight state at once.
	pub fn clear(&mut self) {
		*self = Self::default();
	}
}

/// Everything the canvas needs besides the model itself.
#[derive(Clone, Debug)]
pub struct ViewState {
	/// Current pan and zoom.
	pub transform: ViewTransform,
	/// Drag tracking.
	pub pan: PanState,
	/// Hover highlight.
	pub highlight: HighlightState,
	/// Canvas size in CSS pixels.
	pub width: f64,
	/// Canvas height in CSS pixels.
	pub height: f64,
	/// Refit to the model on every change until the user pans or zooms.
	pub auto_fit: bool,
}

impl ViewState {
	/// View of an empty graph with auto-fit on.
	pub fn new(width: f64, height: f64) -> Self {
		Self {
			transform: ViewTransform::fit(None, width, height, FIT_PADDING),
			pan: PanState::default(),
			highlight: HighlightState::default(),
			width,
			height,
			auto_fit: true,
		}
	}

	/// Center and scale the whole graph in the viewport.
	pub fn fit_to(&mut self, graph: &GraphModel) {
		self.transform = ViewTransform::fit(graph.bounds(), self.width, self.height, FIT_PADDING);
	}

	/// Map a canvas point to world coordinates.
	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Topmost node under the screen point. Later nodes are drawn on top,
	/// so the last hit wins.
	pub fn node_at_position<'a>(
		&self,
		graph: &'a GraphModel,
		sx: f64,
		sy: f64,
		config: &ScaleConfig,
	) -> Option<&'a str> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let scale = ScaledValues::new(config, self.transform.k);
		graph
			.nodes()
			.iter()
			.rev()
			.find(|node| {
				let (dx, dy) = (node.position.x - gx, node.position.y - gy);
				(dx * dx + dy * dy).sqrt() < scale.hit_radius(node.size)
			})
			.map(|node| node.id.as_str())
	}

	/// Start dragging from a screen point.
	pub fn begin_pan(&mut self, x: f64, y: f64) {
		self.pan = PanState {
			active: true,
			start_x: x,
			start_y: y,
			transform_start_x: self.transform.x,
			transform_start_y: self.transform.y,
		};
	}

	/// Move an active pan. Any manual movement stops auto-fit.
	pub fn pan_to(&mut self, x: f64, y: f64) {
		if !self.pan.active {
			return;
		}
		self.auto_fit = false;
		self.transform.x = self.pan.transform_start_x + (x - self.pan.start_x);
		self.transform.y = self.pan.transform_start_y + (y - self.pan.start_y);
	}

	/// Stop dragging.
	pub fn end_pan(&mut self) {
		self.pan.active = false;
	}

	/// Zoom around a screen point. Turns auto-fit off.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) {
		self.auto_fit = false;
		self.transform.zoom_at(sx, sy, factor);
	}

	/// Update the viewport size.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	/// Advance highlight transitions by `dt` seconds.
	pub fn tick(&mut self, dt: f64) {
		self.highlight.tick(dt);
	}
}

/// Number of distinct nodes the current search has touched: everything
/// explored, everything on the path, and both endpoints.
pub fn observed_count(explored: &[String], path: &[String], start: Option<&str>, end: Option<&str>) -> usize {
	explored
		.iter()
		.chain(path)
		.map(String::as_str)
		.chain(start)
		.chain(end)
		.collect::<HashSet<_>>()
		.len()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::explorer::{EdgeCategory, NodeCategory, NodePatch, Point};

	fn graph() -> GraphModel {
		let mut graph = GraphModel::new();
		for (id, x, category) in [
			("a", -100.0, NodeCategory::Start),
			("b", 0.0, NodeCategory::Explored),
			("c", 100.0, NodeCategory::End),
		] {
			graph.upsert_node(
				id,
				NodePatch::new()
					.position(Point { x, y: 0.0 })
					.category(category)
					.size(category.size()),
			);
		}
		graph.upsert_edge("a", "b", EdgeCategory::Default);
		graph
	}

	#[test]
	fn fit_centers_bounds() {
		let graph = graph();
		let t = ViewTransform::fit(graph.bounds(), 400.0, 300.0, 0.0);
		assert!((t.k - 2.0).abs() < 1e-9);
		assert_eq!((t.x, t.y), (200.0, 150.0));

		let empty = ViewTransform::fit(None, 400.0, 300.0, FIT_PADDING);
		assert_eq!(empty, ViewTransform { x: 200.0, y: 150.0, k: 1.0 });
	}

	#[test]
	fn zoom_keeps_anchor_fixed() {
		let mut view = ViewState::new(400.0, 300.0);
		let before = view.screen_to_graph(50.0, 70.0);
		view.zoom_at(50.0, 70.0, 1.1);
		let after = view.screen_to_graph(50.0, 70.0);
		assert!((before.0 - after.0).abs() < 1e-9);
		assert!((before.1 - after.1).abs() < 1e-9);
		assert!(!view.auto_fit);
	}

	#[test]
	fn pan_disables_auto_fit() {
		let mut view = ViewState::new(400.0, 300.0);
		view.pan_to(10.0, 10.0);
		assert!(view.auto_fit, "inactive pan is ignored");
		view.begin_pan(0.0, 0.0);
		view.pan_to(10.0, -5.0);
		view.end_pan();
		assert!(!view.auto_fit);
		assert_eq!((view.transform.x, view.transform.y), (210.0, 145.0));
	}

	#[test]
	fn hit_test_uses_model_positions() {
		let graph = graph();
		let mut view = ViewState::new(400.0, 300.0);
		view.fit_to(&graph);
		let (cx, cy) = (view.width / 2.0, view.height / 2.0);
		assert_eq!(view.node_at_position(&graph, cx, cy, &ScaleConfig::default()), Some("b"));
		assert_eq!(view.node_at_position(&graph, cx, cy + 40.0, &ScaleConfig::default()), None);
	}

	#[test]
	fn highlight_covers_neighbors_and_fades() {
		let graph = graph();
		let mut highlight = HighlightState::default();
		assert!(highlight.set_hover(Some("a"), &graph));
		assert!(!highlight.set_hover(Some("a"), &graph));
		for _ in 0..60 {
			highlight.tick(1.0 / 60.0);
		}
		assert!(highlight.node_intensity("a") > 0.99);
		assert!(highlight.node_intensity("b") > 0.99);
		assert_eq!(highlight.node_intensity("c"), 0.0);
		assert!(highlight.edge_intensity("a", "b") > 0.99);

		highlight.set_hover(None, &graph);
		for _ in 0..240 {
			highlight.tick(1.0 / 60.0);
		}
		assert_eq!(highlight.max_intensity(), 0.0);
		assert_eq!(highlight.hover_ring_intensity("a"), 0.0);
	}

	#[test]
	fn observed_count_deduplicates() {
		let explored = vec!["Carol".to_string(), "Dan".to_string()];
		let path = vec!["Alice".to_string(), "Carol".to_string(), "Dan".to_string(), "Bob".to_string()];
		assert_eq!(observed_count(&explored, &path, Some("Alice"), Some("Bob")), 4);
		assert_eq!(observed_count(&[], &[], Some("Alice"), None), 1);
		assert_eq!(observed_count(&[], &[], None, None), 0);
	}
}
