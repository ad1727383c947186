//! Deterministic node placement.
//!
//! Every node gets a position the first time it is seen and keeps it for the
//! rest of the session, so redraws never make the picture jump. Exploration
//! nodes land on a ring whose radius grows with their discovery level, at an
//! angle derived from a hash of their name. Path nodes are laid out on an
//! outward spiral instead, away from the exploration clutter.

use std::collections::HashMap;
use std::f64::consts::PI;

use serde::Deserialize;

/// A point in graph (world) coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	/// Horizontal coordinate.
	pub x: f64,
	/// Vertical coordinate.
	pub y: f64,
}

impl Point {
	/// The world origin, where the start node sits.
	pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

	/// Point at `radius` from the origin in direction `angle` (radians).
	pub fn polar(angle: f64, radius: f64) -> Self {
		Self {
			x: angle.cos() * radius,
			y: angle.sin() * radius,
		}
	}
}

/// Tunables for the radial layout.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
	/// Ring spacing per exploration level, in world units.
	pub level_radius: f64,
	/// Radial distance between consecutive path steps.
	pub path_step_radius: f64,
	/// Angular increment between consecutive path steps (radians).
	pub path_angle_step: f64,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			level_radius: 90.0,
			path_step_radius: 220.0,
			path_angle_step: 1.1,
		}
	}
}

/// Stable angle for an id: `h = h * 31 + unit` over UTF-16 code units,
/// truncated to 32 bits, then `h mod 360` degrees.
pub fn hash_angle(id: &str) -> f64 {
	let h = id
		.encode_utf16()
		.fold(0u32, |h, unit| h.wrapping_mul(31).wrapping_add(u32::from(unit)));
	f64::from(h % 360) * (PI / 180.0)
}

/// Caches one position (and the level it was computed for) per node id.
#[derive(Clone, Debug, Default)]
pub struct LayoutAssigner {
	config: LayoutConfig,
	positions: HashMap<String, Point>,
	levels: HashMap<String, u32>,
}

impl LayoutAssigner {
	/// Empty cache using `config`.
	pub fn new(config: LayoutConfig) -> Self {
		Self {
			config,
			..Self::default()
		}
	}

	/// Active tunables.
	pub fn config(&self) -> &LayoutConfig {
		&self.config
	}

	/// Position for `id`. Computed on first call, cached afterwards; later
	/// calls ignore `level`.
	pub fn position_for(&mut self, id: &str, level: u32) -> Point {
		if let Some(&cached) = self.positions.get(id) {
			return cached;
		}
		let radius = f64::from(level) * self.config.level_radius;
		let point = Point::polar(hash_angle(id), radius);
		self.positions.insert(id.to_owned(), point);
		self.levels.insert(id.to_owned(), level);
		point
	}

	/// Spiral position for the `step`-th node of a discovered path. Overrides
	/// whatever was cached for `id`.
	pub fn place_on_path(&mut self, id: &str, step: usize) -> Point {
		let point = if step == 0 {
			Point::ORIGIN
		} else {
			let step = step as f64;
			Point::polar(
				step * self.config.path_angle_step,
				step * self.config.path_step_radius,
			)
		};
		self.positions.insert(id.to_owned(), point);
		self.levels.insert(id.to_owned(), step as u32);
		point
	}

	/// Cached position, if `id` has been placed.
	pub fn cached(&self, id: &str) -> Option<Point> {
		self.positions.get(id).copied()
	}

	/// Level (or path step) `id` was placed at.
	pub fn level_of(&self, id: &str) -> Option<u32> {
		self.levels.get(id).copied()
	}

	/// Number of placed nodes.
	pub fn len(&self) -> usize {
		self.positions.len()
	}

	/// Whether nothing has been placed yet.
	pub fn is_empty(&self) -> bool {
		self.positions.is_empty()
	}

	/// Forget every cached position.
	pub fn clear(&mut self) {
		self.positions.clear();
		self.levels.clear();
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn close(a: Point, b: Point) -> bool {
		(a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
	}

	#[test]
	fn hash_angle_follows_recurrence() {
		// "ab" -> 97 * 31 + 98 = 3105, 3105 % 360 = 225 degrees
		let expected = 225.0 * PI / 180.0;
		assert!((hash_angle("ab") - expected).abs() < 1e-12);
		assert_eq!(hash_angle(""), 0.0);
	}

	#[test]
	fn hash_angle_wraps_long_ids() {
		let long = "x".repeat(500);
		let angle = hash_angle(&long);
		assert!((0.0..2.0 * PI).contains(&angle));
	}

	#[test]
	fn position_is_cached_across_levels() {
		let mut layout = LayoutAssigner::default();
		let first = layout.position_for("Carol", 1);
		let second = layout.position_for("Carol", 7);
		assert!(close(first, second));
		assert_eq!(layout.level_of("Carol"), Some(1));
	}

	#[test]
	fn radius_scales_with_level() {
		let mut layout = LayoutAssigner::new(LayoutConfig {
			level_radius: 10.0,
			..LayoutConfig::default()
		});
		let p = layout.position_for("Dan", 3);
		assert!(((p.x * p.x + p.y * p.y).sqrt() - 30.0).abs() < 1e-9);
		assert!(close(layout.position_for("Root", 0), Point::ORIGIN));
	}

	#[test]
	fn path_placement_overrides_cache() {
		let mut layout = LayoutAssigner::default();
		layout.position_for("Carol", 1);
		let placed = layout.place_on_path("Carol", 2);
		let expected = Point::polar(2.0 * 1.1, 2.0 * 220.0);
		assert!(close(placed, expected));
		assert!(close(layout.position_for("Carol", 1), expected));
		assert!(close(layout.place_on_path("Alice", 0), Point::ORIGIN));
	}

	#[test]
	fn clear_forgets_positions() {
		let mut layout = LayoutAssigner::default();
		layout.position_for("Carol", 1);
		layout.clear();
		assert!(layout.is_empty());
		assert_eq!(layout.cached("Carol"), None);
	}
}
