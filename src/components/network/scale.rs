//! Zoom-dependent scaling for canvas visuals.
//!
//! # Coordinate Spaces
//!
//! - **World-space**: graph coordinates, as stored in the model. Values in
//!   world-space scale with zoom.
//! - **Screen-space**: canvas pixels. Values in screen-space stay constant
//!   regardless of zoom level.
//!
//! Node sizes in the model are screen pixels at 100% zoom; the behaviors
//! below turn them into world-space values for drawing after the canvas
//! transform has been applied.

/// Defines how a visual property scales with zoom level.
#[derive(Clone, Debug)]
pub enum ScaleBehavior {
	/// Constant screen-space size (pixels). Unaffected by zoom.
	Screen,
	/// World-space scaling, clamped to min/max screen-space bounds.
	Clamped { min_screen: f64, max_screen: f64 },
}

impl ScaleBehavior {
	/// World-space value for `base` at zoom `k`.
	pub fn apply(&self, base: f64, k: f64) -> f64 {
		match self {
			ScaleBehavior::Screen => base / k,
			ScaleBehavior::Clamped {
				min_screen,
				max_screen,
			} => {
				// screen_size = world_size * k
				let min_world = min_screen / k;
				let max_world = max_screen / k;
				base.clamp(min_world, max_world)
			}
		}
	}
}

/// Defines how alpha/opacity scales with zoom level.
#[derive(Clone, Debug)]
pub enum AlphaBehavior {
	/// Constant alpha regardless of zoom.
	Constant,
	/// Fully visible at `full_alpha_k`, fades to zero at `zero_alpha_k`.
	Fade { zero_alpha_k: f64, full_alpha_k: f64 },
}

impl AlphaBehavior {
	/// Alpha multiplier for zoom level `k`.
	pub fn apply(&self, k: f64) -> f64 {
		match self {
			AlphaBehavior::Constant => 1.0,
			AlphaBehavior::Fade {
				zero_alpha_k,
				full_alpha_k,
			} => {
				if zero_alpha_k == full_alpha_k {
					return 1.0;
				}
				let t = (k - zero_alpha_k) / (full_alpha_k - zero_alpha_k);
				t.clamp(0.0, 1.0)
			}
		}
	}
}

#[derive(Clone, Debug)]
/// Node radius, hit area and label scaling.
pub struct NodeScaleConfig {
	/// How the node radius scales with zoom.
	pub radius_behavior: ScaleBehavior,
	/// Hit detection padding added to the radius, in screen pixels.
	pub hit_padding: f64,
	/// Label font size in screen pixels.
	pub label_size: f64,
	/// Labels of endpoint and path nodes.
	pub key_label_alpha: AlphaBehavior,
	/// Labels of every other node; these only appear once zoomed in.
	pub minor_label_alpha: AlphaBehavior,
}

#[derive(Clone, Debug)]
/// Edge line scaling.
pub struct EdgeScaleConfig {
	/// Base line width in screen pixels.
	pub line_width: f64,
}

#[derive(Clone, Debug)]
/// Hover ring scaling.
pub struct GlowScaleConfig {
	/// Stroke width for hover ring in screen pixels.
	pub ring_width: f64,
	/// Ring offset from node edge in screen pixels.
	pub ring_offset: f64,
}

/// Complete scale configuration for all canvas elements.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	/// Node sizing.
	pub node: NodeScaleConfig,
	/// Edge sizing.
	pub edge: EdgeScaleConfig,
	/// Hover ring sizing.
	pub glow: GlowScaleConfig,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			node: NodeScaleConfig {
				radius_behavior: ScaleBehavior::Screen,
				hit_padding: 4.0,
				label_size: 11.0,
				key_label_alpha: AlphaBehavior::Constant,
				minor_label_alpha: AlphaBehavior::Fade {
					zero_alpha_k: 1.2,
					full_alpha_k: 2.0,
				},
			},
			edge: EdgeScaleConfig { line_width: 1.0 },
			glow: GlowScaleConfig {
				ring_width: 1.5,
				ring_offset: 2.0,
			},
		}
	}
}

/// Scale values for one frame at zoom `k`. All sizes are world-space.
#[derive(Clone, Debug)]
pub struct ScaledValues<'a> {
	config: &'a ScaleConfig,
	/// Zoom factor these values were computed for.
	pub k: f64,
	/// CSS font string for labels.
	pub label_font: String,
	/// Edge stroke width.
	pub edge_line_width: f64,
	/// Hover ring stroke width.
	pub ring_width: f64,
	/// Gap between a node and its hover ring.
	pub ring_offset: f64,
	/// Label opacity for endpoint and path nodes.
	pub key_label_alpha: f64,
	/// Label opacity for every other node.
	pub minor_label_alpha: f64,
}

impl<'a> ScaledValues<'a> {
	/// Resolve `config` for zoom `k`.
	pub fn new(config: &'a ScaleConfig, k: f64) -> Self {
		Self {
			config,
			k,
			label_font: format!("{}px sans-serif", config.node.label_size / k),
			edge_line_width: config.edge.line_width / k,
			ring_width: config.glow.ring_width / k,
			ring_offset: config.glow.ring_offset / k,
			key_label_alpha: config.node.key_label_alpha.apply(k),
			minor_label_alpha: config.node.minor_label_alpha.apply(k),
		}
	}

	/// World-space radius of a node of the given model size.
	pub fn node_radius(&self, size: f64) -> f64 {
		self.config.node.radius_behavior.apply(size, self.k)
	}

	/// World-space hit radius of a node of the given model size.
	pub fn hit_radius(&self, size: f64) -> f64 {
		self.node_radius(size) + self.config.node.hit_padding / self.k
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn screen_radius_is_zoom_invariant_on_screen() {
		let config = ScaleConfig::default();
		for k in [0.25, 1.0, 4.0] {
			let scaled = ScaledValues::new(&config, k);
			assert!((scaled.node_radius(8.0) * k - 8.0).abs() < 1e-9);
		}
	}

	#[test]
	fn clamped_behavior_bounds_screen_size() {
		let behavior = ScaleBehavior::Clamped {
			min_screen: 2.0,
			max_screen: 10.0,
		};
		assert_eq!(behavior.apply(5.0, 1.0), 5.0);
		assert_eq!(behavior.apply(5.0, 0.1), 20.0);
		assert_eq!(behavior.apply(5.0, 4.0), 2.5);
	}

	#[test]
	fn minor_labels_fade_in_with_zoom() {
		let config = ScaleConfig::default();
		assert_eq!(ScaledValues::new(&config, 1.0).minor_label_alpha, 0.0);
		assert_eq!(ScaledValues::new(&config, 2.5).minor_label_alpha, 1.0);
		assert_eq!(ScaledValues::new(&config, 0.1).key_label_alpha, 1.0);
	}
}
