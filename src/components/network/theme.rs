//! Visual theming for the network canvas.
//!
//! Node colors are fixed per category (start, end, path, explored, default)
//! so the legend means the same thing in every theme; themes vary the
//! background, edge and shading style around them.

use crate::explorer::{EdgeCategory, NodeCategory};

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Alpha, 0.0 to 1.0.
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with explicit alpha.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Same color, different alpha.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	/// Darken the color by a factor (0.0 = unchanged, 1.0 = black)
	pub fn darken(self, factor: f64) -> Self {
		let f = 1.0 - factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * f) as u8,
			g: (self.g as f64 * f) as u8,
			b: (self.b as f64 * f) as u8,
			a: self.a,
		}
	}

	/// Hex for opaque colors, `rgba(...)` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// One color per node category.
#[derive(Clone, Debug)]
pub struct CategoryPalette {
	/// Start node.
	pub start: Color,
	/// End node.
	pub end: Color,
	/// Path nodes.
	pub path: Color,
	/// Explored nodes.
	pub explored: Color,
	/// Nodes outside the search, e.g. replaced endpoints.
	pub default: Color,
}

impl CategoryPalette {
	/// Fill color for a node category.
	pub fn get(&self, category: NodeCategory) -> Color {
		match category {
			NodeCategory::Start => self.start,
			NodeCategory::End => self.end,
			NodeCategory::Path => self.path,
			NodeCategory::Explored => self.explored,
			NodeCategory::Default => self.default,
		}
	}

	/// Legend rows in display order.
	pub fn legend(&self) -> [(&'static str, Color); 4] {
		[
			("Start", self.start),
			("End", self.end),
			("Path", self.path),
			("Explored", self.explored),
		]
	}
}

impl Default for CategoryPalette {
	fn default() -> Self {
		Self {
			start: Color::rgb(16, 185, 129),    // Emerald
			end: Color::rgb(239, 68, 68),       // Red
			path: Color::rgb(59, 130, 246),     // Blue
			explored: Color::rgb(139, 92, 246), // Violet
			default: Color::rgb(120, 135, 155), // Slate
		}
	}
}

/// Background style configuration.
#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	/// Primary background color
	pub color: Color,
	/// Secondary color for gradients
	pub color_secondary: Color,
	/// Whether to use radial gradient
	pub use_gradient: bool,
	/// Vignette intensity (0.0 = none, 1.0 = strong)
	pub vignette: f64,
}

/// Edge visual style.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	/// Color of non-path edges
	pub color: Color,
	/// Color of edges along the discovered path
	pub path_color: Color,
	/// Line width multiplier for path edges
	pub path_width: f64,
}

impl EdgeStyle {
	/// Stroke color for an edge category.
	pub fn color(&self, category: EdgeCategory) -> Color {
		match category {
			EdgeCategory::Path => self.path_color,
			EdgeCategory::Default => self.color,
		}
	}
}

/// Node visual style.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	/// Whether nodes have inner gradients
	pub use_gradient: bool,
	/// Border/stroke width (0 = no border)
	pub border_width: f64,
	/// Border color
	pub border_color: Color,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Name accepted by [`Theme::by_name`].
	pub name: &'static str,
	/// Canvas background.
	pub background: BackgroundStyle,
	/// Edge strokes.
	pub edge: EdgeStyle,
	/// Node shading.
	pub node: NodeStyle,
	/// Node colors per category.
	pub palette: CategoryPalette,
}

impl Theme {
	/// Dark slate theme with subtle shading (default)
	pub fn default_theme() -> Self {
		Self {
			name: "default",
			background: BackgroundStyle {
				color: Color::rgb(17, 24, 39),
				color_secondary: Color::rgb(31, 41, 55),
				use_gradient: true,
				vignette: 0.15,
			},
			edge: EdgeStyle {
				color: Color::rgba(140, 160, 180, 0.35),
				path_color: Color::rgb(96, 165, 250),
				path_width: 2.0,
			},
			node: NodeStyle {
				use_gradient: true,
				border_width: 0.0,
				border_color: Color::rgba(255, 255, 255, 0.0),
			},
			palette: CategoryPalette::default(),
		}
	}

	/// Flat near-black theme with outlined nodes
	pub fn midnight() -> Self {
		Self {
			name: "midnight",
			background: BackgroundStyle {
				color: Color::rgb(10, 10, 14),
				color_secondary: Color::rgb(10, 10, 14),
				use_gradient: false,
				vignette: 0.0,
			},
			edge: EdgeStyle {
				color: Color::rgba(100, 120, 150, 0.3),
				path_color: Color::rgb(147, 197, 253),
				path_width: 2.5,
			},
			node: NodeStyle {
				use_gradient: false,
				border_width: 1.0,
				border_color: Color::rgba(255, 255, 255, 0.35),
			},
			palette: CategoryPalette::default(),
		}
	}

	/// Look a theme up by name, falling back to the default.
	pub fn by_name(name: &str) -> Self {
		match name {
			"midnight" => Self::midnight(),
			_ => Self::default_theme(),
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::default_theme()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn css_output() {
		assert_eq!(Color::rgb(16, 185, 129).to_css(), "#10b981");
		assert_eq!(Color::rgba(0, 0, 0, 0.5).to_css(), "rgba(0, 0, 0, 0.5)");
		assert_eq!(Color::rgb(100, 100, 100).lighten(1.0), Color::rgb(255, 255, 255));
		assert_eq!(Color::rgb(100, 100, 100).darken(1.0), Color::rgb(0, 0, 0));
	}

	#[test]
	fn theme_lookup_falls_back() {
		assert_eq!(Theme::by_name("midnight").name, "midnight");
		assert_eq!(Theme::by_name("nope").name, "default");
	}
}
