//! Canvas rendering for the network view.
//!
//! Draws straight from the graph model in multiple passes for correct
//! z-ordering:
//! 1. Background (screen space)
//! 2. Default edges, then path edges on top (world space)
//! 3. Non-highlighted nodes, then highlighted nodes with rings and labels
//! 4. Vignette (screen space)

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use crate::explorer::model::{EdgeCategory, GraphEdge, GraphNode, NodeCategory};
use crate::explorer::GraphModel;

use super::scale::{ScaleConfig, ScaledValues};
use super::state::ViewState;
use super::theme::Theme;

fn smooth_step(t: f64) -> f64 {
	t * t * (3.0 - 2.0 * t)
}

/// Renders the complete model to the canvas.
pub fn render(
	graph: &GraphModel,
	view: &ViewState,
	ctx: &CanvasRenderingContext2d,
	config: &ScaleConfig,
	theme: &Theme,
) {
	let scale = ScaledValues::new(config, view.transform.k);

	draw_background(view, ctx, theme);

	ctx.save();
	let _ = ctx.translate(view.transform.x, view.transform.y);
	let _ = ctx.scale(view.transform.k, view.transform.k);

	draw_edges(graph, view, ctx, &scale, theme);
	draw_nodes(graph, view, ctx, &scale, theme);

	ctx.restore();

	if theme.background.vignette > 0.0 {
		draw_vignette(view, ctx, theme);
	}
}

fn draw_background(view: &ViewState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let (w, h) = (view.width, view.height);
	let gradient = theme
		.background
		.use_gradient
		.then(|| ctx.create_radial_gradient(w / 2.0, h / 2.0, 0.0, w / 2.0, h / 2.0, w.max(h) * 0.8).ok())
		.flatten();

	match gradient {
		Some(gradient) => {
			let _ = gradient.add_color_stop(0.0, &theme.background.color_secondary.to_css());
			let _ = gradient.add_color_stop(1.0, &theme.background.color.to_css());
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
		None => ctx.set_fill_style_str(&theme.background.color.to_css()),
	}

	ctx.fill_rect(0.0, 0.0, w, h);
}

fn draw_vignette(view: &ViewState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let (w, h) = (view.width, view.height);
	let Ok(gradient) =
		ctx.create_radial_gradient(w / 2.0, h / 2.0, w.min(h) * 0.3, w / 2.0, h / 2.0, w.max(h) * 0.7)
	else {
		return;
	};

	let _ = gradient.add_color_stop(0.0, "rgba(0, 0, 0, 0)");
	let _ = gradient.add_color_stop(1.0, &format!("rgba(0, 0, 0, {})", theme.background.vignette));

	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	ctx.fill_rect(0.0, 0.0, w, h);
}

fn draw_edges(
	graph: &GraphModel,
	view: &ViewState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let max_t = smooth_step(view.highlight.max_intensity());

	// Path edges last so they sit on top of the exploration fan.
	let (path, rest): (Vec<&GraphEdge>, Vec<&GraphEdge>) = graph
		.edges()
		.iter()
		.partition(|edge| edge.category == EdgeCategory::Path);

	for edge in rest.into_iter().chain(path) {
		let (a, b) = edge.key.endpoints();
		let (Some(n1), Some(n2)) = (graph.node(a), graph.node(b)) else {
			continue;
		};

		let edge_t = smooth_step(view.highlight.edge_intensity(a, b));
		let (alpha, width_mult) = if edge_t > 0.01 {
			(0.7 + 0.3 * edge_t, 1.0 + 0.4 * edge_t)
		} else if max_t > 0.01 {
			(0.7 - 0.5 * max_t, 1.0 - 0.3 * max_t)
		} else {
			(0.7, 1.0)
		};

		let color = theme.edge.color(edge.category);
		let base_width = match edge.category {
			EdgeCategory::Path => scale.edge_line_width * theme.edge.path_width,
			EdgeCategory::Default => scale.edge_line_width,
		};
		ctx.set_stroke_style_str(&color.with_alpha(alpha * color.a).to_css());
		ctx.set_line_width(base_width * width_mult);

		ctx.begin_path();
		ctx.move_to(n1.position.x, n1.position.y);
		ctx.line_to(n2.position.x, n2.position.y);
		ctx.stroke();
	}
}

/// Endpoint and path labels are always drawn; the rest fade in with zoom.
fn label_alpha(node: &GraphNode, scale: &ScaledValues) -> f64 {
	match node.category {
		NodeCategory::Start | NodeCategory::End | NodeCategory::Path => scale.key_label_alpha,
		NodeCategory::Explored | NodeCategory::Default => scale.minor_label_alpha,
	}
}

fn draw_nodes(
	graph: &GraphModel,
	view: &ViewState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let max_t = smooth_step(view.highlight.max_intensity());
	let has_highlight = max_t > 0.01;
	let (dim_alpha, dim_radius) = if has_highlight {
		(1.0 - 0.7 * max_t, 1.0 - 0.15 * max_t)
	} else {
		(1.0, 1.0)
	};

	// Pass 1: non-highlighted nodes
	for node in graph.nodes() {
		if view.highlight.node_intensity(&node.id) > 0.001 {
			continue;
		}
		draw_node(ctx, node, scale, theme, dim_alpha, dim_radius);
		let alpha = label_alpha(node, scale) * dim_alpha;
		if alpha > 0.05 {
			draw_label(ctx, node, scale, dim_radius, alpha * 0.85);
		}
	}

	// Pass 2: highlighted/transitioning nodes on top
	for node in graph.nodes() {
		let node_t = view.highlight.node_intensity(&node.id);
		if node_t <= 0.001 {
			continue;
		}

		let eased_t = smooth_step(node_t);
		let hover_t = smooth_step(view.highlight.hover_ring_intensity(&node.id));

		let neighbor_radius = 1.0 + 0.25 * eased_t;
		let hovered_radius = 1.0 + 0.4 * eased_t;
		let highlight_radius = neighbor_radius + (hovered_radius - neighbor_radius) * hover_t;

		let alpha = dim_alpha + (1.0 - dim_alpha) * eased_t;
		let radius_mult = dim_radius + (highlight_radius - dim_radius) * eased_t;

		draw_node(ctx, node, scale, theme, alpha, radius_mult);

		if hover_t > 0.01 {
			let (x, y) = (node.position.x, node.position.y);
			let radius = scale.node_radius(node.size) * radius_mult;
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius + scale.ring_offset, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(&format!("rgba(255, 255, 255, {})", 0.8 * hover_t));
			ctx.set_line_width(scale.ring_width);
			ctx.stroke();

			ctx.begin_path();
			let _ = ctx.arc(x, y, radius + scale.ring_offset * 2.5, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(&format!("rgba(255, 255, 255, {})", 0.3 * hover_t));
			ctx.set_line_width(scale.ring_width * 0.5);
			ctx.stroke();
		}

		// Highlighted nodes are always labelled.
		draw_label(ctx, node, scale, radius_mult, 0.95 * alpha);
	}
}

fn draw_node(
	ctx: &CanvasRenderingContext2d,
	node: &GraphNode,
	scale: &ScaledValues,
	theme: &Theme,
	alpha: f64,
	radius_mult: f64,
) {
	let (x, y) = (node.position.x, node.position.y);
	let radius = scale.node_radius(node.size) * radius_mult;
	let base_color = theme.palette.get(node.category);

	ctx.set_global_alpha(alpha);

	let gradient = theme
		.node
		.use_gradient
		.then(|| ctx.create_radial_gradient(x - radius * 0.3, y - radius * 0.3, 0.0, x, y, radius).ok())
		.flatten();

	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
	match gradient {
		Some(gradient) => {
			let _ = gradient.add_color_stop(0.0, &base_color.lighten(0.4).to_css());
			let _ = gradient.add_color_stop(0.7, &base_color.to_css());
			let _ = gradient.add_color_stop(1.0, &base_color.darken(0.2).to_css());
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
		None => ctx.set_fill_style_str(&base_color.to_css()),
	}
	ctx.fill();

	if theme.node.border_width > 0.0 {
		ctx.set_stroke_style_str(&theme.node.border_color.to_css());
		ctx.set_line_width(theme.node.border_width / scale.k);
		ctx.stroke();
	}

	ctx.set_global_alpha(1.0);
}

fn draw_label(ctx: &CanvasRenderingContext2d, node: &GraphNode, scale: &ScaledValues, radius_mult: f64, alpha: f64) {
	let radius = scale.node_radius(node.size) * radius_mult;
	ctx.set_fill_style_str(&format!("rgba(255, 255, 255, {})", alpha));
	ctx.set_font(&scale.label_font);
	let _ = ctx.fill_text(
		&node.id,
		node.position.x + radius + 4.0 / scale.k,
		node.position.y + 3.0 / scale.k,
	);
}
