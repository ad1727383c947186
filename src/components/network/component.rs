//! Leptos component binding the graph model to a canvas.
//!
//! The component subscribes to model changes and redraws on the next
//! animation frame. Pan, zoom and hover only touch the view state; the model
//! is never mutated from here, except for the scene reset on unmount.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use leptos::html::Canvas;
use leptos::prelude::*;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use crate::explorer::model::SubscriptionId;
use crate::explorer::{ExplorerHandle, GraphChange};

use super::render;
use super::scale::ScaleConfig;
use super::state::{ViewState, observed_count};
use super::theme::Theme;

/// Bundles view state with the drawing surface and visual configuration.
struct CanvasContext {
	view: ViewState,
	scale: ScaleConfig,
	theme: Theme,
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
	last_frame: Option<f64>,
}

/// Flags raised by the model listener and consumed by the next frame.
#[derive(Default)]
struct PendingChanges {
	changed: Cell<bool>,
	cleared: Cell<bool>,
}

fn parent_size(canvas: &HtmlCanvasElement) -> (f64, f64) {
	canvas
		.parent_element()
		.map(|p| (p.client_width() as f64, p.client_height() as f64))
		.filter(|&(w, h)| w > 0.0 && h > 0.0)
		.unwrap_or((800.0, 600.0))
}

fn local_position(canvas_ref: NodeRef<Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas = canvas_ref.get_untracked()?;
	let rect = canvas.get_bounding_client_rect();
	Some((ev.client_x() as f64 - rect.left(), ev.client_y() as f64 - rect.top()))
}

fn request_frame(callback: &Closure<dyn FnMut(f64)>) {
	if let Some(window) = web_sys::window() {
		let _ = window.request_animation_frame(callback.as_ref().unchecked_ref());
	}
}

/// Renders the explorer's graph model on a canvas that fills its parent.
///
/// The view fits the whole graph after every change until the user pans or
/// zooms; double-click fits again. `on_hover` receives the id of the node
/// under the pointer, or `None` when it leaves.
#[component]
pub fn NetworkCanvas(
	explorer: ExplorerHandle,
	#[prop(optional)] theme: Option<Theme>,
	#[prop(optional)] on_hover: Option<Callback<Option<String>>>,
) -> impl IntoView {
	let theme = theme.unwrap_or_default();
	let legend = theme
		.palette
		.legend()
		.into_iter()
		.map(|(label, color)| {
			view! {
				<li>
					<span class="legend-swatch" style=format!("background: {};", color.to_css())></span>
					{label}
				</li>
			}
		})
		.collect_view();

	let canvas_ref = NodeRef::<Canvas>::new();
	let hovered = RwSignal::new(None::<String>);
	let alive = Arc::new(AtomicBool::new(true));
	let subscription: Arc<Mutex<Option<SubscriptionId>>> = Arc::new(Mutex::new(None));

	let context: Rc<RefCell<Option<CanvasContext>>> = Rc::new(RefCell::new(None));
	let pending = Rc::new(PendingChanges::default());
	let animate: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));

	let set_hovered = move |id: Option<String>| {
		hovered.set(id.clone());
		if let Some(on_hover) = on_hover {
			on_hover.run(id);
		}
	};

	let (context_init, pending_init, animate_init, alive_init, subscription_init) = (
		context.clone(),
		pending.clone(),
		animate.clone(),
		alive.clone(),
		subscription.clone(),
	);
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (w, h) = parent_size(&canvas);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			warn!("pathscope: 2d canvas context unavailable");
			return;
		};

		let mut view = ViewState::new(w, h);
		explorer.with_untracked(|e| view.fit_to(e.scene().graph()));
		*context_init.borrow_mut() = Some(CanvasContext {
			view,
			scale: ScaleConfig::default(),
			theme: theme.clone(),
			canvas,
			ctx,
			last_frame: None,
		});

		let pending_listener = pending_init.clone();
		let id = explorer.subscribe_graph(move |change| {
			pending_listener.changed.set(true);
			if matches!(change, GraphChange::Cleared) {
				pending_listener.cleared.set(true);
			}
		});
		if let Ok(mut slot) = subscription_init.lock() {
			*slot = id;
		}

		let (context_anim, pending_anim, animate_inner, alive_anim) = (
			context_init.clone(),
			pending_init.clone(),
			animate_init.clone(),
			alive_init.clone(),
		);
		*animate_init.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
			if !alive_anim.load(Ordering::Relaxed) {
				// Release the drawing surface and stop rescheduling.
				context_anim.borrow_mut().take();
				return;
			}

			let mut cleared = false;
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				let dt = c
					.last_frame
					.map(|t| ((timestamp - t) / 1000.0).clamp(0.0, 0.1))
					.unwrap_or(0.016);
				c.last_frame = Some(timestamp);

				let (w, h) = parent_size(&c.canvas);
				if (w, h) != (c.view.width, c.view.height) {
					c.canvas.set_width(w as u32);
					c.canvas.set_height(h as u32);
					c.view.resize(w, h);
					pending_anim.changed.set(true);
				}

				if pending_anim.cleared.replace(false) {
					c.view.auto_fit = true;
					c.view.highlight.clear();
					cleared = true;
				}
				let changed = pending_anim.changed.replace(false);

				explorer.with_untracked(|e| {
					let graph = e.scene().graph();
					if changed && c.view.auto_fit {
						c.view.fit_to(graph);
					}
					c.view.tick(dt);
					render::render(graph, &c.view, &c.ctx, &c.scale, &c.theme);
				});
			}
			if cleared && hovered.get_untracked().is_some() {
				set_hovered(None);
			}

			if let Some(ref cb) = *animate_inner.borrow() {
				request_frame(cb);
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			request_frame(cb);
		}
	});

	on_cleanup(move || {
		debug!("pathscope: network view unmounted");
		alive.store(false, Ordering::Relaxed);
		let id = subscription.lock().ok().and_then(|mut slot| slot.take());
		if let Some(id) = id {
			explorer.unsubscribe_graph(id);
		}
		explorer.update(|e| e.reset_scene());
	});

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = local_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_md.borrow_mut() {
			c.view.begin_pan(x, y);
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = local_position(canvas_ref, &ev) else {
			return;
		};
		let hover_change = {
			let mut guard = context_mm.borrow_mut();
			let Some(c) = guard.as_mut() else {
				return;
			};
			if c.view.pan.active {
				c.view.pan_to(x, y);
				None
			} else {
				explorer
					.with_untracked(|e| {
						let graph = e.scene().graph();
						let hit = c.view.node_at_position(graph, x, y, &c.scale).map(str::to_string);
						c.view.highlight.set_hover(hit.as_deref(), graph).then_some(hit)
					})
					.flatten()
			}
		};
		if let Some(hit) = hover_change {
			set_hovered(hit);
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_mu.borrow_mut() {
			c.view.end_pan();
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		let had_hover = {
			let mut guard = context_ml.borrow_mut();
			let Some(c) = guard.as_mut() else {
				return;
			};
			c.view.end_pan();
			explorer
				.with_untracked(|e| c.view.highlight.set_hover(None, e.scene().graph()))
				.unwrap_or(false)
		};
		if had_hover {
			set_hovered(None);
		}
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = local_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			c.view.zoom_at(x, y, factor);
		}
	};

	let context_dc = context;
	let on_dblclick = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_dc.borrow_mut() {
			c.view.auto_fit = true;
			pending.changed.set(true);
		}
	};

	let observed = move || {
		explorer
			.with(|e| observed_count(e.explored(), e.path(), e.scene().start(), e.scene().end()))
			.unwrap_or(0)
	};

	let hover_info = move || {
		hovered.get().map(|id| {
			let text = match explorer.with(|e| e.scene().degree(&id)).flatten() {
				Some(degree) => format!("{} ({} connections)", id, degree),
				None => id,
			};
			view! { <div class="network-hover">{text}</div> }
		})
	};

	view! {
		<div class="network-view">
			<canvas
				node_ref=canvas_ref
				class="network-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				on:dblclick=on_dblclick
				style="display: block; cursor: grab;"
			/>
			<div class="network-stats">"Nodes explored: " {observed}</div>
			{hover_info}
			<ul class="network-legend">{legend}</ul>
		</div>
	}
}
