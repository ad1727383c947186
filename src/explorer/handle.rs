//! Reactive bridge between the explorer and Leptos.
//!
//! The explorer lives in an `Rc<RefCell<_>>` because the WebSocket callbacks
//! need to reach it. Components get a `Copy` handle instead: reads track a
//! revision signal, and every mutation bumps it once the borrow is released.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use leptos::prelude::*;

use super::layout::LayoutConfig;
use super::model::{GraphChange, SubscriptionId};
use super::session::Explorer;
use super::transport::{EventSink, WebSocketConnector};

/// The explorer as wired in the browser.
pub type WebExplorer = Explorer<WebSocketConnector>;

/// Shared, reactive access to the browser explorer.
#[derive(Clone, Copy)]
pub struct ExplorerHandle {
	inner: StoredValue<Rc<RefCell<WebExplorer>>, LocalStorage>,
	revision: RwSignal<u64>,
}

impl ExplorerHandle {
	/// Build an explorer whose channels connect to `ws_url`.
	pub fn new(ws_url: &str, layout: LayoutConfig) -> Self {
		let revision = RwSignal::new(0u64);
		let explorer = Rc::new_cyclic(|weak: &Weak<RefCell<WebExplorer>>| {
			let weak = weak.clone();
			let sink: EventSink = Rc::new(move |generation, event| {
				let Some(explorer) = weak.upgrade() else {
					return;
				};
				let applied = explorer.borrow_mut().handle_transport_event(generation, event);
				if applied {
					revision.try_update(|r| *r += 1);
				}
			});
			RefCell::new(Explorer::new(WebSocketConnector::new(ws_url, sink), layout))
		});
		Self {
			inner: StoredValue::new_local(explorer),
			revision,
		}
	}

	fn rc(&self) -> Option<Rc<RefCell<WebExplorer>>> {
		self.inner.try_get_value()
	}

	/// Read explorer state and subscribe the calling reactive scope to
	/// changes.
	pub fn with<R>(&self, f: impl FnOnce(&WebExplorer) -> R) -> Option<R> {
		self.revision.track();
		self.with_untracked(f)
	}

	/// Read explorer state without tracking, e.g. from an animation frame.
	pub fn with_untracked<R>(&self, f: impl FnOnce(&WebExplorer) -> R) -> Option<R> {
		let rc = self.rc()?;
		let explorer = rc.borrow();
		Some(f(&explorer))
	}

	/// Listen to graph changes. Does not bump the revision.
	pub fn subscribe_graph(&self, listener: impl FnMut(&GraphChange) + 'static) -> Option<SubscriptionId> {
		let rc = self.rc()?;
		let id = rc.borrow_mut().scene_mut().graph_mut().subscribe(listener);
		Some(id)
	}

	/// Stop a listener registered with [`Self::subscribe_graph`].
	pub fn unsubscribe_graph(&self, id: SubscriptionId) {
		if let Some(rc) = self.rc() {
			rc.borrow_mut().scene_mut().graph_mut().unsubscribe(id);
		}
	}

	/// Mutate the explorer, then notify readers.
	pub fn update<R>(&self, f: impl FnOnce(&mut WebExplorer) -> R) -> Option<R> {
		let rc = self.rc()?;
		let result = f(&mut rc.borrow_mut());
		self.revision.try_update(|r| *r += 1);
		Some(result)
	}
}
