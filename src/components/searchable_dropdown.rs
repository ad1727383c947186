//! Catalog picker with debounced, stale-safe search.

use std::time::Duration;

use leptos::prelude::*;
use log::{debug, warn};
use wasm_bindgen_futures::spawn_local;
use web_sys::MouseEvent;

use crate::api::{Paginator, Person, RequestSequencer, near_bottom, search_people};

/// Text input with a scrolling result list backed by `GET /api/people`.
///
/// Typing waits `debounce_ms` before querying; only the newest query's
/// response is shown. The list starts with `page_size` entries and reveals
/// more as it is scrolled near the bottom.
#[component]
pub fn SearchableDropdown(
	#[prop(into)] label: String,
	#[prop(into)] placeholder: String,
	selected: RwSignal<Option<Person>>,
	api_base: String,
	#[prop(default = 300)] debounce_ms: u64,
	#[prop(default = 50)] page_size: usize,
) -> impl IntoView {
	let api_base = StoredValue::new(api_base);
	let open = RwSignal::new(false);
	let term = RwSignal::new(String::new());
	let results = RwSignal::new(Vec::<Person>::new());
	let loading = RwSignal::new(false);
	let error = RwSignal::new(None::<String>);
	let pages = RwSignal::new(Paginator::new(page_size));
	let sequencer = StoredValue::new(RequestSequencer::default());
	let pending = StoredValue::new(None::<TimeoutHandle>);

	let run_query = move |query: String| {
		let Some(ticket) = sequencer.try_update_value(|s| s.issue()) else {
			return;
		};
		let base = api_base.get_value();
		loading.set(true);
		spawn_local(async move {
			let result = search_people(&base, &query).await;
			if !sequencer.try_with_value(|s| s.is_current(ticket)).unwrap_or(false) {
				debug!("pathscope: dropping stale results for {:?}", query);
				return;
			}
			loading.try_set(false);
			match result {
				Ok(people) => {
					results.try_set(people);
					pages.try_update(|p| p.reset());
					error.try_set(None);
				}
				Err(e) => {
					warn!("pathscope: people search failed: {}", e);
					error.try_set(Some("Failed to load people".to_string()));
				}
			}
		});
	};

	let schedule_query = move |query: String| {
		if let Some(Some(handle)) = pending.try_update_value(Option::take) {
			handle.clear();
		}
		match set_timeout_with_handle(move || run_query(query), Duration::from_millis(debounce_ms)) {
			Ok(handle) => pending.set_value(Some(handle)),
			Err(e) => warn!("pathscope: could not schedule search: {:?}", e),
		}
	};

	let on_input = move |ev| {
		let value = event_target_value(&ev);
		term.set(value.clone());
		open.set(true);
		schedule_query(value);
	};

	let on_focus = move |_| {
		open.set(true);
		if results.with_untracked(Vec::is_empty) && !loading.get_untracked() {
			run_query(term.get_untracked());
		}
	};

	let on_scroll = move |ev: web_sys::Event| {
		let list: web_sys::Element = event_target(&ev);
		let (top, height, total_height) = (
			list.scroll_top() as f64,
			list.client_height() as f64,
			list.scroll_height() as f64,
		);
		if near_bottom(top, height, total_height) {
			let mut paginator = pages.get_untracked();
			if paginator.reveal_more(results.with_untracked(Vec::len)) {
				pages.set(paginator);
			}
		}
	};

	let select = move |person: Person| {
		debug!("pathscope: selected {}", person.name);
		selected.set(Some(person));
		term.set(String::new());
		open.set(false);
	};

	let shown_value = move || {
		if open.get() {
			term.get()
		} else {
			selected.get().map(|p| p.name).unwrap_or_default()
		}
	};

	let visible = move || results.with(|all| pages.with(|p| p.window(all).to_vec()));

	view! {
		<div class="dropdown">
			<label class="dropdown-label">{label}</label>
			<input
				type="text"
				class="dropdown-input"
				placeholder=placeholder
				prop:value=shown_value
				on:input=on_input
				on:focus=on_focus
				on:blur=move |_| open.set(false)
			/>
			<Show when=move || open.get()>
				<ul class="dropdown-list" on:scroll=on_scroll>
					{move || error.get().map(|msg| view! { <li class="dropdown-status error">{msg}</li> })}
					<For
						each=visible
						key=|person| person.name.clone()
						children=move |person: Person| {
							let name = person.name.clone();
							let is_selected = {
								let name = name.clone();
								move || selected.with(|s| s.as_ref().is_some_and(|p| p.name == name))
							};
							view! {
								<li
									class="dropdown-item"
									class:selected=is_selected
									on:mousedown=move |ev: MouseEvent| {
										// Keep focus so blur does not close the list first.
										ev.prevent_default();
										select(person.clone());
									}
								>
									{name}
								</li>
							}
						}
					/>
					<Show when=move || loading.get()>
						<li class="dropdown-status">"Loading..."</li>
					</Show>
					<Show when=move || !loading.get() && error.with(Option::is_none) && results.with(Vec::is_empty)>
						<li class="dropdown-status">"No matches"</li>
					</Show>
				</ul>
			</Show>
		</div>
	}
}
