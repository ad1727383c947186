//! Endpoint pickers and the search/cancel actions.

use leptos::prelude::*;
use log::{debug, warn};

use crate::api::Person;
use crate::error::SearchError;
use crate::explorer::ExplorerHandle;
use crate::explorer::session::validate;

use super::searchable_dropdown::SearchableDropdown;

fn person_name(person: Option<Person>) -> String {
	person.map(|p| p.name).unwrap_or_default()
}

/// Start/end pickers plus the search and cancel buttons.
#[component]
pub fn SearchBar(
	explorer: ExplorerHandle,
	start: RwSignal<Option<Person>>,
	end: RwSignal<Option<Person>>,
	api_base: String,
	debounce_ms: u64,
	page_size: usize,
) -> impl IntoView {
	let request = move || validate(&person_name(start.get()), &person_name(end.get()));
	let searching = move || explorer.with(|e| e.is_searching()).unwrap_or(false);

	// A running search blocks the button unless the endpoints changed, in
	// which case the new search supersedes it.
	let can_search = move || {
		let Ok(request) = request() else {
			return false;
		};
		explorer
			.with(|e| match e.active() {
				Some(active) if e.is_searching() => active.request() != &request,
				_ => true,
			})
			.unwrap_or(false)
	};

	let hint = move || match request() {
		Err(SearchError::SameEndpoints) => Some(SearchError::SameEndpoints.to_string()),
		_ => None,
	};

	let on_search = move |_| {
		let (from, to) = (person_name(start.get_untracked()), person_name(end.get_untracked()));
		match explorer.update(|e| e.start_search(&from, &to)) {
			Some(Ok(generation)) => debug!("pathscope: search started on channel {}", generation),
			Some(Err(e)) => warn!("pathscope: search not started: {}", e),
			None => {}
		}
	};

	let on_cancel = move |_| {
		explorer.update(|e| e.cancel());
	};

	view! {
		<div class="search-bar">
			<SearchableDropdown
				label="From"
				placeholder="Select start person"
				selected=start
				api_base=api_base.clone()
				debounce_ms=debounce_ms
				page_size=page_size
			/>
			<SearchableDropdown
				label="To"
				placeholder="Select end person"
				selected=end
				api_base=api_base
				debounce_ms=debounce_ms
				page_size=page_size
			/>
			<div class="search-actions">
				<button class="search-button" prop:disabled=move || !can_search() on:click=on_search>
					{move || if searching() { "Searching..." } else { "Start Search" }}
				</button>
				<Show when=searching>
					<button class="cancel-button" on:click=on_cancel>
						"Cancel"
					</button>
				</Show>
			</div>
			{move || hint().map(|text| view! { <p class="search-hint">{text}</p> })}
		</div>
	}
}
