//! Search log panel with connection indicator.

use leptos::html::Div;
use leptos::prelude::*;

use crate::explorer::{ExplorerHandle, LogEntry, Phase, Severity};

fn severity_class(severity: Severity) -> &'static str {
	match severity {
		Severity::Info => "log-info",
		Severity::Success => "log-success",
		Severity::Error => "log-error",
	}
}

fn phase_label(phase: Phase) -> &'static str {
	match phase {
		Phase::Idle => "Idle",
		Phase::Connecting => "Connecting",
		Phase::Searching => "Searching",
		Phase::Completed => "Completed",
		Phase::Failed => "Failed",
	}
}

/// Lists log entries oldest first and keeps the newest one in view.
#[component]
pub fn LogViewer(explorer: ExplorerHandle) -> impl IntoView {
	let list_ref = NodeRef::<Div>::new();
	let connected = move || explorer.with(|e| e.is_connected()).unwrap_or(false);
	let phase = move || explorer.with(|e| e.phase()).unwrap_or_default();
	let count = move || explorer.with(|e| e.log().len()).unwrap_or(0);
	let has_entries = move || count() > 0;
	let entries = move || explorer.with(|e| e.log().to_vec()).unwrap_or_default();

	Effect::new(move |_| {
		count();
		// Scroll once the new rows are in the DOM.
		request_animation_frame(move || {
			if let Some(list) = list_ref.get_untracked() {
				list.set_scroll_top(list.scroll_height());
			}
		});
	});

	view! {
		<div class="log-viewer">
			<div class="log-header">
				<h2>"Search Log"</h2>
				<span class="phase">{move || phase_label(phase())}</span>
				<span class="connection-status" class:connected=connected>
					{move || if connected() { "Connected" } else { "Disconnected" }}
				</span>
			</div>
			<div class="log-entries" node_ref=list_ref>
				<Show
					when=has_entries
					fallback=|| view! { <p class="log-empty">"No activity yet. Pick two people and start a search."</p> }
				>
					<For
						each=entries
						key=|entry| entry.id
						children=|entry: LogEntry| {
							view! {
								<div class=format!("log-entry {}", severity_class(entry.severity))>
									<span class="log-time">{entry.timestamp.format("%H:%M:%S").to_string()}</span>
									<span class="log-text">{entry.text}</span>
								</div>
							}
						}
					/>
				</Show>
			</div>
		</div>
	}
}
