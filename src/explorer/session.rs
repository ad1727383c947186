//! Search lifecycle.
//!
//! [`Explorer`] drives one search at a time through
//! `Idle → Connecting → Searching → {Completed, Failed}`. Each call to
//! [`Explorer::start_search`] tears down the previous [`SearchSession`] and
//! creates a fresh one with a new channel generation. Transport events are
//! accepted only from the active generation, so a superseded channel can
//! never touch the current search.
//!
//! The explorer also keeps the user-facing log and forwards exploration and
//! path events to the [`Scene`].

use chrono::{DateTime, Local};
use log::{debug, info, warn};

use super::layout::LayoutConfig;
use super::protocol::{NodeExplored, PathFound, SearchRequest, ServerEvent};
use super::scene::Scene;
use super::transport::{Channel, Connector, Generation, NORMAL_CLOSURE, TransportEvent};
use crate::error::{DecodeError, SearchError};

/// Where the current search is in its lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
	/// No search started, or cancelled.
	#[default]
	Idle,
	/// Channel opening.
	Connecting,
	/// Request sent, events streaming in.
	Searching,
	/// A path was found.
	Completed,
	/// The server or the transport gave up.
	Failed,
}

impl Phase {
	/// Connecting or searching.
	pub fn is_in_progress(self) -> bool {
		matches!(self, Phase::Connecting | Phase::Searching)
	}
}

/// How a log entry is styled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
	/// Progress.
	Info,
	/// Connected or path found.
	Success,
	/// A failure.
	Error,
}

/// One line of the search log.
#[derive(Clone, Debug, PartialEq)]
pub struct LogEntry {
	/// Unique for the lifetime of the explorer.
	pub id: u64,
	/// Local time the entry was recorded.
	pub timestamp: DateTime<Local>,
	/// Message shown to the user.
	pub text: String,
	/// Styling class.
	pub severity: Severity,
}

/// Check a start/end pair before any transport activity.
pub fn validate(from: &str, to: &str) -> Result<SearchRequest, SearchError> {
	let (from, to) = (from.trim(), to.trim());
	if from.is_empty() || to.is_empty() {
		return Err(SearchError::MissingEndpoint);
	}
	if from == to {
		return Err(SearchError::SameEndpoints);
	}
	Ok(SearchRequest::new(from, to))
}

/// The transport side of one search. Dropped (and its channel closed)
/// before the next search starts.
pub struct SearchSession<Ch: Channel> {
	generation: Generation,
	request: SearchRequest,
	channel: Ch,
}

impl<Ch: Channel> SearchSession<Ch> {
	/// Generation of this session's channel.
	pub fn generation(&self) -> Generation {
		self.generation
	}

	/// The validated request.
	pub fn request(&self) -> &SearchRequest {
		&self.request
	}

	fn teardown(mut self) {
		debug!("pathscope: tearing down channel {}", self.generation);
		self.channel.close(NORMAL_CLOSURE);
	}
}

/// Search state machine, log and scene for one view.
pub struct Explorer<C: Connector> {
	connector: C,
	active: Option<SearchSession<C::Channel>>,
	last_generation: Generation,
	phase: Phase,
	connected: bool,
	explored: Vec<String>,
	path: Vec<String>,
	log: Vec<LogEntry>,
	next_log_id: u64,
	scene: Scene,
}

impl<C: Connector> Explorer<C> {
	/// Idle explorer opening channels through `connector`.
	pub fn new(connector: C, layout: LayoutConfig) -> Self {
		Self {
			connector,
			active: None,
			last_generation: 0,
			phase: Phase::Idle,
			connected: false,
			explored: Vec::new(),
			path: Vec::new(),
			log: Vec::new(),
			next_log_id: 0,
			scene: Scene::new(layout),
		}
	}

	/// Current lifecycle phase.
	pub fn phase(&self) -> Phase {
		self.phase
	}

	/// Whether the active channel has opened and not closed.
	pub fn is_connected(&self) -> bool {
		self.connected
	}

	/// A search is in progress; the search action is unavailable.
	pub fn is_searching(&self) -> bool {
		self.phase.is_in_progress()
	}

	/// Explored ids in arrival order.
	pub fn explored(&self) -> &[String] {
		&self.explored
	}

	/// Final path, empty until found.
	pub fn path(&self) -> &[String] {
		&self.path
	}

	/// Log of the current search, oldest first.
	pub fn log(&self) -> &[LogEntry] {
		&self.log
	}

	/// Graph and styling state.
	pub fn scene(&self) -> &Scene {
		&self.scene
	}

	/// Mutable scene, e.g. to subscribe to the graph.
	pub fn scene_mut(&mut self) -> &mut Scene {
		&mut self.scene
	}

	/// The session of the running (or last finished) search.
	pub fn active(&self) -> Option<&SearchSession<C::Channel>> {
		self.active.as_ref()
	}

	/// Update the selected endpoints. With no search data on screen this is
	/// a session boundary and the scene starts over.
	pub fn set_endpoints(&mut self, start: Option<&str>, end: Option<&str>) {
		self.scene.set_endpoints(start, end);
		self.scene
			.sync_boundary(self.explored.is_empty(), self.path.is_empty());
	}

	/// Begin a new search, replacing any search in flight.
	pub fn start_search(&mut self, from: &str, to: &str) -> Result<Generation, SearchError> {
		let request = validate(from, to)?;

		if let Some(previous) = self.active.take() {
			previous.teardown();
		}
		self.explored.clear();
		self.path.clear();
		self.log.clear();
		self.connected = false;
		self.set_endpoints(Some(&request.start_node), Some(&request.end_node));

		self.last_generation += 1;
		let generation = self.last_generation;
		info!(
			"pathscope: search {} from {} to {}",
			generation, request.start_node, request.end_node
		);

		match self.connector.open(generation) {
			Ok(channel) => {
				self.active = Some(SearchSession {
					generation,
					request,
					channel,
				});
				self.phase = Phase::Connecting;
			}
			Err(e) => {
				warn!("pathscope: {}", e);
				self.phase = Phase::Failed;
				self.push_log("Failed to connect to server", Severity::Error);
			}
		}
		Ok(generation)
	}

	/// Stop the current search and clear its results. The log is kept.
	pub fn cancel(&mut self) {
		if let Some(previous) = self.active.take() {
			previous.teardown();
		}
		self.connected = false;
		self.phase = Phase::Idle;
		self.explored.clear();
		self.path.clear();
		self.scene.sync_boundary(true, true);
	}

	/// Wipe graph and layout cache, e.g. when the view unmounts.
	pub fn reset_scene(&mut self) {
		self.scene.reset();
	}

	/// Apply an event from the transport. Returns false if it was ignored
	/// because it came from a channel that is no longer active.
	pub fn handle_transport_event(&mut self, generation: Generation, event: TransportEvent) -> bool {
		match &self.active {
			Some(active) if active.generation == generation => {}
			_ => {
				debug!("pathscope: ignoring {:?} from stale channel {}", event, generation);
				return false;
			}
		}

		match event {
			TransportEvent::Opened => self.on_opened(),
			TransportEvent::Message(text) => self.on_frame(&text),
			TransportEvent::Binary => self.on_decode_error(DecodeError::Binary),
			TransportEvent::Error => {
				warn!("pathscope: channel {} reported an error", generation);
				self.push_log("Connection error occurred", Severity::Error);
				self.fail_if_in_progress();
			}
			TransportEvent::Closed { code, reason } => {
				self.connected = false;
				if code == NORMAL_CLOSURE {
					self.push_log("Connection closed", Severity::Info);
				} else {
					warn!("pathscope: channel {} closed with {} {}", generation, code, reason);
					self.push_log("Connection closed unexpectedly", Severity::Error);
				}
				self.fail_if_in_progress();
			}
		}
		true
	}

	fn on_opened(&mut self) {
		let Some(active) = self.active.as_mut() else {
			return;
		};
		self.connected = true;
		let request = active.request.clone();
		let sent = request
			.to_frame()
			.map_err(|e| e.to_string())
			.and_then(|frame| active.channel.send(&frame).map_err(|e| e.to_string()));

		self.push_log("Connected to pathfinding server", Severity::Success);
		match sent {
			Ok(()) => {
				self.phase = Phase::Searching;
				self.push_log(
					format!(
						"Searching path from {} to {}...",
						request.start_node, request.end_node
					),
					Severity::Info,
				);
			}
			Err(e) => {
				warn!("pathscope: sending search request failed: {}", e);
				self.phase = Phase::Failed;
				self.push_log("Failed to send search request", Severity::Error);
			}
		}
	}

	fn on_frame(&mut self, text: &str) {
		let event = match ServerEvent::decode(text) {
			Ok(event) => event,
			Err(e) => return self.on_decode_error(e),
		};
		if self.phase != Phase::Searching {
			debug!("pathscope: dropping {:?} while {:?}", event, self.phase);
			return;
		}
		match event {
			ServerEvent::NodeExplored(explored) => self.on_node_explored(explored),
			ServerEvent::PathFound(found) => self.on_path_found(found),
			ServerEvent::Error(message) => {
				info!("pathscope: server error: {}", message);
				self.phase = Phase::Failed;
				self.push_log(message, Severity::Error);
			}
		}
	}

	fn on_decode_error(&mut self, error: DecodeError) {
		warn!("pathscope: {}", error);
		match error {
			DecodeError::UnknownType(kind) => {
				self.push_log(format!("Unknown message type: {}", kind), Severity::Error)
			}
			_ => self.push_log("Failed to parse server message", Severity::Error),
		}
	}

	fn on_node_explored(&mut self, explored: NodeExplored) {
		self.explored.push(explored.node.clone());
		// Fallback when the server omits the depth: ordinal of first sighting.
		let level = explored.level.unwrap_or_else(|| {
			let first = self
				.explored
				.iter()
				.position(|id| *id == explored.node)
				.unwrap_or(0);
			(first as u32 + 1).max(1)
		});
		self.scene.apply_explored(&explored.node, level);
		self.push_log(
			format!("Level {}: Explored {}", level, explored.node),
			Severity::Info,
		);
	}

	fn on_path_found(&mut self, found: PathFound) {
		let steps = found.steps();
		self.push_log(
			format!("Path found: {} ({} steps)", found.path.join(" → "), steps),
			Severity::Success,
		);
		self.path = found.path;
		self.phase = Phase::Completed;
		self.scene.apply_path(&self.path);
		info!("pathscope: path of {} steps", steps);
	}

	fn fail_if_in_progress(&mut self) {
		if self.phase.is_in_progress() {
			self.phase = Phase::Failed;
		}
	}

	fn push_log(&mut self, text: impl Into<String>, severity: Severity) {
		let id = self.next_log_id;
		self.next_log_id += 1;
		self.log.push(LogEntry {
			id,
			timestamp: Local::now(),
			text: text.into(),
			severity,
		});
	}
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;
	use std::rc::Rc;

	use super::*;
	use crate::error::TransportError;
	use crate::explorer::model::NodeCategory;

	#[derive(Default)]
	struct Wire {
		opened: Vec<Generation>,
		sent: Vec<(Generation, String)>,
		closed: Vec<(Generation, u16)>,
		refuse: bool,
		refuse_send: bool,
	}

	struct FakeConnector(Rc<RefCell<Wire>>);

	struct FakeChannel {
		generation: Generation,
		wire: Rc<RefCell<Wire>>,
	}

	impl Connector for FakeConnector {
		type Channel = FakeChannel;

		fn open(&mut self, generation: Generation) -> Result<FakeChannel, TransportError> {
			let mut wire = self.0.borrow_mut();
			if wire.refuse {
				return Err(TransportError::Open("refused".into()));
			}
			wire.opened.push(generation);
			Ok(FakeChannel {
				generation,
				wire: self.0.clone(),
			})
		}
	}

	impl Channel for FakeChannel {
		fn send(&mut self, frame: &str) -> Result<(), TransportError> {
			let mut wire = self.wire.borrow_mut();
			if wire.refuse_send {
				return Err(TransportError::Send("socket not open".into()));
			}
			wire.sent.push((self.generation, frame.to_owned()));
			Ok(())
		}

		fn close(&mut self, code: u16) {
			self.wire.borrow_mut().closed.push((self.generation, code));
		}
	}

	fn explorer() -> (Explorer<FakeConnector>, Rc<RefCell<Wire>>) {
		let wire = Rc::new(RefCell::new(Wire::default()));
		(
			Explorer::new(FakeConnector(wire.clone()), LayoutConfig::default()),
			wire,
		)
	}

	fn message(text: &str) -> TransportEvent {
		TransportEvent::Message(text.to_owned())
	}

	fn texts(explorer: &Explorer<FakeConnector>) -> Vec<&str> {
		explorer.log().iter().map(|e| e.text.as_str()).collect()
	}

	#[test]
	fn validation_rejects_before_transport() {
		let (mut explorer, wire) = explorer();
		assert_eq!(explorer.start_search("", "Bob"), Err(SearchError::MissingEndpoint));
		assert_eq!(explorer.start_search("Bob", "  "), Err(SearchError::MissingEndpoint));
		assert_eq!(explorer.start_search("Bob", "Bob"), Err(SearchError::SameEndpoints));
		assert!(wire.borrow().opened.is_empty());
		assert_eq!(explorer.phase(), Phase::Idle);
	}

	#[test]
	fn open_sends_request_and_starts_searching() {
		let (mut explorer, wire) = explorer();
		let generation = explorer.start_search("Alice", "Bob").unwrap();
		assert_eq!(explorer.phase(), Phase::Connecting);
		assert!(explorer.is_searching());

		assert!(explorer.handle_transport_event(generation, TransportEvent::Opened));
		assert_eq!(explorer.phase(), Phase::Searching);
		assert!(explorer.is_connected());
		assert_eq!(
			wire.borrow().sent,
			vec![(generation, r#"{"startNode":"Alice","endNode":"Bob"}"#.to_owned())]
		);
		assert_eq!(
			texts(&explorer),
			["Connected to pathfinding server", "Searching path from Alice to Bob..."]
		);
		assert_eq!(explorer.log()[0].severity, Severity::Success);
	}

	#[test]
	fn open_failure_fails_search() {
		let (mut explorer, wire) = explorer();
		wire.borrow_mut().refuse = true;
		explorer.start_search("Alice", "Bob").unwrap();
		assert_eq!(explorer.phase(), Phase::Failed);
		assert!(!explorer.is_searching());
		assert_eq!(texts(&explorer), ["Failed to connect to server"]);
	}

	#[test]
	fn level_falls_back_to_ordinal() {
		let (mut explorer, _) = explorer();
		let g = explorer.start_search("Alice", "Bob").unwrap();
		explorer.handle_transport_event(g, TransportEvent::Opened);
		explorer.handle_transport_event(g, message(r#"{"type":"node_explored","data":{"node":"Carol"}}"#));
		explorer.handle_transport_event(g, message(r#"{"type":"node_explored","data":{"node":"Dan"}}"#));
		let log = texts(&explorer);
		assert_eq!(log[2], "Level 1: Explored Carol");
		assert_eq!(log[3], "Level 2: Explored Dan");
		assert_eq!(explorer.scene().layout().level_of("Dan"), Some(2));
	}

	#[test]
	fn duplicate_exploration_is_idempotent_in_the_model() {
		let (mut explorer, _) = explorer();
		let g = explorer.start_search("Alice", "Bob").unwrap();
		explorer.handle_transport_event(g, TransportEvent::Opened);
		for _ in 0..2 {
			for id in ["A", "B", "C"] {
				let frame = format!(r#"{{"type":"node_explored","data":{{"level":1,"node":"{}"}}}}"#, id);
				explorer.handle_transport_event(g, message(&frame));
			}
		}
		assert_eq!(explorer.explored().len(), 6);
		// three explored plus the two endpoints
		assert_eq!(explorer.scene().graph().node_count(), 5);
	}

	#[test]
	fn server_error_keeps_partial_results() {
		let (mut explorer, _) = explorer();
		let g = explorer.start_search("Alice", "Bob").unwrap();
		explorer.handle_transport_event(g, TransportEvent::Opened);
		explorer.handle_transport_event(g, message(r#"{"type":"node_explored","data":{"level":1,"node":"Carol"}}"#));
		explorer.handle_transport_event(g, message(r#"{"type":"error","data":"no path found"}"#));

		assert_eq!(explorer.phase(), Phase::Failed);
		assert!(!explorer.is_searching());
		assert_eq!(explorer.explored(), ["Carol"]);
		assert!(explorer.scene().graph().contains_node("Carol"));
		let last = explorer.log().last().unwrap();
		assert_eq!((last.text.as_str(), last.severity), ("no path found", Severity::Error));
	}

	#[test]
	fn unknown_type_is_logged_and_ignored() {
		let (mut explorer, _) = explorer();
		let g = explorer.start_search("Alice", "Bob").unwrap();
		explorer.handle_transport_event(g, TransportEvent::Opened);
		explorer.handle_transport_event(g, message(r#"{"type":"level_done","data":{}}"#));
		assert_eq!(explorer.phase(), Phase::Searching);
		assert_eq!(texts(&explorer).last(), Some(&"Unknown message type: level_done"));
	}

	#[test]
	fn unexpected_close_fails_search() {
		let (mut explorer, _) = explorer();
		let g = explorer.start_search("Alice", "Bob").unwrap();
		explorer.handle_transport_event(g, TransportEvent::Opened);
		explorer.handle_transport_event(
			g,
			TransportEvent::Closed {
				code: 1006,
				reason: String::new(),
			},
		);
		assert_eq!(explorer.phase(), Phase::Failed);
		assert!(!explorer.is_connected());
		assert_eq!(texts(&explorer).last(), Some(&"Connection closed unexpectedly"));
	}

	#[test]
	fn normal_close_after_completion_keeps_result() {
		let (mut explorer, _) = explorer();
		let g = explorer.start_search("Alice", "Bob").unwrap();
		explorer.handle_transport_event(g, TransportEvent::Opened);
		explorer.handle_transport_event(g, message(r#"{"type":"path_found","data":{"path":["Alice","Bob"],"length":1}}"#));
		explorer.handle_transport_event(
			g,
			TransportEvent::Closed {
				code: NORMAL_CLOSURE,
				reason: String::new(),
			},
		);
		assert_eq!(explorer.phase(), Phase::Completed);
		assert_eq!(explorer.path(), ["Alice", "Bob"]);
		assert_eq!(texts(&explorer).last(), Some(&"Connection closed"));
	}

	#[test]
	fn cancel_closes_channel_and_clears_results() {
		let (mut explorer, wire) = explorer();
		let g = explorer.start_search("Alice", "Bob").unwrap();
		explorer.handle_transport_event(g, TransportEvent::Opened);
		explorer.handle_transport_event(g, message(r#"{"type":"node_explored","data":{"level":1,"node":"Carol"}}"#));
		let log_len = explorer.log().len();

		explorer.cancel();
		assert_eq!(wire.borrow().closed, vec![(g, NORMAL_CLOSURE)]);
		assert_eq!(explorer.phase(), Phase::Idle);
		assert!(explorer.explored().is_empty());
		assert_eq!(explorer.log().len(), log_len);
		assert!(!explorer.scene().graph().contains_node("Carol"));
		assert!(explorer.scene().graph().contains_node("Alice"));

		// late frames from the cancelled channel are dropped
		assert!(!explorer.handle_transport_event(g, message(r#"{"type":"node_explored","data":{"level":1,"node":"Dan"}}"#)));
	}

	#[test]
	fn endpoint_change_resets_idle_scene() {
		let (mut explorer, _) = explorer();
		explorer.set_endpoints(Some("Alice"), Some("Bob"));
		assert_eq!(explorer.scene().graph().node_count(), 2);
		explorer.set_endpoints(Some("Alice"), Some("Eve"));
		assert_eq!(explorer.scene().graph().node_count(), 2);
		assert_eq!(
			explorer.scene().graph().node("Eve").unwrap().category,
			NodeCategory::End
		);
	}

	#[test]
	fn failed_request_send_fails_search() {
		let (mut explorer, wire) = explorer();
		wire.borrow_mut().refuse_send = true;
		let g = explorer.start_search("Alice", "Bob").unwrap();
		explorer.handle_transport_event(g, TransportEvent::Opened);
		assert_eq!(explorer.phase(), Phase::Failed);
		assert!(!explorer.is_searching());
		assert!(wire.borrow().sent.is_empty());
		assert_eq!(
			texts(&explorer),
			["Connected to pathfinding server", "Failed to send search request"]
		);
		assert_eq!(explorer.log()[1].severity, Severity::Error);

		// Frames that arrive anyway do not revive the search.
		explorer.handle_transport_event(g, message(r#"{"type":"node_explored","data":{"level":1,"node":"Carol"}}"#));
		assert!(explorer.explored().is_empty());

		wire.borrow_mut().refuse_send = false;
		let next = explorer.start_search("Alice", "Bob").unwrap();
		explorer.handle_transport_event(next, TransportEvent::Opened);
		assert_eq!(explorer.phase(), Phase::Searching);
	}

	#[test]
	fn transport_error_while_connecting_fails_search() {
		let (mut explorer, _) = explorer();
		let g = explorer.start_search("Alice", "Bob").unwrap();
		assert!(explorer.handle_transport_event(g, TransportEvent::Error));
		assert_eq!(explorer.phase(), Phase::Failed);
		assert!(!explorer.is_searching());
		assert_eq!(texts(&explorer), ["Connection error occurred"]);
		assert_eq!(explorer.log()[0].severity, Severity::Error);

		let next = explorer.start_search("Alice", "Bob").unwrap();
		assert!(next > g);
		assert_eq!(explorer.phase(), Phase::Connecting);
	}

	#[test]
	fn transport_error_while_searching_keeps_partial_results() {
		let (mut explorer, _) = explorer();
		let g = explorer.start_search("Alice", "Bob").unwrap();
		explorer.handle_transport_event(g, TransportEvent::Opened);
		explorer.handle_transport_event(g, message(r#"{"type":"node_explored","data":{"level":1,"node":"Carol"}}"#));
		explorer.handle_transport_event(g, TransportEvent::Error);

		assert_eq!(explorer.phase(), Phase::Failed);
		assert!(!explorer.is_searching());
		assert!(explorer.scene().graph().contains_node("Carol"));
		assert_eq!(texts(&explorer).last(), Some(&"Connection error occurred"));
	}

	#[test]
	fn transport_error_after_completion_only_logs() {
		let (mut explorer, _) = explorer();
		let g = explorer.start_search("Alice", "Bob").unwrap();
		explorer.handle_transport_event(g, TransportEvent::Opened);
		explorer.handle_transport_event(g, message(r#"{"type":"path_found","data":{"path":["Alice","Bob"]}}"#));
		explorer.handle_transport_event(g, TransportEvent::Error);
		assert_eq!(explorer.phase(), Phase::Completed);
		assert_eq!(texts(&explorer).last(), Some(&"Connection error occurred"));
	}

	#[test]
	fn binary_frame_is_logged_and_ignored() {
		let (mut explorer, _) = explorer();
		let g = explorer.start_search("Alice", "Bob").unwrap();
		explorer.handle_transport_event(g, TransportEvent::Opened);
		assert!(explorer.handle_transport_event(g, TransportEvent::Binary));
		assert_eq!(explorer.phase(), Phase::Searching);
		assert_eq!(texts(&explorer).last(), Some(&"Failed to parse server message"));
	}

	#[test]
	fn undecodable_frames_are_logged_after_completion() {
		let (mut explorer, _) = explorer();
		let g = explorer.start_search("Alice", "Bob").unwrap();
		explorer.handle_transport_event(g, TransportEvent::Opened);
		explorer.handle_transport_event(g, message(r#"{"type":"path_found","data":{"path":["Alice","Bob"]}}"#));
		let before = explorer.log().len();

		explorer.handle_transport_event(g, message("{not json"));
		explorer.handle_transport_event(g, message(r#"{"type":"level_done","data":{}}"#));
		assert_eq!(
			texts(&explorer)[before..],
			["Failed to parse server message", "Unknown message type: level_done"]
		);

		// Well-formed events no longer change anything.
		explorer.handle_transport_event(g, message(r#"{"type":"error","data":"late"}"#));
		explorer.handle_transport_event(g, message(r#"{"type":"node_explored","data":{"level":3,"node":"Zed"}}"#));
		assert_eq!(explorer.phase(), Phase::Completed);
		assert_eq!(explorer.log().len(), before + 2);
		assert!(!explorer.scene().graph().contains_node("Zed"));
	}

	#[test]
	fn log_ids_stay_unique_across_searches() {
		let (mut explorer, _) = explorer();
		let g = explorer.start_search("Alice", "Bob").unwrap();
		explorer.handle_transport_event(g, TransportEvent::Opened);
		let first = explorer.log()[0].id;
		let g = explorer.start_search("Alice", "Eve").unwrap();
		explorer.handle_transport_event(g, TransportEvent::Opened);
		assert!(explorer.log()[0].id > first);
	}
}
