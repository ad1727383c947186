//! Projection of search progress onto the graph model.
//!
//! The scene owns the [`GraphModel`] and the [`LayoutAssigner`] and is the
//! only place that decides categories: start and end nodes are pinned to
//! their category, explored nodes never demote anything, and path nodes
//! override explored/default styling.

use std::collections::{HashMap, HashSet};

use log::debug;

use super::layout::{LayoutAssigner, LayoutConfig};
use super::model::{EdgeCategory, GraphModel, NodeCategory, NodePatch};

/// Full catalog adjacency as served by `GET /api/graph`.
pub type Adjacency = HashMap<String, Vec<String>>;

/// The search graph plus the rules that style it.
#[derive(Debug, Default)]
pub struct Scene {
	graph: GraphModel,
	layout: LayoutAssigner,
	start: Option<String>,
	end: Option<String>,
	explored: HashSet<String>,
	on_path: HashSet<String>,
	snapshot: Option<Adjacency>,
}

impl Scene {
	/// Empty scene with the given layout tunables.
	pub fn new(layout: LayoutConfig) -> Self {
		Self {
			layout: LayoutAssigner::new(layout),
			..Self::default()
		}
	}

	/// The graph the view draws.
	pub fn graph(&self) -> &GraphModel {
		&self.graph
	}

	/// Mutable access for subscribing views. Categories should only be
	/// changed through the scene.
	pub fn graph_mut(&mut self) -> &mut GraphModel {
		&mut self.graph
	}

	/// Position cache.
	pub fn layout(&self) -> &LayoutAssigner {
		&self.layout
	}

	/// Selected start id.
	pub fn start(&self) -> Option<&str> {
		self.start.as_deref()
	}

	/// Selected end id.
	pub fn end(&self) -> Option<&str> {
		self.end.as_deref()
	}

	fn endpoint_category(&self, id: &str) -> Option<NodeCategory> {
		if self.start.as_deref() == Some(id) {
			Some(NodeCategory::Start)
		} else if self.end.as_deref() == Some(id) {
			Some(NodeCategory::End)
		} else {
			None
		}
	}

	/// Category a node takes when it is not pinned as an endpoint.
	fn resting_category(&self, id: &str) -> NodeCategory {
		if self.on_path.contains(id) {
			NodeCategory::Path
		} else if self.explored.contains(id) {
			NodeCategory::Explored
		} else {
			NodeCategory::Default
		}
	}

	/// Replace the selected endpoints and re-assert their nodes. Nodes that
	/// stop being endpoints go back to their path, explored or default style.
	pub fn set_endpoints(&mut self, start: Option<&str>, end: Option<&str>) {
		let previous = [self.start.take(), self.end.take()];
		self.start = start.filter(|s| !s.is_empty()).map(str::to_owned);
		self.end = end.filter(|s| !s.is_empty()).map(str::to_owned);

		for id in previous.into_iter().flatten() {
			if self.endpoint_category(&id).is_none() {
				let category = self.resting_category(&id);
				self.graph.set_category(&id, category);
			}
		}
		self.seed_endpoints();
	}

	/// Make sure start and end are present with their pinned categories.
	/// Start is seeded at level 0 (the origin), end at level 1.
	pub fn seed_endpoints(&mut self) {
		let seeds = [
			(self.start.clone(), NodeCategory::Start, 0),
			(self.end.clone(), NodeCategory::End, 1),
		];
		for (id, category, level) in seeds {
			let Some(id) = id else { continue };
			if self.graph.contains_node(&id) {
				self.graph.set_category(&id, category);
			} else {
				let position = self.layout.position_for(&id, level);
				self.graph
					.upsert_node(&id, NodePatch::new().position(position).category(category));
			}
		}
	}

	/// Wipe the graph and layout cache, then reseed the endpoints.
	pub fn reset(&mut self) {
		debug!("pathscope: scene reset");
		self.graph.clear();
		self.layout.clear();
		self.explored.clear();
		self.on_path.clear();
		self.seed_endpoints();
	}

	/// Reset when no exploration or path data remains.
	pub fn sync_boundary(&mut self, explored_empty: bool, path_empty: bool) {
		if explored_empty && path_empty {
			self.reset();
		}
	}

	/// Add an explored node if it is not in the graph yet. Existing nodes are
	/// left alone, so redelivery and overlap with path/endpoints are harmless.
	pub fn apply_explored(&mut self, id: &str, level: u32) -> bool {
		self.explored.insert(id.to_owned());
		if self.graph.contains_node(id) {
			return false;
		}
		let position = self.layout.position_for(id, level);
		self.graph.upsert_node(
			id,
			NodePatch::new()
				.position(position)
				.category(NodeCategory::Explored),
		)
	}

	/// Lay the path out on a spiral, style its nodes and connect consecutive
	/// steps.
	pub fn apply_path(&mut self, path: &[String]) {
		for (step, id) in path.iter().enumerate() {
			self.on_path.insert(id.clone());
			let position = self.layout.place_on_path(id, step);
			let category = self.endpoint_category(id).unwrap_or(NodeCategory::Path);
			self.graph.upsert_node(
				id,
				NodePatch::new()
					.position(position)
					.category(category)
					.size(category.size()),
			);
		}
		for pair in path.windows(2) {
			self.graph.upsert_edge(&pair[0], &pair[1], EdgeCategory::Path);
		}
	}

	/// Store the catalog adjacency used for hover details.
	pub fn set_snapshot(&mut self, snapshot: Adjacency) {
		debug!("pathscope: catalog snapshot with {} entries", snapshot.len());
		self.snapshot = Some(snapshot);
	}

	/// Whether the catalog adjacency has loaded.
	pub fn has_snapshot(&self) -> bool {
		self.snapshot.is_some()
	}

	/// Number of catalog links of `id`, if the snapshot is loaded.
	pub fn degree(&self, id: &str) -> Option<usize> {
		self.snapshot.as_ref()?.get(id).map(Vec::len)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::explorer::layout::Point;

	fn path(ids: &[&str]) -> Vec<String> {
		ids.iter().map(|s| s.to_string()).collect()
	}

	fn category(scene: &Scene, id: &str) -> NodeCategory {
		scene.graph().node(id).unwrap().category
	}

	#[test]
	fn endpoints_are_seeded() {
		let mut scene = Scene::default();
		scene.set_endpoints(Some("Alice"), Some("Bob"));
		assert_eq!(category(&scene, "Alice"), NodeCategory::Start);
		assert_eq!(category(&scene, "Bob"), NodeCategory::End);
		assert_eq!(scene.graph().node("Alice").unwrap().position, Point::ORIGIN);
	}

	#[test]
	fn exploration_never_demotes() {
		let mut scene = Scene::default();
		scene.set_endpoints(Some("Alice"), Some("Bob"));
		assert!(!scene.apply_explored("Bob", 3));
		assert!(scene.apply_explored("Carol", 1));
		assert_eq!(category(&scene, "Bob"), NodeCategory::End);
		assert_eq!(category(&scene, "Carol"), NodeCategory::Explored);
	}

	#[test]
	fn path_styles_nodes_and_keeps_endpoints() {
		let mut scene = Scene::default();
		scene.set_endpoints(Some("Alice"), Some("Bob"));
		scene.apply_explored("Carol", 1);
		scene.apply_explored("Dan", 2);
		scene.apply_path(&path(&["Alice", "Carol", "Dan", "Bob"]));

		assert_eq!(category(&scene, "Alice"), NodeCategory::Start);
		assert_eq!(category(&scene, "Bob"), NodeCategory::End);
		assert_eq!(category(&scene, "Carol"), NodeCategory::Path);
		assert_eq!(scene.graph().node_count(), 4);
		assert_eq!(scene.graph().edge_count(), 3);
		assert_eq!(
			scene.graph().node("Dan").unwrap().position,
			Point::polar(2.0 * 1.1, 2.0 * 220.0)
		);
	}

	#[test]
	fn path_does_not_duplicate_edges() {
		let mut scene = Scene::default();
		scene.apply_path(&path(&["X", "Y"]));
		scene.apply_path(&path(&["Y", "X", "Z"]));
		assert_eq!(scene.graph().edge_count(), 2);
		assert!(scene.graph().has_edge("X", "Y"));
		assert!(scene.graph().has_edge("Z", "X"));
	}

	#[test]
	fn reset_clears_and_reseeds() {
		let mut scene = Scene::default();
		scene.set_endpoints(Some("Alice"), Some("Bob"));
		scene.apply_explored("Carol", 1);
		scene.sync_boundary(false, true);
		assert_eq!(scene.graph().node_count(), 3);

		scene.sync_boundary(true, true);
		assert_eq!(scene.graph().node_count(), 2);
		assert!(scene.layout().cached("Carol").is_none());
	}

	#[test]
	fn replaced_endpoint_keeps_path_style() {
		let mut scene = Scene::default();
		scene.set_endpoints(Some("Alice"), Some("Bob"));
		scene.apply_path(&path(&["Alice", "Carol", "Bob"]));
		scene.set_endpoints(Some("Alice"), Some("Eve"));
		assert_eq!(category(&scene, "Bob"), NodeCategory::Path);
		assert_eq!(scene.graph().node("Bob").unwrap().size, NodeCategory::Path.size());
		assert_eq!(category(&scene, "Eve"), NodeCategory::End);
	}

	#[test]
	fn replaced_endpoint_keeps_explored_style() {
		let mut scene = Scene::default();
		scene.set_endpoints(Some("Alice"), Some("Bob"));
		scene.apply_explored("Bob", 2);
		scene.set_endpoints(Some("Carol"), Some("Bob"));
		assert_eq!(category(&scene, "Alice"), NodeCategory::Default);
		scene.set_endpoints(Some("Carol"), Some("Eve"));
		assert_eq!(category(&scene, "Bob"), NodeCategory::Explored);
	}

	#[test]
	fn reset_forgets_membership() {
		let mut scene = Scene::default();
		scene.set_endpoints(Some("Alice"), Some("Bob"));
		scene.apply_path(&path(&["Alice", "Bob"]));
		scene.reset();
		scene.set_endpoints(Some("Alice"), Some("Eve"));
		assert_eq!(category(&scene, "Bob"), NodeCategory::Default);
	}

	#[test]
	fn replaced_endpoint_is_demoted() {
		let mut scene = Scene::default();
		scene.set_endpoints(Some("Alice"), Some("Bob"));
		scene.set_endpoints(Some("Alice"), Some("Eve"));
		assert_eq!(category(&scene, "Bob"), NodeCategory::Default);
		assert_eq!(category(&scene, "Eve"), NodeCategory::End);
	}

	#[test]
	fn degree_needs_snapshot() {
		let mut scene = Scene::default();
		assert_eq!(scene.degree("Alice"), None);
		let mut snapshot = Adjacency::new();
		snapshot.insert("Alice".into(), vec!["Bob".into(), "Carol".into()]);
		scene.set_snapshot(snapshot);
		assert_eq!(scene.degree("Alice"), Some(2));
		assert_eq!(scene.degree("Zed"), None);
	}
}
