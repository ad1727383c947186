//! Incremental node/edge store backing the network view.
//!
//! Nodes are keyed by their entity name and are never recreated once added:
//! later mentions patch them in place. Edges are undirected and keyed by the
//! sorted endpoint pair, so at most one edge exists per pair of nodes.
//!
//! The model knows nothing about rendering. Views subscribe to
//! [`GraphChange`] notifications and pull whatever they need from the model.

use std::collections::{HashMap, HashSet};

use super::layout::Point;

/// Visual role of a node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NodeCategory {
	/// Search origin.
	Start,
	/// Search target.
	End,
	/// On the discovered path.
	Path,
	/// Visited by the search.
	Explored,
	/// Anything else.
	#[default]
	Default,
}

impl NodeCategory {
	/// Display radius in screen pixels at 100% zoom.
	pub fn size(self) -> f64 {
		match self {
			NodeCategory::Start | NodeCategory::End => 8.0,
			NodeCategory::Path => 6.0,
			NodeCategory::Explored => 2.5,
			NodeCategory::Default => 3.0,
		}
	}

	/// Start and end nodes keep their category no matter what else happens.
	pub fn is_endpoint(self) -> bool {
		matches!(self, NodeCategory::Start | NodeCategory::End)
	}
}

/// Visual role of an edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EdgeCategory {
	/// Between consecutive path nodes.
	Path,
	/// Any other edge.
	#[default]
	Default,
}

/// A node as the view sees it.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	/// Entity name, unique within the graph.
	pub id: String,
	/// World position, fixed once assigned.
	pub position: Point,
	/// Current visual role.
	pub category: NodeCategory,
	/// Radius at 100% zoom.
	pub size: f64,
}

/// Identity of an undirected edge: the endpoint ids in sorted order.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey(String, String);

impl EdgeKey {
	/// Key for the edge between `a` and `b`, in either order.
	pub fn new(a: &str, b: &str) -> Self {
		if a <= b {
			Self(a.to_owned(), b.to_owned())
		} else {
			Self(b.to_owned(), a.to_owned())
		}
	}

	/// Endpoints in sorted order.
	pub fn endpoints(&self) -> (&str, &str) {
		(&self.0, &self.1)
	}
}

/// An undirected edge.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphEdge {
	/// Endpoint pair.
	pub key: EdgeKey,
	/// Visual role.
	pub category: EdgeCategory,
}

/// Partial node update. Unset fields are left untouched on existing nodes
/// and defaulted on new ones.
#[derive(Clone, Debug, Default)]
pub struct NodePatch {
	/// New position.
	pub position: Option<Point>,
	/// New category.
	pub category: Option<NodeCategory>,
	/// New radius.
	pub size: Option<f64>,
}

impl NodePatch {
	/// Empty value.
	pub fn new() -> Self {
		Self::default()
	}

	/// Set the position.
	pub fn position(mut self, position: Point) -> Self {
		self.position = Some(position);
		self
	}

	/// Set the category.
	pub fn category(mut self, category: NodeCategory) -> Self {
		self.category = Some(category);
		self
	}

	/// Set the radius.
	pub fn size(mut self, size: f64) -> Self {
		self.size = Some(size);
		self
	}
}

/// A single observable mutation.
#[derive(Clone, Debug, PartialEq)]
pub enum GraphChange {
	/// A node was inserted.
	NodeAdded(String),
	/// A node's position, category or size changed.
	NodeUpdated(String),
	/// An edge was inserted.
	EdgeAdded(EdgeKey),
	/// Everything was removed.
	Cleared,
}

/// Handle returned by [`GraphModel::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&GraphChange)>;

/// Axis-aligned bounding box of all node positions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
	/// Smallest x and y.
	pub min: Point,
	/// Largest x and y.
	pub max: Point,
}

impl Bounds {
	/// Horizontal extent.
	pub fn width(&self) -> f64 {
		self.max.x - self.min.x
	}

	/// Vertical extent.
	pub fn height(&self) -> f64 {
		self.max.y - self.min.y
	}

	/// Midpoint of the box.
	pub fn center(&self) -> Point {
		Point {
			x: (self.min.x + self.max.x) / 2.0,
			y: (self.min.y + self.max.y) / 2.0,
		}
	}
}

/// Nodes and edges of the search graph, with change listeners.
#[derive(Default)]
pub struct GraphModel {
	nodes: Vec<GraphNode>,
	index: HashMap<String, usize>,
	edges: Vec<GraphEdge>,
	edge_index: HashSet<EdgeKey>,
	listeners: Vec<(SubscriptionId, Listener)>,
	next_subscription: u64,
	revision: u64,
}

impl std::fmt::Debug for GraphModel {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("GraphModel")
			.field("nodes", &self.nodes.len())
			.field("edges", &self.edges.len())
			.field("listeners", &self.listeners.len())
			.field("revision", &self.revision)
			.finish()
	}
}

impl GraphModel {
	/// Empty value.
	pub fn new() -> Self {
		Self::default()
	}

	/// Register a change listener. Listeners run synchronously inside the
	/// mutating call and must not touch the model themselves.
	pub fn subscribe(&mut self, listener: impl FnMut(&GraphChange) + 'static) -> SubscriptionId {
		let id = SubscriptionId(self.next_subscription);
		self.next_subscription += 1;
		self.listeners.push((id, Box::new(listener)));
		id
	}

	/// Returns false if `id` was not subscribed.
	pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
		let before = self.listeners.len();
		self.listeners.retain(|(sid, _)| *sid != id);
		self.listeners.len() != before
	}

	fn notify(&mut self, change: GraphChange) {
		self.revision += 1;
		for (_, listener) in &mut self.listeners {
			listener(&change);
		}
	}

	/// Bumped on every effective mutation.
	pub fn revision(&self) -> u64 {
		self.revision
	}

	/// Create `id` if absent, otherwise patch the supplied attributes only.
	/// Returns true if anything changed.
	pub fn upsert_node(&mut self, id: &str, patch: NodePatch) -> bool {
		if let Some(&i) = self.index.get(id) {
			let node = &mut self.nodes[i];
			let mut changed = false;
			if let Some(position) = patch.position.filter(|p| *p != node.position) {
				node.position = position;
				changed = true;
			}
			if let Some(category) = patch.category.filter(|c| *c != node.category) {
				node.category = category;
				changed = true;
			}
			if let Some(size) = patch.size.filter(|s| *s != node.size) {
				node.size = size;
				changed = true;
			}
			if changed {
				self.notify(GraphChange::NodeUpdated(id.to_owned()));
			}
			return changed;
		}

		let category = patch.category.unwrap_or_default();
		self.index.insert(id.to_owned(), self.nodes.len());
		self.nodes.push(GraphNode {
			id: id.to_owned(),
			position: patch.position.unwrap_or_default(),
			category,
			size: patch.size.unwrap_or_else(|| category.size()),
		});
		self.notify(GraphChange::NodeAdded(id.to_owned()));
		true
	}

	/// Add an undirected edge unless one already exists between `a` and `b`.
	/// Both endpoints must already be nodes. Returns true if an edge was added.
	pub fn upsert_edge(&mut self, a: &str, b: &str, category: EdgeCategory) -> bool {
		if a == b || !self.index.contains_key(a) || !self.index.contains_key(b) {
			return false;
		}
		let key = EdgeKey::new(a, b);
		if !self.edge_index.insert(key.clone()) {
			return false;
		}
		self.edges.push(GraphEdge {
			key: key.clone(),
			category,
		});
		self.notify(GraphChange::EdgeAdded(key));
		true
	}

	/// Change the category (and derived size) without moving the node.
	/// Returns false if the node does not exist.
	pub fn set_category(&mut self, id: &str, category: NodeCategory) -> bool {
		if !self.index.contains_key(id) {
			return false;
		}
		self.upsert_node(id, NodePatch::new().category(category).size(category.size()));
		true
	}

	/// Returns false if the node does not exist.
	pub fn set_position(&mut self, id: &str, position: Point) -> bool {
		if !self.index.contains_key(id) {
			return false;
		}
		self.upsert_node(id, NodePatch::new().position(position));
		true
	}

	/// Drop every node and edge. Listeners stay subscribed.
	pub fn clear(&mut self) {
		if self.nodes.is_empty() && self.edges.is_empty() {
			return;
		}
		self.nodes.clear();
		self.index.clear();
		self.edges.clear();
		self.edge_index.clear();
		self.notify(GraphChange::Cleared);
	}

	/// Look up a node by id.
	pub fn node(&self, id: &str) -> Option<&GraphNode> {
		self.index.get(id).map(|&i| &self.nodes[i])
	}

	/// Whether a node with this id exists.
	pub fn contains_node(&self, id: &str) -> bool {
		self.index.contains_key(id)
	}

	/// Whether `a` and `b` are connected, in either direction.
	pub fn has_edge(&self, a: &str, b: &str) -> bool {
		self.edge_index.contains(&EdgeKey::new(a, b))
	}

	/// Nodes in insertion order.
	pub fn nodes(&self) -> &[GraphNode] {
		&self.nodes
	}

	/// Edges in insertion order.
	pub fn edges(&self) -> &[GraphEdge] {
		&self.edges
	}

	/// Number of nodes.
	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	/// Number of edges.
	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}

	/// Whether the graph has no nodes.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Ids of nodes sharing an edge with `id`.
	pub fn neighbors<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a str> + 'a {
		self.edges.iter().filter_map(move |edge| {
			let (a, b) = edge.key.endpoints();
			if a == id {
				Some(b)
			} else if b == id {
				Some(a)
			} else {
				None
			}
		})
	}

	/// Bounding box of every node, `None` when empty.
	pub fn bounds(&self) -> Option<Bounds> {
		let first = self.nodes.first()?.position;
		let mut bounds = Bounds {
			min: first,
			max: first,
		};
		for node in &self.nodes[1..] {
			let p = node.position;
			bounds.min.x = bounds.min.x.min(p.x);
			bounds.min.y = bounds.min.y.min(p.y);
			bounds.max.x = bounds.max.x.max(p.x);
			bounds.max.y = bounds.max.y.max(p.y);
		}
		Some(bounds)
	}
}
