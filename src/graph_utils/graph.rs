use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::geometry::{
    self, Point, boundary_point, point_bezier_distance, point_in_circle, point_segment_distance,
};

// Basic type aliases for clarity
pub type NodeId = Uuid;
pub type EdgeId = Uuid;

/// Default radius for newly created nodes, in world units.
pub const DEFAULT_NODE_RADIUS: f32 = 30.0;

/// Curvature assigned when an edge is forced to bezier because a
/// reciprocal edge exists. Positive bends to the left of from->to, so
/// the two arrows separate visually.
pub const DEFAULT_CURVATURE: f32 = 0.25;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255 };
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub label: String,
    pub color: Color,
    /// Additional free-text notes attached to the node.
    pub metadata: String,
    /// Locked nodes keep their position through drags and spinner edits.
    pub locked: bool,
}

impl Node {
    pub fn contains(&self, px: f32, py: f32) -> bool {
        point_in_circle(px, py, self.x, self.y, self.radius)
    }

    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Rendering style of an edge.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplineKind {
    Straight,
    Bezier,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub from: NodeId,
    pub to: NodeId,
    pub spline: SplineKind,
    pub curvature: f32,
    /// Optional display text; empty means none.
    pub text: String,
}

/// Rim-to-rim geometry of an edge, for hit-testing and host rendering.
#[derive(Copy, Clone, Debug)]
pub struct EdgePath {
    pub from: Point,
    pub to: Point,
    /// Present for bezier edges only.
    pub control: Option<Point>,
}

impl EdgePath {
    /// Direction of travel into the tip, in radians. Feed this to
    /// [`geometry::arrowhead_rays`] to draw the arrowhead.
    pub fn approach_angle(&self) -> f32 {
        let base = self.control.unwrap_or(self.from);
        (self.to.y - base.y).atan2(self.to.x - base.x)
    }
}

/// Serializable snapshot of a graph: the unit exchanged with the
/// persistence layer and with clipboard copy.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub start_node: Option<NodeId>,
}

/// The node/edge container.
///
/// Nodes and edges live in insertion-ordered vectors; edges reference
/// nodes by id, never by ownership. Insertion order drives hit-test
/// stacking (later nodes win ties) and deterministic cycle enumeration.
/// Graphs are small and interactive, so lookups are linear scans.
#[derive(Clone, Debug, Default)]
pub struct GraphModel {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    start_node: Option<NodeId>,
    // Bumped on every structural mutation; analysis results stamp it to
    // detect staleness without subscribing to the graph.
    rev: u64,
}

impl GraphModel {
    pub fn new() -> Self {
        GraphModel::default()
    }

    /// Structural revision counter. Any add/remove/retarget/clear/restore
    /// bumps this.
    pub fn rev(&self) -> u64 {
        self.rev
    }

    fn touch(&mut self) {
        self.rev = self.rev.wrapping_add(1);
    }

    // ---- nodes ----

    /// Add a node with default radius and color and return its new id.
    pub fn add_node(&mut self, x: f32, y: f32, label: impl Into<String>) -> NodeId {
        let id = Uuid::now_v7();
        self.nodes.push(Node {
            id,
            x,
            y,
            radius: DEFAULT_NODE_RADIUS,
            label: label.into(),
            color: Color::WHITE,
            metadata: String::new(),
            locked: false,
        });
        self.touch();
        id
    }

    /// Insert a fully formed node, preserving its id. Used by paste.
    pub(crate) fn insert_node(&mut self, node: Node) {
        self.nodes.push(node);
        self.touch();
    }

    /// Remove a node and everything referencing it: edges from or to it
    /// and the start-node designation. Removing an absent node is a
    /// no-op.
    pub fn remove_node(&mut self, id: NodeId) -> bool {
        let before = self.nodes.len();
        self.nodes.retain(|n| n.id != id);
        if self.nodes.len() == before {
            return false;
        }
        self.edges.retain(|e| e.from != id && e.to != id);
        if self.start_node == Some(id) {
            self.start_node = None;
        }
        self.touch();
        true
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Topmost node containing the point, scanning back-to-front so the
    /// most recently added node wins ties.
    pub fn node_at(&self, x: f32, y: f32) -> Option<NodeId> {
        self.nodes
            .iter()
            .rev()
            .find(|n| n.contains(x, y))
            .map(|n| n.id)
    }

    /// Find a node by its label (first match in insertion order).
    pub fn node_by_label(&self, label: &str) -> Option<NodeId> {
        self.nodes.iter().find(|n| n.label == label).map(|n| n.id)
    }

    // ---- start node ----

    pub fn start_node(&self) -> Option<NodeId> {
        self.start_node
    }

    /// Designate the start node. Ignored unless the node is a live
    /// member of this graph; `None` clears the designation.
    pub fn set_start_node(&mut self, id: Option<NodeId>) {
        match id {
            Some(id) if self.node(id).is_some() => self.start_node = Some(id),
            Some(_) => {}
            None => self.start_node = None,
        }
    }

    // ---- edges ----

    /// Add an edge if both endpoints exist; returns the new edge id.
    ///
    /// Spline auto-selection: if an edge already runs in the opposite
    /// direction between the same pair, the new edge is forced to
    /// bezier so the two arrows visually separate; otherwise straight.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId) -> Option<EdgeId> {
        if self.node(from).is_none() || self.node(to).is_none() {
            return None;
        }
        let id = Uuid::now_v7();
        let reciprocal = self.edges.iter().any(|e| e.from == to && e.to == from);
        let (spline, curvature) = if reciprocal {
            (SplineKind::Bezier, DEFAULT_CURVATURE)
        } else {
            (SplineKind::Straight, 0.0)
        };
        self.edges.push(Edge {
            id,
            from,
            to,
            spline,
            curvature,
            text: String::new(),
        });
        self.touch();
        Some(id)
    }

    pub(crate) fn insert_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
        self.touch();
    }

    /// Removing an absent edge is a no-op.
    pub fn remove_edge(&mut self, id: EdgeId) -> bool {
        let before = self.edges.len();
        self.edges.retain(|e| e.id != id);
        if self.edges.len() == before {
            return false;
        }
        self.touch();
        true
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    pub fn edge_mut(&mut self, id: EdgeId) -> Option<&mut Edge> {
        self.edges.iter_mut().find(|e| e.id == id)
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Redirect an edge's destination in place, preserving its identity,
    /// then re-run spline auto-assignment against the changed topology.
    pub fn retarget_edge(&mut self, id: EdgeId, new_to: NodeId) -> bool {
        if self.node(new_to).is_none() {
            return false;
        }
        let Some(edge) = self.edges.iter_mut().find(|e| e.id == id) else {
            return false;
        };
        edge.to = new_to;
        self.touch();
        self.assign_spline(id);
        true
    }

    /// Re-run reciprocal-pair spline auto-assignment for one edge.
    pub fn assign_spline(&mut self, id: EdgeId) {
        let Some((from, to)) = self.edge(id).map(|e| (e.from, e.to)) else {
            return;
        };
        let reciprocal = self
            .edges
            .iter()
            .any(|e| e.id != id && e.from == to && e.to == from);
        if let Some(edge) = self.edges.iter_mut().find(|e| e.id == id) {
            if reciprocal {
                edge.spline = SplineKind::Bezier;
                if edge.curvature == 0.0 {
                    edge.curvature = DEFAULT_CURVATURE;
                }
            } else {
                edge.spline = SplineKind::Straight;
            }
        }
    }

    // ---- edge geometry ----

    /// Rim-to-rim path of an edge. Self-loops degenerate to a pair of
    /// center points (zero-length segment); that is fine for rendering
    /// and hit-testing both.
    pub fn edge_path(&self, edge: &Edge) -> Option<EdgePath> {
        let from = self.node(edge.from)?;
        let to = self.node(edge.to)?;
        match edge.spline {
            SplineKind::Straight => Some(EdgePath {
                from: boundary_point(from.x, from.y, from.radius, to.center()),
                to: boundary_point(to.x, to.y, to.radius, from.center()),
                control: None,
            }),
            SplineKind::Bezier => {
                let ctrl =
                    geometry::bezier_control_point(from.center(), to.center(), edge.curvature);
                Some(EdgePath {
                    from: boundary_point(from.x, from.y, from.radius, ctrl),
                    to: boundary_point(to.x, to.y, to.radius, ctrl),
                    control: Some(ctrl),
                })
            }
        }
    }

    /// Topmost edge within `threshold` world units of the point, using
    /// the distance test appropriate for the edge's spline kind.
    pub fn edge_near(&self, x: f32, y: f32, threshold: f32) -> Option<EdgeId> {
        let p = Point::new(x, y);
        for edge in self.edges.iter().rev() {
            let Some(path) = self.edge_path(edge) else {
                continue;
            };
            let d = match path.control {
                None => point_segment_distance(p, path.from, path.to),
                Some(ctrl) => point_bezier_distance(p, path.from, ctrl, path.to),
            };
            if d <= threshold {
                return Some(edge.id);
            }
        }
        None
    }

    /// Topmost edge whose arrowhead tip lies within `threshold` world
    /// units of the point. This is the grab region for retargeting.
    pub fn edge_at_arrowhead(&self, x: f32, y: f32, threshold: f32) -> Option<EdgeId> {
        for edge in self.edges.iter().rev() {
            let Some(path) = self.edge_path(edge) else {
                continue;
            };
            let dx = x - path.to.x;
            let dy = y - path.to.y;
            if dx * dx + dy * dy <= threshold * threshold {
                return Some(edge.id);
            }
        }
        None
    }

    // ---- whole-graph operations ----

    /// Remove all nodes and edges and clear the start-node designation.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.start_node = None;
        self.touch();
    }

    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
            start_node: self.start_node,
        }
    }

    /// Replace the graph contents with a snapshot. A stale start-node
    /// reference or an edge with a missing endpoint is dropped rather
    /// than kept dangling.
    pub fn restore(&mut self, snapshot: GraphSnapshot) {
        self.nodes = snapshot.nodes;
        self.edges = snapshot.edges;
        self.start_node = snapshot
            .start_node
            .filter(|id| self.nodes.iter().any(|n| n.id == *id));
        let ids: Vec<NodeId> = self.nodes.iter().map(|n| n.id).collect();
        self.edges
            .retain(|e| ids.contains(&e.from) && ids.contains(&e.to));
        self.touch();
    }

    pub fn from_snapshot(snapshot: GraphSnapshot) -> Self {
        let mut g = GraphModel::new();
        g.restore(snapshot);
        g
    }
}
