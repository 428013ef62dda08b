//! Interactive editing session layered on the graph model and view
//! transform.
//!
//! All pointer handlers take world coordinates; the host converts raw
//! screen events through [`ViewTransform::screen_to_world`] first.
//! Panning is the exception and works in screen space, since pan deltas
//! are not scaled. Every state/input combination is defined; releasing
//! outside a valid target is itself the cancel path for edge creation
//! and marquee selection.

use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use crate::graph_utils::geometry::{EDGE_HIT_THRESHOLD, Point, snap_to_grid};
use crate::graph_utils::graph::{Edge, EdgeId, GraphModel, GraphSnapshot, Node, NodeId};
use crate::interaction::view::ViewTransform;

/// Current selection: a set of nodes or a single edge, never both.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Selection {
    #[default]
    None,
    Nodes(HashSet<NodeId>),
    Edge(EdgeId),
}

impl Selection {
    pub fn is_none(&self) -> bool {
        matches!(self, Selection::None)
    }

    /// Selected node ids, if the selection is a node set.
    pub fn nodes(&self) -> Option<&HashSet<NodeId>> {
        match self {
            Selection::Nodes(s) => Some(s),
            _ => None,
        }
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        matches!(self, Selection::Nodes(s) if s.contains(&id))
    }
}

/// Explicit tagged-union session state. One gesture is in flight at a
/// time; pointer-up always collapses back to `Idle`.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionState {
    Idle,
    /// Moving the captured node set; `last` is the previous pointer
    /// sample in world space.
    Dragging { nodes: Vec<NodeId>, last: Point },
    /// Rectangle multi-select from `origin` to the current pointer.
    Marquee { origin: Point, current: Point },
    /// Dragging a new edge out of `from`; `candidate` is the node under
    /// the cursor (highlight only, committed on release).
    CreatingEdge {
        from: NodeId,
        cursor: Point,
        candidate: Option<NodeId>,
    },
    /// Dragging an existing edge's arrowhead; `from` stays fixed.
    RetargetingEdge {
        edge: EdgeId,
        from: NodeId,
        cursor: Point,
        candidate: Option<NodeId>,
    },
    /// Background pan; `last` is the previous pointer sample in screen
    /// space.
    Panning { last: (f32, f32) },
}

/// Detached clone of a node subset plus its internal edges. Stored with
/// the subset's centroid so paste can re-center on a drop point. Never
/// aliases into the live graph.
#[derive(Clone, Debug)]
struct Clipboard {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    centroid: Point,
}

pub struct EditSession {
    graph: GraphModel,
    view: ViewTransform,
    state: SessionState,
    selection: Selection,
    hovered: Option<NodeId>,
    clipboard: Option<Clipboard>,
    snap_to_grid: bool,
    // Bumped whenever the selection changes; hosts poll this instead of
    // registering listeners.
    selection_rev: u64,
}

impl Default for EditSession {
    fn default() -> Self {
        EditSession::new()
    }
}

impl EditSession {
    pub fn new() -> Self {
        EditSession::with_graph(GraphModel::new())
    }

    pub fn with_graph(graph: GraphModel) -> Self {
        EditSession {
            graph,
            view: ViewTransform::new(),
            state: SessionState::Idle,
            selection: Selection::None,
            hovered: None,
            clipboard: None,
            snap_to_grid: false,
            selection_rev: 0,
        }
    }

    // ---- accessors ----

    pub fn graph(&self) -> &GraphModel {
        &self.graph
    }

    /// Mutable graph access for property editors (labels, colors,
    /// curvature, ...). Structural edits that must keep the selection
    /// consistent should go through [`EditSession::remove_node`] and
    /// [`EditSession::remove_edge`] instead.
    pub fn graph_mut(&mut self) -> &mut GraphModel {
        &mut self.graph
    }

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ViewTransform {
        &mut self.view
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selection_rev(&self) -> u64 {
        self.selection_rev
    }

    pub fn hovered(&self) -> Option<NodeId> {
        self.hovered
    }

    pub fn snap_enabled(&self) -> bool {
        self.snap_to_grid
    }

    pub fn set_snap_to_grid(&mut self, on: bool) {
        self.snap_to_grid = on;
    }

    /// Normalized marquee rectangle (min corner, max corner) while a
    /// marquee gesture is in flight.
    pub fn marquee_rect(&self) -> Option<(Point, Point)> {
        match &self.state {
            SessionState::Marquee { origin, current } => Some(normalize_rect(*origin, *current)),
            _ => None,
        }
    }

    fn set_selection(&mut self, sel: Selection) {
        if self.selection != sel {
            self.selection = sel;
            self.selection_rev = self.selection_rev.wrapping_add(1);
        }
    }

    /// Select a node set directly (host convenience, e.g. select-all).
    pub fn select_nodes(&mut self, ids: impl IntoIterator<Item = NodeId>) {
        let set: HashSet<NodeId> = ids
            .into_iter()
            .filter(|id| self.graph.node(*id).is_some())
            .collect();
        if set.is_empty() {
            self.set_selection(Selection::None);
        } else {
            self.set_selection(Selection::Nodes(set));
        }
    }

    pub fn clear_selection(&mut self) {
        self.set_selection(Selection::None);
    }

    // ---- pointer handling (world coordinates) ----

    /// Edge hit thresholds are constant in screen pixels, so convert to
    /// world units at the current zoom before testing.
    fn world_threshold(&self) -> f32 {
        EDGE_HIT_THRESHOLD / self.view.scale()
    }

    pub fn pointer_down(&mut self, wx: f32, wy: f32, edge_modifier: bool) {
        let p = Point::new(wx, wy);

        if edge_modifier {
            // Arrowhead grab wins over node hit, so a tip sitting on a
            // node's rim can still be retargeted.
            if let Some(eid) = self.graph.edge_at_arrowhead(wx, wy, self.world_threshold()) {
                let from = self.graph.edge(eid).map(|e| e.from);
                if let Some(from) = from {
                    self.state = SessionState::RetargetingEdge {
                        edge: eid,
                        from,
                        cursor: p,
                        candidate: None,
                    };
                    return;
                }
            }
            if let Some(nid) = self.graph.node_at(wx, wy) {
                self.state = SessionState::CreatingEdge {
                    from: nid,
                    cursor: p,
                    candidate: None,
                };
            }
            // Modifier over empty canvas: reserved, stay idle.
            return;
        }

        if let Some(nid) = self.graph.node_at(wx, wy) {
            // Preserve the selection when the hit node is already part
            // of it; that is what makes group drag work.
            if !self.selection.contains_node(nid) {
                self.set_selection(Selection::Nodes(HashSet::from([nid])));
            }
            let locked = self.graph.node(nid).map(|n| n.locked).unwrap_or(false);
            if locked {
                // Selection updated, but a locked node never starts a
                // drag.
                self.state = SessionState::Idle;
                return;
            }
            let drag_nodes: Vec<NodeId> = match self.selection.nodes() {
                Some(s) if s.len() > 1 => {
                    let mut ids: Vec<NodeId> = s
                        .iter()
                        .copied()
                        .filter(|id| self.graph.node(*id).is_some_and(|n| !n.locked))
                        .collect();
                    ids.sort();
                    ids
                }
                _ => vec![nid],
            };
            self.state = SessionState::Dragging {
                nodes: drag_nodes,
                last: p,
            };
            return;
        }

        if let Some(eid) = self.graph.edge_near(wx, wy, self.world_threshold()) {
            self.set_selection(Selection::Edge(eid));
            self.state = SessionState::Idle;
            return;
        }

        self.state = SessionState::Marquee {
            origin: p,
            current: p,
        };
    }

    pub fn pointer_move(&mut self, wx: f32, wy: f32) {
        let p = Point::new(wx, wy);
        let state = std::mem::replace(&mut self.state, SessionState::Idle);
        self.state = match state {
            SessionState::Dragging { nodes, last } => {
                let dx = wx - last.x;
                let dy = wy - last.y;
                let snap = self.snap_to_grid;
                for id in &nodes {
                    if let Some(n) = self.graph.node_mut(*id) {
                        if n.locked {
                            continue;
                        }
                        // Snap the resulting position, not the delta, so
                        // repeated small drags converge to grid lines.
                        let (mut nx, mut ny) = (n.x + dx, n.y + dy);
                        if snap {
                            nx = snap_to_grid(nx);
                            ny = snap_to_grid(ny);
                        }
                        n.x = nx;
                        n.y = ny;
                    }
                }
                SessionState::Dragging { nodes, last: p }
            }
            SessionState::Marquee { origin, .. } => SessionState::Marquee { origin, current: p },
            SessionState::CreatingEdge { from, .. } => {
                let candidate = self.graph.node_at(wx, wy).filter(|id| *id != from);
                SessionState::CreatingEdge {
                    from,
                    cursor: p,
                    candidate,
                }
            }
            SessionState::RetargetingEdge { edge, from, .. } => {
                let candidate = self.graph.node_at(wx, wy).filter(|id| *id != from);
                SessionState::RetargetingEdge {
                    edge,
                    from,
                    cursor: p,
                    candidate,
                }
            }
            other => other,
        };
    }

    pub fn pointer_up(&mut self, wx: f32, wy: f32) {
        let state = std::mem::replace(&mut self.state, SessionState::Idle);
        match state {
            SessionState::CreatingEdge { from, .. } => {
                // Commit only onto a different node; a release over
                // empty space or back onto the origin discards.
                if let Some(hit) = self.graph.node_at(wx, wy)
                    && hit != from
                {
                    self.graph.add_edge(from, hit);
                }
            }
            SessionState::RetargetingEdge { edge, from, .. } => {
                match self.graph.node_at(wx, wy) {
                    Some(hit) if hit != from => {
                        self.graph.retarget_edge(edge, hit);
                    }
                    _ => {
                        // Drag-to-nowhere removes the edge.
                        self.graph.remove_edge(edge);
                        if self.selection == Selection::Edge(edge) {
                            self.set_selection(Selection::None);
                        }
                    }
                }
            }
            SessionState::Marquee { origin, .. } => {
                let (min, max) = normalize_rect(origin, Point::new(wx, wy));
                let hits: HashSet<NodeId> = self
                    .graph
                    .nodes()
                    .iter()
                    .filter(|n| {
                        n.x >= min.x && n.x <= max.x && n.y >= min.y && n.y <= max.y
                    })
                    .map(|n| n.id)
                    .collect();
                if hits.is_empty() {
                    self.set_selection(Selection::None);
                } else {
                    self.set_selection(Selection::Nodes(hits));
                }
            }
            SessionState::Dragging { .. } | SessionState::Idle | SessionState::Panning { .. } => {}
        }
    }

    /// Track the node under the cursor. Returns true when the hover
    /// target changed, so hosts repaint only when needed.
    pub fn update_hover(&mut self, wx: f32, wy: f32) -> bool {
        let hit = self.graph.node_at(wx, wy);
        if hit != self.hovered {
            self.hovered = hit;
            true
        } else {
            false
        }
    }

    // ---- panning (screen coordinates) ----

    pub fn begin_pan(&mut self, sx: f32, sy: f32) {
        self.state = SessionState::Panning { last: (sx, sy) };
    }

    pub fn pan_to(&mut self, sx: f32, sy: f32) {
        if let SessionState::Panning { last } = self.state {
            self.view.pan(sx - last.0, sy - last.1);
            self.state = SessionState::Panning { last: (sx, sy) };
        }
    }

    pub fn end_pan(&mut self) {
        if matches!(self.state, SessionState::Panning { .. }) {
            self.state = SessionState::Idle;
        }
    }

    // ---- clipboard ----

    /// Clone the selected nodes (or the hovered node when the selection
    /// is empty) plus their internal edges into the clipboard. Returns
    /// false when there is nothing to copy.
    pub fn copy_selection(&mut self) -> bool {
        let ids: HashSet<NodeId> = match &self.selection {
            Selection::Nodes(s) if !s.is_empty() => s.clone(),
            _ => match self.hovered {
                Some(id) => HashSet::from([id]),
                None => return false,
            },
        };
        let nodes: Vec<Node> = self
            .graph
            .nodes()
            .iter()
            .filter(|n| ids.contains(&n.id))
            .cloned()
            .collect();
        if nodes.is_empty() {
            return false;
        }
        let inv = 1.0 / nodes.len() as f32;
        let centroid = Point::new(
            nodes.iter().map(|n| n.x).sum::<f32>() * inv,
            nodes.iter().map(|n| n.y).sum::<f32>() * inv,
        );
        let edges: Vec<Edge> = self
            .graph
            .edges()
            .iter()
            .filter(|e| ids.contains(&e.from) && ids.contains(&e.to))
            .cloned()
            .collect();
        self.clipboard = Some(Clipboard {
            nodes,
            edges,
            centroid,
        });
        true
    }

    pub fn has_clipboard(&self) -> bool {
        self.clipboard.is_some()
    }

    /// Paste the clipboard so its centroid lands on the drop point.
    ///
    /// Every pasted node gets a fresh identity; clipboard-internal edges
    /// are re-linked against the remapped ids. The pasted nodes replace
    /// the current selection. Returns the new ids (empty when the
    /// clipboard is empty).
    pub fn paste_at(&mut self, wx: f32, wy: f32) -> Vec<NodeId> {
        let Some(clip) = self.clipboard.clone() else {
            return Vec::new();
        };
        let dx = wx - clip.centroid.x;
        let dy = wy - clip.centroid.y;

        let mut remap: HashMap<NodeId, NodeId> = HashMap::new();
        let mut new_ids = Vec::with_capacity(clip.nodes.len());
        for mut node in clip.nodes {
            let new_id = Uuid::now_v7();
            remap.insert(node.id, new_id);
            node.id = new_id;
            node.x += dx;
            node.y += dy;
            new_ids.push(new_id);
            self.graph.insert_node(node);
        }
        for mut edge in clip.edges {
            // Both endpoints are clipboard-internal by construction.
            let (Some(&from), Some(&to)) = (remap.get(&edge.from), remap.get(&edge.to)) else {
                continue;
            };
            edge.id = Uuid::now_v7();
            edge.from = from;
            edge.to = to;
            self.graph.insert_edge(edge);
        }
        self.set_selection(Selection::Nodes(new_ids.iter().copied().collect()));
        new_ids
    }

    // ---- structural edits that keep session references consistent ----

    /// Remove every selected node (cascading their edges), or the
    /// selected edge, then clear the selection.
    pub fn delete_selection(&mut self) {
        match std::mem::take(&mut self.selection) {
            Selection::Nodes(ids) => {
                for id in ids {
                    self.graph.remove_node(id);
                }
            }
            Selection::Edge(id) => {
                self.graph.remove_edge(id);
            }
            Selection::None => return,
        }
        self.selection_rev = self.selection_rev.wrapping_add(1);
        self.prune_stale_refs();
    }

    /// Remove one node, cascading edges and clearing any selection or
    /// hover reference to it.
    pub fn remove_node(&mut self, id: NodeId) -> bool {
        let removed = self.graph.remove_node(id);
        if removed {
            self.prune_stale_refs();
        }
        removed
    }

    pub fn remove_edge(&mut self, id: EdgeId) -> bool {
        let removed = self.graph.remove_edge(id);
        if removed {
            self.prune_stale_refs();
        }
        removed
    }

    /// Drop selection/hover entries that no longer exist in the graph.
    fn prune_stale_refs(&mut self) {
        let sel = match &self.selection {
            Selection::Nodes(ids) => {
                let live: HashSet<NodeId> = ids
                    .iter()
                    .copied()
                    .filter(|id| self.graph.node(*id).is_some())
                    .collect();
                if live.is_empty() {
                    Selection::None
                } else {
                    Selection::Nodes(live)
                }
            }
            Selection::Edge(id) if self.graph.edge(*id).is_none() => Selection::None,
            other => other.clone(),
        };
        // set_selection only bumps the rev when the value actually
        // changed.
        self.set_selection(sel);
        if let Some(h) = self.hovered
            && self.graph.node(h).is_none()
        {
            self.hovered = None;
        }
    }

    /// Replace the graph (e.g. after a file load) and reset all
    /// transient interaction state. The prior graph is untouched if the
    /// load itself failed, because the caller only reaches this with a
    /// complete snapshot in hand.
    pub fn load_snapshot(&mut self, snapshot: GraphSnapshot) {
        self.graph.restore(snapshot);
        self.state = SessionState::Idle;
        self.hovered = None;
        self.set_selection(Selection::None);
    }

    /// Remove all graph contents and reset interaction state. The view
    /// transform and clipboard survive a clear.
    pub fn clear(&mut self) {
        self.graph.clear();
        self.state = SessionState::Idle;
        self.hovered = None;
        self.set_selection(Selection::None);
    }
}

fn normalize_rect(a: Point, b: Point) -> (Point, Point) {
    (
        Point::new(a.x.min(b.x), a.y.min(b.y)),
        Point::new(a.x.max(b.x), a.y.max(b.y)),
    )
}
