use fsmedit::analysis::cycles::CycleAnalysis;
use fsmedit::graph_utils::geometry::{
    self, Point, boundary_point, point_in_circle, point_segment_distance,
};
use fsmedit::graph_utils::graph::{GraphModel, NodeId, SplineKind};
use fsmedit::interaction::session::{EditSession, Selection, SessionState};
use fsmedit::interaction::view::ViewTransform;
use fsmedit::persistence::persist;

fn triangle() -> (GraphModel, NodeId, NodeId, NodeId) {
    let mut g = GraphModel::new();
    let a = g.add_node(100.0, 100.0, "A");
    let b = g.add_node(250.0, 100.0, "B");
    let c = g.add_node(175.0, 200.0, "C");
    (g, a, b, c)
}

// ---- geometry ----

#[test]
fn circle_contains_center_and_rejects_outside() {
    assert!(point_in_circle(10.0, 20.0, 10.0, 20.0, 5.0));
    // exactly on the rim counts as inside
    assert!(point_in_circle(15.0, 20.0, 10.0, 20.0, 5.0));
    assert!(!point_in_circle(15.1, 20.0, 10.0, 20.0, 5.0));
}

#[test]
fn boundary_point_projects_to_rim() {
    let p = boundary_point(0.0, 0.0, 30.0, Point::new(100.0, 0.0));
    assert!((p.x - 30.0).abs() < 1e-4);
    assert!(p.y.abs() < 1e-4);
}

#[test]
fn boundary_point_degenerate_returns_center() {
    let p = boundary_point(7.0, 9.0, 30.0, Point::new(7.0, 9.0));
    assert_eq!(p, Point::new(7.0, 9.0));
}

#[test]
fn segment_distance_handles_degenerate_segment() {
    let d = point_segment_distance(Point::new(3.0, 4.0), Point::new(0.0, 0.0), Point::new(0.0, 0.0));
    assert!((d - 5.0).abs() < 1e-4);
}

#[test]
fn segment_distance_clamps_to_endpoints() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(10.0, 0.0);
    // beyond the b endpoint the distance is to b, not the infinite line
    let d = point_segment_distance(Point::new(13.0, 4.0), a, b);
    assert!((d - 5.0).abs() < 1e-4);
    let d = point_segment_distance(Point::new(5.0, 2.0), a, b);
    assert!((d - 2.0).abs() < 1e-4);
}

#[test]
fn bezier_control_point_degenerate_stays_finite() {
    let p = Point::new(4.0, 4.0);
    let ctrl = geometry::bezier_control_point(p, p, 0.9);
    assert!(ctrl.x.is_finite() && ctrl.y.is_finite());
}

#[test]
fn bezier_distance_is_zero_on_curve_endpoints() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(100.0, 0.0);
    let ctrl = geometry::bezier_control_point(a, b, 0.25);
    let d = geometry::point_bezier_distance(a, a, ctrl, b);
    assert!(d < 1e-3);
    // the displaced midpoint of the curve is nowhere near the chord
    let d = geometry::point_bezier_distance(Point::new(50.0, 0.0), a, ctrl, b);
    assert!(d > 5.0);
}

// ---- view transform ----

#[test]
fn zoom_at_cursor_keeps_anchor_world_point() {
    let mut view = ViewTransform::new();
    view.pan(40.0, -25.0);
    let before = view.screen_to_world(300.0, 200.0);
    view.zoom_at(300.0, 200.0, true);
    let after = view.screen_to_world(300.0, 200.0);
    assert!((before.x - after.x).abs() < 1e-3);
    assert!((before.y - after.y).abs() < 1e-3);
    view.zoom_at(300.0, 200.0, false);
    let back = view.screen_to_world(300.0, 200.0);
    assert!((before.x - back.x).abs() < 1e-3);
}

#[test]
fn zoom_scale_is_clamped() {
    let mut view = ViewTransform::new();
    for _ in 0..100 {
        view.zoom_at(0.0, 0.0, false);
    }
    assert!((view.scale() - 0.1).abs() < 1e-6);
    for _ in 0..100 {
        view.zoom_at(0.0, 0.0, true);
    }
    assert!((view.scale() - 5.0).abs() < 1e-6);
}

#[test]
fn pan_is_unscaled_and_reset_restores_identity() {
    let mut view = ViewTransform::new();
    view.zoom_at(0.0, 0.0, true);
    view.pan(10.0, 20.0);
    let (tx, ty) = view.translate();
    assert!((tx - 10.0).abs() < 1e-6 && (ty - 20.0).abs() < 1e-6);
    view.reset();
    assert_eq!(view.scale(), 1.0);
    assert_eq!(view.translate(), (0.0, 0.0));
}

// ---- graph model ----

#[test]
fn remove_node_cascades_exactly_its_edges() {
    let (mut g, a, b, c) = triangle();
    let ab = g.add_edge(a, b).unwrap();
    let bc = g.add_edge(b, c).unwrap();
    let ca = g.add_edge(c, a).unwrap();
    assert!(g.remove_node(b));
    assert!(g.edge(ab).is_none());
    assert!(g.edge(bc).is_none());
    assert!(g.edge(ca).is_some(), "unrelated edge must survive");
    // removing again is a no-op
    assert!(!g.remove_node(b));
}

#[test]
fn removing_start_node_clears_designation() {
    let (mut g, a, _, _) = triangle();
    g.set_start_node(Some(a));
    assert_eq!(g.start_node(), Some(a));
    g.remove_node(a);
    assert_eq!(g.start_node(), None);
}

#[test]
fn start_node_must_be_a_member() {
    let (mut g, a, _, _) = triangle();
    let mut other = GraphModel::new();
    let foreign = other.add_node(0.0, 0.0, "X");
    g.set_start_node(Some(foreign));
    assert_eq!(g.start_node(), None);
    g.set_start_node(Some(a));
    g.set_start_node(None);
    assert_eq!(g.start_node(), None);
}

#[test]
fn reciprocal_edge_is_forced_to_bezier() {
    let (mut g, a, b, _) = triangle();
    let ab = g.add_edge(a, b).unwrap();
    assert_eq!(g.edge(ab).unwrap().spline, SplineKind::Straight);
    let ba = g.add_edge(b, a).unwrap();
    assert_eq!(g.edge(ba).unwrap().spline, SplineKind::Bezier);
    assert!(g.edge(ba).unwrap().curvature != 0.0);
    // the first edge keeps its original kind
    assert_eq!(g.edge(ab).unwrap().spline, SplineKind::Straight);
}

#[test]
fn add_edge_with_missing_endpoint_fails() {
    let (mut g, a, _, _) = triangle();
    let mut other = GraphModel::new();
    let foreign = other.add_node(0.0, 0.0, "X");
    assert!(g.add_edge(a, foreign).is_none());
    assert!(g.add_edge(foreign, a).is_none());
}

#[test]
fn node_at_prefers_topmost() {
    let mut g = GraphModel::new();
    let under = g.add_node(50.0, 50.0, "under");
    let over = g.add_node(60.0, 50.0, "over");
    // the overlap region belongs to the most recently added node
    assert_eq!(g.node_at(55.0, 50.0), Some(over));
    assert_eq!(g.node_at(25.0, 50.0), Some(under));
    assert_eq!(g.node_at(500.0, 500.0), None);
}

#[test]
fn edge_near_respects_threshold_and_spline_kind() {
    let mut g = GraphModel::new();
    let a = g.add_node(0.0, 0.0, "A");
    let b = g.add_node(200.0, 0.0, "B");
    let ab = g.add_edge(a, b).unwrap();
    assert_eq!(g.edge_near(100.0, 8.0, 10.0), Some(ab));
    assert_eq!(g.edge_near(100.0, 40.0, 10.0), None);

    // the reciprocal edge bulges away from the chord
    let ba = g.add_edge(b, a).unwrap();
    let path = g.edge_path(g.edge(ba).unwrap()).unwrap();
    let ctrl = path.control.expect("bezier edge has a control point");
    assert_eq!(g.edge_near(ctrl.x, ctrl.y, 30.0), Some(ba));
}

#[test]
fn self_loop_geometry_does_not_panic() {
    let mut g = GraphModel::new();
    let a = g.add_node(10.0, 10.0, "A");
    let loop_edge = g.add_edge(a, a).unwrap();
    let path = g.edge_path(g.edge(loop_edge).unwrap()).unwrap();
    assert!(path.from.x.is_finite() && path.to.x.is_finite());
    // the degenerate tip sits at the node center, still hittable
    assert_eq!(g.edge_at_arrowhead(10.0, 10.0, 10.0), Some(loop_edge));
}

#[test]
fn snapshot_restore_round_trips_structurally() {
    let (mut g, a, b, _) = triangle();
    g.node_mut(a).unwrap().color = fsmedit::Color::new(200, 30, 30);
    g.node_mut(a).unwrap().locked = true;
    g.node_mut(b).unwrap().metadata = "accepting state".to_string();
    let ab = g.add_edge(a, b).unwrap();
    let ba = g.add_edge(b, a).unwrap();
    g.edge_mut(ab).unwrap().text = "go".to_string();
    g.edge_mut(ba).unwrap().curvature = -0.4;
    g.set_start_node(Some(a));

    let snap = g.snapshot();
    let restored = GraphModel::from_snapshot(snap.clone());
    assert_eq!(restored.snapshot(), snap);
    assert_eq!(restored.start_node(), Some(a));
    assert!(restored.node(a).unwrap().locked);
    assert_eq!(restored.edge(ba).unwrap().curvature, -0.4);
}

#[test]
fn retarget_preserves_identity_and_reassigns_spline() {
    let (mut g, a, b, c) = triangle();
    let ca = g.add_edge(c, a).unwrap();
    let ab = g.add_edge(a, b).unwrap();
    assert_eq!(g.edge(ab).unwrap().spline, SplineKind::Straight);
    assert!(g.retarget_edge(ab, c));
    let e = g.edge(ab).unwrap();
    assert_eq!(e.to, c);
    // A->C now has the reciprocal C->A, so it must curve
    assert_eq!(e.spline, SplineKind::Bezier);
    assert_eq!(g.edge(ca).unwrap().spline, SplineKind::Straight);
}

#[test]
fn rev_bumps_on_structural_change_only() {
    let (mut g, a, b, _) = triangle();
    let r0 = g.rev();
    g.node_mut(a).unwrap().label = "renamed".to_string();
    assert_eq!(g.rev(), r0, "property edits are not structural");
    g.add_edge(a, b);
    assert_ne!(g.rev(), r0);
}

// ---- edit session ----

#[test]
fn click_selects_node_and_empty_marquee_clears() {
    let (g, a, _, _) = triangle();
    let mut s = EditSession::with_graph(g);
    s.pointer_down(100.0, 100.0, false);
    assert!(s.selection().contains_node(a));
    s.pointer_up(100.0, 100.0);
    // click on empty space: a degenerate marquee selects nothing
    s.pointer_down(600.0, 600.0, false);
    s.pointer_up(600.0, 600.0);
    assert!(s.selection().is_none());
}

#[test]
fn drag_moves_single_node() {
    let (g, a, _, _) = triangle();
    let mut s = EditSession::with_graph(g);
    s.pointer_down(100.0, 100.0, false);
    assert!(matches!(s.state(), SessionState::Dragging { .. }));
    s.pointer_move(110.0, 130.0);
    s.pointer_up(110.0, 130.0);
    let n = s.graph().node(a).unwrap();
    assert_eq!((n.x, n.y), (110.0, 130.0));
}

#[test]
fn locked_node_selects_but_never_drags() {
    let (mut g, a, _, _) = triangle();
    g.node_mut(a).unwrap().locked = true;
    let mut s = EditSession::with_graph(g);
    s.pointer_down(100.0, 100.0, false);
    assert!(s.selection().contains_node(a));
    assert_eq!(*s.state(), SessionState::Idle);
    s.pointer_move(300.0, 300.0);
    let n = s.graph().node(a).unwrap();
    assert_eq!((n.x, n.y), (100.0, 100.0));
}

#[test]
fn marquee_selects_centers_then_group_drag_moves_unlocked() {
    let mut g = GraphModel::new();
    let a = g.add_node(0.0, 0.0, "A");
    let b = g.add_node(100.0, 0.0, "B");
    let c = g.add_node(400.0, 400.0, "C");
    g.node_mut(b).unwrap().locked = true;
    let mut s = EditSession::with_graph(g);

    s.pointer_down(-60.0, -60.0, false);
    s.pointer_move(150.0, 60.0);
    assert!(s.marquee_rect().is_some());
    s.pointer_up(150.0, 60.0);
    let sel = s.selection().nodes().unwrap();
    assert!(sel.contains(&a) && sel.contains(&b) && !sel.contains(&c));

    // drag the group by grabbing the unlocked member
    s.pointer_down(0.0, 0.0, false);
    s.pointer_move(20.0, 30.0);
    s.pointer_up(20.0, 30.0);
    let na = s.graph().node(a).unwrap();
    let nb = s.graph().node(b).unwrap();
    assert_eq!((na.x, na.y), (20.0, 30.0));
    assert_eq!((nb.x, nb.y), (100.0, 0.0), "locked member stays put");
}

#[test]
fn degenerate_marquee_selects_nothing() {
    let mut g = GraphModel::new();
    let a = g.add_node(200.0, 200.0, "A");
    let mut s = EditSession::with_graph(g);
    s.pointer_down(500.0, 500.0, false);
    s.pointer_up(500.0, 500.0);
    assert!(s.selection().is_none());
    // the rectangle test on the center is closed: a rect whose corner
    // lands exactly on the center still takes the node
    s.pointer_down(200.0, 100.0, false);
    s.pointer_move(300.0, 200.0);
    s.pointer_up(300.0, 200.0);
    assert!(s.selection().contains_node(a));
}

#[test]
fn grid_snap_applies_to_result_position() {
    let mut g = GraphModel::new();
    let a = g.add_node(3.0, 4.0, "A");
    let mut s = EditSession::with_graph(g);
    s.set_snap_to_grid(true);
    s.pointer_down(3.0, 4.0, false);
    s.pointer_move(6.0, 9.0);
    s.pointer_up(6.0, 9.0);
    let n = s.graph().node(a).unwrap();
    assert_eq!((n.x, n.y), (10.0, 10.0));
}

#[test]
fn edge_creation_commits_only_on_foreign_node() {
    let (g, a, b, _) = triangle();
    let mut s = EditSession::with_graph(g);

    // drag out from A but release on empty space: discarded
    s.pointer_down(100.0, 100.0, true);
    assert!(matches!(s.state(), SessionState::CreatingEdge { .. }));
    s.pointer_move(600.0, 600.0);
    s.pointer_up(600.0, 600.0);
    assert_eq!(s.graph().edge_count(), 0);

    // release back on the origin node: discarded
    s.pointer_down(100.0, 100.0, true);
    s.pointer_up(100.0, 100.0);
    assert_eq!(s.graph().edge_count(), 0);

    // release over B: committed
    s.pointer_down(100.0, 100.0, true);
    s.pointer_move(250.0, 100.0);
    if let SessionState::CreatingEdge { candidate, .. } = s.state() {
        assert_eq!(*candidate, Some(b));
    } else {
        panic!("expected edge creation in flight");
    }
    s.pointer_up(250.0, 100.0);
    assert_eq!(s.graph().edge_count(), 1);
    let e = &s.graph().edges()[0];
    assert_eq!((e.from, e.to), (a, b));
}

#[test]
fn retarget_via_arrowhead_mutates_or_deletes() {
    let mut g = GraphModel::new();
    let a = g.add_node(0.0, 0.0, "A");
    let b = g.add_node(200.0, 0.0, "B");
    let c = g.add_node(200.0, 200.0, "C");
    let ab = g.add_edge(a, b).unwrap();
    let mut s = EditSession::with_graph(g);

    // the arrowhead tip of A->B sits on B's rim facing A: (170, 0)
    s.pointer_down(170.0, 0.0, true);
    assert!(matches!(s.state(), SessionState::RetargetingEdge { .. }));
    s.pointer_move(200.0, 200.0);
    s.pointer_up(200.0, 200.0);
    let e = s.graph().edge(ab).expect("edge identity preserved");
    assert_eq!((e.from, e.to), (a, c));

    // now grab the tip of A->C (on C's rim toward A) and drop on nothing
    let path = s.graph().edge_path(s.graph().edge(ab).unwrap()).unwrap();
    s.pointer_down(path.to.x, path.to.y, true);
    s.pointer_up(600.0, 600.0);
    assert!(s.graph().edge(ab).is_none(), "drag-to-nowhere removes the edge");
}

#[test]
fn deleting_retargeted_edge_clears_edge_selection() {
    let mut g = GraphModel::new();
    let a = g.add_node(0.0, 0.0, "A");
    let b = g.add_node(200.0, 0.0, "B");
    let ab = g.add_edge(a, b).unwrap();
    let mut s = EditSession::with_graph(g);

    // select the edge by clicking near its midpoint
    s.pointer_down(100.0, 4.0, false);
    assert_eq!(*s.selection(), Selection::Edge(ab));

    s.pointer_down(170.0, 0.0, true);
    s.pointer_up(600.0, 600.0);
    assert!(s.selection().is_none());
}

#[test]
fn copy_paste_recenters_on_drop_point_with_fresh_ids() {
    let mut g = GraphModel::new();
    let a = g.add_node(0.0, 0.0, "A");
    let b = g.add_node(10.0, 0.0, "B");
    g.add_edge(a, b).unwrap();
    let mut s = EditSession::with_graph(g);
    s.select_nodes([a, b]);
    assert!(s.copy_selection());

    let pasted = s.paste_at(100.0, 50.0);
    assert_eq!(pasted.len(), 2);
    assert!(!pasted.contains(&a) && !pasted.contains(&b));
    assert_eq!(s.graph().node_count(), 4);
    assert_eq!(s.graph().edge_count(), 2);

    // original centroid (5, 0) lands on (100, 50)
    let mut xs: Vec<f32> = pasted
        .iter()
        .map(|id| s.graph().node(*id).unwrap().x)
        .collect();
    xs.sort_by(f32::total_cmp);
    assert_eq!(xs, vec![95.0, 105.0]);
    for id in &pasted {
        assert_eq!(s.graph().node(*id).unwrap().y, 50.0);
    }
    // paste replaces the selection with the new nodes
    let sel = s.selection().nodes().unwrap();
    assert!(pasted.iter().all(|id| sel.contains(id)));

    // the pasted pair carries its internal edge, remapped
    let internal = s
        .graph()
        .edges()
        .iter()
        .filter(|e| pasted.contains(&e.from) && pasted.contains(&e.to))
        .count();
    assert_eq!(internal, 1);
}

#[test]
fn copy_falls_back_to_hovered_node() {
    let (g, a, _, _) = triangle();
    let mut s = EditSession::with_graph(g);
    assert!(!s.copy_selection(), "nothing selected, nothing hovered");
    assert!(s.update_hover(100.0, 100.0));
    assert!(!s.update_hover(100.0, 100.0), "unchanged hover reports false");
    assert!(s.copy_selection());
    let pasted = s.paste_at(300.0, 300.0);
    assert_eq!(pasted.len(), 1);
    assert_ne!(pasted[0], a);
}

#[test]
fn delete_selection_cascades_and_clears() {
    let (mut g, a, b, c) = triangle();
    g.add_edge(a, b).unwrap();
    let bc = g.add_edge(b, c).unwrap();
    let mut s = EditSession::with_graph(g);
    s.select_nodes([a]);
    let rev = s.selection_rev();
    s.delete_selection();
    assert!(s.graph().node(a).is_none());
    assert!(s.graph().edge(bc).is_some());
    assert_eq!(s.graph().edge_count(), 1);
    assert!(s.selection().is_none());
    assert_ne!(s.selection_rev(), rev);
}

#[test]
fn session_pan_accumulates_screen_deltas() {
    let mut s = EditSession::new();
    s.begin_pan(10.0, 10.0);
    s.pan_to(25.0, 30.0);
    s.pan_to(30.0, 30.0);
    s.end_pan();
    assert_eq!(s.view().translate(), (20.0, 20.0));
    assert_eq!(*s.state(), SessionState::Idle);
}

#[test]
fn load_snapshot_resets_transient_state() {
    let (g, a, _, _) = triangle();
    let snap = g.snapshot();
    let mut s = EditSession::with_graph(g);
    s.pointer_down(100.0, 100.0, false);
    assert!(s.selection().contains_node(a));
    s.load_snapshot(snap);
    assert!(s.selection().is_none());
    assert_eq!(*s.state(), SessionState::Idle);
    assert_eq!(s.graph().node_count(), 3);
}

// ---- cycle analysis ----

#[test]
fn triangle_yields_one_cycle_in_edge_order() {
    let (mut g, a, b, c) = triangle();
    let ab = g.add_edge(a, b).unwrap();
    let bc = g.add_edge(b, c).unwrap();
    let ca = g.add_edge(c, a).unwrap();
    let cycles = fsmedit::find_cycles(&g, a);
    assert_eq!(cycles, vec![vec![ab, bc, ca]]);
}

#[test]
fn two_node_cycle_and_self_loop() {
    let (mut g, a, b, _) = triangle();
    let ab = g.add_edge(a, b).unwrap();
    let ba = g.add_edge(b, a).unwrap();
    assert_eq!(fsmedit::find_cycles(&g, a), vec![vec![ab, ba]]);

    let aa = g.add_edge(a, a).unwrap();
    let cycles = fsmedit::find_cycles(&g, a);
    assert_eq!(cycles.len(), 2);
    assert!(cycles.contains(&vec![aa]));
}

#[test]
fn no_path_back_means_no_cycles() {
    let (mut g, a, b, c) = triangle();
    g.add_edge(a, b).unwrap();
    g.add_edge(b, c).unwrap();
    assert!(fsmedit::find_cycles(&g, a).is_empty());
    // isolated node
    let (g2, _, _, c2) = triangle();
    assert!(fsmedit::find_cycles(&g2, c2).is_empty());
}

#[test]
fn missing_start_node_yields_empty_result() {
    let (g, ..) = triangle();
    let mut other = GraphModel::new();
    let foreign = other.add_node(0.0, 0.0, "X");
    assert!(fsmedit::find_cycles(&g, foreign).is_empty());
}

#[test]
fn intermediate_nodes_are_not_revisited() {
    // A -> B -> C -> B would loop forever without the visited set; only
    // A -> B -> A closes.
    let (mut g, a, b, c) = triangle();
    g.add_edge(a, b).unwrap();
    g.add_edge(b, c).unwrap();
    g.add_edge(c, b).unwrap();
    let ba = g.add_edge(b, a).unwrap();
    let cycles = fsmedit::find_cycles(&g, a);
    assert_eq!(cycles.len(), 1);
    assert_eq!(cycles[0].last(), Some(&ba));
}

#[test]
fn navigation_wraps_both_directions() {
    let (mut g, a, b, c) = triangle();
    g.add_edge(a, b).unwrap();
    g.add_edge(b, a).unwrap();
    g.add_edge(a, c).unwrap();
    g.add_edge(c, a).unwrap();
    let mut analysis = CycleAnalysis::analyze(&g, a);
    assert_eq!(analysis.count(), 2);
    assert_eq!(analysis.current_index(), 0);
    analysis.next();
    assert_eq!(analysis.current_index(), 1);
    analysis.next();
    assert_eq!(analysis.current_index(), 0, "next wraps to the front");
    analysis.prev();
    assert_eq!(analysis.current_index(), 1, "prev wraps to the back");
}

#[test]
fn analysis_detects_structural_staleness() {
    let (mut g, a, b, _) = triangle();
    g.add_edge(a, b).unwrap();
    g.add_edge(b, a).unwrap();
    let analysis = CycleAnalysis::analyze(&g, a);
    assert!(!analysis.is_stale(&g));
    g.node_mut(a).unwrap().label = "renamed".to_string();
    assert!(!analysis.is_stale(&g), "property edits do not invalidate");
    g.add_node(0.0, 0.0, "D");
    assert!(analysis.is_stale(&g));
}

#[test]
fn cycle_description_chains_labels() {
    let (mut g, a, b, c) = triangle();
    g.add_edge(a, b).unwrap();
    g.add_edge(b, c).unwrap();
    g.add_edge(c, a).unwrap();
    g.node_mut(c).unwrap().label = String::new();
    let analysis = CycleAnalysis::analyze(&g, a);
    assert_eq!(analysis.describe(&g, 0), "A -> B -> (unnamed) -> A");
    assert_eq!(analysis.describe(&g, 5), "");
}

// ---- persistence ----

#[test]
fn with_extension_appends_suffix_once() {
    use std::path::Path;
    assert_eq!(
        persist::with_extension(Path::new("/tmp/demo")),
        Path::new("/tmp/demo.fsm")
    );
    assert_eq!(
        persist::with_extension(Path::new("/tmp/demo.fsm")),
        Path::new("/tmp/demo.fsm")
    );
    assert_eq!(
        persist::with_extension(Path::new("/tmp/demo.txt")),
        Path::new("/tmp/demo.txt.fsm")
    );
}

#[test]
fn graph_file_round_trip_is_lossless() {
    let (mut g, a, b, _) = triangle();
    g.node_mut(a).unwrap().locked = true;
    g.node_mut(a).unwrap().metadata = "entry point".to_string();
    g.node_mut(b).unwrap().color = fsmedit::Color::new(10, 200, 90);
    let ab = g.add_edge(a, b).unwrap();
    let ba = g.add_edge(b, a).unwrap();
    g.edge_mut(ab).unwrap().text = "step".to_string();
    g.set_start_node(Some(b));
    let snap = g.snapshot();

    let stamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let path = std::env::temp_dir().join(format!("fsmedit_test_{}.fsm", stamp));
    persist::save(&path, &snap).expect("save should succeed");
    let loaded = persist::load(&path).expect("load should succeed");
    let _ = std::fs::remove_file(&path);

    assert_eq!(loaded, snap);
    let restored = GraphModel::from_snapshot(loaded);
    assert_eq!(restored.start_node(), Some(b));
    assert_eq!(restored.edge(ba).unwrap().spline, SplineKind::Bezier);
}

#[test]
fn load_of_missing_file_is_an_error() {
    let path = std::env::temp_dir().join("fsmedit_definitely_missing.fsm");
    assert!(persist::load(&path).is_err());
}
