//! Interactive finite-state-machine diagram engine.
//!
//! The crate is the model/logic core of a diagram editor: a mutable
//! directed graph of labeled circular nodes, geometric hit-testing, a
//! pan/zoom view transform, an interactive edit session (selection,
//! dragging, edge creation/retargeting, marquee, clipboard), and
//! simple-cycle analysis. A host UI translates pointer events into
//! world coordinates, drives the session, and renders from the public
//! accessors; no rendering happens here.

pub mod analysis;
pub mod graph_utils;
pub mod interaction;
pub mod persistence;

pub use analysis::cycles::{CycleAnalysis, find_cycles};
pub use graph_utils::geometry::Point;
pub use graph_utils::graph::{
    Color, Edge, EdgeId, GraphModel, GraphSnapshot, Node, NodeId, SplineKind,
};
pub use interaction::session::{EditSession, Selection, SessionState};
pub use interaction::view::ViewTransform;
