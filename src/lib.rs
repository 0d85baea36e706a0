/*!
This is a halfedge based planar subdivision library for 2D layout editing.
Vertices, half-edges and faces live in a [`PlanarMap`] and are addressed by
persistent integer IDs.

# Overview

+ Every undirected edge is stored as a pair of twin half-edges. Next and
  prev links chain the half-edges into boundary loops, and faces hang off
  those loops through an anchor edge.

+ IDs are allocated monotonically and never recycled. Removing an entity
  leaves its ID dangling wherever other records still mention it;
  [`PlanarMap::check`] reports every such defect, while the editing
  operations keep the structures they touch coherent on their own.

+ The rotation system around each vertex is derived from 2D geometry.
  [`PlanarMap::populate_links`] rebuilds all next/prev links by turning
  clockwise through the fan of edges at each destination, and
  [`PlanarMap::link_pair`] weaves a single new pair in locally.

+ [`PlanarMap::snapshot`] flattens the map into plain serializable records,
  and [`PlanarMap::rehydrate`] rebuilds a map from any such records,
  dropping or clearing whatever does not resolve instead of failing.

+ Callbacks registered through the `on_*` methods observe entity additions
  and removals, keyed by [`Subscription`] tokens.
*/

mod check;
mod edit;
mod element;
mod error;
mod events;
mod macros;
mod math;
mod rotation;
mod snapshot;
mod store;
mod walk;

pub use edit::EdgeSplit;
pub use element::{EdgeTopology, EntityId, Face, FaceId, HalfEdge, HalfEdgeId, Vertex, VertexId};
pub use error::Error;
pub use events::Subscription;
pub use rotation::Turn;
pub use snapshot::{EdgeRecord, FaceRecord, Snapshot, VertexRecord};
pub use store::PlanarMap;
pub use walk::MAX_WALK_STEPS;
