use crate::{
    element::{EntityId, Face, FaceId, HalfEdge, HalfEdgeId, Vertex, VertexId},
    store::PlanarMap,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Sentinel standing in for an absent reference in serialized records.
const NONE_ID: i32 = -1;

/**
 * Flat, serialization-friendly image of a planar map. Every reference is a
 * plain integer ID with `-1` marking absence, so snapshots survive hand
 * editing and foreign producers. [`PlanarMap::rehydrate`] accepts any
 * snapshot and keeps whatever can be resolved.
 */
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub vertices: Vec<VertexRecord>,
    pub edges: Vec<EdgeRecord>,
    pub faces: Vec<FaceRecord>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct VertexRecord {
    pub id: i32,
    pub position: glam::Vec2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub id: i32,
    pub origin: i32,
    pub twin: i32,
    pub next: i32,
    pub prev: i32,
    pub face: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceRecord {
    pub id: i32,
    pub anchor: i32,
}

fn encode(id: Option<impl EntityId>) -> i32 {
    id.map_or(NONE_ID, |id| id.raw() as i32)
}

fn decode(raw: i32) -> Option<u32> {
    u32::try_from(raw).ok()
}

impl PlanarMap {
    /// Capture every record, in collection order.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            vertices: self
                .vertices()
                .map(|vertex| VertexRecord {
                    id: vertex.id().raw() as i32,
                    position: vertex.position(),
                })
                .collect(),
            edges: self
                .edges()
                .map(|edge| EdgeRecord {
                    id: edge.id().raw() as i32,
                    origin: edge.origin().raw() as i32,
                    twin: encode(edge.twin()),
                    next: encode(edge.next()),
                    prev: encode(edge.prev()),
                    face: encode(edge.face()),
                })
                .collect(),
            faces: self
                .faces()
                .map(|face| FaceRecord {
                    id: face.id().raw() as i32,
                    anchor: encode(face.anchor()),
                })
                .collect(),
        }
    }

    /// Rebuild a map from raw records. Rehydration never fails: records
    /// without a usable ID and duplicates after the first are dropped,
    /// references that do not resolve are cleared, and each surviving
    /// face's boundary walk reasserts its claim over the edges it reaches.
    /// ID allocation continues above the highest rehydrated ID. No change
    /// notifications fire.
    pub fn rehydrate(snapshot: &Snapshot) -> PlanarMap {
        let mut map = PlanarMap::with_capacity(
            snapshot.vertices.len(),
            snapshot.edges.len(),
            snapshot.faces.len(),
        );
        for record in &snapshot.vertices {
            let Some(id) = decode(record.id) else {
                warn!(id = record.id, "dropping vertex record without a usable ID");
                continue;
            };
            let id = VertexId::from(id);
            if !map.insert_vertex_record(Vertex {
                id,
                position: record.position,
            }) {
                warn!(vertex = %id, "dropping duplicate vertex record");
            }
        }
        for record in &snapshot.edges {
            let (Some(id), Some(origin)) = (decode(record.id), decode(record.origin)) else {
                warn!(id = record.id, "dropping edge record without a usable ID and origin");
                continue;
            };
            let id = HalfEdgeId::from(id);
            if !map.insert_edge_record(HalfEdge {
                id,
                origin: VertexId::from(origin),
                twin: decode(record.twin).map(HalfEdgeId::from),
                next: decode(record.next).map(HalfEdgeId::from),
                prev: decode(record.prev).map(HalfEdgeId::from),
                face: decode(record.face).map(FaceId::from),
            }) {
                warn!(halfedge = %id, "dropping duplicate edge record");
            }
        }
        for record in &snapshot.faces {
            let Some(id) = decode(record.id) else {
                warn!(id = record.id, "dropping face record without a usable ID");
                continue;
            };
            let id = FaceId::from(id);
            if !map.insert_face_record(Face {
                id,
                anchor: decode(record.anchor).map(HalfEdgeId::from),
            }) {
                warn!(face = %id, "dropping duplicate face record");
            }
        }

        let edge_ids: Vec<HalfEdgeId> = map.edge_ids().collect();
        let face_ids: Vec<FaceId> = map.face_ids().collect();
        for &h in &edge_ids {
            let Some(origin) = map.origin(h) else { continue };
            if map.vertex(origin).is_none() {
                warn!(halfedge = %h, vertex = %origin, "rehydrated edge origin does not resolve");
            }
        }
        for &h in &edge_ids {
            let Some(record) = map.edge(h) else { continue };
            let (twin, next, prev) = (record.twin(), record.next(), record.prev());
            if let Some(t) = twin.filter(|&t| map.edge(t).is_none()) {
                warn!(halfedge = %h, twin = %t, "clearing unresolvable twin");
                if let Some(edge) = map.edge_mut(h) {
                    edge.twin = None;
                }
            }
            if let Some(n) = next.filter(|&n| map.edge(n).is_none()) {
                warn!(halfedge = %h, next = %n, "clearing unresolvable next link");
                if let Some(edge) = map.edge_mut(h) {
                    edge.next = None;
                }
            }
            if let Some(p) = prev.filter(|&p| map.edge(p).is_none()) {
                warn!(halfedge = %h, prev = %p, "clearing unresolvable prev link");
                if let Some(edge) = map.edge_mut(h) {
                    edge.prev = None;
                }
            }
        }
        map.rebuild_pair_index();
        for &f in &face_ids {
            if let Some(anchor) = map.anchor(f).filter(|&a| map.edge(a).is_none()) {
                warn!(face = %f, anchor = %anchor, "clearing unresolvable face anchor");
                if let Some(face) = map.face_mut(f) {
                    face.anchor = None;
                }
            }
        }
        for &h in &edge_ids {
            if let Some(face) = map.edge_face(h).filter(|&f| map.face(f).is_none()) {
                warn!(halfedge = %h, face = %face, "clearing unresolvable face reference");
                if let Some(edge) = map.edge_mut(h) {
                    edge.face = None;
                }
            }
        }

        // The walk from each anchor is authoritative over whatever face IDs
        // the edge records carried.
        for &f in &face_ids {
            let Some(anchor) = map.anchor(f) else { continue };
            let walk = map.walk_loop(anchor);
            if !walk.closed {
                warn!(face = %f, "rehydrated face boundary does not close");
            }
            for h in walk.edges {
                if let Some(edge) = map.edge_mut(h) {
                    edge.face = Some(f);
                }
            }
        }

        map.reset_id_counters();
        debug!(
            vertices = map.num_vertices(),
            edges = map.num_edges(),
            faces = map.num_faces(),
            "rehydrated planar map"
        );
        map
    }
}
