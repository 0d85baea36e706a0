use crate::{
    element::{EdgeTopology, EntityId, Face, FaceId, HalfEdge, HalfEdgeId, Vertex, VertexId},
    error::Error,
    events::{EventHub, Subscription},
};
use glam::Vec2;
use std::collections::HashMap;
use std::fmt;
use tracing::{trace, warn};

/**
 * A planar subdivision held as three arenas of entities keyed by persistent
 * IDs. All connectivity is stored as IDs; lookups go through ID-to-slot maps,
 * and a secondary index from directed vertex pair to half-edge serves
 * structural queries. Mutation goes through the store so that twin pairing,
 * the pair index, and change notifications stay coherent.
 *
 * The store never repairs connectivity on its own: removing an entity leaves
 * the IDs that referenced it dangling, to be found by [`check`](Self::check)
 * or stitched up by the caller.
 */
pub struct PlanarMap {
    vertices: Vec<Vertex>,
    edges: Vec<HalfEdge>,
    faces: Vec<Face>,
    vslot: HashMap<VertexId, usize>,
    eslot: HashMap<HalfEdgeId, usize>,
    fslot: HashMap<FaceId, usize>,
    pairs: HashMap<(VertexId, VertexId), HalfEdgeId>,
    next_vertex_id: u32,
    next_edge_id: u32,
    next_face_id: u32,
    pub(crate) events: EventHub,
}

impl PlanarMap {
    pub fn new() -> Self {
        PlanarMap {
            vertices: Vec::new(),
            edges: Vec::new(),
            faces: Vec::new(),
            vslot: HashMap::new(),
            eslot: HashMap::new(),
            fslot: HashMap::new(),
            pairs: HashMap::new(),
            next_vertex_id: 1,
            next_edge_id: 1,
            next_face_id: 1,
            events: EventHub::default(),
        }
    }

    pub fn with_capacity(nverts: usize, nedges: usize, nfaces: usize) -> Self {
        PlanarMap {
            vertices: Vec::with_capacity(nverts),
            edges: Vec::with_capacity(nedges),
            faces: Vec::with_capacity(nfaces),
            vslot: HashMap::with_capacity(nverts),
            eslot: HashMap::with_capacity(nedges),
            fslot: HashMap::with_capacity(nfaces),
            pairs: HashMap::with_capacity(nedges),
            next_vertex_id: 1,
            next_edge_id: 1,
            next_face_id: 1,
            events: EventHub::default(),
        }
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Create a vertex at `position` and notify subscribers.
    pub fn create_vertex(&mut self, position: Vec2) -> VertexId {
        let id = VertexId::from(self.next_vertex_id);
        self.next_vertex_id += 1;
        self.vslot.insert(id, self.vertices.len());
        self.vertices.push(Vertex { id, position });
        trace!(vertex = %id, x = position.x, y = position.y, "created vertex");
        if let Some(vertex) = self.vertices.last() {
            self.events.vertex_added.emit(vertex);
        }
        id
    }

    /// Create a half-edge leaving `origin`, with no twin, links, or face.
    ///
    /// The origin is recorded as given; callers stage edges before the rest
    /// of the graph exists, so nothing is validated here.
    pub fn create_edge(&mut self, origin: VertexId) -> HalfEdgeId {
        let id = HalfEdgeId::from(self.next_edge_id);
        self.next_edge_id += 1;
        self.eslot.insert(id, self.edges.len());
        self.edges.push(HalfEdge {
            id,
            origin,
            twin: None,
            next: None,
            prev: None,
            face: None,
        });
        trace!(halfedge = %id, origin = %origin, "created half-edge");
        if let Some(edge) = self.edges.last() {
            self.events.edge_added.emit(edge);
        }
        id
    }

    /// Create a face anchored at `anchor`. The anchor is recorded as given;
    /// claiming the boundary edges is [`attach_face`](Self::attach_face)'s
    /// job.
    pub fn create_face(&mut self, anchor: HalfEdgeId) -> FaceId {
        let id = FaceId::from(self.next_face_id);
        self.next_face_id += 1;
        self.fslot.insert(id, self.faces.len());
        self.faces.push(Face {
            id,
            anchor: Some(anchor),
        });
        trace!(face = %id, anchor = %anchor, "created face");
        if let Some(face) = self.faces.last() {
            self.events.face_added.emit(face);
        }
        id
    }

    /// Create the two half-edges of an undirected edge between two existing
    /// vertices and pair them as twins. Next/prev stay unset; run
    /// [`link_pair`](Self::link_pair) or [`populate_links`](Self::populate_links)
    /// to weave the pair into the rotation system.
    pub fn add_edge_pair(
        &mut self,
        from: VertexId,
        to: VertexId,
    ) -> Result<(HalfEdgeId, HalfEdgeId), Error> {
        self.require_vertex(from)?;
        self.require_vertex(to)?;
        let forward = self.create_edge(from);
        let backward = self.create_edge(to);
        self.set_twin(forward, backward)?;
        Ok((forward, backward))
    }

    pub fn vertex(&self, v: VertexId) -> Option<&Vertex> {
        self.vslot.get(&v).map(|&slot| &self.vertices[slot])
    }

    pub fn edge(&self, h: HalfEdgeId) -> Option<&HalfEdge> {
        self.eslot.get(&h).map(|&slot| &self.edges[slot])
    }

    pub fn face(&self, f: FaceId) -> Option<&Face> {
        self.fslot.get(&f).map(|&slot| &self.faces[slot])
    }

    pub(crate) fn require_vertex(&self, v: VertexId) -> Result<&Vertex, Error> {
        self.vertex(v).ok_or(Error::UnknownVertex(v))
    }

    pub(crate) fn require_edge(&self, h: HalfEdgeId) -> Result<&HalfEdge, Error> {
        self.edge(h).ok_or(Error::UnknownEdge(h))
    }

    pub(crate) fn require_face(&self, f: FaceId) -> Result<&Face, Error> {
        self.face(f).ok_or(Error::UnknownFace(f))
    }

    pub(crate) fn edge_mut(&mut self, h: HalfEdgeId) -> Option<&mut HalfEdge> {
        self.eslot.get(&h).map(|&slot| &mut self.edges[slot])
    }

    pub(crate) fn face_mut(&mut self, f: FaceId) -> Option<&mut Face> {
        self.fslot.get(&f).map(|&slot| &mut self.faces[slot])
    }

    /// The half-edge from `from` to `to`, through the directed-pair index.
    pub fn find_edge(&self, from: VertexId, to: VertexId) -> Option<HalfEdgeId> {
        self.pairs.get(&(from, to)).copied()
    }

    /// Origin and destination of a half-edge, when the twin resolves.
    pub fn endpoints(&self, h: HalfEdgeId) -> Option<(VertexId, VertexId)> {
        let origin = self.origin(h)?;
        let destination = self.destination(h)?;
        Some((origin, destination))
    }

    pub fn position(&self, v: VertexId) -> Option<Vec2> {
        self.vertex(v).map(|vertex| vertex.position)
    }

    pub fn origin(&self, h: HalfEdgeId) -> Option<VertexId> {
        self.edge(h).map(|edge| edge.origin)
    }

    pub fn destination(&self, h: HalfEdgeId) -> Option<VertexId> {
        let twin = self.edge(h)?.twin?;
        Some(self.edge(twin)?.origin)
    }

    pub fn twin(&self, h: HalfEdgeId) -> Option<HalfEdgeId> {
        self.edge(h).and_then(|edge| edge.twin)
    }

    pub fn next(&self, h: HalfEdgeId) -> Option<HalfEdgeId> {
        self.edge(h).and_then(|edge| edge.next)
    }

    pub fn prev(&self, h: HalfEdgeId) -> Option<HalfEdgeId> {
        self.edge(h).and_then(|edge| edge.prev)
    }

    pub fn edge_face(&self, h: HalfEdgeId) -> Option<FaceId> {
        self.edge(h).and_then(|edge| edge.face)
    }

    pub fn anchor(&self, f: FaceId) -> Option<HalfEdgeId> {
        self.face(f).and_then(|face| face.anchor)
    }

    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> + '_ {
        self.vertices.iter()
    }

    pub fn edges(&self) -> impl Iterator<Item = &HalfEdge> + '_ {
        self.edges.iter()
    }

    pub fn faces(&self) -> impl Iterator<Item = &Face> + '_ {
        self.faces.iter()
    }

    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices.iter().map(|vertex| vertex.id)
    }

    pub fn edge_ids(&self) -> impl Iterator<Item = HalfEdgeId> + '_ {
        self.edges.iter().map(|edge| edge.id)
    }

    pub fn face_ids(&self) -> impl Iterator<Item = FaceId> + '_ {
        self.faces.iter().map(|face| face.id)
    }

    /// Pair `a` and `b` as twins of each other, updating the directed-pair
    /// index. A previous partner of either edge is untwinned first.
    pub fn set_twin(&mut self, a: HalfEdgeId, b: HalfEdgeId) -> Result<(), Error> {
        let prev_a = self.require_edge(a)?.twin;
        let prev_b = self.require_edge(b)?.twin;
        self.unindex_edge(a);
        self.unindex_edge(b);
        if let Some(old) = prev_a.filter(|&old| old != b) {
            self.unindex_edge(old);
            if let Some(edge) = self.edge_mut(old) {
                edge.twin = None;
            }
        }
        if let Some(old) = prev_b.filter(|&old| old != a) {
            self.unindex_edge(old);
            if let Some(edge) = self.edge_mut(old) {
                edge.twin = None;
            }
        }
        if let Some(edge) = self.edge_mut(a) {
            edge.twin = Some(b);
        }
        if let Some(edge) = self.edge_mut(b) {
            edge.twin = Some(a);
        }
        let origin_a = self.require_edge(a)?.origin;
        let origin_b = self.require_edge(b)?.origin;
        self.pairs.insert((origin_a, origin_b), a);
        self.pairs.insert((origin_b, origin_a), b);
        Ok(())
    }

    /// Chain `prev -> next`, writing both sides of the link.
    pub fn link_edges(&mut self, prev: HalfEdgeId, next: HalfEdgeId) -> Result<(), Error> {
        self.require_edge(prev)?;
        self.require_edge(next)?;
        if let Some(edge) = self.edge_mut(prev) {
            edge.next = Some(next);
        }
        if let Some(edge) = self.edge_mut(next) {
            edge.prev = Some(prev);
        }
        Ok(())
    }

    /// Set or clear the face reference of a half-edge. The face ID is
    /// recorded as given.
    pub fn set_edge_face(&mut self, h: HalfEdgeId, face: Option<FaceId>) -> Result<(), Error> {
        self.require_edge(h)?;
        if let Some(edge) = self.edge_mut(h) {
            edge.face = face;
        }
        Ok(())
    }

    /// Move a face's anchor. The anchor ID is recorded as given.
    pub fn set_face_anchor(&mut self, f: FaceId, anchor: HalfEdgeId) -> Result<(), Error> {
        self.require_face(f)?;
        if let Some(face) = self.face_mut(f) {
            face.anchor = Some(anchor);
        }
        Ok(())
    }

    /// Remove a vertex by ID, returning the removed record, or `None` for a
    /// logged no-op miss. Edges that referenced the vertex keep its ID.
    pub fn remove_vertex(&mut self, v: VertexId) -> Option<Vertex> {
        let slot = match self.vslot.remove(&v) {
            Some(slot) => slot,
            None => {
                warn!(vertex = %v, "ignoring removal of unknown vertex");
                return None;
            }
        };
        let vertex = self.vertices.swap_remove(slot);
        if slot < self.vertices.len() {
            self.vslot.insert(self.vertices[slot].id, slot);
        }
        trace!(vertex = %vertex.id, "removed vertex");
        self.events.vertex_removed.emit(&vertex);
        Some(vertex)
    }

    /// Remove a half-edge by ID, returning the removed record, or `None` for
    /// a logged no-op miss. The twin survives with a dangling twin ID.
    pub fn remove_edge(&mut self, h: HalfEdgeId) -> Option<HalfEdge> {
        let key = self.endpoints(h);
        let slot = match self.eslot.remove(&h) {
            Some(slot) => slot,
            None => {
                warn!(halfedge = %h, "ignoring removal of unknown half-edge");
                return None;
            }
        };
        let edge = self.edges.swap_remove(slot);
        if slot < self.edges.len() {
            self.eslot.insert(self.edges[slot].id, slot);
        }
        self.purge_pair(h, key);
        trace!(halfedge = %edge.id, "removed half-edge");
        self.events.edge_removed.emit(&edge);
        Some(edge)
    }

    /// Remove a face by ID, returning the removed record, or `None` for a
    /// logged no-op miss. Boundary edges keep their face IDs; clear them
    /// first with [`detach_face`](Self::detach_face) if that matters.
    pub fn remove_face(&mut self, f: FaceId) -> Option<Face> {
        let slot = match self.fslot.remove(&f) {
            Some(slot) => slot,
            None => {
                warn!(face = %f, "ignoring removal of unknown face");
                return None;
            }
        };
        let face = self.faces.swap_remove(slot);
        if slot < self.faces.len() {
            self.fslot.insert(self.faces[slot].id, slot);
        }
        trace!(face = %face.id, "removed face");
        self.events.face_removed.emit(&face);
        Some(face)
    }

    /// Classify a half-edge by the faces on its two sides. A dangling twin
    /// ID counts as missing.
    pub fn edge_topology(&self, h: HalfEdgeId) -> Result<EdgeTopology, Error> {
        let edge = self.require_edge(h)?;
        let twin = edge.twin.ok_or(Error::MissingTwin(h))?;
        let twin_face = self.edge(twin).ok_or(Error::MissingTwin(h))?.face;
        Ok(match (edge.face, twin_face) {
            (None, None) => EdgeTopology::Wire,
            (None, Some(_)) => EdgeTopology::BoundaryInner,
            (Some(_), None) => EdgeTopology::BoundaryOuter,
            (Some(own), Some(other)) if own == other => EdgeTopology::ManifoldSame,
            (Some(_), Some(_)) => EdgeTopology::ManifoldDifferent,
        })
    }

    /**
     * Register a callback for vertex creation. Callbacks run synchronously in
     * registration order before the triggering call returns, and see only the
     * affected record, never the map itself. The other `on_*` registrations
     * below follow the same contract.
     */
    pub fn on_vertex_added<F: FnMut(&Vertex) + 'static>(&mut self, callback: F) -> Subscription {
        let token = self.events.issue();
        self.events.vertex_added.subscribe(token, Box::new(callback));
        token
    }

    pub fn on_vertex_removed<F: FnMut(&Vertex) + 'static>(&mut self, callback: F) -> Subscription {
        let token = self.events.issue();
        self.events.vertex_removed.subscribe(token, Box::new(callback));
        token
    }

    pub fn on_edge_added<F: FnMut(&HalfEdge) + 'static>(&mut self, callback: F) -> Subscription {
        let token = self.events.issue();
        self.events.edge_added.subscribe(token, Box::new(callback));
        token
    }

    pub fn on_edge_removed<F: FnMut(&HalfEdge) + 'static>(&mut self, callback: F) -> Subscription {
        let token = self.events.issue();
        self.events.edge_removed.subscribe(token, Box::new(callback));
        token
    }

    pub fn on_face_added<F: FnMut(&Face) + 'static>(&mut self, callback: F) -> Subscription {
        let token = self.events.issue();
        self.events.face_added.subscribe(token, Box::new(callback));
        token
    }

    pub fn on_face_removed<F: FnMut(&Face) + 'static>(&mut self, callback: F) -> Subscription {
        let token = self.events.issue();
        self.events.face_removed.subscribe(token, Box::new(callback));
        token
    }

    /// Drop a callback by its token. Returns whether anything was removed.
    pub fn unsubscribe(&mut self, token: Subscription) -> bool {
        self.events.unsubscribe(token)
    }

    /// Insert a record carrying its own ID, without notifications. Returns
    /// false on a duplicate ID.
    pub(crate) fn insert_vertex_record(&mut self, vertex: Vertex) -> bool {
        if self.vslot.contains_key(&vertex.id) {
            return false;
        }
        self.vslot.insert(vertex.id, self.vertices.len());
        self.vertices.push(vertex);
        true
    }

    pub(crate) fn insert_edge_record(&mut self, edge: HalfEdge) -> bool {
        if self.eslot.contains_key(&edge.id) {
            return false;
        }
        self.eslot.insert(edge.id, self.edges.len());
        self.edges.push(edge);
        true
    }

    pub(crate) fn insert_face_record(&mut self, face: Face) -> bool {
        if self.fslot.contains_key(&face.id) {
            return false;
        }
        self.fslot.insert(face.id, self.faces.len());
        self.faces.push(face);
        true
    }

    /// Rebuild the directed-pair index from the resolved twins.
    pub(crate) fn rebuild_pair_index(&mut self) {
        let entries: Vec<((VertexId, VertexId), HalfEdgeId)> = self
            .edges
            .iter()
            .filter_map(|edge| {
                let twin = edge.twin?;
                let destination = self.edge(twin)?.origin;
                Some(((edge.origin, destination), edge.id))
            })
            .collect();
        self.pairs.clear();
        for (key, id) in entries {
            self.pairs.insert(key, id);
        }
    }

    /// Continue ID allocation above everything currently in the arenas.
    pub(crate) fn reset_id_counters(&mut self) {
        self.next_vertex_id = self
            .vertices
            .iter()
            .map(|vertex| vertex.id.raw())
            .max()
            .map_or(1, |max| max + 1);
        self.next_edge_id = self
            .edges
            .iter()
            .map(|edge| edge.id.raw())
            .max()
            .map_or(1, |max| max + 1);
        self.next_face_id = self
            .faces
            .iter()
            .map(|face| face.id.raw())
            .max()
            .map_or(1, |max| max + 1);
    }

    fn unindex_edge(&mut self, h: HalfEdgeId) {
        let key = self.endpoints(h);
        self.purge_pair(h, key);
    }

    fn purge_pair(&mut self, h: HalfEdgeId, key: Option<(VertexId, VertexId)>) {
        match key {
            Some(key) if self.pairs.get(&key) == Some(&h) => {
                self.pairs.remove(&key);
            }
            _ => {
                // A live edge without a twin was never indexed.
                if self.edge(h).is_some_and(|edge| edge.twin.is_none()) {
                    return;
                }
                self.pairs.retain(|_, id| *id != h);
            }
        }
    }
}

impl Default for PlanarMap {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PlanarMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlanarMap")
            .field("vertices", &self.vertices.len())
            .field("edges", &self.edges.len())
            .field("faces", &self.faces.len())
            .finish()
    }
}
