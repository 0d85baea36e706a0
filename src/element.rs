use crate::{error::Error, store::PlanarMap};
use glam::Vec2;
use std::fmt::{Debug, Display};

/**
 * All entities of the map are identified by a store-assigned integer ID. IDs
 * are unique per entity type, start at 1, and survive serialization; they are
 * never recycled within the lifetime of a map.
 */
pub trait EntityId {
    /**
     * The raw integer behind the ID.
     */
    fn raw(self) -> u32;
}

/**
 * Vertex ID.
 */
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VertexId {
    id: u32,
}

/**
 * Half-edge ID.
 */
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HalfEdgeId {
    id: u32,
}

/**
 * Face ID.
 */
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FaceId {
    id: u32,
}

impl EntityId for VertexId {
    fn raw(self) -> u32 {
        self.id
    }
}

impl From<u32> for VertexId {
    fn from(id: u32) -> Self {
        VertexId { id }
    }
}

impl EntityId for HalfEdgeId {
    fn raw(self) -> u32 {
        self.id
    }
}

impl From<u32> for HalfEdgeId {
    fn from(id: u32) -> Self {
        HalfEdgeId { id }
    }
}

impl EntityId for FaceId {
    fn raw(self) -> u32 {
        self.id
    }
}

impl From<u32> for FaceId {
    fn from(id: u32) -> Self {
        FaceId { id }
    }
}

impl Display for VertexId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "V{}", self.id)
    }
}

impl Display for HalfEdgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "H{}", self.id)
    }
}

impl Display for FaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "F{}", self.id)
    }
}

impl Debug for VertexId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "V{}", self.id)
    }
}

impl Debug for HalfEdgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "H{}", self.id)
    }
}

impl Debug for FaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "F{}", self.id)
    }
}

/**
 * A vertex: a position in the plane with a store-assigned identity.
 *
 * Half-edges reference vertices by ID as their origin. Removing a vertex does
 * not touch the edges that reference it; stitching the hole closed is the
 * caller's job.
 */
#[derive(Clone, Debug)]
pub struct Vertex {
    pub(crate) id: VertexId,
    pub(crate) position: Vec2,
}

impl Vertex {
    pub fn id(&self) -> VertexId {
        self.id
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }
}

/// Vertices compare equal by position alone. Two vertices at the same
/// coordinates are "the same corner" regardless of their IDs; every other
/// comparison in the crate is ID-based.
impl PartialEq for Vertex {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
    }
}

/**
 * One directed side of an undirected edge.
 *
 * Links are stored as optional IDs: `twin` is the antiparallel half-edge of
 * the same undirected edge, `next`/`prev` walk the boundary of the enclosed
 * region clockwise, and `face` is the region itself (absent on the unbounded
 * side). A link may dangle after a removal; the validation pass reports such
 * edges rather than repairing them.
 */
#[derive(Clone, Debug)]
pub struct HalfEdge {
    pub(crate) id: HalfEdgeId,
    pub(crate) origin: VertexId,
    pub(crate) twin: Option<HalfEdgeId>,
    pub(crate) next: Option<HalfEdgeId>,
    pub(crate) prev: Option<HalfEdgeId>,
    pub(crate) face: Option<FaceId>,
}

impl HalfEdge {
    pub fn id(&self) -> HalfEdgeId {
        self.id
    }

    pub fn origin(&self) -> VertexId {
        self.origin
    }

    pub fn twin(&self) -> Option<HalfEdgeId> {
        self.twin
    }

    pub fn next(&self) -> Option<HalfEdgeId> {
        self.next
    }

    pub fn prev(&self) -> Option<HalfEdgeId> {
        self.prev
    }

    pub fn face(&self) -> Option<FaceId> {
        self.face
    }
}

/**
 * A face, represented by a single anchor half-edge on its boundary. The rest
 * of the boundary is reachable by walking `next` from the anchor. A face
 * whose anchor is absent is invalid; rehydrating a snapshot with an
 * unresolvable anchor produces one.
 */
#[derive(Clone, Debug)]
pub struct Face {
    pub(crate) id: FaceId,
    pub(crate) anchor: Option<HalfEdgeId>,
}

impl Face {
    pub fn id(&self) -> FaceId {
        self.id
    }

    pub fn anchor(&self) -> Option<HalfEdgeId> {
        self.anchor
    }
}

/**
 * What a half-edge is to the regions on its two sides, judged from the face
 * references of the edge and its twin.
 */
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum EdgeTopology {
    /// No face on either side; a dangling segment.
    Wire,
    /// No face on this side, a face on the twin's side.
    BoundaryInner,
    /// A face on this side, none on the twin's side.
    BoundaryOuter,
    /// The same face on both sides (a sliver seam inside one region).
    ManifoldSame,
    /// Different faces on the two sides; a proper interior edge.
    ManifoldDifferent,
}

impl VertexId {
    /// Position of the vertex, if it is in the map.
    pub fn position(self, map: &PlanarMap) -> Option<Vec2> {
        map.position(self)
    }

    /// Number of half-edges leaving this vertex.
    pub fn valence(self, map: &PlanarMap) -> usize {
        map.outgoing_edges(self).count()
    }
}

impl HalfEdgeId {
    pub fn origin(self, map: &PlanarMap) -> Option<VertexId> {
        map.origin(self)
    }

    pub fn destination(self, map: &PlanarMap) -> Option<VertexId> {
        map.destination(self)
    }

    pub fn twin(self, map: &PlanarMap) -> Option<HalfEdgeId> {
        map.twin(self)
    }

    pub fn next(self, map: &PlanarMap) -> Option<HalfEdgeId> {
        map.next(self)
    }

    pub fn prev(self, map: &PlanarMap) -> Option<HalfEdgeId> {
        map.prev(self)
    }

    pub fn face(self, map: &PlanarMap) -> Option<FaceId> {
        map.edge_face(self)
    }

    /// Classify this half-edge by the faces on its two sides.
    pub fn topology(self, map: &PlanarMap) -> Result<EdgeTopology, Error> {
        map.edge_topology(self)
    }

    /// Normalized origin-to-destination direction.
    pub fn direction(self, map: &PlanarMap) -> Result<Vec2, Error> {
        map.edge_direction(self)
    }
}

impl FaceId {
    pub fn anchor(self, map: &PlanarMap) -> Option<HalfEdgeId> {
        map.anchor(self)
    }

    /// Boundary half-edges in walk order, starting at the anchor.
    pub fn edges(self, map: &PlanarMap) -> Result<Vec<HalfEdgeId>, Error> {
        map.face_edges(self)
    }

    /// Boundary vertices in walk order, starting at the anchor's origin.
    pub fn vertices(self, map: &PlanarMap) -> Result<Vec<VertexId>, Error> {
        map.face_vertices(self)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use glam::vec2;

    #[test]
    fn t_vertex_equality_is_positional() {
        let a = Vertex {
            id: VertexId::from(1),
            position: vec2(3.0, -2.0),
        };
        let b = Vertex {
            id: VertexId::from(9),
            position: vec2(3.0, -2.0),
        };
        let c = Vertex {
            id: VertexId::from(1),
            position: vec2(0.0, 0.0),
        };
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn t_id_display() {
        assert_eq!(format!("{}", VertexId::from(3)), "V3");
        assert_eq!(format!("{}", HalfEdgeId::from(17)), "H17");
        assert_eq!(format!("{}", FaceId::from(2)), "F2");
        // Debug matches Display to keep assertion output compact.
        assert_eq!(format!("{:?}", HalfEdgeId::from(17)), "H17");
    }

    #[test]
    fn t_id_round_trip() {
        let h = HalfEdgeId::from(42u32);
        assert_eq!(h.raw(), 42);
        assert_eq!(HalfEdgeId::from(h.raw()), h);
    }
}
