use crate::element::{FaceId, HalfEdgeId, VertexId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    // Lookups.
    #[error("vertex {0} is not in the map")]
    UnknownVertex(VertexId),
    #[error("half-edge {0} is not in the map")]
    UnknownEdge(HalfEdgeId),
    #[error("face {0} is not in the map")]
    UnknownFace(FaceId),
    // Structure.
    #[error("half-edge {0} has no twin")]
    MissingTwin(HalfEdgeId),
    #[error("face {0} has no anchor edge")]
    MissingAnchor(FaceId),
    #[error("half-edges {0} and {1} are not twins of each other")]
    MismatchedPair(HalfEdgeId, HalfEdgeId),
    // Walks.
    #[error("boundary walk from {0} dead-ended or re-entered away from its start")]
    UnclosedLoop(HalfEdgeId),
    #[error("boundary walk from {0} exceeded the step bound")]
    RunawayWalk(HalfEdgeId),
    // Validation.
    #[error("half-edge {0} is not its twin's twin")]
    AsymmetricTwin(HalfEdgeId),
    #[error("link between {0} and {1} is not symmetric")]
    AsymmetricLink(HalfEdgeId, HalfEdgeId),
    #[error("half-edge {0} starts and ends at {1}")]
    DegenerateEdge(HalfEdgeId, VertexId),
    #[error("half-edge {0} references missing vertex {1}")]
    DanglingOrigin(HalfEdgeId, VertexId),
    #[error("half-edge {0} references missing half-edge {1}")]
    DanglingLink(HalfEdgeId, HalfEdgeId),
    #[error("half-edge {0} references missing face {1}")]
    DanglingFace(HalfEdgeId, FaceId),
    #[error("face {0} is anchored to missing half-edge {1}")]
    DanglingAnchor(FaceId, HalfEdgeId),
    #[error("half-edge {1} lies on the boundary of face {0} but does not reference it")]
    ForeignBoundary(FaceId, HalfEdgeId),
}
