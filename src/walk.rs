use crate::{
    element::{FaceId, HalfEdgeId, VertexId},
    error::Error,
    store::PlanarMap,
};
use std::collections::HashSet;
use tracing::warn;

/// Hard cap on loop traversal, far past any boundary a sane subdivision
/// holds.
pub const MAX_WALK_STEPS: usize = 1024;

/// Outcome of a lenient loop traversal.
pub(crate) struct LoopWalk {
    pub edges: Vec<HalfEdgeId>,
    pub closed: bool,
}

impl PlanarMap {
    /// Follow next links from `start`, recording every edge visited. The
    /// walk stops when it closes back onto `start`, runs out of links, meets
    /// a dangling ID or a repeated edge, or hits [`MAX_WALK_STEPS`].
    pub(crate) fn walk_loop(&self, start: HalfEdgeId) -> LoopWalk {
        let mut edges = Vec::new();
        let mut seen = HashSet::new();
        let mut current = start;
        loop {
            let Some(record) = self.edge(current) else {
                return LoopWalk {
                    edges,
                    closed: false,
                };
            };
            if edges.len() == MAX_WALK_STEPS || !seen.insert(current) {
                return LoopWalk {
                    edges,
                    closed: false,
                };
            }
            edges.push(current);
            match record.next() {
                Some(next) if next == start => {
                    return LoopWalk {
                        edges,
                        closed: true,
                    };
                }
                Some(next) => current = next,
                None => {
                    return LoopWalk {
                        edges,
                        closed: false,
                    };
                }
            }
        }
    }

    /// The loop of next links through `start`, strictly. A walk that runs
    /// out of links fails as unclosed, one that hits the step cap as
    /// runaway.
    pub fn loop_edges(&self, start: HalfEdgeId) -> Result<Vec<HalfEdgeId>, Error> {
        self.require_edge(start)?;
        let walk = self.walk_loop(start);
        if walk.closed {
            Ok(walk.edges)
        } else if walk.edges.len() == MAX_WALK_STEPS {
            Err(Error::RunawayWalk(start))
        } else {
            Err(Error::UnclosedLoop(start))
        }
    }

    /// Half-edges leaving `v`, in arena order.
    pub fn outgoing_edges(&self, v: VertexId) -> impl Iterator<Item = HalfEdgeId> + '_ {
        self.edges()
            .filter(move |edge| edge.origin() == v)
            .map(|edge| edge.id())
    }

    /// Half-edges arriving at `v`, in arena order. An edge without a
    /// resolvable twin has no destination and never shows up here.
    pub fn incoming_edges(&self, v: VertexId) -> impl Iterator<Item = HalfEdgeId> + '_ {
        self.edges()
            .filter(move |edge| edge.twin().and_then(|t| self.origin(t)) == Some(v))
            .map(|edge| edge.id())
    }

    /// Outgoing edges at the destination of `h`, excluding its own twin.
    /// These are the candidates a walk through `h` could continue on.
    pub(crate) fn sibling_outgoing_edges(&self, h: HalfEdgeId) -> Result<Vec<HalfEdgeId>, Error> {
        let twin = self.require_edge(h)?.twin().ok_or(Error::MissingTwin(h))?;
        let pivot = self.origin(twin).ok_or(Error::MissingTwin(h))?;
        Ok(self
            .outgoing_edges(pivot)
            .filter(|&candidate| candidate != twin)
            .collect())
    }

    /// Incoming edges at the origin of `h`, excluding its own twin. These
    /// are the edges a walk could arrive on before continuing through `h`.
    pub(crate) fn sibling_incoming_edges(&self, h: HalfEdgeId) -> Result<Vec<HalfEdgeId>, Error> {
        let edge = self.require_edge(h)?;
        let pivot = edge.origin();
        let twin = edge.twin();
        Ok(self
            .incoming_edges(pivot)
            .filter(|&candidate| Some(candidate) != twin)
            .collect())
    }

    /// Edges of a face's boundary, walked strictly from its anchor.
    pub fn face_edges(&self, f: FaceId) -> Result<Vec<HalfEdgeId>, Error> {
        let anchor = self.require_face(f)?.anchor().ok_or(Error::MissingAnchor(f))?;
        self.loop_edges(anchor)
    }

    /// Origins of a face's boundary edges, in loop order.
    pub fn face_vertices(&self, f: FaceId) -> Result<Vec<VertexId>, Error> {
        Ok(self
            .face_edges(f)?
            .iter()
            .filter_map(|&h| self.origin(h))
            .collect())
    }

    /// Scan the loop through `start` for the first edge claiming a face,
    /// `start` itself included. The walk is lenient; an open loop just
    /// yields whatever it reached.
    pub fn face_along_loop(&self, start: HalfEdgeId) -> Result<Option<FaceId>, Error> {
        self.require_edge(start)?;
        let walk = self.walk_loop(start);
        Ok(walk.edges.iter().find_map(|&h| self.edge_face(h)))
    }

    /// Whether the walk from the face's anchor comes back around. Missing
    /// faces and anchors are simply not closed.
    pub fn is_closed(&self, f: FaceId) -> bool {
        self.anchor(f)
            .is_some_and(|anchor| self.walk_loop(anchor).closed)
    }

    /// Create a face on the closed loop through `anchor` and claim every
    /// boundary edge for it.
    pub fn attach_face(&mut self, anchor: HalfEdgeId) -> Result<FaceId, Error> {
        let edges = self.loop_edges(anchor)?;
        let f = self.create_face(anchor);
        for h in edges {
            self.set_edge_face(h, Some(f))?;
        }
        Ok(f)
    }

    /// Release every edge the face's boundary walk reaches. The record and
    /// its anchor survive; deleting the face is `remove_face`'s job. An
    /// unclosed boundary is released as far as the walk goes.
    pub fn detach_face(&mut self, f: FaceId) -> Result<(), Error> {
        let anchor = self.require_face(f)?.anchor();
        if let Some(anchor) = anchor {
            let walk = self.walk_loop(anchor);
            if !walk.closed {
                warn!(face = %f, "detaching a face whose boundary does not close");
            }
            for h in walk.edges {
                self.set_edge_face(h, None)?;
            }
        }
        Ok(())
    }
}
