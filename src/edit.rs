use crate::{
    element::{HalfEdgeId, VertexId},
    error::Error,
    store::PlanarMap,
};
use glam::Vec2;
use tracing::debug;

/**
 * Handles coming out of a successful edge split. The original pair is gone;
 * these identify the replacement halves on the origin side of the new vertex
 * and beyond it, plus the vertex itself. The reverse halves are reachable
 * through their twins.
 */
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdgeSplit {
    pub origin_to_mid: HalfEdgeId,
    pub mid_to_dest: HalfEdgeId,
    pub mid: VertexId,
}

impl PlanarMap {
    /// Split the edge pair through `h` at a new vertex placed at `position`.
    ///
    /// The pair is replaced by two fresh pairs chained through the new
    /// vertex. Surrounding next/prev links, face claims, and face anchors
    /// carry over to the replacements; a pair linked onto itself at either
    /// end stays a closed turnaround. The two old half-edge IDs are retired,
    /// never reused.
    pub fn split_edge(&mut self, h: HalfEdgeId, position: Vec2) -> Result<EdgeSplit, Error> {
        let (origin, twin, e_next, e_prev, e_face) = {
            let edge = self.require_edge(h)?;
            let twin = edge.twin().ok_or(Error::MissingTwin(h))?;
            (edge.origin(), twin, edge.next(), edge.prev(), edge.face())
        };
        let (dest, t_next, t_prev, t_face) = {
            let record = self.edge(twin).ok_or(Error::MissingTwin(h))?;
            (record.origin(), record.next(), record.prev(), record.face())
        };

        let mid = self.create_vertex(position);
        let om = self.create_edge(origin);
        let md = self.create_edge(mid);
        let dm = self.create_edge(dest);
        let mo = self.create_edge(mid);
        self.set_twin(om, mo)?;
        self.set_twin(md, dm)?;
        self.link_edges(om, md)?;
        self.link_edges(dm, mo)?;

        // Neighbours that pointed at the old pair now point at the halves
        // replacing it. A link onto the old twin was a turnaround, and the
        // replacement turns around through the new vertex instead.
        match e_prev {
            Some(p) if p == twin => self.link_edges(mo, om)?,
            Some(p) => self.link_edges(p, om)?,
            None => {}
        }
        match e_next {
            Some(n) if n == twin => self.link_edges(md, dm)?,
            Some(n) => self.link_edges(md, n)?,
            None => {}
        }
        match t_prev {
            Some(q) if q == h => self.link_edges(md, dm)?,
            Some(q) => self.link_edges(q, dm)?,
            None => {}
        }
        match t_next {
            Some(r) if r == h => self.link_edges(mo, om)?,
            Some(r) => self.link_edges(mo, r)?,
            None => {}
        }

        self.set_edge_face(om, e_face)?;
        self.set_edge_face(md, e_face)?;
        self.set_edge_face(dm, t_face)?;
        self.set_edge_face(mo, t_face)?;

        self.remove_edge(h);
        self.remove_edge(twin);

        if let Some(f) = e_face {
            if self.anchor(f) == Some(h) {
                self.set_face_anchor(f, om)?;
            }
        }
        if let Some(f) = t_face {
            if self.anchor(f) == Some(twin) {
                self.set_face_anchor(f, mo)?;
            }
        }

        debug!(halfedge = %h, vertex = %mid, "split edge at a new vertex");
        Ok(EdgeSplit {
            origin_to_mid: om,
            mid_to_dest: md,
            mid,
        })
    }
}
