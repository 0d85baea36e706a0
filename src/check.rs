use crate::{error::Error, store::PlanarMap};

fn check_edges(map: &PlanarMap) -> Result<(), Error> {
    for edge in map.edges() {
        let h = edge.id();
        // Origin must resolve.
        if map.vertex(edge.origin()).is_none() {
            return Err(Error::DanglingOrigin(h, edge.origin()));
        }
        // Twins are mandatory, mutual, and span distinct vertices.
        let twin = edge.twin().ok_or(Error::MissingTwin(h))?;
        let twin_record = map.edge(twin).ok_or(Error::DanglingLink(h, twin))?;
        if twin_record.twin() != Some(h) {
            return Err(Error::AsymmetricTwin(h));
        }
        if twin_record.origin() == edge.origin() {
            return Err(Error::DegenerateEdge(h, edge.origin()));
        }
        // Next and prev may be unset, but where present they must resolve
        // and agree in both directions.
        if let Some(next) = edge.next() {
            let next_record = map.edge(next).ok_or(Error::DanglingLink(h, next))?;
            if next_record.prev() != Some(h) {
                return Err(Error::AsymmetricLink(h, next));
            }
        }
        if let Some(prev) = edge.prev() {
            let prev_record = map.edge(prev).ok_or(Error::DanglingLink(h, prev))?;
            if prev_record.next() != Some(h) {
                return Err(Error::AsymmetricLink(prev, h));
            }
        }
        if let Some(face) = edge.face() {
            if map.face(face).is_none() {
                return Err(Error::DanglingFace(h, face));
            }
        }
    }
    Ok(())
}

fn check_faces(map: &PlanarMap) -> Result<(), Error> {
    for face in map.faces() {
        let f = face.id();
        let anchor = face.anchor().ok_or(Error::MissingAnchor(f))?;
        if map.edge(anchor).is_none() {
            return Err(Error::DanglingAnchor(f, anchor));
        }
        // The boundary must close, and every edge on it must claim this
        // face back.
        for h in map.loop_edges(anchor)? {
            if map.edge_face(h) != Some(f) {
                return Err(Error::ForeignBoundary(f, h));
            }
        }
    }
    Ok(())
}

impl PlanarMap {
    /// Verify the structural invariants of the whole map: every stored ID
    /// resolves, twins and links are mutual, edges span distinct vertices,
    /// and each face's boundary closes and claims the face back. The first
    /// violation found is returned.
    pub fn check(&self) -> Result<(), Error> {
        check_edges(self)?;
        check_faces(self)
    }
}
