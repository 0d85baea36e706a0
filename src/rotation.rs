use crate::{
    element::HalfEdgeId,
    error::Error,
    math::{direction, signed_angle},
    store::PlanarMap,
};
use glam::Vec2;
use std::collections::HashSet;
use tracing::debug;

/**
 * Winding choice when stepping through the fan of edges around a vertex.
 *
 * Candidates are ranked by signed angle from the incoming direction, and a
 * walk turning `Cw` takes the smallest angle while `Ccw` takes the largest.
 * Boundary loops built by [`PlanarMap::populate_links`] follow `Cw`.
 */
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Turn {
    Cw,
    Ccw,
}

impl PlanarMap {
    /// Unit direction from the origin of `h` to its destination. An edge
    /// whose twin is missing or dangling has no destination to point at.
    pub fn edge_direction(&self, h: HalfEdgeId) -> Result<Vec2, Error> {
        let edge = self.require_edge(h)?;
        let twin = edge.twin().ok_or(Error::MissingTwin(h))?;
        let destination = self.edge(twin).ok_or(Error::MissingTwin(h))?.origin();
        let from = self.require_vertex(edge.origin())?.position();
        let to = self.require_vertex(destination)?.position();
        Ok(direction(from, to))
    }

    /// The edge a walk arriving on `h` continues through after turning
    /// `turn`-ward at the destination. `None` at a dead end.
    pub fn fan_next(&self, h: HalfEdgeId, turn: Turn) -> Result<Option<HalfEdgeId>, Error> {
        self.fan_next_excluding(h, turn, &HashSet::new())
    }

    /// Fan selection with some candidates ruled out. A sole surviving
    /// candidate wins outright, without any angle math; that keeps dangling
    /// geometry at degree-one vertices linkable.
    pub(crate) fn fan_next_excluding(
        &self,
        h: HalfEdgeId,
        turn: Turn,
        excluded: &HashSet<HalfEdgeId>,
    ) -> Result<Option<HalfEdgeId>, Error> {
        let candidates: Vec<HalfEdgeId> = self
            .sibling_outgoing_edges(h)?
            .into_iter()
            .filter(|candidate| !excluded.contains(candidate))
            .collect();
        match candidates.as_slice() {
            [] => Ok(None),
            [only] => Ok(Some(*only)),
            _ => {
                let reference = self.edge_direction(h)?;
                self.pick_by_angle(reference, &candidates, turn)
            }
        }
    }

    fn pick_by_angle(
        &self,
        reference: Vec2,
        candidates: &[HalfEdgeId],
        turn: Turn,
    ) -> Result<Option<HalfEdgeId>, Error> {
        let mut best: Option<(HalfEdgeId, f32)> = None;
        for &candidate in candidates {
            let heading = match self.edge_direction(candidate) {
                Ok(heading) => heading,
                Err(_) => {
                    debug!(halfedge = %candidate, "skipping unmeasurable fan candidate");
                    continue;
                }
            };
            let angle = signed_angle(reference, heading);
            let better = match (&best, turn) {
                (None, _) => true,
                (Some((_, incumbent)), Turn::Cw) => angle < *incumbent,
                (Some((_, incumbent)), Turn::Ccw) => angle > *incumbent,
            };
            if better {
                best = Some((candidate, angle));
            }
        }
        Ok(best.map(|(candidate, _)| candidate))
    }

    /// Rebuild next/prev links across the whole map from vertex geometry.
    ///
    /// Every edge names its clockwise successor; a successor already claimed
    /// by an earlier edge is excluded from later fans, so no two walks
    /// converge onto the same edge. An edge whose fan comes up empty turns
    /// around onto its twin, which is what carries a walk back along the far
    /// side of dead-end geometry.
    pub fn populate_links(&mut self) -> Result<(), Error> {
        let edges: Vec<HalfEdgeId> = self.edge_ids().collect();
        let mut claimed: HashSet<HalfEdgeId> = HashSet::new();
        for h in edges {
            let next = match self.fan_next_excluding(h, Turn::Cw, &claimed)? {
                Some(next) => next,
                None => self.twin(h).ok_or(Error::MissingTwin(h))?,
            };
            self.link_edges(h, next)?;
            claimed.insert(next);
        }
        Ok(())
    }

    /// Weave a freshly twinned pair into the links around its endpoints,
    /// leaving the rest of the map untouched.
    ///
    /// Each half first names its own successor. Then the edges arriving at
    /// either endpoint are rechecked, since the new pair may have displaced
    /// their old choice. Halves still without a predecessor at the end take
    /// their twin, closing the turnaround at a dead end.
    pub fn link_pair(&mut self, he1: HalfEdgeId, he2: HalfEdgeId) -> Result<(), Error> {
        let twin1 = self.require_edge(he1)?.twin();
        let twin2 = self.require_edge(he2)?.twin();
        if twin1 != Some(he2) || twin2 != Some(he1) {
            return Err(Error::MismatchedPair(he1, he2));
        }
        match self.fan_next(he1, Turn::Cw)? {
            Some(next) => self.link_edges(he1, next)?,
            None => self.link_edges(he1, he2)?,
        }
        match self.fan_next(he2, Turn::Cw)? {
            Some(next) => self.link_edges(he2, next)?,
            None => self.link_edges(he2, he1)?,
        }
        for incoming in self.sibling_incoming_edges(he1)? {
            if self.fan_next(incoming, Turn::Cw)? == Some(he1) {
                self.link_edges(incoming, he1)?;
            }
        }
        if self.prev(he1).is_none() {
            self.link_edges(he2, he1)?;
        }
        for incoming in self.sibling_incoming_edges(he2)? {
            if self.fan_next(incoming, Turn::Cw)? == Some(he2) {
                self.link_edges(incoming, he2)?;
            }
        }
        if self.prev(he2).is_none() {
            self.link_edges(he1, he2)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::element::VertexId;
    use glam::vec2;

    /*
     * Four spokes around a hub at the origin.
     *
     *              n
     *              |
     *         w----o----e
     *              |
     *              s
     */
    fn star() -> (PlanarMap, [VertexId; 5], [HalfEdgeId; 8]) {
        let mut map = PlanarMap::new();
        let o = map.create_vertex(vec2(0.0, 0.0));
        let n = map.create_vertex(vec2(0.0, 10.0));
        let e = map.create_vertex(vec2(10.0, 0.0));
        let s = map.create_vertex(vec2(0.0, -10.0));
        let w = map.create_vertex(vec2(-10.0, 0.0));
        let (on, no) = map.add_edge_pair(o, n).expect("Cannot create edge pair");
        let (oe, eo) = map.add_edge_pair(o, e).expect("Cannot create edge pair");
        let (os, so) = map.add_edge_pair(o, s).expect("Cannot create edge pair");
        let (ow, wo) = map.add_edge_pair(o, w).expect("Cannot create edge pair");
        (map, [o, n, e, s, w], [on, no, oe, eo, os, so, ow, wo])
    }

    #[test]
    fn t_edge_direction_points_at_the_destination() {
        let mut map = PlanarMap::new();
        let a = map.create_vertex(vec2(0.0, 0.0));
        let b = map.create_vertex(vec2(10.0, 0.0));
        let (ab, ba) = map.add_edge_pair(a, b).expect("Cannot create edge pair");
        assert_eq!(map.edge_direction(ab), Ok(vec2(1.0, 0.0)));
        assert_eq!(map.edge_direction(ba), Ok(vec2(-1.0, 0.0)));
        let lone = map.create_edge(a);
        assert_eq!(map.edge_direction(lone), Err(Error::MissingTwin(lone)));
    }

    #[test]
    fn t_fan_next_turns_either_way() {
        let (map, _, [_, no, oe, ..]) = star();
        let ow = map.find_edge(VertexId::from(1), VertexId::from(5)).expect("Cannot find spoke");
        assert_eq!(map.fan_next(no, Turn::Cw), Ok(Some(ow)));
        assert_eq!(map.fan_next(no, Turn::Ccw), Ok(Some(oe)));
        // Pure function of the positions, so asking again changes nothing.
        assert_eq!(map.fan_next(no, Turn::Cw), Ok(Some(ow)));
    }

    #[test]
    fn t_fan_next_is_none_at_a_dead_end() {
        let (map, _, [on, ..]) = star();
        assert_eq!(map.fan_next(on, Turn::Cw), Ok(None));
    }

    #[test]
    fn t_sole_candidate_needs_no_geometry() {
        let mut map = PlanarMap::new();
        let a = map.create_vertex(vec2(0.0, 0.0));
        let b = map.create_vertex(vec2(5.0, 0.0));
        let (ab, _) = map.add_edge_pair(a, b).expect("Cannot create edge pair");
        // A twinless spoke cannot be measured, yet as the only way onward it
        // still gets picked.
        let stub = map.create_edge(b);
        assert_eq!(map.fan_next(ab, Turn::Cw), Ok(Some(stub)));
    }

    #[test]
    fn t_unmeasurable_candidates_lose_the_fan() {
        let mut map = PlanarMap::new();
        let a = map.create_vertex(vec2(0.0, 0.0));
        let b = map.create_vertex(vec2(5.0, 0.0));
        let c = map.create_vertex(vec2(5.0, 5.0));
        let (ab, _) = map.add_edge_pair(a, b).expect("Cannot create edge pair");
        let (bc, _) = map.add_edge_pair(b, c).expect("Cannot create edge pair");
        map.create_edge(b);
        assert_eq!(map.fan_next(ab, Turn::Cw), Ok(Some(bc)));
    }

    #[test]
    fn t_populate_links_walks_the_whole_star() {
        let (mut map, _, [on, no, oe, eo, os, so, ow, wo]) = star();
        map.populate_links().expect("Cannot build links");
        // A star has a single boundary loop visiting every half-edge once.
        assert_eq!(
            map.loop_edges(on).expect("Cannot walk the loop"),
            vec![on, no, ow, wo, os, so, oe, eo]
        );
    }

    #[test]
    fn t_populate_links_closes_a_square() {
        let mut map = PlanarMap::new();
        let corners = [
            vec2(0.0, 0.0),
            vec2(10.0, 0.0),
            vec2(10.0, 10.0),
            vec2(0.0, 10.0),
        ];
        let vs: Vec<VertexId> = corners.iter().map(|&p| map.create_vertex(p)).collect();
        let mut inner = Vec::new();
        let mut outer = Vec::new();
        for i in 0..4 {
            let (fwd, back) = map
                .add_edge_pair(vs[i], vs[(i + 1) % 4])
                .expect("Cannot create edge pair");
            inner.push(fwd);
            outer.push(back);
        }
        map.populate_links().expect("Cannot build links");
        assert_eq!(
            map.loop_edges(inner[0]).expect("Cannot walk the loop"),
            vec![inner[0], inner[1], inner[2], inner[3]]
        );
        assert_eq!(
            map.loop_edges(outer[0]).expect("Cannot walk the loop"),
            vec![outer[0], outer[3], outer[2], outer[1]]
        );
        map.check().expect("Connectivity should be sound");
    }

    #[test]
    fn t_link_pair_makes_a_turnaround_stub() {
        let mut map = PlanarMap::new();
        let a = map.create_vertex(vec2(0.0, 0.0));
        let b = map.create_vertex(vec2(5.0, 0.0));
        let (ab, ba) = map.add_edge_pair(a, b).expect("Cannot create edge pair");
        map.link_pair(ab, ba).expect("Cannot link the pair");
        assert_eq!(map.next(ab), Some(ba));
        assert_eq!(map.next(ba), Some(ab));
        assert_eq!(map.prev(ab), Some(ba));
        assert_eq!(map.prev(ba), Some(ab));
    }

    #[test]
    fn t_link_pair_splices_a_new_spoke() {
        let (mut map, [o, ..], [on, no, oe, eo, os, so, ow, wo]) = star();
        map.populate_links().expect("Cannot build links");
        let x = map.create_vertex(vec2(7.0, 7.0));
        let (ox, xo) = map.add_edge_pair(o, x).expect("Cannot create edge pair");
        map.link_pair(ox, xo).expect("Cannot link the pair");
        // The new spoke lands between east and north in the rotation.
        assert_eq!(map.next(eo), Some(ox));
        assert_eq!(map.prev(ox), Some(eo));
        assert_eq!(map.next(ox), Some(xo));
        assert_eq!(map.next(xo), Some(on));
        assert_eq!(map.prev(on), Some(xo));
        assert_eq!(
            map.loop_edges(on).expect("Cannot walk the loop"),
            vec![on, no, ow, wo, os, so, oe, eo, ox, xo]
        );
    }

    #[test]
    fn t_link_pair_rejects_strangers() {
        let mut map = PlanarMap::new();
        let a = map.create_vertex(vec2(0.0, 0.0));
        let b = map.create_vertex(vec2(5.0, 0.0));
        let c = map.create_vertex(vec2(10.0, 0.0));
        let (ab, _) = map.add_edge_pair(a, b).expect("Cannot create edge pair");
        let (bc, _) = map.add_edge_pair(b, c).expect("Cannot create edge pair");
        assert_eq!(map.link_pair(ab, bc), Err(Error::MismatchedPair(ab, bc)));
    }
}
