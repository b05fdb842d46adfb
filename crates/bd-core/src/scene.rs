//! The scene host: owns every object on the drawing surface.
//!
//! Objects live in a stable graph so indices survive removals. Edges go
//! from a block to each port attached to it (group membership). Paint and
//! hit-test order is kept separately in `z_order`, back to front.

use crate::id::ObjectId;
use crate::model::{Bounds, ObjectTag, PortDirection, SceneObject};
use petgraph::Direction;
use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableDiGraph;
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct Scene {
    /// Objects plus block → port membership edges.
    pub graph: StableDiGraph<SceneObject, ()>,

    /// Index from ObjectId → NodeIndex for fast lookup.
    id_index: HashMap<ObjectId, NodeIndex>,

    /// Back-to-front paint order.
    z_order: Vec<ObjectId>,
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an object on top of the z-order. An object with the same id
    /// and tag is replaced in place; a different tag is refused with `None`.
    pub fn add(&mut self, object: SceneObject) -> Option<ObjectId> {
        let id = object.id;
        if let Some(&idx) = self.id_index.get(&id) {
            let current = self.graph[idx].tag();
            if current != object.tag() {
                log::warn!("refusing to replace {current:?} {id} with a {:?}", object.tag());
                return None;
            }
            self.graph[idx] = object;
            return Some(id);
        }
        let idx = self.graph.add_node(object);
        self.id_index.insert(id, idx);
        self.z_order.push(id);
        Some(id)
    }

    /// Remove an object. Ports attached to a removed block stay in the
    /// scene but lose their owner.
    pub fn remove(&mut self, id: ObjectId) -> Option<SceneObject> {
        let members = self.members(id);
        let idx = self.id_index.remove(&id)?;
        for member in members {
            if let Some(port) = self.get_mut(member).and_then(|o| o.port_mut()) {
                port.owner = None;
            }
        }
        self.z_order.retain(|z| *z != id);
        self.graph.remove_node(idx)
    }

    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.id_index.get(&id).map(|idx| &self.graph[*idx])
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.id_index
            .get(&id)
            .copied()
            .map(|idx| &mut self.graph[idx])
    }

    pub fn index_of(&self, id: ObjectId) -> Option<NodeIndex> {
        self.id_index.get(&id).copied()
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.id_index.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.z_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.z_order.is_empty()
    }

    /// Object ids, back to front.
    pub fn ids(&self) -> &[ObjectId] {
        &self.z_order
    }

    /// Objects, back to front.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &SceneObject> + '_ {
        self.z_order.iter().filter_map(|id| self.get(*id))
    }

    /// Ids of every object with the given tag, back to front.
    pub fn ids_of(&self, tag: ObjectTag) -> Vec<ObjectId> {
        self.iter()
            .filter(|o| o.tag() == tag)
            .map(|o| o.id)
            .collect()
    }

    // ─── Group membership ────────────────────────────────────────────────

    /// Attach a port to a block's group. Moves the port out of any previous
    /// group. Returns false if either id is missing or has the wrong kind.
    pub fn attach(&mut self, block: ObjectId, port: ObjectId) -> bool {
        let (Some(block_idx), Some(port_idx)) = (self.index_of(block), self.index_of(port)) else {
            return false;
        };
        if !self.graph[block_idx].is_block() || self.graph[port_idx].port().is_none() {
            return false;
        }
        self.detach(port);
        self.graph.add_edge(block_idx, port_idx, ());
        if let Some(body) = self.graph[port_idx].port_mut() {
            body.owner = Some(block);
        }
        log::trace!("attach {port} -> {block}");
        true
    }

    /// Remove a port from its block's group, keeping it in the scene.
    pub fn detach(&mut self, port: ObjectId) {
        let Some(port_idx) = self.index_of(port) else {
            return;
        };
        let incoming: Vec<_> = self
            .graph
            .edges_directed(port_idx, Direction::Incoming)
            .map(|e| e.id())
            .collect();
        for edge in incoming {
            self.graph.remove_edge(edge);
        }
        if let Some(body) = self.graph[port_idx].port_mut() {
            body.owner = None;
        }
    }

    /// The block whose group holds this port.
    pub fn owner_of(&self, port: ObjectId) -> Option<ObjectId> {
        let idx = self.index_of(port)?;
        self.graph
            .neighbors_directed(idx, Direction::Incoming)
            .next()
            .map(|owner| self.graph[owner].id)
    }

    /// Ports attached to a block, in attachment order.
    pub fn members(&self, block: ObjectId) -> Vec<ObjectId> {
        let Some(idx) = self.index_of(block) else {
            return Vec::new();
        };
        let mut members: Vec<NodeIndex> = self
            .graph
            .neighbors_directed(idx, Direction::Outgoing)
            .collect();
        members.sort();
        members.into_iter().map(|m| self.graph[m].id).collect()
    }

    /// Bounds of an object including its member ports.
    pub fn composite_bounds(&self, id: ObjectId) -> Option<Bounds> {
        let own = self.get(id)?.bounds();
        Some(
            self.members(id)
                .into_iter()
                .filter_map(|m| self.get(m))
                .fold(own, |acc, m| acc.union(&m.bounds())),
        )
    }

    // ─── Transforms ──────────────────────────────────────────────────────

    /// Move an object by a delta; a block carries its member ports along.
    pub fn translate(&mut self, id: ObjectId, dx: f32, dy: f32) -> bool {
        let Some(obj) = self.get_mut(id) else {
            return false;
        };
        obj.translate(dx, dy);
        for member in self.members(id) {
            if let Some(port) = self.get_mut(member) {
                port.translate(dx, dy);
            }
        }
        true
    }

    /// Set an object's scale. For a block, member ports are re-anchored:
    /// inputs keep their offset from the left edge, outputs keep their
    /// offset from the scaled right edge, and the vertical offset scales
    /// with the block's height.
    pub fn set_scale(&mut self, id: ObjectId, scale_x: f32, scale_y: f32) -> bool {
        let Some(obj) = self.get_mut(id) else {
            return false;
        };
        let old = obj.bounds();
        let old_scale_y = obj.scale_y;
        obj.scale_x = scale_x;
        obj.scale_y = scale_y;
        let new = obj.bounds();
        let ratio_y = if old_scale_y != 0.0 {
            scale_y / old_scale_y
        } else {
            1.0
        };

        for member in self.members(id) {
            let Some(port) = self.get_mut(member) else {
                continue;
            };
            let direction = port.port().map(|p| p.direction);
            match direction {
                Some(PortDirection::Input) => {
                    port.left = new.x + (port.left - old.x);
                }
                Some(PortDirection::Output) => {
                    port.left = new.right() + (port.left - old.right());
                }
                None => {}
            }
            port.top = new.y + (port.top - old.y) * ratio_y;
        }
        true
    }
}
