//! Local and global node transform computation
//!
//! Local transforms come either straight from the asset (bind pose) or from
//! the mutable per-node pose state. Globals are then propagated top-down in
//! the hierarchy's depth-first order, so a parent is always written before
//! any of its children.

use glam::{Mat4, Vec3};

use crate::animation::PoseState;
use crate::asset::{Asset, NodeTransform};
use crate::hierarchy::Hierarchy;

/// Local matrix of an authored transform: explicit matrices verbatim,
/// otherwise `T * R * S`
pub fn local_transform(transform: &NodeTransform) -> Mat4 {
    transform.matrix()
}

/// Dense per-node transform tables, keyed by node index
#[derive(Debug, Clone)]
pub struct TransformTables {
    local: Vec<Mat4>,
    global: Vec<Mat4>,
    /// Whether the last resolve wrote a global for this node
    resolved: Vec<bool>,
}

impl TransformTables {
    /// Identity tables sized for `node_count` nodes
    pub fn new(node_count: usize) -> Self {
        Self {
            local: vec![Mat4::IDENTITY; node_count],
            global: vec![Mat4::IDENTITY; node_count],
            resolved: vec![false; node_count],
        }
    }

    /// Recompute every table from the asset's authored transforms
    pub fn resolve_bind_pose(&mut self, asset: &Asset, hierarchy: &Hierarchy) {
        self.resize(asset.nodes.len());
        for (local, node) in self.local.iter_mut().zip(&asset.nodes) {
            *local = local_transform(&node.transform);
        }
        self.propagate(hierarchy);
    }

    /// Recompute every table from the current pose state (`T * R * S` per node)
    pub fn resolve_pose(&mut self, pose: &PoseState, hierarchy: &Hierarchy) {
        self.resize(pose.len());
        for (local, state) in self.local.iter_mut().zip(pose.states()) {
            *local = state.to_matrix();
        }
        self.propagate(hierarchy);
    }

    /// Propagate globals from the current local table.
    ///
    /// `global[root] = local[root]`, `global[child] = global[parent] * local[child]`.
    pub fn propagate(&mut self, hierarchy: &Hierarchy) {
        self.resolved.iter_mut().for_each(|r| *r = false);
        self.global.iter_mut().for_each(|g| *g = Mat4::IDENTITY);

        for &node in hierarchy.depth_first() {
            let parent_global = match hierarchy.parent(node) {
                Some(parent) if self.resolved[parent] => self.global[parent],
                _ => Mat4::IDENTITY,
            };
            self.global[node] = parent_global * self.local[node];
            self.resolved[node] = true;
        }
    }

    fn resize(&mut self, node_count: usize) {
        if self.local.len() != node_count {
            *self = Self::new(node_count);
        }
    }

    pub fn len(&self) -> usize {
        self.local.len()
    }

    pub fn is_empty(&self) -> bool {
        self.local.is_empty()
    }

    pub fn local(&self, node: usize) -> Mat4 {
        self.local.get(node).copied().unwrap_or(Mat4::IDENTITY)
    }

    /// Global transform of `node`, identity for unknown or unreached nodes
    pub fn global(&self, node: usize) -> Mat4 {
        self.global.get(node).copied().unwrap_or(Mat4::IDENTITY)
    }

    pub fn globals(&self) -> &[Mat4] {
        &self.global
    }

    /// Whether the last resolve reached `node` from a scene root
    pub fn is_resolved(&self, node: usize) -> bool {
        self.resolved.get(node).copied().unwrap_or(false)
    }

    /// World-space origin of `node`
    pub fn world_position(&self, node: usize) -> Vec3 {
        self.global(node).transform_point3(Vec3::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::Node;
    use glam::Quat;

    fn approx_eq(a: Mat4, b: Mat4) -> bool {
        a.abs_diff_eq(b, 1e-5)
    }

    fn three_level() -> Asset {
        Asset::with_nodes(
            vec![
                Node::new("root")
                    .with_translation(Vec3::new(1.0, 0.0, 0.0))
                    .with_children([1]),
                Node::new("mid")
                    .with_rotation(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2))
                    .with_children([2]),
                Node::new("leaf").with_translation(Vec3::new(0.0, 0.0, 2.0)),
            ],
            vec![0],
        )
    }

    #[test]
    fn test_root_global_equals_local() {
        let asset = three_level();
        let h = Hierarchy::new(&asset).unwrap();
        let mut tables = TransformTables::new(asset.node_count());
        tables.resolve_bind_pose(&asset, &h);
        assert_eq!(tables.global(0), tables.local(0));
    }

    #[test]
    fn test_child_global_is_parent_times_local() {
        let asset = three_level();
        let h = Hierarchy::new(&asset).unwrap();
        let mut tables = TransformTables::new(asset.node_count());
        tables.resolve_bind_pose(&asset, &h);

        for node in 1..asset.node_count() {
            let parent = h.parent(node).unwrap();
            assert!(approx_eq(
                tables.global(node),
                tables.global(parent) * tables.local(node)
            ));
        }

        // Leaf: 2 units along +Z, rotated 90 degrees about Y -> +X, offset by root
        let p = tables.world_position(2);
        assert!((p - Vec3::new(3.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_unreachable_node_left_identity() {
        let mut asset = three_level();
        asset
            .nodes
            .push(Node::new("orphan").with_translation(Vec3::splat(5.0)));
        let h = Hierarchy::new(&asset).unwrap();
        let mut tables = TransformTables::new(0);
        tables.resolve_bind_pose(&asset, &h);
        assert_eq!(tables.len(), 4);
        assert!(!tables.is_resolved(3));
        assert_eq!(tables.global(3), Mat4::IDENTITY);
        assert!(tables.is_resolved(2));
    }

    #[test]
    fn test_resolve_pose_uses_state() {
        let asset = three_level();
        let h = Hierarchy::new(&asset).unwrap();
        let mut pose = PoseState::from_asset(&asset);
        pose.get_mut(0).unwrap().translation = Vec3::new(0.0, 10.0, 0.0);

        let mut tables = TransformTables::new(asset.node_count());
        tables.resolve_pose(&pose, &h);
        let p = tables.world_position(2);
        assert!((p - Vec3::new(2.0, 10.0, 0.0)).length() < 1e-5);
    }
}
