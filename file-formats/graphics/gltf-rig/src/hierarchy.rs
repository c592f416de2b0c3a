//! Verified node forest
//!
//! Child lists in the asset are checked once: every index must be in range,
//! every node has at most one parent and no node is its own ancestor. After
//! that, traversal code can walk the forest without guarding against cycles.

use crate::asset::Asset;
use crate::error::{Result, RigError};

/// Parent table and traversal order for one scene of an asset
#[derive(Debug, Clone)]
pub struct Hierarchy {
    /// Parent node index, `None` for roots and detached nodes
    parents: Vec<Option<usize>>,
    /// Child lists copied from the asset
    children: Vec<Vec<usize>>,
    /// Root nodes of the active scene
    roots: Vec<usize>,
    /// Depth-first pre-order of every node reachable from `roots`
    order: Vec<usize>,
    reachable: Vec<bool>,
}

impl Hierarchy {
    /// Build the hierarchy for the asset's active scene
    pub fn new(asset: &Asset) -> Result<Self> {
        Self::for_scene(asset, asset.active_scene())
    }

    /// Build the hierarchy rooted at `scene`.
    ///
    /// Without a scene, every parentless node is treated as a root.
    pub fn for_scene(asset: &Asset, scene: Option<usize>) -> Result<Self> {
        let count = asset.nodes.len();
        let mut parents: Vec<Option<usize>> = vec![None; count];

        for (parent, node) in asset.nodes.iter().enumerate() {
            for &child in &node.children {
                if child >= count {
                    return Err(RigError::InvalidReference {
                        kind: "child node",
                        index: child,
                        count,
                    });
                }
                if child == parent {
                    return Err(RigError::CyclicHierarchy { node: child });
                }
                if let Some(first) = parents[child] {
                    return Err(RigError::MultipleParents {
                        node: child,
                        first,
                        second: parent,
                    });
                }
                parents[child] = Some(parent);
            }
        }

        // With single parents, a cycle shows up as a parent chain longer than
        // the node count.
        for start in 0..count {
            let mut current = start;
            let mut steps = 0;
            while let Some(parent) = parents[current] {
                steps += 1;
                if parent == start || steps > count {
                    return Err(RigError::CyclicHierarchy { node: start });
                }
                current = parent;
            }
        }

        let roots = match scene {
            Some(scene_index) => {
                let scene = asset
                    .scenes
                    .get(scene_index)
                    .ok_or(RigError::MissingScene(scene_index))?;
                for &root in &scene.nodes {
                    if root >= count {
                        return Err(RigError::InvalidReference {
                            kind: "scene root",
                            index: root,
                            count,
                        });
                    }
                }
                // A listed node that has a parent is propagated from its
                // topmost ancestor, so its parent global is always written first
                let mut roots: Vec<usize> = Vec::with_capacity(scene.nodes.len());
                for &listed in &scene.nodes {
                    let mut top = listed;
                    while let Some(parent) = parents[top] {
                        top = parent;
                    }
                    if top != listed {
                        log::warn!(
                            "Scene {scene_index} lists node {listed}, which has a parent; rooting at node {top}"
                        );
                    }
                    if !roots.contains(&top) {
                        roots.push(top);
                    }
                }
                roots
            }
            None => (0..count).filter(|&n| parents[n].is_none()).collect(),
        };

        let children: Vec<Vec<usize>> = asset.nodes.iter().map(|n| n.children.clone()).collect();

        let mut order = Vec::with_capacity(count);
        let mut visited = vec![false; count];
        let mut stack: Vec<usize> = Vec::new();
        for &root in &roots {
            stack.push(root);
            while let Some(node) = stack.pop() {
                if visited[node] {
                    continue;
                }
                visited[node] = true;
                order.push(node);
                stack.extend(children[node].iter().rev().copied());
            }
        }

        log::debug!(
            "Hierarchy: {} nodes, {} roots, {} reachable",
            count,
            roots.len(),
            order.len()
        );

        Ok(Self {
            parents,
            children,
            roots,
            order,
            reachable: visited,
        })
    }

    pub fn node_count(&self) -> usize {
        self.parents.len()
    }

    pub fn roots(&self) -> &[usize] {
        &self.roots
    }

    pub fn parent(&self, node: usize) -> Option<usize> {
        self.parents.get(node).copied().flatten()
    }

    pub fn children(&self, node: usize) -> &[usize] {
        self.children.get(node).map_or(&[], Vec::as_slice)
    }

    /// Reachable nodes in depth-first pre-order; parents always precede children
    pub fn depth_first(&self) -> &[usize] {
        &self.order
    }

    /// Whether `node` is reachable from the active scene roots
    pub fn is_reachable(&self, node: usize) -> bool {
        self.reachable.get(node).copied().unwrap_or(false)
    }

    /// Number of ancestors between `node` and its root
    pub fn depth(&self, node: usize) -> usize {
        let mut depth = 0;
        let mut current = node;
        while let Some(parent) = self.parent(current) {
            depth += 1;
            current = parent;
        }
        depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::{Node, Scene};
    use crate::transform::TransformTables;
    use glam::Vec3;
    use pretty_assertions::assert_eq;

    fn chain() -> Asset {
        Asset::with_nodes(
            vec![
                Node::new("root").with_children([1, 3]),
                Node::new("spine").with_children([2]),
                Node::new("head"),
                Node::new("arm"),
            ],
            vec![0],
        )
    }

    #[test]
    fn test_depth_first_order() {
        let h = Hierarchy::new(&chain()).unwrap();
        assert_eq!(h.depth_first(), &[0, 1, 2, 3]);
        assert_eq!(h.parent(2), Some(1));
        assert_eq!(h.parent(0), None);
        assert_eq!(h.depth(2), 2);
    }

    #[test]
    fn test_invalid_child_rejected() {
        let asset = Asset::with_nodes(vec![Node::new("a").with_children([5])], vec![0]);
        assert!(matches!(
            Hierarchy::new(&asset),
            Err(RigError::InvalidReference { index: 5, .. })
        ));
    }

    #[test]
    fn test_cycle_rejected() {
        let asset = Asset::with_nodes(
            vec![
                Node::new("a").with_children([1]),
                Node::new("b").with_children([2]),
                Node::new("c").with_children([0]),
            ],
            vec![0],
        );
        assert!(matches!(
            Hierarchy::new(&asset),
            Err(RigError::CyclicHierarchy { .. })
        ));
    }

    #[test]
    fn test_self_parent_rejected() {
        let asset = Asset::with_nodes(vec![Node::new("a").with_children([0])], vec![0]);
        assert!(matches!(
            Hierarchy::new(&asset),
            Err(RigError::CyclicHierarchy { node: 0 })
        ));
    }

    #[test]
    fn test_multiple_parents_rejected() {
        let asset = Asset::with_nodes(
            vec![
                Node::new("a").with_children([2]),
                Node::new("b").with_children([2]),
                Node::new("c"),
            ],
            vec![0, 1],
        );
        assert!(matches!(
            Hierarchy::new(&asset),
            Err(RigError::MultipleParents { node: 2, .. })
        ));
    }

    #[test]
    fn test_unreachable_nodes_excluded() {
        let mut asset = chain();
        asset.nodes.push(Node::new("detached"));
        let h = Hierarchy::new(&asset).unwrap();
        assert!(!h.is_reachable(4));
        assert_eq!(h.depth_first().len(), 4);
    }

    #[test]
    fn test_no_scene_uses_parentless_nodes() {
        let mut asset = chain();
        asset.nodes.push(Node::new("detached"));
        asset.scenes.clear();
        asset.default_scene = None;
        let h = Hierarchy::new(&asset).unwrap();
        assert_eq!(h.roots(), &[0, 4]);
        assert!(h.is_reachable(4));
    }

    #[test]
    fn test_scene_listing_descendant_before_ancestor() {
        let asset = Asset::with_nodes(
            vec![
                Node::new("parent")
                    .with_translation(Vec3::new(5.0, 0.0, 0.0))
                    .with_children([1]),
                Node::new("child").with_translation(Vec3::new(0.0, 1.0, 0.0)),
            ],
            vec![1, 0],
        );
        let h = Hierarchy::new(&asset).unwrap();
        assert_eq!(h.roots(), &[0]);
        assert_eq!(h.depth_first(), &[0, 1]);

        let mut tables = TransformTables::new(asset.node_count());
        tables.resolve_bind_pose(&asset, &h);
        assert!((tables.world_position(1) - Vec3::new(5.0, 1.0, 0.0)).length() < 0.001);
    }

    #[test]
    fn test_scene_listing_only_descendant() {
        let mut asset = chain();
        asset.scenes[0].nodes = vec![2];
        let h = Hierarchy::new(&asset).unwrap();
        assert_eq!(h.roots(), &[0]);
        assert!(h.is_reachable(2));
    }

    #[test]
    fn test_missing_scene() {
        let asset = chain();
        assert!(matches!(
            Hierarchy::for_scene(&asset, Some(3)),
            Err(RigError::MissingScene(3))
        ));
        let mut asset = chain();
        asset.scenes.push(Scene {
            name: None,
            nodes: vec![9],
        });
        assert!(Hierarchy::for_scene(&asset, Some(1)).is_err());
    }
}
