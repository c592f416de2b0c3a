//! Mutable per-node pose

use glam::{Mat4, Quat, Vec3};

use crate::asset::{Asset, Trs};

/// Current translation, rotation and scale of one node
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeState {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl NodeState {
    /// Local transform `T * R * S`
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

impl From<Trs> for NodeState {
    fn from(trs: Trs) -> Self {
        Self {
            translation: trs.translation,
            rotation: trs.rotation,
            scale: trs.scale,
        }
    }
}

impl Default for NodeState {
    fn default() -> Self {
        Trs::IDENTITY.into()
    }
}

/// Working pose of every node of one character, indexed by node
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PoseState {
    states: Vec<NodeState>,
}

impl PoseState {
    /// Rest pose of the asset; matrix-form nodes are decomposed
    pub fn from_asset(asset: &Asset) -> Self {
        Self {
            states: asset
                .nodes
                .iter()
                .map(|node| NodeState::from(node.transform.trs()))
                .collect(),
        }
    }

    /// Re-initialize every node from the asset's rest pose
    pub fn reset_to_rest_pose(&mut self, asset: &Asset) {
        self.states.clear();
        self.states
            .extend(asset.nodes.iter().map(|node| NodeState::from(node.transform.trs())));
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn get(&self, node: usize) -> Option<&NodeState> {
        self.states.get(node)
    }

    pub fn get_mut(&mut self, node: usize) -> Option<&mut NodeState> {
        self.states.get_mut(node)
    }

    pub fn states(&self) -> &[NodeState] {
        &self.states
    }
}
