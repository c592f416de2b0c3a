//! Joint matrices for GPU skinning
//!
//! Each skin of the asset gets its own [`SkinBinding`], addressed by skin
//! index. Every tick the binding combines the global transform of each joint
//! node with that joint's inverse bind matrix:
//!
//! ```text
//! joint_matrix[j] = global[joints[j]] * inverse_bind[j]
//! ```
//!
//! A vertex shader then blends up to four joint matrices per vertex.
//!
//! # Example
//!
//! ```rust,no_run
//! use gltf_rig::{Hierarchy, SkinBinding, TransformTables};
//! # fn demo(asset: &gltf_rig::Asset) -> gltf_rig::Result<()> {
//! let hierarchy = Hierarchy::new(asset)?;
//! let mut tables = TransformTables::new(asset.node_count());
//! tables.resolve_bind_pose(asset, &hierarchy);
//!
//! let mut binding = SkinBinding::new(asset, 0)?;
//! binding.update(&tables);
//! let uniforms: Vec<f32> = binding.joint_matrix_data();
//! # Ok(())
//! # }
//! ```

use glam::{Mat4, Vec3};

use crate::asset::Asset;
use crate::error::{Result, RigError};
use crate::hierarchy::Hierarchy;
use crate::transform::TransformTables;

/// Render-facing joint matrix set of one skin
#[derive(Debug, Clone, PartialEq)]
pub struct SkinBinding {
    skin: usize,
    joints: Vec<usize>,
    inverse_bind_matrices: Vec<Mat4>,
    joint_matrices: Vec<Mat4>,
}

impl SkinBinding {
    /// Bind skin `skin` of the asset
    ///
    /// Fails when the skin does not exist, a joint is not a node, or the joint
    /// and inverse bind matrix counts differ.
    pub fn new(asset: &Asset, skin: usize) -> Result<Self> {
        let source = asset.skins.get(skin).ok_or(RigError::InvalidReference {
            kind: "skin",
            index: skin,
            count: asset.skins.len(),
        })?;

        if source.joints.len() != source.inverse_bind_matrices.len() {
            return Err(RigError::SkinMismatch {
                skin,
                joints: source.joints.len(),
                matrices: source.inverse_bind_matrices.len(),
            });
        }

        if let Some(&bad) = source.joints.iter().find(|&&j| j >= asset.nodes.len()) {
            return Err(RigError::InvalidReference {
                kind: "joint node",
                index: bad,
                count: asset.nodes.len(),
            });
        }

        Ok(Self {
            skin,
            joints: source.joints.clone(),
            inverse_bind_matrices: source.inverse_bind_matrices.clone(),
            joint_matrices: vec![Mat4::IDENTITY; source.joints.len()],
        })
    }

    /// Recompute every joint matrix from the current global transforms
    pub fn update(&mut self, tables: &TransformTables) {
        for ((matrix, &joint), inverse_bind) in self
            .joint_matrices
            .iter_mut()
            .zip(&self.joints)
            .zip(&self.inverse_bind_matrices)
        {
            *matrix = tables.global(joint) * *inverse_bind;
        }
    }

    pub fn skin_index(&self) -> usize {
        self.skin
    }

    pub fn joint_count(&self) -> usize {
        self.joints.len()
    }

    pub fn joints(&self) -> &[usize] {
        &self.joints
    }

    pub fn inverse_bind_matrices(&self) -> &[Mat4] {
        &self.inverse_bind_matrices
    }

    pub fn joint_matrices(&self) -> &[Mat4] {
        &self.joint_matrices
    }

    /// Joint matrices as consecutive column-major `[f32; 16]` blocks
    pub fn joint_matrix_data(&self) -> Vec<f32> {
        let mut data = Vec::with_capacity(self.joint_matrices.len() * 16);
        for matrix in &self.joint_matrices {
            data.extend_from_slice(&matrix.to_cols_array());
        }
        data
    }

    /// Joint world positions and parent-to-child bone segments
    ///
    /// A segment connects two joints of this skin where one is the direct
    /// parent node of the other.
    pub fn skeleton_segments(&self, hierarchy: &Hierarchy, tables: &TransformTables) -> Skeleton {
        let points: Vec<Vec3> = self
            .joints
            .iter()
            .map(|&joint| tables.world_position(joint))
            .collect();

        let mut segments = Vec::new();
        for (slot, &joint) in self.joints.iter().enumerate() {
            for &child in hierarchy.children(joint) {
                if let Some(child_slot) = self.joints.iter().position(|&j| j == child) {
                    segments.push((points[slot], points[child_slot]));
                }
            }
        }

        Skeleton { points, segments }
    }
}

/// Debug geometry of a posed skeleton
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Skeleton {
    /// World position of each joint, in joint order
    pub points: Vec<Vec3>,
    /// Parent and child joint positions
    pub segments: Vec<(Vec3, Vec3)>,
}
