//! Animated character instance
//!
//! A [`Character`] owns everything needed to pose one asset: the verified
//! hierarchy, its working pose, transform tables, the prepared clip and one
//! skin binding per skin. Each call to [`Character::update`] runs the tick in
//! a fixed order:
//!
//! 1. sample the active clip into the pose
//! 2. recompute local transforms from the pose
//! 3. propagate global transforms from the scene roots
//! 4. rebuild the joint matrices of every skin
//!
//! Characters share nothing, so separate instances can be updated from
//! separate threads.

use std::path::Path;

use glam::Mat4;

use crate::animation::{AnimationClip, PoseState};
use crate::asset::Asset;
use crate::config::RigConfig;
use crate::error::Result;
use crate::hierarchy::Hierarchy;
use crate::loader;
use crate::skinning::{SkinBinding, Skeleton};
use crate::transform::TransformTables;

/// Lifecycle of a character
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CharacterState {
    /// Nothing loaded; updates are no-ops
    Unloaded,
    /// At rest pose
    Loaded,
    /// Posed at the given animation time
    Posed { time: f32 },
}

/// Global transform of a mesh-bearing node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshTransform {
    pub node: usize,
    pub mesh: usize,
    pub skin: Option<usize>,
    pub transform: Mat4,
}

#[derive(Debug, Clone)]
struct Rig {
    asset: Asset,
    hierarchy: Hierarchy,
    pose: PoseState,
    tables: TransformTables,
    clip: Option<AnimationClip>,
    /// Indexed by skin; `None` for skins that failed validation
    skins: Vec<Option<SkinBinding>>,
}

impl Rig {
    /// Resolve transforms from the current pose, then rebuild the skins
    fn refresh(&mut self) {
        self.tables.resolve_pose(&self.pose, &self.hierarchy);
        self.update_skins();
    }

    /// Resolve the authored transforms, explicit matrices kept verbatim
    fn rest(&mut self) {
        self.tables.resolve_bind_pose(&self.asset, &self.hierarchy);
        self.update_skins();
    }

    fn update_skins(&mut self) {
        for binding in self.skins.iter_mut().flatten() {
            binding.update(&self.tables);
        }
    }
}

/// One posable instance of an asset
#[derive(Debug, Clone)]
pub struct Character {
    state: CharacterState,
    rig: Option<Box<Rig>>,
}

impl Character {
    /// A character with nothing loaded
    pub fn unloaded() -> Self {
        Self {
            state: CharacterState::Unloaded,
            rig: None,
        }
    }

    /// Load and set up a character from a `.gltf` or `.glb` file
    ///
    /// Failures are logged and produce an [`CharacterState::Unloaded`]
    /// character whose updates do nothing.
    pub fn load<P: AsRef<Path>>(path: P, config: &RigConfig) -> Self {
        let path = path.as_ref();
        match loader::load(path).and_then(|asset| Self::from_asset(asset, config)) {
            Ok(character) => character,
            Err(e) => {
                log::error!("Failed to load character from {}: {}", path.display(), e);
                Self::unloaded()
            }
        }
    }

    /// Run the one-time setup for an in-memory asset
    ///
    /// The hierarchy must be a valid forest. Skins that fail validation are
    /// logged and left inert; a missing animation leaves the character at
    /// rest pose.
    pub fn from_asset(asset: Asset, config: &RigConfig) -> Result<Self> {
        let scene = config.scene.or(asset.active_scene());
        let hierarchy = Hierarchy::for_scene(&asset, scene)?;

        let skins = (0..asset.skins.len())
            .map(|index| match SkinBinding::new(&asset, index) {
                Ok(binding) => Some(binding),
                Err(e) => {
                    log::warn!("Skin {index} disabled: {e}");
                    None
                }
            })
            .collect();

        let clip = if asset.animations.is_empty() {
            log::debug!("Asset has no animations, staying at rest pose");
            None
        } else {
            match AnimationClip::prepare(&asset, config.animation_index) {
                Ok(clip) => Some(clip),
                Err(e) => {
                    log::warn!("Animation disabled: {e}");
                    None
                }
            }
        };

        let pose = PoseState::from_asset(&asset);
        let tables = TransformTables::new(asset.node_count());

        let mut rig = Rig {
            asset,
            hierarchy,
            pose,
            tables,
            clip,
            skins,
        };
        rig.rest();

        log::debug!(
            "Character ready: {} nodes, {} skins, animation {}",
            rig.asset.node_count(),
            rig.skins.len(),
            if rig.clip.is_some() { "active" } else { "none" }
        );

        Ok(Self {
            state: CharacterState::Loaded,
            rig: Some(Box::new(rig)),
        })
    }

    pub fn state(&self) -> CharacterState {
        self.state
    }

    pub fn is_loaded(&self) -> bool {
        self.rig.is_some()
    }

    /// Pose the character at animation time `time` (seconds)
    pub fn update(&mut self, time: f32) {
        let Some(rig) = self.rig.as_deref_mut() else {
            return;
        };
        if let Some(clip) = &rig.clip {
            clip.apply(time, &mut rig.pose);
        }
        rig.refresh();
        self.state = CharacterState::Posed { time };
    }

    /// Return every node to its authored transform
    pub fn reset_to_rest_pose(&mut self) {
        let Some(rig) = self.rig.as_deref_mut() else {
            return;
        };
        rig.pose.reset_to_rest_pose(&rig.asset);
        rig.rest();
        self.state = CharacterState::Loaded;
    }

    /// Current joint matrices of skin `skin`
    pub fn joint_matrices(&self, skin: usize) -> Option<&[Mat4]> {
        self.skin_binding(skin).map(SkinBinding::joint_matrices)
    }

    pub fn skin_binding(&self, skin: usize) -> Option<&SkinBinding> {
        self.rig.as_ref()?.skins.get(skin)?.as_ref()
    }

    /// Global transform of `node` in the current pose
    pub fn global_transform(&self, node: usize) -> Option<Mat4> {
        let rig = self.rig.as_ref()?;
        (node < rig.tables.len()).then(|| rig.tables.global(node))
    }

    /// Global transform of every reachable node that carries a mesh
    pub fn mesh_transforms(&self) -> Vec<MeshTransform> {
        let Some(rig) = self.rig.as_ref() else {
            return Vec::new();
        };
        rig.hierarchy
            .depth_first()
            .iter()
            .filter_map(|&node| {
                let source = &rig.asset.nodes[node];
                source.mesh.map(|mesh| MeshTransform {
                    node,
                    mesh,
                    skin: source.skin,
                    transform: rig.tables.global(node),
                })
            })
            .collect()
    }

    /// Debug skeleton of skin `skin` in the current pose
    pub fn skeleton(&self, skin: usize) -> Option<Skeleton> {
        let rig = self.rig.as_ref()?;
        let binding = rig.skins.get(skin)?.as_ref()?;
        Some(binding.skeleton_segments(&rig.hierarchy, &rig.tables))
    }

    pub fn pose(&self) -> Option<&PoseState> {
        self.rig.as_ref().map(|rig| &rig.pose)
    }

    pub fn asset(&self) -> Option<&Asset> {
        self.rig.as_ref().map(|rig| &rig.asset)
    }

    pub fn hierarchy(&self) -> Option<&Hierarchy> {
        self.rig.as_ref().map(|rig| &rig.hierarchy)
    }

    pub fn transforms(&self) -> Option<&TransformTables> {
        self.rig.as_ref().map(|rig| &rig.tables)
    }

    /// The prepared clip, if the configured animation is playable
    pub fn clip(&self) -> Option<&AnimationClip> {
        self.rig.as_ref()?.clip.as_ref()
    }
}

impl Default for Character {
    fn default() -> Self {
        Self::unloaded()
    }
}
