//! Skeletal animation and skinning for glTF characters
//!
//! Loads a glTF 2.0 asset into an index-addressed [`Asset`], then poses it:
//! keyframe channels are sampled into a per-node pose, local and global
//! transforms are resolved over the verified node forest, and joint matrices
//! are built per skin for GPU skinning.
//!
//! ```rust,no_run
//! use gltf_rig::{Character, RigConfig};
//! use gltf_rig::animation::PlaybackClock;
//!
//! let config = RigConfig::default();
//! let mut character = Character::load("CesiumMan.glb", &config);
//! let mut clock = PlaybackClock::new(config.playback_speed);
//!
//! character.update(clock.advance(1.0 / 60.0));
//! if let Some(joints) = character.joint_matrices(0) {
//!     println!("{} joint matrices", joints.len());
//! }
//! ```

pub mod animation;
pub mod asset;
pub mod character;
pub mod config;
pub mod error;
pub mod hierarchy;
pub mod loader;
pub mod skinning;
pub mod transform;

// Re-export common types
pub use asset::{
    Animation, Asset, Channel, Interpolation, KeyframeValues, MeshInfo, Node, NodeTransform,
    Property, Sampler, Scene, Skin, Trs,
};
pub use character::{Character, CharacterState, MeshTransform};
pub use config::RigConfig;
pub use error::{Result, RigError};
pub use hierarchy::Hierarchy;
pub use skinning::{Skeleton, SkinBinding};
pub use transform::{TransformTables, local_transform};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
