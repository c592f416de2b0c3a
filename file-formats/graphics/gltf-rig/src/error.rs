use std::io;
use thiserror::Error;

/// Error types for glTF rig loading, validation and posing
#[derive(Error, Debug)]
pub enum RigError {
    /// I/O Error while reading an asset
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The glTF document or one of its buffers could not be read
    #[error("glTF error: {0}")]
    Gltf(#[from] gltf::Error),

    /// An index refers past the end of the table it points into
    #[error("Invalid {kind} reference: index {index} out of range (count {count})")]
    InvalidReference {
        kind: &'static str,
        index: usize,
        count: usize,
    },

    /// A node is listed as the child of more than one parent
    #[error("Node {node} has more than one parent ({first} and {second})")]
    MultipleParents {
        node: usize,
        first: usize,
        second: usize,
    },

    /// The node graph contains a cycle
    #[error("Node hierarchy contains a cycle through node {node}")]
    CyclicHierarchy { node: usize },

    /// Joint list and inverse bind matrices are not aligned
    #[error("Skin {skin}: {joints} joints but {matrices} inverse bind matrices")]
    SkinMismatch {
        skin: usize,
        joints: usize,
        matrices: usize,
    },

    /// Sampler keyframe data cannot be evaluated
    #[error("Animation {animation} sampler {sampler}: {reason}")]
    InvalidSampler {
        animation: usize,
        sampler: usize,
        reason: String,
    },

    /// Sampler output is neither a 3- nor 4-component float array, or does not
    /// match the animated property
    #[error("Animation {animation} sampler {sampler}: unsupported output ({found})")]
    UnsupportedOutput {
        animation: usize,
        sampler: usize,
        found: String,
    },

    /// The requested scene does not exist
    #[error("Scene {0} not found")]
    MissingScene(usize),
}

/// Result type using RigError
pub type Result<T> = std::result::Result<T, RigError>;
