//! In-memory scene-graph asset model
//!
//! The asset owns every table (nodes, scenes, skins, animations) and all
//! cross references are plain indices into those tables. The loader fills it
//! from a glTF document; tests and tools can also build one directly.

use glam::{Mat4, Quat, Vec3, Vec4};

/// Translation / rotation / scale triple
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trs {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Trs {
    /// Identity transform: zero translation, identity rotation, unit scale
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    /// Compose `T * R * S`
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.translation)
            * Mat4::from_quat(self.rotation)
            * Mat4::from_scale(self.scale)
    }

    /// Decompose an affine matrix into translation, rotation and scale
    pub fn from_matrix(matrix: Mat4) -> Self {
        let (scale, rotation, translation) = matrix.to_scale_rotation_translation();
        Self {
            translation,
            rotation,
            scale,
        }
    }
}

impl Default for Trs {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Local transform of a node as authored
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeTransform {
    /// Explicit column-major matrix, used verbatim
    Matrix(Mat4),
    /// Separate components, composed as `T * R * S`
    Decomposed(Trs),
}

impl NodeTransform {
    /// Local transform matrix for this node
    pub fn matrix(&self) -> Mat4 {
        match self {
            NodeTransform::Matrix(m) => *m,
            NodeTransform::Decomposed(trs) => trs.to_matrix(),
        }
    }

    /// Rest pose components. Matrix-form nodes are decomposed.
    pub fn trs(&self) -> Trs {
        match self {
            NodeTransform::Matrix(m) => Trs::from_matrix(*m),
            NodeTransform::Decomposed(trs) => *trs,
        }
    }
}

impl Default for NodeTransform {
    fn default() -> Self {
        NodeTransform::Decomposed(Trs::IDENTITY)
    }
}

/// A point in the scene hierarchy
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Node {
    pub name: Option<String>,
    pub transform: NodeTransform,
    pub children: Vec<usize>,
    pub mesh: Option<usize>,
    pub skin: Option<usize>,
}

impl Node {
    /// Create a named node with an identity transform
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_translation(mut self, translation: Vec3) -> Self {
        let mut trs = self.transform.trs();
        trs.translation = translation;
        self.transform = NodeTransform::Decomposed(trs);
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        let mut trs = self.transform.trs();
        trs.rotation = rotation;
        self.transform = NodeTransform::Decomposed(trs);
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        let mut trs = self.transform.trs();
        trs.scale = scale;
        self.transform = NodeTransform::Decomposed(trs);
        self
    }

    pub fn with_matrix(mut self, matrix: Mat4) -> Self {
        self.transform = NodeTransform::Matrix(matrix);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = usize>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn with_mesh(mut self, mesh: usize) -> Self {
        self.mesh = Some(mesh);
        self
    }

    /// Display label: the node name, or `node_<index>`
    pub fn label(&self, index: usize) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("node_{index}"))
    }
}

/// Root node list of one scene
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub name: Option<String>,
    pub nodes: Vec<usize>,
}

/// Mesh summary; vertex data stays with the renderer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshInfo {
    pub name: Option<String>,
    pub primitive_count: usize,
}

/// Joint list plus inverse bind matrices, aligned by position
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Skin {
    pub name: Option<String>,
    pub joints: Vec<usize>,
    pub inverse_bind_matrices: Vec<Mat4>,
    pub skeleton: Option<usize>,
}

impl Skin {
    pub fn new(joints: Vec<usize>, inverse_bind_matrices: Vec<Mat4>) -> Self {
        Self {
            name: None,
            joints,
            inverse_bind_matrices,
            skeleton: None,
        }
    }
}

/// Animated node property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub enum Property {
    Translation,
    Rotation,
    Scale,
}

impl Property {
    pub fn as_str(self) -> &'static str {
        match self {
            Property::Translation => "translation",
            Property::Rotation => "rotation",
            Property::Scale => "scale",
        }
    }
}

/// Keyframe interpolation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub enum Interpolation {
    #[default]
    Linear,
    Step,
    /// Hermite spline; every keyframe stores in-tangent, value, out-tangent
    CubicSpline,
}

impl Interpolation {
    /// Output elements stored per keyframe
    pub fn values_per_keyframe(self) -> usize {
        match self {
            Interpolation::CubicSpline => 3,
            Interpolation::Linear | Interpolation::Step => 1,
        }
    }
}

/// Sampler output, typed once at load time
#[derive(Debug, Clone, PartialEq)]
pub enum KeyframeValues {
    Vec3(Vec<Vec3>),
    /// Quaternions stored x, y, z, w
    Vec4(Vec<Vec4>),
    /// Any other accessor shape; channels using it are skipped
    Unsupported { dimensions: String },
}

impl KeyframeValues {
    pub fn len(&self) -> usize {
        match self {
            KeyframeValues::Vec3(v) => v.len(),
            KeyframeValues::Vec4(v) => v.len(),
            KeyframeValues::Unsupported { .. } => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn describe(&self) -> String {
        match self {
            KeyframeValues::Vec3(_) => "VEC3".to_string(),
            KeyframeValues::Vec4(_) => "VEC4".to_string(),
            KeyframeValues::Unsupported { dimensions } => dimensions.clone(),
        }
    }
}

/// Keyframe times paired with output values
#[derive(Debug, Clone, PartialEq)]
pub struct Sampler {
    pub interpolation: Interpolation,
    pub times: Vec<f32>,
    pub output: KeyframeValues,
}

impl Sampler {
    /// Linear sampler over 3-component values
    pub fn vec3(times: Vec<f32>, values: Vec<Vec3>) -> Self {
        Self {
            interpolation: Interpolation::Linear,
            times,
            output: KeyframeValues::Vec3(values),
        }
    }

    /// Linear sampler over quaternions
    pub fn rotation(times: Vec<f32>, values: Vec<Quat>) -> Self {
        Self {
            interpolation: Interpolation::Linear,
            times,
            output: KeyframeValues::Vec4(values.into_iter().map(Vec4::from).collect()),
        }
    }

    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Time of the last keyframe
    pub fn duration(&self) -> f32 {
        self.times.last().copied().unwrap_or(0.0)
    }
}

/// Binds a sampler to one property of one node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Channel {
    pub target_node: usize,
    pub property: Property,
    pub sampler: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Animation {
    pub name: Option<String>,
    pub channels: Vec<Channel>,
    pub samplers: Vec<Sampler>,
}

impl Animation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Add a sampler and a channel driving `property` of `target_node` with it
    pub fn with_channel(mut self, target_node: usize, property: Property, sampler: Sampler) -> Self {
        self.samplers.push(sampler);
        self.channels.push(Channel {
            target_node,
            property,
            sampler: self.samplers.len() - 1,
        });
        self
    }

    /// Latest keyframe time over all samplers
    pub fn duration(&self) -> f32 {
        self.samplers
            .iter()
            .map(Sampler::duration)
            .fold(0.0, f32::max)
    }
}

/// Complete scene-graph asset
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Asset {
    pub nodes: Vec<Node>,
    pub scenes: Vec<Scene>,
    pub default_scene: Option<usize>,
    pub meshes: Vec<MeshInfo>,
    pub skins: Vec<Skin>,
    pub animations: Vec<Animation>,
}

impl Asset {
    /// Asset with the given nodes and one scene rooted at `roots`
    pub fn with_nodes(nodes: Vec<Node>, roots: Vec<usize>) -> Self {
        Self {
            nodes,
            scenes: vec![Scene {
                name: None,
                nodes: roots,
            }],
            default_scene: Some(0),
            ..Self::default()
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Scene used when the caller does not pick one
    pub fn active_scene(&self) -> Option<usize> {
        self.default_scene
            .or(if self.scenes.is_empty() { None } else { Some(0) })
    }

    /// Number of channels that drive a node, summed over all animations
    pub fn channel_count(&self) -> usize {
        self.animations.iter().map(|a| a.channels.len()).sum()
    }
}
