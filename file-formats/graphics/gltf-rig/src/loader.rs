//! glTF 2.0 import
//!
//! Reads a `.gltf` (with external or data-URI buffers) or `.glb` file through
//! the `gltf` crate and converts the parts needed for posing into an owned
//! [`Asset`]. Vertex data is not read.

use std::path::Path;

use glam::{Mat4, Quat, Vec3, Vec4};
use gltf::accessor::Dimensions;
use gltf::buffer::Data;

use crate::asset::{
    Animation, Asset, Channel, Interpolation, KeyframeValues, MeshInfo, Node, NodeTransform,
    Property, Sampler, Scene, Skin, Trs,
};
use crate::error::Result;

/// Load an asset from a file; relative buffer URIs resolve against its directory
pub fn load<P: AsRef<Path>>(path: P) -> Result<Asset> {
    let path = path.as_ref();
    let gltf::Gltf { document, blob } = gltf::Gltf::open(path)?;
    let buffers = gltf::import_buffers(&document, path.parent(), blob)?;
    log::debug!(
        "Read {}: {} buffers, {} nodes",
        path.display(),
        buffers.len(),
        document.nodes().count()
    );
    Ok(convert(&document, &buffers))
}

/// Load an asset from memory; only embedded and data-URI buffers are available
pub fn from_slice(bytes: &[u8]) -> Result<Asset> {
    let gltf::Gltf { document, blob } = gltf::Gltf::from_slice(bytes)?;
    let buffers = gltf::import_buffers(&document, None, blob)?;
    Ok(convert(&document, &buffers))
}

fn convert(document: &gltf::Document, buffers: &[Data]) -> Asset {
    let get_buffer = |buffer: gltf::Buffer<'_>| buffers.get(buffer.index()).map(|d| d.0.as_slice());

    let nodes = document.nodes().map(|node| convert_node(&node)).collect();

    let scenes = document
        .scenes()
        .map(|scene| Scene {
            name: scene.name().map(String::from),
            nodes: scene.nodes().map(|n| n.index()).collect(),
        })
        .collect();

    let meshes = document
        .meshes()
        .map(|mesh| MeshInfo {
            name: mesh.name().map(String::from),
            primitive_count: mesh.primitives().count(),
        })
        .collect();

    let skins = document
        .skins()
        .map(|skin| {
            let joints: Vec<usize> = skin.joints().map(|j| j.index()).collect();
            let inverse_bind_matrices = match skin.reader(get_buffer).read_inverse_bind_matrices() {
                Some(matrices) => matrices.map(|m| Mat4::from_cols_array_2d(&m)).collect(),
                None => {
                    log::debug!("Skin {} has no inverse bind matrices, using identity", skin.index());
                    vec![Mat4::IDENTITY; joints.len()]
                }
            };
            Skin {
                name: skin.name().map(String::from),
                joints,
                inverse_bind_matrices,
                skeleton: skin.skeleton().map(|n| n.index()),
            }
        })
        .collect();

    let animations = document
        .animations()
        .map(|animation| convert_animation(&animation, buffers))
        .collect();

    Asset {
        nodes,
        scenes,
        default_scene: document.default_scene().map(|s| s.index()),
        meshes,
        skins,
        animations,
    }
}

fn convert_node(node: &gltf::Node<'_>) -> Node {
    let transform = match node.transform() {
        gltf::scene::Transform::Matrix { matrix } => {
            NodeTransform::Matrix(Mat4::from_cols_array_2d(&matrix))
        }
        gltf::scene::Transform::Decomposed {
            translation,
            rotation,
            scale,
        } => NodeTransform::Decomposed(Trs {
            translation: Vec3::from_array(translation),
            rotation: Quat::from_array(rotation),
            scale: Vec3::from_array(scale),
        }),
    };

    Node {
        name: node.name().map(String::from),
        transform,
        children: node.children().map(|c| c.index()).collect(),
        mesh: node.mesh().map(|m| m.index()),
        skin: node.skin().map(|s| s.index()),
    }
}

fn convert_animation(animation: &gltf::Animation<'_>, buffers: &[Data]) -> Animation {
    let get_buffer = |buffer: gltf::Buffer<'_>| buffers.get(buffer.index()).map(|d| d.0.as_slice());

    // Keyframe data is read through channels, which know the target property.
    // Samplers no channel reads stay empty.
    let mut samplers: Vec<Sampler> = animation
        .samplers()
        .map(|sampler| Sampler {
            interpolation: convert_interpolation(sampler.interpolation()),
            times: Vec::new(),
            output: KeyframeValues::Unsupported {
                dimensions: dimensions_name(sampler.output().dimensions()).to_string(),
            },
        })
        .collect();
    let mut read = vec![false; samplers.len()];
    let mut channels = Vec::new();

    for (channel_index, channel) in animation.channels().enumerate() {
        let target = channel.target();
        let property = match target.property() {
            gltf::animation::Property::Translation => Property::Translation,
            gltf::animation::Property::Rotation => Property::Rotation,
            gltf::animation::Property::Scale => Property::Scale,
            gltf::animation::Property::MorphTargetWeights => {
                log::warn!(
                    "Animation {} channel {}: morph target weights are not supported",
                    animation.index(),
                    channel_index
                );
                continue;
            }
        };

        let sampler_index = channel.sampler().index();
        channels.push(Channel {
            target_node: target.node().index(),
            property,
            sampler: sampler_index,
        });

        if read.get(sampler_index).copied().unwrap_or(true) {
            continue;
        }
        read[sampler_index] = true;

        let reader = channel.reader(get_buffer);
        let sampler = &mut samplers[sampler_index];
        sampler.times = reader
            .read_inputs()
            .map(|times| times.collect())
            .unwrap_or_default();

        let dimensions = channel.sampler().output().dimensions();
        let expected = match property {
            Property::Translation | Property::Scale => Dimensions::Vec3,
            Property::Rotation => Dimensions::Vec4,
        };
        if dimensions != expected {
            // Left as unsupported; clip preparation drops the channel
            log::debug!(
                "Animation {} sampler {}: {} output on a {} channel",
                animation.index(),
                sampler_index,
                dimensions_name(dimensions),
                property.as_str()
            );
            continue;
        }

        sampler.output = match reader.read_outputs() {
            Some(gltf::animation::util::ReadOutputs::Translations(values))
            | Some(gltf::animation::util::ReadOutputs::Scales(values)) => {
                KeyframeValues::Vec3(values.map(Vec3::from_array).collect())
            }
            Some(gltf::animation::util::ReadOutputs::Rotations(values)) => {
                KeyframeValues::Vec4(values.into_f32().map(Vec4::from_array).collect())
            }
            Some(gltf::animation::util::ReadOutputs::MorphTargetWeights(_)) | None => {
                KeyframeValues::Unsupported {
                    dimensions: dimensions_name(dimensions).to_string(),
                }
            }
        };
    }

    Animation {
        name: animation.name().map(String::from),
        channels,
        samplers,
    }
}

fn convert_interpolation(interpolation: gltf::animation::Interpolation) -> Interpolation {
    match interpolation {
        gltf::animation::Interpolation::Linear => Interpolation::Linear,
        gltf::animation::Interpolation::Step => Interpolation::Step,
        gltf::animation::Interpolation::CubicSpline => Interpolation::CubicSpline,
    }
}

/// Accessor type name as written in glTF JSON
fn dimensions_name(dimensions: Dimensions) -> &'static str {
    match dimensions {
        Dimensions::Scalar => "SCALAR",
        Dimensions::Vec2 => "VEC2",
        Dimensions::Vec3 => "VEC3",
        Dimensions::Vec4 => "VEC4",
        Dimensions::Mat2 => "MAT2",
        Dimensions::Mat3 => "MAT3",
        Dimensions::Mat4 => "MAT4",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_name() {
        assert_eq!(dimensions_name(Dimensions::Scalar), "SCALAR");
        assert_eq!(dimensions_name(Dimensions::Vec4), "VEC4");
    }

    #[test]
    fn test_from_slice_rejects_garbage() {
        assert!(from_slice(b"not a gltf file").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        assert!(load("no/such/file.glb").is_err());
    }

    #[test]
    fn test_mismatched_output_keeps_times() {
        let json = br#"{
            "asset": { "version": "2.0" },
            "scene": 0,
            "scenes": [{ "nodes": [0] }],
            "nodes": [{ "name": "root" }],
            "animations": [{
                "samplers": [{ "input": 0, "output": 1 }],
                "channels": [{ "sampler": 0, "target": { "node": 0, "path": "translation" } }]
            }],
            "accessors": [
                { "bufferView": 0, "componentType": 5126, "count": 2, "type": "SCALAR",
                  "min": [0.0], "max": [1.0] },
                { "bufferView": 1, "componentType": 5126, "count": 2, "type": "VEC4" }
            ],
            "bufferViews": [
                { "buffer": 0, "byteOffset": 0, "byteLength": 8 },
                { "buffer": 0, "byteOffset": 8, "byteLength": 32 }
            ],
            "buffers": [{
                "byteLength": 40,
                "uri": "data:application/octet-stream;base64,AAAAAAAAgD8AAAAAAAAAAAAAAAAAAIA/AAAAAAAAAAAAAAAAAACAPw=="
            }]
        }"#;
        let asset = from_slice(json).unwrap();
        let animation = &asset.animations[0];
        assert_eq!(animation.samplers[0].times, vec![0.0, 1.0]);
        assert_eq!(
            animation.samplers[0].output,
            KeyframeValues::Unsupported {
                dimensions: "VEC4".to_string()
            }
        );

        let err = crate::animation::AnimationClip::validate_channel(
            &asset,
            0,
            animation,
            &animation.channels[0],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            crate::error::RigError::UnsupportedOutput { ref found, .. } if found == "VEC4"
        ));
    }

    #[test]
    fn test_minimal_document() {
        let json = br#"{
            "asset": { "version": "2.0" },
            "scene": 0,
            "scenes": [{ "nodes": [0] }],
            "nodes": [
                { "name": "root", "children": [1], "translation": [1.0, 2.0, 3.0] },
                { "matrix": [1,0,0,0, 0,1,0,0, 0,0,1,0, 4,5,6,1] }
            ]
        }"#;
        let asset = from_slice(json).unwrap();
        assert_eq!(asset.node_count(), 2);
        assert_eq!(asset.default_scene, Some(0));
        assert_eq!(asset.nodes[0].children, vec![1]);
        assert_eq!(asset.nodes[0].name.as_deref(), Some("root"));
        assert_eq!(
            asset.nodes[0].transform.trs().translation,
            Vec3::new(1.0, 2.0, 3.0)
        );
        assert_eq!(
            asset.nodes[1].transform,
            NodeTransform::Matrix(Mat4::from_translation(Vec3::new(4.0, 5.0, 6.0)))
        );
    }
}
