//! `tree` command: node hierarchy of the active scene

use std::path::Path;

use anyhow::{Context, Result};
use gltf_rig::{Asset, Hierarchy, NodeTransform, loader};

use crate::utils::{NodeType, TreeNode, TreeOptions, format_rotation, format_vec3, render_tree};

pub fn execute(file: &Path, depth: Option<usize>, no_color: bool, compact: bool) -> Result<()> {
    let asset = loader::load(file)
        .with_context(|| format!("Failed to read glTF file: {}", file.display()))?;
    let hierarchy = Hierarchy::new(&asset)
        .with_context(|| format!("Invalid node hierarchy in {}", file.display()))?;

    let file_name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string());

    let root = build_tree(&asset, &hierarchy, file_name);
    let options = TreeOptions {
        max_depth: depth,
        no_color,
        show_metadata: true,
        compact,
    };
    print!("{}", render_tree(&root, &options));
    Ok(())
}

fn build_tree(asset: &Asset, hierarchy: &Hierarchy, name: String) -> TreeNode {
    let scene_label = match asset.active_scene() {
        Some(scene) => match asset.scenes.get(scene).and_then(|s| s.name.as_deref()) {
            Some(name) => format!("Scene {scene} ({name})"),
            None => format!("Scene {scene}"),
        },
        None => "Parentless nodes".to_string(),
    };

    let mut scene = TreeNode::new(scene_label, NodeType::Group);
    for &root in hierarchy.roots() {
        scene = scene.add_child(node_subtree(asset, hierarchy, root));
    }
    let mut tree = TreeNode::new(name, NodeType::Root).add_child(scene);

    // Top-level nodes of subtrees outside the active scene
    let detached: Vec<usize> = (0..asset.node_count())
        .filter(|&n| !hierarchy.is_reachable(n) && hierarchy.parent(n).is_none())
        .collect();
    if !detached.is_empty() {
        let mut group = TreeNode::new("Detached", NodeType::Group);
        for node in detached {
            group = group.add_child(node_subtree(asset, hierarchy, node));
        }
        tree = tree.add_child(group);
    }

    tree
}

fn node_subtree(asset: &Asset, hierarchy: &Hierarchy, index: usize) -> TreeNode {
    let node = &asset.nodes[index];
    let skins: Vec<String> = asset
        .skins
        .iter()
        .enumerate()
        .filter(|(_, skin)| skin.joints.contains(&index))
        .map(|(skin_index, _)| skin_index.to_string())
        .collect();

    let node_type = if !skins.is_empty() {
        NodeType::Joint
    } else if node.mesh.is_some() {
        NodeType::Mesh
    } else {
        NodeType::Node
    };

    let mut tree = TreeNode::new(format!("[{index}] {}", node.label(index)), node_type);
    match &node.transform {
        NodeTransform::Matrix(_) => tree = tree.with_metadata("transform", "matrix"),
        NodeTransform::Decomposed(trs) => {
            if trs.translation != glam::Vec3::ZERO {
                tree = tree.with_metadata("translation", format_vec3(trs.translation));
            }
            if trs.rotation != glam::Quat::IDENTITY {
                tree = tree.with_metadata("rotation", format_rotation(trs.rotation));
            }
            if trs.scale != glam::Vec3::ONE {
                tree = tree.with_metadata("scale", format_vec3(trs.scale));
            }
        }
    }
    if !skins.is_empty() {
        tree = tree.with_metadata("joint of skins", skins.join(","));
    }
    if let Some(mesh) = node.mesh {
        tree = tree.with_metadata("mesh", mesh.to_string());
    }
    if let Some(skin) = node.skin {
        tree = tree.with_metadata("skin", skin.to_string());
    }

    for &child in hierarchy.children(index) {
        tree = tree.add_child(node_subtree(asset, hierarchy, child));
    }
    tree
}
