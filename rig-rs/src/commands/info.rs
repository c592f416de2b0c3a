//! `info` command: asset summary

use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use gltf_rig::{Asset, loader};

use crate::utils::{add_table_row, create_table, format_bytes, format_name, format_seconds};

pub fn execute(file: &Path, detailed: bool) -> Result<()> {
    let size = std::fs::metadata(file)
        .with_context(|| format!("Failed to open file: {}", file.display()))?
        .len();
    let asset = loader::load(file)
        .with_context(|| format!("Failed to read glTF file: {}", file.display()))?;

    println!("\n{}", style("glTF Asset Information").bold().underlined());
    println!("File: {}", style(file.display()).cyan());
    println!("Size: {}", style(format_bytes(size)).yellow());
    println!(
        "Scenes: {} (active: {})",
        style(asset.scenes.len()).green(),
        asset
            .active_scene()
            .map_or_else(|| "none".to_string(), |s| s.to_string())
    );
    println!("Nodes: {}", style(asset.node_count()).green());
    println!("Meshes: {}", style(asset.meshes.len()).green());
    println!("Skins: {}", style(asset.skins.len()).green());
    println!(
        "Animations: {} ({} channels)",
        style(asset.animations.len()).green(),
        asset.channel_count()
    );

    if detailed {
        print_animations(&asset);
        print_skins(&asset);
        print_meshes(&asset);
    }

    Ok(())
}

fn print_animations(asset: &Asset) {
    if asset.animations.is_empty() {
        return;
    }
    println!("\n{}", style("Animations").bold());
    let mut table = create_table(vec!["#", "Name", "Channels", "Samplers", "Duration"]);
    for (index, animation) in asset.animations.iter().enumerate() {
        add_table_row(
            &mut table,
            vec![
                index.to_string(),
                format_name(animation.name.as_deref()),
                animation.channels.len().to_string(),
                animation.samplers.len().to_string(),
                format_seconds(animation.duration()),
            ],
        );
    }
    table.printstd();
}

fn print_skins(asset: &Asset) {
    if asset.skins.is_empty() {
        return;
    }
    println!("\n{}", style("Skins").bold());
    let mut table = create_table(vec!["#", "Name", "Joints", "Inverse Binds", "Skeleton"]);
    for (index, skin) in asset.skins.iter().enumerate() {
        let skeleton = skin
            .skeleton
            .and_then(|node| asset.nodes.get(node).map(|n| n.label(node)))
            .unwrap_or_else(|| "-".to_string());
        add_table_row(
            &mut table,
            vec![
                index.to_string(),
                format_name(skin.name.as_deref()),
                skin.joints.len().to_string(),
                skin.inverse_bind_matrices.len().to_string(),
                skeleton,
            ],
        );
    }
    table.printstd();
}

fn print_meshes(asset: &Asset) {
    if asset.meshes.is_empty() {
        return;
    }
    println!("\n{}", style("Meshes").bold());
    let mut table = create_table(vec!["#", "Name", "Primitives", "Instanced By"]);
    for (index, mesh) in asset.meshes.iter().enumerate() {
        let users: Vec<String> = asset
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.mesh == Some(index))
            .map(|(node_index, node)| node.label(node_index))
            .collect();
        add_table_row(
            &mut table,
            vec![
                index.to_string(),
                format_name(mesh.name.as_deref()),
                mesh.primitive_count.to_string(),
                users.join(", "),
            ],
        );
    }
    table.printstd();
}
