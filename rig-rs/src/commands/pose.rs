//! `pose` command: joint matrices at a point in time

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use gltf_rig::animation::PlaybackClock;
use gltf_rig::{Character, RigConfig, loader};

use crate::utils::{
    add_table_row, create_table, format_matrix_rows, format_name, format_seconds, format_vec3,
};

#[derive(Args, Debug, Clone)]
pub struct PoseArgs {
    /// Path to the .gltf or .glb file
    pub file: PathBuf,

    /// Time in seconds at which to sample the animation
    #[arg(short, long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub time: f32,

    /// Animation to play
    #[arg(short, long, default_value_t = 0)]
    pub animation: usize,

    /// Skin whose joint matrices are printed
    #[arg(short, long, default_value_t = 0)]
    pub skin: usize,

    /// Scene whose roots drive the hierarchy (defaults to the asset's scene)
    #[arg(long)]
    pub scene: Option<usize>,

    /// Treat --time as wall-clock seconds played back at this speed
    /// (clamped to 1-10)
    #[arg(long)]
    pub speed: Option<f32>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: &PoseArgs) -> Result<()> {
    let asset = loader::load(&args.file)
        .with_context(|| format!("Failed to read glTF file: {}", args.file.display()))?;

    let mut config = RigConfig::default().with_animation(args.animation);
    if let Some(scene) = args.scene {
        config = config.with_scene(scene);
    }
    if let Some(speed) = args.speed {
        config = config.with_playback_speed(speed);
    }

    let time = match args.speed {
        Some(speed) => {
            let mut clock = PlaybackClock::new(config.playback_speed);
            if clock.speed() != speed {
                log::warn!("Playback speed {speed} clamped to {}", clock.speed());
            }
            clock.advance(args.time)
        }
        None => args.time,
    };

    let mut character = Character::from_asset(asset, &config)
        .with_context(|| format!("Failed to set up character from {}", args.file.display()))?;
    character.update(time);

    let skin_count = character.asset().map_or(0, |a| a.skins.len());
    let Some(binding) = character.skin_binding(args.skin) else {
        anyhow::bail!(
            "Skin {} is not usable ({} skins in file, run 'validate' for details)",
            args.skin,
            skin_count
        );
    };

    if args.json {
        return print_json(&character, args.skin, time);
    }

    let clip_label = match character.clip() {
        Some(clip) => format!(
            "{} ({}, {} channels)",
            format_name(clip.name.as_deref()),
            format_seconds(clip.duration()),
            clip.channels().len()
        ),
        None => "none (rest pose)".to_string(),
    };

    println!("\n{}", style("Pose").bold().underlined());
    println!("File: {}", style(args.file.display()).cyan());
    println!("Animation: {}", style(clip_label).yellow());
    println!("Time: {}", style(format_seconds(time)).green());

    let Some(asset) = character.asset() else {
        return Ok(());
    };

    println!("\n{}", style(format!("Skin {} joints", args.skin)).bold());
    let mut table = create_table(vec!["Slot", "Node", "World Position", "Joint Matrix"]);
    for (slot, (&joint, matrix)) in binding
        .joints()
        .iter()
        .zip(binding.joint_matrices())
        .enumerate()
    {
        let position = character
            .global_transform(joint)
            .map(|m| m.w_axis.truncate())
            .unwrap_or_default();
        add_table_row(
            &mut table,
            vec![
                slot.to_string(),
                asset.nodes[joint].label(joint),
                format_vec3(position),
                format_matrix_rows(*matrix).join("\n"),
            ],
        );
    }
    table.printstd();

    if let Some(skeleton) = character.skeleton(args.skin) {
        println!("\n{}", style("Bones").bold());
        for (start, end) in &skeleton.segments {
            println!("  {} -> {}", format_vec3(*start), format_vec3(*end));
        }
    }

    let meshes = character.mesh_transforms();
    if !meshes.is_empty() {
        println!("\n{}", style("Mesh nodes").bold());
        for mesh in meshes {
            println!(
                "  {} mesh {}{} at {}",
                asset.nodes[mesh.node].label(mesh.node),
                mesh.mesh,
                mesh.skin
                    .map(|s| format!(" (skin {s})"))
                    .unwrap_or_default(),
                format_vec3(mesh.transform.w_axis.truncate())
            );
        }
    }

    Ok(())
}

#[cfg(feature = "serde")]
fn print_json(character: &Character, skin: usize, time: f32) -> Result<()> {
    let (Some(asset), Some(binding)) = (character.asset(), character.skin_binding(skin)) else {
        anyhow::bail!("Character is not loaded");
    };

    let joints: Vec<_> = binding
        .joints()
        .iter()
        .zip(binding.joint_matrices())
        .enumerate()
        .map(|(slot, (&node, matrix))| {
            let position = character
                .global_transform(node)
                .map(|m| m.w_axis.truncate())
                .unwrap_or_default();
            serde_json::json!({
                "slot": slot,
                "node": node,
                "name": asset.nodes[node].label(node),
                "world_position": position.to_array(),
                "joint_matrix": matrix.to_cols_array(),
            })
        })
        .collect();

    let segments: Vec<_> = character
        .skeleton(skin)
        .map(|s| s.segments)
        .unwrap_or_default()
        .into_iter()
        .map(|(start, end)| [start.to_array(), end.to_array()])
        .collect();

    let output = serde_json::json!({
        "time": time,
        "animation": character.clip().map(|c| c.index),
        "skin": skin,
        "joints": joints,
        "segments": segments,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

#[cfg(not(feature = "serde"))]
fn print_json(_character: &Character, _skin: usize, _time: f32) -> Result<()> {
    anyhow::bail!("JSON output requires the 'serde' feature to be enabled");
}
