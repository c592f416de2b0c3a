//! `validate` command: hierarchy, skin and channel checks

use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use gltf_rig::animation::AnimationClip;
use gltf_rig::{Asset, Hierarchy, RigError, SkinBinding, loader};

/// Outcome of one check
struct Check {
    subject: String,
    outcome: std::result::Result<String, RigError>,
}

pub fn execute(file: &Path) -> Result<()> {
    let asset = loader::load(file)
        .with_context(|| format!("Failed to read glTF file: {}", file.display()))?;

    println!("Validating {}", style(file.display()).cyan());

    let checks = run_checks(&asset);
    let mut problems = 0;
    for check in &checks {
        match &check.outcome {
            Ok(detail) => println!(
                "  {} {}: {}",
                style("✓").green(),
                check.subject,
                style(detail).dim()
            ),
            Err(e) => {
                problems += 1;
                println!("  {} {}: {}", style("✗").red(), check.subject, style(e).red());
            }
        }
    }

    if problems > 0 {
        anyhow::bail!("Validation failed: {} problem(s)", problems);
    }

    println!(
        "✓ glTF file '{}' is valid ({} checks)",
        style(file.display()).cyan(),
        checks.len()
    );
    Ok(())
}

fn run_checks(asset: &Asset) -> Vec<Check> {
    let mut checks = Vec::new();

    checks.push(Check {
        subject: "Hierarchy".to_string(),
        outcome: Hierarchy::new(asset).map(|h| {
            format!(
                "{} roots, {} of {} nodes reachable",
                h.roots().len(),
                h.depth_first().len(),
                h.node_count()
            )
        }),
    });

    for skin in 0..asset.skins.len() {
        checks.push(Check {
            subject: format!("Skin {skin}"),
            outcome: SkinBinding::new(asset, skin)
                .map(|binding| format!("{} joints", binding.joint_count())),
        });
    }

    for (animation_index, animation) in asset.animations.iter().enumerate() {
        for (channel_index, channel) in animation.channels.iter().enumerate() {
            checks.push(Check {
                subject: format!("Animation {animation_index} channel {channel_index}"),
                outcome: AnimationClip::validate_channel(asset, animation_index, animation, channel)
                    .map(|clip_channel| {
                        format!(
                            "{} of node {}, {} keyframes",
                            clip_channel.track.property().as_str(),
                            clip_channel.target_node,
                            clip_channel.track.keyframe_count()
                        )
                    }),
            });
        }
    }

    checks
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Mat4, Vec3};
    use gltf_rig::{Animation, Node, Property, Sampler, Skin};

    #[test]
    fn test_checks_report_each_problem() {
        let mut asset = Asset::with_nodes(
            vec![Node::new("root").with_children([1]), Node::new("tip")],
            vec![0],
        );
        asset.skins.push(Skin::new(vec![0, 1], vec![Mat4::IDENTITY; 2]));
        asset.skins.push(Skin::new(vec![0, 1], vec![Mat4::IDENTITY]));
        asset.animations.push(
            Animation::new("move")
                .with_channel(
                    1,
                    Property::Translation,
                    Sampler::vec3(vec![0.0, 1.0], vec![Vec3::ZERO, Vec3::X]),
                )
                .with_channel(
                    1,
                    Property::Scale,
                    Sampler::vec3(vec![1.0, 0.0], vec![Vec3::ONE, Vec3::ONE]),
                ),
        );

        let checks = run_checks(&asset);
        assert_eq!(checks.len(), 5);
        assert!(checks[0].outcome.is_ok());
        assert!(checks[1].outcome.is_ok());
        assert!(matches!(
            checks[2].outcome,
            Err(RigError::SkinMismatch { skin: 1, .. })
        ));
        assert!(checks[3].outcome.is_ok());
        assert!(matches!(
            checks[4].outcome,
            Err(RigError::InvalidSampler { .. })
        ));
    }
}
