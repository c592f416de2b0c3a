//! Formatting utilities

use glam::{Mat4, Quat, Vec3};
use humansize::{DECIMAL, format_size};

/// Format file size in human-readable format
pub fn format_bytes(bytes: u64) -> String {
    format_size(bytes, DECIMAL)
}

/// Format a duration in seconds
pub fn format_seconds(seconds: f32) -> String {
    format!("{seconds:.3}s")
}

pub fn format_vec3(v: Vec3) -> String {
    format!("({:.3}, {:.3}, {:.3})", v.x, v.y, v.z)
}

/// Format a rotation as its axis and angle in degrees
pub fn format_rotation(q: Quat) -> String {
    let (axis, angle) = q.to_axis_angle();
    if angle.abs() < 1e-5 {
        "identity".to_string()
    } else {
        format!("{:.1}° about {}", angle.to_degrees(), format_vec3(axis))
    }
}

/// Format a matrix row by row (glam stores columns)
pub fn format_matrix_rows(m: Mat4) -> Vec<String> {
    (0..4)
        .map(|r| {
            let row = m.row(r);
            format!(
                "[{:8.3} {:8.3} {:8.3} {:8.3}]",
                row.x, row.y, row.z, row.w
            )
        })
        .collect()
}

/// Optional name, or a placeholder
pub fn format_name(name: Option<&str>) -> String {
    name.unwrap_or("<unnamed>").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1024), "1.02 kB");
        assert_eq!(format_bytes(1048576), "1.05 MB");
    }

    #[test]
    fn test_format_rotation() {
        assert_eq!(format_rotation(Quat::IDENTITY), "identity");
        let text = format_rotation(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));
        assert!(text.starts_with("90.0°"));
    }

    #[test]
    fn test_format_matrix_rows() {
        let rows = format_matrix_rows(Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)));
        assert_eq!(rows.len(), 4);
        assert!(rows[0].ends_with("1.000]"));
        assert!(rows[3].contains("0.000"));
    }

    #[test]
    fn test_format_name() {
        assert_eq!(format_name(None), "<unnamed>");
        assert_eq!(format_name(Some("hip")), "hip");
    }
}
