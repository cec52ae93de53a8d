//! The three meshes of the animation.
//!
//! Two flat triangles facing each other across `z = ±0.4`, and an elongated
//! octahedron at the origin between them.

use dance_engine::render::{MeshDesc, ShaderSource};

pub const TRANSFORM_VS: &str = include_str!("../shaders/transform.wgsl");
pub const COLOR_FS: &str = include_str!("../shaders/color.wgsl");

/// Half-width of the octahedron; its height is `4·Q`.
const Q: f32 = 0.2;

const FRONT_POSITIONS: [[f32; 3]; 3] = [
    [-0.7, -0.7, -0.4],
    [-0.7, 0.7, -0.4],
    [0.7, 0.0, -0.4],
];

const FRONT_COLORS: [[f32; 3]; 3] = [
    [0.8, 0.1, 0.14],
    [0.09, 0.8, 0.16],
    [0.07, 0.03, 0.844],
];

const BACK_POSITIONS: [[f32; 3]; 3] = [
    [0.7, -0.7, 0.4],
    [0.7, 0.7, 0.4],
    [-0.7, 0.0, 0.4],
];

const BACK_COLORS: [[f32; 3]; 3] = [
    [0.0822, 0.069, 0.801],
    [0.035, 0.8202, 0.0223],
    [0.810, 0.0747, 0.0185],
];

// Upper four faces, then the same four mirrored below.
const OCTAHEDRON_POSITIONS: [[f32; 3]; 24] = [
    [Q, 0.0, 0.0],
    [0.0, 0.0, -Q],
    [0.0, 2.0 * Q, 0.0],
    //
    [0.0, 0.0, -Q],
    [0.0, 2.0 * Q, 0.0],
    [-Q, 0.0, 0.0],
    //
    [0.0, 2.0 * Q, 0.0],
    [-Q, 0.0, 0.0],
    [0.0, 0.0, Q],
    //
    [0.0, 2.0 * Q, 0.0],
    [0.0, 0.0, Q],
    [Q, 0.0, 0.0],
    //
    [Q, 0.0, 0.0],
    [0.0, 0.0, -Q],
    [0.0, -2.0 * Q, 0.0],
    //
    [0.0, 0.0, -Q],
    [0.0, -2.0 * Q, 0.0],
    [-Q, 0.0, 0.0],
    //
    [0.0, -2.0 * Q, 0.0],
    [-Q, 0.0, 0.0],
    [0.0, 0.0, Q],
    //
    [0.0, -2.0 * Q, 0.0],
    [0.0, 0.0, Q],
    [Q, 0.0, 0.0],
];

const OCTAHEDRON_COLORS: [[f32; 3]; 24] = [
    [0.0, 0.25, 0.25],
    [0.75, 0.75, 0.75],
    [1.0, 0.0, 0.0],
    //
    [0.75, 0.75, 0.75],
    [1.0, 0.25, 0.25],
    [0.0, 0.25, 0.25],
    //
    [1.0, 0.0, 0.0],
    [0.0, 0.25, 0.25],
    [0.0, 0.25, 0.25],
    //
    [1.0, 0.0, 0.0],
    [0.0, 0.25, 0.25],
    [0.0, 0.25, 0.25],
    //
    [0.0, 0.2, 0.45],
    [0.75, 0.75, 0.75],
    [1.0, 0.0, 0.0],
    //
    [0.75, 0.75, 0.75],
    [1.0, 0.0, 0.0],
    [0.0, 0.2, 0.45],
    //
    [1.0, 0.0, 0.0],
    [0.0, 0.2, 0.45],
    [0.0, 0.2, 0.45],
    //
    [1.0, 0.0, 0.0],
    [0.0, 0.2, 0.45],
    [0.0, 0.2, 0.45],
];

const fn program(label: &'static str) -> ShaderSource<'static> {
    ShaderSource {
        label,
        vertex: TRANSFORM_VS,
        fragment: COLOR_FS,
    }
}

/// Meshes in draw order.
pub fn mesh_table() -> [MeshDesc<'static>; 3] {
    [
        MeshDesc {
            label: "front triangle",
            shader: program("front"),
            positions: &FRONT_POSITIONS,
            colors: &FRONT_COLORS,
        },
        MeshDesc {
            label: "back triangle",
            shader: program("back"),
            positions: &BACK_POSITIONS,
            colors: &BACK_COLORS,
        },
        MeshDesc {
            label: "octahedron",
            shader: program("octahedron"),
            positions: &OCTAHEDRON_POSITIONS,
            colors: &OCTAHEDRON_COLORS,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use dance_engine::render::{ProgramReflection, TRANSFORM_UNIFORM, UniformSlot};

    #[test]
    fn table_has_three_meshes_in_draw_order() {
        let table = mesh_table();
        let labels: Vec<_> = table.iter().map(|m| m.label).collect();
        assert_eq!(labels, ["front triangle", "back triangle", "octahedron"]);

        let counts: Vec<_> = table.iter().map(|m| m.vertex_count()).collect();
        assert_eq!(counts, [3, 3, 24]);
    }

    #[test]
    fn every_mesh_has_one_color_per_position() {
        for mesh in mesh_table() {
            assert_eq!(mesh.positions.len(), mesh.colors.len(), "{}", mesh.label);
            assert_eq!(mesh.positions.len() % 3, 0, "{}", mesh.label);
        }
    }

    #[test]
    fn colors_are_normalized() {
        for mesh in mesh_table() {
            for c in mesh.colors.iter().flatten() {
                assert!((0.0..=1.0).contains(c), "{}: {c}", mesh.label);
            }
        }
    }

    #[test]
    fn octahedron_is_symmetric_about_the_equator() {
        let (top, bottom) = OCTAHEDRON_POSITIONS.split_at(12);
        for (u, d) in top.iter().zip(bottom) {
            assert_eq!([u[0], -u[1], u[2]], *d);
        }
    }

    #[test]
    fn triangles_sit_on_opposite_planes() {
        assert!(FRONT_POSITIONS.iter().all(|p| p[2] == -0.4));
        assert!(BACK_POSITIONS.iter().all(|p| p[2] == 0.4));
    }

    #[test]
    fn shipped_shaders_validate_and_expose_transform() {
        for mesh in mesh_table() {
            let reflection = ProgramReflection::from_source(&mesh.shader).unwrap();
            assert_eq!(
                reflection.uniform(TRANSFORM_UNIFORM),
                Some(UniformSlot { group: 0, binding: 0 })
            );
        }
    }
}
