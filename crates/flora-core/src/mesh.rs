use glam::Vec3;
use thiserror::Error;

use crate::field::{evaluate, sweep_angle};
use crate::gradient::ColorGradient;
use crate::params::{clamp_t_points, clamp_x_points, ParameterSet};

/// Violations of the [`MeshBuffer`] layout invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeshError {
    #[error("attribute length mismatch: {positions} positions, {colors} colors, {normals} normals, expected {expected}")]
    LengthMismatch {
        positions: usize,
        colors: usize,
        normals: usize,
        expected: usize,
    },
    #[error("index count {0} is not a multiple of 3")]
    IndexCount(usize),
    #[error("index {index} out of bounds for {vertex_count} vertices")]
    IndexOutOfBounds { index: u32, vertex_count: usize },
}

/// Flat, renderer-agnostic triangle mesh for one flower.
///
/// `positions`, `colors` and `normals` are parallel arrays in row-major grid
/// order (`i * t_count + j`). `indices` is a flat triangle list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshBuffer {
    pub positions: Vec<[f32; 3]>,
    pub colors: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
    pub x_count: usize,
    pub t_count: usize,
}

impl MeshBuffer {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Flattened index of grid node `(i, j)`.
    pub fn grid_index(&self, i: usize, j: usize) -> usize {
        i * self.t_count + j
    }

    /// Check the layout invariant.
    pub fn validate(&self) -> Result<(), MeshError> {
        let expected = self.x_count * self.t_count;
        if self.positions.len() != expected
            || self.colors.len() != expected
            || self.normals.len() != expected
        {
            return Err(MeshError::LengthMismatch {
                positions: self.positions.len(),
                colors: self.colors.len(),
                normals: self.normals.len(),
                expected,
            });
        }
        if self.indices.len() % 3 != 0 {
            return Err(MeshError::IndexCount(self.indices.len()));
        }
        let vertex_count = self.positions.len();
        if let Some(&index) = self.indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(MeshError::IndexOutOfBounds { index, vertex_count });
        }
        Ok(())
    }

    /// Recompute per-vertex normals by summing the area-weighted normals of
    /// every adjacent triangle.
    ///
    /// Vertices whose adjacent triangles are all degenerate keep the normal
    /// they already carry. Triangles referencing a vertex outside the
    /// position array are skipped, so a buffer that fails [`validate`] is
    /// left partially smoothed rather than panicking.
    ///
    /// [`validate`]: MeshBuffer::validate
    pub fn smooth_normals(&mut self) {
        let vertex_count = self.positions.len();
        let mut accum = vec![Vec3::ZERO; vertex_count];

        for tri in self.indices.chunks_exact(3) {
            let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            if a >= vertex_count || b >= vertex_count || c >= vertex_count {
                continue;
            }
            let p0 = Vec3::from(self.positions[a]);
            let p1 = Vec3::from(self.positions[b]);
            let p2 = Vec3::from(self.positions[c]);
            let face = (p1 - p0).cross(p2 - p0);
            accum[a] += face;
            accum[b] += face;
            accum[c] += face;
        }

        for (normal, sum) in self.normals.iter_mut().zip(accum) {
            if let Some(n) = sum.try_normalize() {
                *normal = n.to_array();
            }
        }
    }
}

/// Sweep the surface over an `x_count × t_count` grid.
///
/// Both counts are clamped into their allowed ranges first, so the function
/// is total for any input. Each instance passes its own `phase_offset`.
pub fn build_mesh(
    x_count: usize,
    t_count: usize,
    phase_offset: f64,
    params: &ParameterSet,
    gradient: &ColorGradient,
) -> MeshBuffer {
    let x_count = clamp_x_points(x_count);
    let t_count = clamp_t_points(t_count);
    let vertex_count = x_count * t_count;

    let mut mesh = MeshBuffer {
        positions: Vec::with_capacity(vertex_count),
        colors: Vec::with_capacity(vertex_count),
        normals: Vec::with_capacity(vertex_count),
        indices: Vec::with_capacity((x_count - 1) * (t_count - 1) * 6),
        x_count,
        t_count,
    };

    let angles: Vec<f64> = (0..t_count)
        .map(|j| sweep_angle(j, t_count, params, phase_offset))
        .collect();

    for i in 0..x_count {
        let x = i as f64 / (x_count - 1) as f64;
        for (j, &t) in angles.iter().enumerate() {
            let sample = evaluate(x, t, params, gradient);
            debug_assert!(
                sample.is_finite(),
                "non-finite surface sample at ({i}, {j}): {sample:?}"
            );

            mesh.positions.push(sample.position.as_vec3().to_array());
            mesh.colors.push(sample.color.as_vec3().to_array());
            mesh.normals.push(sample.normal.as_vec3().to_array());

            if i < x_count - 1 && j < t_count - 1 {
                let a = (i * t_count + j) as u32;
                let b = ((i + 1) * t_count + j) as u32;
                let c = ((i + 1) * t_count + j + 1) as u32;
                let d = (i * t_count + j + 1) as u32;
                mesh.indices.extend_from_slice(&[a, b, c, a, c, d]);
            }
        }
    }

    mesh.smooth_normals();
    mesh
}

/// [`build_mesh`] with the grid size stored in the parameter set.
pub fn build_mesh_with(params: &ParameterSet, gradient: &ColorGradient, phase_offset: f64) -> MeshBuffer {
    let (x_count, t_count) = params.grid();
    build_mesh(x_count, t_count, phase_offset, params, gradient)
}
