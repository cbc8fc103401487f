use flora_bouquet::{FrameReport, InstanceId, MeshRenderer, RenderError};
use flora_core::{MeshBuffer, Placement};
use glam::Vec3;
use std::collections::BTreeMap;
use std::fmt::Write;
use std::time::Duration;

/// What the renderer holds for one flower.
#[derive(Debug, Clone, Copy)]
struct Slot {
    vertices: usize,
    triangles: usize,
    min: Vec3,
    max: Vec3,
    placement: Placement,
}

impl Slot {
    fn new(mesh: &MeshBuffer, placement: Placement) -> Self {
        let (min, max) = local_bounds(mesh);
        Self {
            vertices: mesh.vertex_count(),
            triangles: mesh.triangle_count(),
            min,
            max,
            placement,
        }
    }

    fn world_bounds(&self) -> (Vec3, Vec3) {
        let mut lo = Vec3::splat(f32::INFINITY);
        let mut hi = Vec3::splat(f32::NEG_INFINITY);
        for corner in 0..8 {
            let p = Vec3::new(
                if corner & 1 == 0 { self.min.x } else { self.max.x },
                if corner & 2 == 0 { self.min.y } else { self.max.y },
                if corner & 4 == 0 { self.min.z } else { self.max.z },
            );
            let w = self.placement.transform_point(p);
            lo = lo.min(w);
            hi = hi.max(w);
        }
        (lo, hi)
    }
}

fn local_bounds(mesh: &MeshBuffer) -> (Vec3, Vec3) {
    mesh.positions.iter().fold(
        (Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)),
        |(lo, hi), p| {
            let v = Vec3::from(*p);
            (lo.min(v), hi.max(v))
        },
    )
}

/// Headless renderer that only counts what it is asked to do.
#[derive(Debug, Default)]
pub struct StatsRenderer {
    slots: BTreeMap<InstanceId, Slot>,
    registrations: u64,
    mesh_updates: u64,
    transform_updates: u64,
    disposals: u64,
    particle_updates: u64,
    bytes_uploaded: u64,
}

fn mesh_bytes(mesh: &MeshBuffer) -> u64 {
    let attributes = mesh.vertex_count() * 3 * 3 * std::mem::size_of::<f32>();
    let indices = mesh.indices.len() * std::mem::size_of::<u32>();
    (attributes + indices) as u64
}

impl MeshRenderer for StatsRenderer {
    fn is_ready(&self) -> bool {
        true
    }

    fn register_mesh(
        &mut self,
        id: InstanceId,
        mesh: &MeshBuffer,
        placement: &Placement,
    ) -> Result<(), RenderError> {
        mesh.validate()
            .map_err(|e| RenderError::Rejected(e.to_string()))?;
        self.slots.insert(id, Slot::new(mesh, *placement));
        self.registrations += 1;
        self.bytes_uploaded += mesh_bytes(mesh);
        Ok(())
    }

    fn update_mesh(&mut self, id: InstanceId, mesh: &MeshBuffer) -> Result<(), RenderError> {
        let slot = self.slots.get_mut(&id).ok_or(RenderError::UnknownInstance(id))?;
        *slot = Slot::new(mesh, slot.placement);
        self.mesh_updates += 1;
        self.bytes_uploaded += mesh_bytes(mesh);
        Ok(())
    }

    fn update_transform(&mut self, id: InstanceId, placement: &Placement) -> Result<(), RenderError> {
        let slot = self.slots.get_mut(&id).ok_or(RenderError::UnknownInstance(id))?;
        slot.placement = *placement;
        self.transform_updates += 1;
        Ok(())
    }

    fn dispose_mesh(&mut self, id: InstanceId) -> Result<(), RenderError> {
        self.slots.remove(&id).ok_or(RenderError::UnknownInstance(id))?;
        self.disposals += 1;
        Ok(())
    }

    fn update_particles(&mut self, _positions: &[[f32; 3]], _colors: &[[f32; 3]]) {
        self.particle_updates += 1;
    }
}

impl StatsRenderer {
    /// Bounds of every live flower in world space.
    pub fn scene_bounds(&self) -> Option<(Vec3, Vec3)> {
        self.slots.values().map(Slot::world_bounds).reduce(|(alo, ahi), (blo, bhi)| {
            (alo.min(blo), ahi.max(bhi))
        })
    }

    /// Human-readable run summary. `ticks` counts frames in which the
    /// animation clock advanced.
    pub fn summary(&self, last: &FrameReport, frames: u64, ticks: u64, elapsed: Duration) -> String {
        let mut out = String::new();
        let fps = if elapsed.as_secs_f64() > 0.0 {
            frames as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        };
        let _ = writeln!(out, "frames:        {frames} ({fps:.1} fps, {elapsed:.2?})");
        let _ = writeln!(out, "time:          {:.3} ({ticks} animated frames)", last.time);
        let _ = writeln!(out, "vertices:      {}", last.vertices);
        let _ = writeln!(out, "triangles:     {}", last.triangles);
        let _ = writeln!(
            out,
            "renderer:      {} registered, {} updates, {} transforms, {} disposed, {} particle frames",
            self.registrations,
            self.mesh_updates,
            self.transform_updates,
            self.disposals,
            self.particle_updates
        );
        let _ = writeln!(out, "uploaded:      {:.1} MiB", self.bytes_uploaded as f64 / (1024.0 * 1024.0));
        for (id, slot) in &self.slots {
            let _ = writeln!(
                out,
                "  flower {id}: {} vertices, {} triangles",
                slot.vertices, slot.triangles
            );
        }
        if let Some((lo, hi)) = self.scene_bounds() {
            let _ = write!(out, "bounds:        {lo:.1} .. {hi:.1}");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flora_core::{build_mesh, ColorGradient, ParameterSet};

    #[test]
    fn test_counts_and_bounds() {
        let mesh = build_mesh(10, 200, 0.0, &ParameterSet::default(), &ColorGradient::default());
        let mut renderer = StatsRenderer::default();
        let placement = Placement { translation: Vec3::new(100.0, 0.0, 0.0), ..Default::default() };
        renderer.register_mesh(InstanceId(0), &mesh, &placement).unwrap();
        renderer.update_mesh(InstanceId(0), &mesh).unwrap();
        assert!(renderer.update_mesh(InstanceId(9), &mesh).is_err());

        let (lo, hi) = renderer.scene_bounds().unwrap();
        assert!(lo.x <= hi.x);
        assert!((lo.x + hi.x) / 2.0 > 50.0);

        renderer.dispose_mesh(InstanceId(0)).unwrap();
        assert!(renderer.scene_bounds().is_none());
        assert_eq!(renderer.registrations, 1);
        assert_eq!(renderer.mesh_updates, 1);
    }

    #[test]
    fn test_summary_reports_paused_frames() {
        let renderer = StatsRenderer::default();
        let last = FrameReport { time: 0.8, ..Default::default() };
        let text = renderer.summary(&last, 60, 50, Duration::from_secs(1));
        assert!(text.contains("frames:        60 (60.0 fps"));
        assert!(text.contains("time:          0.800 (50 animated frames)"));
    }
}
