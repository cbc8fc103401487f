use flora_core::{MeshBuffer, Placement};
use std::fmt;
use thiserror::Error;

/// Handle of one flower on the renderer side. Stable across regenerations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(pub u32);

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("renderer is not available")]
    Unavailable,
    #[error("unknown instance {0}")]
    UnknownInstance(InstanceId),
    #[error("renderer rejected the request: {0}")]
    Rejected(String),
}

/// The drawing side of the bouquet.
///
/// Implementations own GPU buffers (or whatever stands in for them). Mesh
/// updates always carry positions, colors, normals and indices together so a
/// renderer never observes a half-replaced buffer.
pub trait MeshRenderer {
    /// Whether buffers can currently be created. While false the manager skips
    /// regeneration and retries later.
    fn is_ready(&self) -> bool;

    fn register_mesh(
        &mut self,
        id: InstanceId,
        mesh: &MeshBuffer,
        placement: &Placement,
    ) -> Result<(), RenderError>;

    fn update_mesh(&mut self, id: InstanceId, mesh: &MeshBuffer) -> Result<(), RenderError>;

    fn update_transform(&mut self, id: InstanceId, placement: &Placement) -> Result<(), RenderError>;

    fn dispose_mesh(&mut self, id: InstanceId) -> Result<(), RenderError>;

    /// Replace the particle overlay. Renderers without one ignore it.
    fn update_particles(&mut self, _positions: &[[f32; 3]], _colors: &[[f32; 3]]) {}
}

/// Accepts everything and draws nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl MeshRenderer for NullRenderer {
    fn is_ready(&self) -> bool {
        true
    }

    fn register_mesh(&mut self, _: InstanceId, _: &MeshBuffer, _: &Placement) -> Result<(), RenderError> {
        Ok(())
    }

    fn update_mesh(&mut self, _: InstanceId, _: &MeshBuffer) -> Result<(), RenderError> {
        Ok(())
    }

    fn update_transform(&mut self, _: InstanceId, _: &Placement) -> Result<(), RenderError> {
        Ok(())
    }

    fn dispose_mesh(&mut self, _: InstanceId) -> Result<(), RenderError> {
        Ok(())
    }
}
