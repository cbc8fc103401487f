use crate::renderer::{InstanceId, MeshRenderer, RenderError};
use flora_core::{build_mesh_with, ColorGradient, InstanceConfig, MeshBuffer, ParameterSet, Placement};

/// One flower: its static configuration, the mesh it currently shows and
/// where it sits in the scene.
#[derive(Debug, Clone)]
pub struct Instance {
    pub id: InstanceId,
    pub config: InstanceConfig,
    pub mesh: MeshBuffer,
    pub placement: Placement,
    /// Whether the renderer currently holds buffers for this instance.
    pub registered: bool,
}

/// Owns every flower and keeps the renderer's buffers in sync with them.
///
/// Meshes are rebuilt wholesale on every tick. Renderer failures never
/// propagate: an instance whose registration failed stays unregistered and is
/// retried on the next tick, and a regeneration requested while the renderer
/// is unavailable is replayed once it becomes ready. Handles that could not be
/// disposed are kept and disposed again on the next ready tick; their ids are
/// not reused until that succeeds.
#[derive(Debug, Default)]
pub struct InstanceManager {
    instances: Vec<Instance>,
    /// Renderer handles still awaiting disposal.
    stale: Vec<InstanceId>,
    pending_regenerate: bool,
    /// `global_time * speed` of the most recent tick.
    time_phase: f64,
}

impl InstanceManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the bouquet with one flower per config, each built at its own
    /// phase offset.
    pub fn create_all<R: MeshRenderer>(
        &mut self,
        configs: &[InstanceConfig],
        params: &ParameterSet,
        gradient: &ColorGradient,
        renderer: &mut R,
    ) {
        self.flush_stale(renderer);
        self.dispose_all(renderer);
        self.time_phase = 0.0;

        self.instances = configs
            .iter()
            .enumerate()
            .map(|(index, config)| Instance {
                id: InstanceId(index as u32),
                config: *config,
                mesh: build_mesh_with(params, gradient, config.phase_offset),
                placement: config.placement(),
                registered: false,
            })
            .collect();

        if renderer.is_ready() {
            for instance in &mut self.instances {
                register(instance, renderer, &self.stale);
            }
        } else {
            log::warn!(
                "renderer not ready, {} flowers will be registered on a later tick",
                self.instances.len()
            );
        }

        log::info!(
            "created {} flowers ({} vertices)",
            self.instances.len(),
            self.vertex_count()
        );
    }

    /// Rebuild every mesh at `phase_offset + global_time * speed` and push it
    /// to the renderer. Returns the number of meshes rebuilt.
    pub fn tick<R: MeshRenderer>(
        &mut self,
        global_time: f64,
        speed: f64,
        params: &ParameterSet,
        gradient: &ColorGradient,
        renderer: &mut R,
    ) -> usize {
        self.time_phase = global_time * speed;

        if !renderer.is_ready() {
            log::debug!("renderer not ready, skipping tick");
            return 0;
        }

        self.flush_stale(renderer);

        if self.pending_regenerate {
            // Rebuilds at the current phase already.
            self.regenerate_all(params, gradient, renderer);
            return self.instances.len();
        }

        for instance in &mut self.instances {
            let phase = instance.config.phase_offset + self.time_phase;
            let mesh = build_mesh_with(params, gradient, phase);

            if !instance.registered {
                instance.mesh = mesh;
                register(instance, renderer, &self.stale);
                continue;
            }

            if mesh.vertex_count() != instance.mesh.vertex_count() {
                log::debug!(
                    "flower {} changed size ({} -> {} vertices), re-registering",
                    instance.id,
                    instance.mesh.vertex_count(),
                    mesh.vertex_count()
                );
                dispose(instance, renderer, &mut self.stale);
                instance.mesh = mesh;
                register(instance, renderer, &self.stale);
                continue;
            }

            match renderer.update_mesh(instance.id, &mesh) {
                Ok(()) => {}
                Err(RenderError::UnknownInstance(id)) => {
                    log::warn!("renderer lost flower {id}, re-registering next tick");
                    instance.registered = false;
                }
                Err(e) => log::warn!("mesh update for flower {} failed: {e}", instance.id),
            }
            instance.mesh = mesh;
        }

        self.instances.len()
    }

    /// Dispose every renderer handle and rebuild all flowers from their
    /// configs at the phase of the most recent tick
    /// (`phase_offset + global_time * speed`), so a paused bouquet keeps its
    /// current shape. Deferred while the renderer is unavailable.
    pub fn regenerate_all<R: MeshRenderer>(
        &mut self,
        params: &ParameterSet,
        gradient: &ColorGradient,
        renderer: &mut R,
    ) {
        if !renderer.is_ready() {
            log::info!("renderer not ready, regeneration deferred");
            self.pending_regenerate = true;
            return;
        }
        self.pending_regenerate = false;

        for instance in &mut self.instances {
            dispose(instance, renderer, &mut self.stale);
            instance.mesh = build_mesh_with(params, gradient, instance.config.phase_offset + self.time_phase);
            register(instance, renderer, &self.stale);
        }

        let (x_count, t_count) = params.grid();
        log::info!(
            "regenerated {} flowers at {}x{} ({} vertices)",
            self.instances.len(),
            x_count,
            t_count,
            self.vertex_count()
        );
    }

    /// Recompute each placement from its config and push it to the renderer.
    /// Mesh data is left untouched.
    pub fn update_placements<R, F>(&mut self, renderer: &mut R, mut placement_fn: F)
    where
        R: MeshRenderer,
        F: FnMut(usize, &InstanceConfig) -> Placement,
    {
        let ready = renderer.is_ready();
        for (index, instance) in self.instances.iter_mut().enumerate() {
            instance.placement = placement_fn(index, &instance.config);
            if ready && instance.registered {
                if let Err(e) = renderer.update_transform(instance.id, &instance.placement) {
                    log::warn!("transform update for flower {} failed: {e}", instance.id);
                }
            }
        }
    }

    /// Release every renderer handle. Handles the renderer cannot release
    /// right now are retried on the next ready tick.
    pub fn dispose_all<R: MeshRenderer>(&mut self, renderer: &mut R) {
        for instance in &mut self.instances {
            dispose(instance, renderer, &mut self.stale);
        }
    }

    /// Regenerate on the next tick, at that tick's phase.
    pub fn request_regenerate(&mut self) {
        self.pending_regenerate = true;
    }

    /// Retry disposal of handles left over from earlier failures.
    fn flush_stale<R: MeshRenderer>(&mut self, renderer: &mut R) {
        if self.stale.is_empty() || !renderer.is_ready() {
            return;
        }
        self.stale.retain(|&id| match renderer.dispose_mesh(id) {
            Ok(()) | Err(RenderError::UnknownInstance(_)) => false,
            Err(e) => {
                log::warn!("disposing stale flower {id} failed again: {e}");
                true
            }
        });
    }

    /// Whether a tick is needed even if the clock did not advance.
    pub fn needs_sync(&self) -> bool {
        self.pending_regenerate
            || !self.stale.is_empty()
            || self.instances.iter().any(|i| !i.registered)
    }

    /// Handles the renderer may still hold that no flower owns.
    pub fn stale_count(&self) -> usize {
        self.stale.len()
    }

    pub fn pending_regenerate(&self) -> bool {
        self.pending_regenerate
    }

    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn registered_count(&self) -> usize {
        self.instances.iter().filter(|i| i.registered).count()
    }

    /// Total vertices across all flowers.
    pub fn vertex_count(&self) -> usize {
        self.instances.iter().map(|i| i.mesh.vertex_count()).sum()
    }

    /// Total triangles across all flowers.
    pub fn triangle_count(&self) -> usize {
        self.instances.iter().map(|i| i.mesh.triangle_count()).sum()
    }
}

fn register<R: MeshRenderer>(instance: &mut Instance, renderer: &mut R, stale: &[InstanceId]) {
    if stale.contains(&instance.id) {
        log::debug!("flower {} waits for its old handle to be disposed", instance.id);
        instance.registered = false;
        return;
    }
    match renderer.register_mesh(instance.id, &instance.mesh, &instance.placement) {
        Ok(()) => instance.registered = true,
        Err(e) => {
            log::warn!("registering flower {} failed, retrying next tick: {e}", instance.id);
            instance.registered = false;
        }
    }
}

fn dispose<R: MeshRenderer>(instance: &mut Instance, renderer: &mut R, stale: &mut Vec<InstanceId>) {
    if !instance.registered {
        return;
    }
    instance.registered = false;
    if !renderer.is_ready() {
        stale.push(instance.id);
        return;
    }
    match renderer.dispose_mesh(instance.id) {
        Ok(()) | Err(RenderError::UnknownInstance(_)) => {}
        Err(e) => {
            log::warn!("disposing flower {} failed, retrying next tick: {e}", instance.id);
            stale.push(instance.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::NullRenderer;
    use flora_core::default_bouquet;

    fn small_params() -> ParameterSet {
        ParameterSet { x_points: 10, t_points: 200, ..Default::default() }
    }

    #[test]
    fn test_create_all_registers_every_flower() {
        let mut manager = InstanceManager::new();
        let mut renderer = NullRenderer;
        manager.create_all(&default_bouquet(), &small_params(), &ColorGradient::default(), &mut renderer);
        assert_eq!(manager.len(), 6);
        assert_eq!(manager.registered_count(), 6);
        assert_eq!(manager.vertex_count(), 6 * 10 * 200);
        assert_eq!(manager.triangle_count(), 6 * 2 * 9 * 199);
        assert!(!manager.needs_sync());
    }

    #[test]
    fn test_ids_follow_config_order() {
        let mut manager = InstanceManager::new();
        manager.create_all(&default_bouquet(), &small_params(), &ColorGradient::default(), &mut NullRenderer);
        for (index, instance) in manager.instances().iter().enumerate() {
            assert_eq!(instance.id, InstanceId(index as u32));
        }
    }

    #[test]
    fn test_placements_do_not_touch_meshes() {
        let mut manager = InstanceManager::new();
        manager.create_all(&default_bouquet(), &small_params(), &ColorGradient::default(), &mut NullRenderer);
        let before: Vec<MeshBuffer> = manager.instances().iter().map(|i| i.mesh.clone()).collect();
        manager.update_placements(&mut NullRenderer, |_, _| Placement::default());
        for (instance, mesh) in manager.instances().iter().zip(&before) {
            assert_eq!(&instance.mesh, mesh);
            assert_eq!(instance.placement, Placement::default());
        }
    }
}
