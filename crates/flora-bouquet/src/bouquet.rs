use crate::command::{command_channel, CommandSender, UiCommand};
use crate::config::BouquetConfig;
use crate::manager::InstanceManager;
use crate::renderer::MeshRenderer;
use crossbeam::channel::Receiver;
use flora_core::{AnimationClock, ColorGradient, ColorScheme, InstanceConfig, ParamError, ParameterSet};
use flora_decor::{Drift, ParticleField};

/// What happened during one [`Bouquet::frame`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameReport {
    /// Animation time after the frame.
    pub time: f64,
    /// Whether the clock advanced.
    pub advanced: bool,
    /// Commands drained at the start of the frame.
    pub commands: usize,
    /// Whether a full regeneration was requested by a command.
    pub regenerated: bool,
    /// Meshes built this frame, counting a regeneration once.
    pub rebuilt: usize,
    pub vertices: usize,
    pub triangles: usize,
}

/// The whole animated bouquet.
///
/// Call [`Bouquet::frame`] once per display frame. Control surfaces talk to it
/// through the [`CommandSender`] returned by [`Bouquet::command_sender`].
pub struct Bouquet<R: MeshRenderer> {
    params: ParameterSet,
    gradient: ColorGradient,
    scheme: Option<ColorScheme>,
    clock: AnimationClock,
    manager: InstanceManager,
    configs: Vec<InstanceConfig>,
    drift: Option<Drift>,
    particles: Option<ParticleField>,
    command_tx: CommandSender,
    command_rx: Receiver<UiCommand>,
    renderer: R,
    frames: u64,
}

impl<R: MeshRenderer> Bouquet<R> {
    /// Build every flower from `config` and hand them to `renderer`. Drift and
    /// particles start with their defaults.
    pub fn new(config: BouquetConfig, mut renderer: R) -> Self {
        let config = config.sanitized();
        let scheme = config.scheme();
        let (command_tx, command_rx) = command_channel();

        let mut manager = InstanceManager::new();
        manager.create_all(&config.instances, &config.params, &config.gradient, &mut renderer);

        Self {
            params: config.params,
            gradient: config.gradient,
            scheme,
            clock: AnimationClock::new(),
            manager,
            configs: config.instances,
            drift: Some(Drift::default()),
            particles: Some(ParticleField::default()),
            command_tx,
            command_rx,
            renderer,
            frames: 0,
        }
    }

    pub fn with_drift(mut self, drift: Option<Drift>) -> Self {
        self.drift = drift;
        self
    }

    pub fn with_particles(mut self, particles: Option<ParticleField>) -> Self {
        self.particles = particles;
        self
    }

    pub fn command_sender(&self) -> CommandSender {
        self.command_tx.clone()
    }

    /// Advance one display frame by `dt`.
    pub fn frame(&mut self, dt: f64) -> FrameReport {
        let mut report = FrameReport::default();

        while let Ok(command) = self.command_rx.try_recv() {
            report.commands += 1;
            match self.apply_command(command) {
                Ok(regenerate) => report.regenerated |= regenerate,
                Err(e) => log::warn!("ignoring command: {e}"),
            }
        }
        if report.regenerated {
            // Carried out by the manager tick below, at the post-tick phase.
            self.manager.request_regenerate();
        }

        report.advanced = self.clock.tick(dt);
        let time = self.clock.current_time();

        if report.advanced || self.manager.needs_sync() {
            report.rebuilt = self.manager.tick(
                time,
                self.params.animation_speed,
                &self.params,
                &self.gradient,
                &mut self.renderer,
            );
        }

        if let Some(drift) = &self.drift {
            self.manager
                .update_placements(&mut self.renderer, |index, config| {
                    drift.apply(index, config.placement(), time)
                });
        }

        if let Some(particles) = &mut self.particles {
            particles.step();
            self.renderer.update_particles(particles.positions(), particles.colors());
        }

        self.frames += 1;
        report.time = time;
        report.vertices = self.manager.vertex_count();
        report.triangles = self.manager.triangle_count();

        log::debug!(
            "frame {}: t={:.3} rebuilt={} commands={}",
            self.frames,
            time,
            report.rebuilt,
            report.commands
        );
        report
    }

    /// Apply one command immediately. Returns whether the bouquet must be
    /// regenerated.
    pub fn apply_command(&mut self, command: UiCommand) -> Result<bool, ParamError> {
        match command {
            UiCommand::SetParam { name, value } => {
                let id = self.params.set_by_name(&name, value)?;
                log::debug!("{} = {}", id.name(), self.params.get(id));
                Ok(id.is_structural())
            }
            UiCommand::TogglePlayback => {
                let state = self.clock.toggle();
                log::info!("playback {state:?}");
                Ok(false)
            }
            UiCommand::Reset => {
                self.clock.reset();
                self.clock.play();
                self.params.reset_to_default();
                log::info!("bouquet reset");
                Ok(true)
            }
            UiCommand::CycleColorScheme => {
                let next = self.scheme.unwrap_or_default().next();
                self.set_scheme(next);
                Ok(true)
            }
            UiCommand::SetColorScheme(scheme) => {
                self.set_scheme(scheme);
                Ok(true)
            }
        }
    }

    fn set_scheme(&mut self, scheme: ColorScheme) {
        log::info!("color scheme {}", scheme.name());
        self.scheme = Some(scheme);
        self.gradient = scheme.gradient();
    }

    /// Replace the instance configs and rebuild every flower.
    pub fn set_instances(&mut self, configs: Vec<InstanceConfig>) {
        self.configs = configs;
        self.manager
            .create_all(&self.configs, &self.params, &self.gradient, &mut self.renderer);
    }

    /// Snapshot of the current state as a loadable configuration.
    pub fn config(&self) -> BouquetConfig {
        BouquetConfig {
            params: self.params.clone(),
            gradient: self.gradient,
            instances: self.configs.clone(),
        }
    }

    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    pub fn gradient(&self) -> &ColorGradient {
        &self.gradient
    }

    pub fn scheme(&self) -> Option<ColorScheme> {
        self.scheme
    }

    pub fn clock(&self) -> &AnimationClock {
        &self.clock
    }

    pub fn manager(&self) -> &InstanceManager {
        &self.manager
    }

    pub fn particles(&self) -> Option<&ParticleField> {
        self.particles.as_ref()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Release every renderer handle and return the renderer.
    pub fn into_renderer(mut self) -> R {
        self.manager.dispose_all(&mut self.renderer);
        self.renderer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::NullRenderer;
    use flora_core::{ClockState, NOMINAL_FRAME_DT};

    fn small() -> Bouquet<NullRenderer> {
        let mut config = BouquetConfig::default();
        config.params.x_points = 10;
        config.params.t_points = 200;
        Bouquet::new(config, NullRenderer)
    }

    #[test]
    fn test_frame_advances_clock() {
        let mut bouquet = small();
        let report = bouquet.frame(NOMINAL_FRAME_DT);
        assert!(report.advanced);
        assert_eq!(report.rebuilt, 6);
        assert!((report.time - NOMINAL_FRAME_DT).abs() < 1e-12);
    }

    #[test]
    fn test_toggle_takes_effect_next_frame() {
        let mut bouquet = small();
        bouquet.command_sender().toggle_playback();
        let report = bouquet.frame(NOMINAL_FRAME_DT);
        assert_eq!(report.commands, 1);
        assert!(!report.advanced);
        assert_eq!(bouquet.clock().state(), ClockState::Paused);
    }

    #[test]
    fn test_unknown_param_ignored() {
        let mut bouquet = small();
        let before = bouquet.params().clone();
        assert!(bouquet
            .apply_command(UiCommand::SetParam { name: "petals".into(), value: 3.0 })
            .is_err());
        assert_eq!(bouquet.params(), &before);
    }

    #[test]
    fn test_cycle_scheme() {
        let mut bouquet = small();
        bouquet.apply_command(UiCommand::CycleColorScheme).unwrap();
        assert_eq!(bouquet.scheme(), Some(ColorScheme::RoseMagenta));
        assert_eq!(bouquet.gradient(), &ColorScheme::RoseMagenta.gradient());
    }
}
