use flora_core::Placement;

/// A stateless modifier of an instance placement.
///
/// Effects are evaluated from the configured base placement every frame, so
/// their output depends only on `(index, base, time)`.
pub trait PlacementEffect: Send + Sync {
    fn apply(&self, index: usize, placement: Placement, time: f64) -> Placement;

    fn name(&self) -> &str;
}

/// Slow rotation of every flower about its vertical axis.
#[derive(Debug, Clone)]
pub struct Spin {
    /// Radians per unit of animation time.
    pub rate: f32,
}

impl Default for Spin {
    fn default() -> Self {
        // 0.005 rad per 16 ms frame.
        Self { rate: 0.3125 }
    }
}

impl PlacementEffect for Spin {
    fn apply(&self, _index: usize, mut placement: Placement, time: f64) -> Placement {
        placement.rotation_y += self.rate * time as f32;
        placement
    }

    fn name(&self) -> &str {
        "Spin"
    }
}

/// Vertical sway, phase-shifted per instance so the flowers do not move in
/// lockstep. Zero displacement at time zero.
#[derive(Debug, Clone)]
pub struct Bob {
    pub amplitude: f32,
}

impl Default for Bob {
    fn default() -> Self {
        // 0.1 units per 16 ms frame of sin(t + index), integrated.
        Self { amplitude: 6.25 }
    }
}

impl Bob {
    pub fn offset(&self, index: usize, time: f64) -> f32 {
        let k = index as f64;
        (self.amplitude as f64 * (k.cos() - (time + k).cos())) as f32
    }
}

impl PlacementEffect for Bob {
    fn apply(&self, index: usize, mut placement: Placement, time: f64) -> Placement {
        placement.translation.y += self.offset(index, time);
        placement
    }

    fn name(&self) -> &str {
        "Bob"
    }
}

/// An ordered chain of placement effects. The default chain spins and bobs.
pub struct Drift {
    effects: Vec<Box<dyn PlacementEffect>>,
}

impl Default for Drift {
    fn default() -> Self {
        Self::new(vec![Box::new(Spin::default()), Box::new(Bob::default())])
    }
}

impl Drift {
    pub fn new(effects: Vec<Box<dyn PlacementEffect>>) -> Self {
        Self { effects }
    }

    /// A chain that leaves placements untouched.
    pub fn none() -> Self {
        Self::new(Vec::new())
    }

    pub fn push(&mut self, effect: Box<dyn PlacementEffect>) {
        self.effects.push(effect);
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.effects.iter().map(|e| e.name()).collect()
    }

    pub fn apply(&self, index: usize, base: Placement, time: f64) -> Placement {
        self.effects
            .iter()
            .fold(base, |placement, effect| effect.apply(index, placement, time))
    }
}
