pub mod params;
pub mod gradient;
pub mod field;
pub mod mesh;
pub mod clock;
pub mod instance;

pub use params::{ParameterSet, ParamId, ParamSpec, ParamError, X_POINTS_RANGE, T_POINTS_RANGE};
pub use gradient::{ColorGradient, ColorScheme};
pub use field::{evaluate, sweep_angle, FieldSample, SHAPE_SCALE};
pub use mesh::{build_mesh, build_mesh_with, MeshBuffer, MeshError};
pub use clock::{AnimationClock, ClockState, NOMINAL_FRAME_DT};
pub use instance::{default_bouquet, InstanceConfig, Placement};
