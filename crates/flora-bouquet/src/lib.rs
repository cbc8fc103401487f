//! Drives a bouquet of animated flowers against a pluggable renderer.
//!
//! [`Bouquet`] owns the parameters, the clock and an [`InstanceManager`];
//! everything that touches a GPU or window goes through [`MeshRenderer`].

pub mod bouquet;
pub mod command;
pub mod config;
pub mod manager;
pub mod renderer;

pub use bouquet::{Bouquet, FrameReport};
pub use command::{command_channel, CommandSender, UiCommand};
pub use config::{BouquetConfig, ConfigError};
pub use manager::{Instance, InstanceManager};
pub use renderer::{InstanceId, MeshRenderer, NullRenderer, RenderError};
