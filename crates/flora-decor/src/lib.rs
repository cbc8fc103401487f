//! Cosmetic extras layered on top of the bouquet: slow instance drift and a
//! field of floating particles. Nothing here feeds back into mesh generation.

pub mod drift;
pub mod particles;
pub mod rng;

pub use drift::{Bob, Drift, PlacementEffect, Spin};
pub use particles::{ParticleField, ParticleSettings};
pub use rng::XorShift32;
