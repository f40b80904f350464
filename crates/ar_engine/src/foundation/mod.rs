//! Foundation layer: math, timing, and logging primitives
//!
//! Everything above this layer (placement, registry, session) builds on the
//! types defined here.

pub mod logging;
pub mod math;
pub mod time;

pub use math::{Mat4, Pose, Quat, Vec3};
pub use time::FrameClock;
