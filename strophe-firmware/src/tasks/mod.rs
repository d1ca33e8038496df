//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod control;
pub mod effects;
pub mod imu;

pub use control::control_task;
pub use effects::effects_task;
pub use imu::imu_task;
