// Re-export glam for convenience
pub use glam::*;

// Lux math types
mod interval;
mod optics;
mod ray;

pub use interval::Interval;
pub use optics::Optics;
pub use ray::Ray;
