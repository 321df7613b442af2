//! Scalar diagnostics recorded along a run.

mod kinetic_energy;
mod momentum;
mod temperature;
mod total_energy;

pub use kinetic_energy::kinetic_energy;
pub use momentum::momentum;
pub use temperature::temperature;
pub use total_energy::total_energy;
