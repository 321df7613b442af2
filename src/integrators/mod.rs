mod verlet;
pub use verlet::VelocityVerlet;

use crate::potential::{Energies, PotentialModel};
use crate::{Error, System};

/// Simulation integrator: advances the System by exactly one timestep.
///
/// `forces` holds the forces evaluated at the current positions on entry and
/// at the advanced positions on exit; the returned energies belong to the
/// advanced positions.
pub trait Integrator {
    fn step(
        &self,
        system: &mut System,
        model: &PotentialModel,
        forces: &mut Vec<[f64; 3]>,
    ) -> Result<Energies, Error>;

    fn timestep(&self) -> f64;
}
