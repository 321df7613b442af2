use super::kinetic_energy;
use crate::potential::Energies;
use crate::System;

/// Total energy given the potential energies of the current positions.
pub fn total_energy(system: &System, energies: &Energies) -> f64 {
    kinetic_energy(system) + energies.total()
}
