use crate::System;

/// Total kinetic energy, sum of 1/2 m v^2.
pub fn kinetic_energy(system: &System) -> f64 {
    system.atoms().kinetic_energy()
}
