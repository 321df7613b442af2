use super::kinetic_energy;
use crate::System;

/// Instantaneous temperature from equipartition, 2 KE / (3 N) with k_B = 1.
pub fn temperature(system: &System) -> f64 {
    let n = system.atoms().num_atoms();
    if n == 0 {
        return 0.0;
    }
    2.0 * kinetic_energy(system) / (3.0 * n as f64)
}
