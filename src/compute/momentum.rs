use crate::System;

/// Net linear momentum, sum of m v.
pub fn momentum(system: &System) -> [f64; 3] {
    system.atoms().momentum()
}
