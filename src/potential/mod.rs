pub mod bond;
pub mod coulomb;
pub mod lennard_jones;
pub mod model;

pub use bond::BondForce;
pub use coulomb::Coulomb;
pub use lennard_jones::LennardJones;
pub use model::{Energies, PotentialEval, PotentialModel};

use enum_dispatch::enum_dispatch;

/// A pairwise potential, closed under addition by the model.
#[enum_dispatch]
pub enum PairPotential {
    LennardJones,
    Coulomb,
    BondForce,
}

/// Capability interface for pairwise potentials.
///
/// Both functions take the scalar separation `r`; `force_magnitude` is
/// `-dU/dr`, positive when the pair repels.
#[enum_dispatch(PairPotential)]
pub trait PairPotentialTrait {
    fn energy(&self, r: f64) -> f64;
    fn force_magnitude(&self, r: f64) -> f64;
}
