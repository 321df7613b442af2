use std::fmt;
use std::sync::Arc;

use super::PairPotentialTrait;

type BondFn = dyn Fn(f64) -> (f64, f64) + Send + Sync;

/// Intramolecular bonded potential supplied as an opaque closed form.
///
/// The closed-form generator (an external collaborator that differentiates
/// the potential expression offline) hands over a numeric function
/// `r -> (energy, force_magnitude)`; nothing here manipulates symbols.
#[derive(Clone)]
pub struct BondForce {
    f: Arc<BondFn>,
}

impl BondForce {
    /// Wrap a collaborator-supplied closed form.
    pub fn from_fn(f: impl Fn(f64) -> (f64, f64) + Send + Sync + 'static) -> Self {
        Self { f: Arc::new(f) }
    }

    /// Harmonic bond, U = k/2 (r - r0)^2.
    pub fn harmonic(k: f64, r0: f64) -> Self {
        Self::from_fn(move |r| {
            let dr = r - r0;
            (0.5 * k * dr * dr, -k * dr)
        })
    }
}

impl PairPotentialTrait for BondForce {
    fn energy(&self, r: f64) -> f64 {
        (self.f)(r).0
    }
    fn force_magnitude(&self, r: f64) -> f64 {
        (self.f)(r).1
    }
}

impl fmt::Debug for BondForce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BondForce(..)")
    }
}
