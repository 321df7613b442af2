use super::PairPotentialTrait;
use crate::Error;

/// Coulomb potential per unit charge product, k/r.
///
/// The model multiplies energy and force by q_i q_j for each pair, so a
/// single instance serves every charge combination.
#[derive(Clone, Copy, Debug)]
pub struct Coulomb {
    k: f64,
}

impl Coulomb {
    pub fn new(k: f64) -> Result<Self, Error> {
        if !k.is_finite() {
            return Err(Error::config(format!(
                "Coulomb constant should be finite, found {}",
                k
            )));
        }
        Ok(Self { k })
    }

    pub fn k(&self) -> f64 {
        self.k
    }
}

impl PairPotentialTrait for Coulomb {
    fn energy(&self, r: f64) -> f64 {
        self.k / r
    }
    fn force_magnitude(&self, r: f64) -> f64 {
        // -d/dr (k/r) = k/r^2
        self.k / (r * r)
    }
}
