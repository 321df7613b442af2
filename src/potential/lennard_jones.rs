use super::PairPotentialTrait;
use crate::Error;

/// Lennard-Jones 12-6 potential, 4eps((sig/r)^12 - (sig/r)^6).
#[derive(Clone, Copy, Debug)]
pub struct LennardJones {
    epsilon: f64,
    sigma: f64,
    sigma6: f64,
}

impl LennardJones {
    pub fn new(epsilon: f64, sigma: f64) -> Result<Self, Error> {
        if !(epsilon >= 0.0) || !(sigma > 0.0) {
            return Err(Error::config(format!(
                "Lennard-Jones parameters should satisfy epsilon >= 0 and sigma > 0, \
                 found epsilon = {}, sigma = {}",
                epsilon, sigma
            )));
        }
        let sigma2 = sigma * sigma;
        Ok(Self {
            epsilon,
            sigma,
            sigma6: sigma2 * sigma2 * sigma2,
        })
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }
    pub fn sigma(&self) -> f64 {
        self.sigma
    }
}

impl PairPotentialTrait for LennardJones {
    fn energy(&self, r: f64) -> f64 {
        // U(r) = 4 eps ((sig/r)^12 - (sig/r)^6)
        let r2 = r * r;
        let sr6 = self.sigma6 / (r2 * r2 * r2);
        4.0 * self.epsilon * sr6 * (sr6 - 1.0)
    }
    fn force_magnitude(&self, r: f64) -> f64 {
        // -dU/dr = 24 eps / r (2 (sig/r)^12 - (sig/r)^6)
        let r2 = r * r;
        let sr6 = self.sigma6 / (r2 * r2 * r2);
        24.0 * self.epsilon / r * sr6 * (2.0 * sr6 - 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn zero_crossing_at_sigma() {
        let lj = LennardJones::new(1.0, 1.0).unwrap();
        assert_relative_eq!(lj.energy(1.0), 0.0);
    }

    #[test]
    fn minimum_at_two_to_the_sixth() {
        let lj = LennardJones::new(1.5, 1.0).unwrap();
        let r_min = 2f64.powf(1.0 / 6.0);
        assert_relative_eq!(lj.force_magnitude(r_min), 0.0, epsilon = 1e-12);
        assert_relative_eq!(lj.energy(r_min), -1.5, max_relative = 1e-12);
    }

    #[test]
    fn repulsive_inside_sigma() {
        let lj = LennardJones::new(1.0, 1.0).unwrap();
        assert!(lj.force_magnitude(0.9) > 0.0);
        assert!(lj.force_magnitude(1.5) < 0.0);
    }

    #[test]
    fn force_matches_numerical_gradient() {
        let lj = LennardJones::new(0.7, 1.1).unwrap();
        let h = 1e-6;
        for &r in &[1.0, 1.2, 1.5, 2.0, 3.0] {
            let numeric = -(lj.energy(r + h) - lj.energy(r - h)) / (2.0 * h);
            assert_relative_eq!(lj.force_magnitude(r), numeric, max_relative = 1e-5);
        }
    }
}
