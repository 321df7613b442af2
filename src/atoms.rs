use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::Error;

/// Atom properties during simulation, not including forces.
///
/// Stored as parallel arrays indexed by atom index; positions and velocities
/// are only mutated through the increment/set methods so every update site is
/// easy to audit.
#[derive(Clone, Debug, Default)]
pub struct Atoms {
    pub(crate) positions: Vec<[f64; 3]>,
    pub(crate) velocities: Vec<[f64; 3]>,
    masses: Vec<f64>,
    charges: Vec<f64>,
    species: Vec<String>,
}

impl Atoms {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one atom with zero initial velocity.
    pub fn add_atom(
        &mut self,
        species: &str,
        mass: f64,
        charge: f64,
        position: [f64; 3],
    ) -> Result<usize, Error> {
        if !(mass > 0.0) {
            return Err(Error::config(format!(
                "atom mass should be positive, found {}",
                mass
            )));
        }
        if !charge.is_finite() || !position.iter().all(|x| x.is_finite()) {
            return Err(Error::config("atom charge and position should be finite"));
        }
        self.positions.push(position);
        self.velocities.push([0.0, 0.0, 0.0]);
        self.masses.push(mass);
        self.charges.push(charge);
        self.species.push(String::from(species));
        Ok(self.num_atoms() - 1)
    }

    pub fn num_atoms(&self) -> usize {
        self.positions.len()
    }
    pub fn positions(&self) -> &Vec<[f64; 3]> {
        &self.positions
    }
    pub fn velocities(&self) -> &Vec<[f64; 3]> {
        &self.velocities
    }
    pub fn mass(&self, i: usize) -> f64 {
        self.masses[i]
    }
    pub fn charge(&self, i: usize) -> f64 {
        self.charges[i]
    }
    pub fn species(&self, i: usize) -> &str {
        &self.species[i]
    }

    pub fn increment_position(&mut self, i: usize, increment: [f64; 3]) {
        self.positions[i][0] += increment[0];
        self.positions[i][1] += increment[1];
        self.positions[i][2] += increment[2];
    }
    pub fn increment_velocity(&mut self, i: usize, increment: [f64; 3]) {
        self.velocities[i][0] += increment[0];
        self.velocities[i][1] += increment[1];
        self.velocities[i][2] += increment[2];
    }
    pub fn set_position(&mut self, i: usize, position: [f64; 3]) {
        self.positions[i] = position;
    }
    pub fn set_velocity(&mut self, i: usize, velocity: [f64; 3]) {
        self.velocities[i] = velocity;
    }

    /// Negate every velocity in place (time-reversal runs).
    pub fn negate_velocities(&mut self) {
        for v in self.velocities.iter_mut() {
            v[0] = -v[0];
            v[1] = -v[1];
            v[2] = -v[2];
        }
    }

    /// Total kinetic energy, sum of 1/2 m v^2.
    pub fn kinetic_energy(&self) -> f64 {
        self.velocities
            .iter()
            .zip(self.masses.iter())
            .map(|(v, m)| 0.5 * m * (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]))
            .sum()
    }

    /// Total linear momentum, sum of m v.
    pub fn momentum(&self) -> [f64; 3] {
        let mut p = [0.0; 3];
        for (v, m) in self.velocities.iter().zip(self.masses.iter()) {
            p[0] += m * v[0];
            p[1] += m * v[1];
            p[2] += m * v[2];
        }
        p
    }

    /// Draw velocities from a Maxwell-Boltzmann distribution at `temperature`
    /// (reduced units, k_B = 1), remove the center-of-mass drift, then rescale
    /// so the instantaneous temperature matches the target exactly.
    pub fn set_temperature(
        &mut self,
        temperature: f64,
        rng: &mut impl Rng,
    ) -> Result<(), Error> {
        if !(temperature >= 0.0) {
            return Err(Error::config(format!(
                "target temperature should be non-negative, found {}",
                temperature
            )));
        }
        if temperature == 0.0 || self.num_atoms() == 0 {
            self.velocities.iter_mut().for_each(|v| *v = [0.0; 3]);
            return Ok(());
        }

        let dist = Normal::new(0.0, temperature.sqrt())
            .map_err(|e| Error::config(format!("bad velocity distribution: {}", e)))?;
        for i in 0..self.num_atoms() {
            let inv_sqrt_m = 1.0 / self.masses[i].sqrt();
            self.velocities[i] = [
                dist.sample(rng) * inv_sqrt_m,
                dist.sample(rng) * inv_sqrt_m,
                dist.sample(rng) * inv_sqrt_m,
            ];
        }

        // Subtract the drift so total momentum starts at zero. A single
        // atom's motion is all drift; cancelling it would freeze the atom at
        // T = 0, so it keeps the sampled velocity.
        if self.num_atoms() > 1 {
            let p = self.momentum();
            let total_mass: f64 = self.masses.iter().sum();
            for v in self.velocities.iter_mut() {
                v[0] -= p[0] / total_mass;
                v[1] -= p[1] / total_mass;
                v[2] -= p[2] / total_mass;
            }
        }

        let ke = self.kinetic_energy();
        if ke > 0.0 {
            let current = 2.0 * ke / (3.0 * self.num_atoms() as f64);
            let scale = (temperature / current).sqrt();
            for v in self.velocities.iter_mut() {
                v[0] *= scale;
                v[1] *= scale;
                v[2] *= scale;
            }
        }
        Ok(())
    }
}
