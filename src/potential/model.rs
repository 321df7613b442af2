use rayon::prelude::*;

use super::{Coulomb, LennardJones, PairPotential, PairPotentialTrait};
use crate::{Error, System};

/// Pairs per rayon task when parallel evaluation is enabled.
const PAIR_CHUNK: usize = 1024;

/// Internal plus external energy of one force evaluation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Energies {
    pub internal: f64,
    pub external: f64,
}

impl Energies {
    pub fn total(&self) -> f64 {
        self.internal + self.external
    }
}

/// Forces and energies for one System snapshot.
#[derive(Clone, Debug)]
pub struct PotentialEval {
    pub forces: Vec<[f64; 3]>,
    pub energies: Energies,
}

/// Computes per-atom forces and total potential energy, split into an
/// internal (bonded, raw-distance) and an external (intermolecular,
/// minimum-image Coulomb + Lennard-Jones) contribution.
///
/// Pairs within one molecule never enter the external sum; bonded pairs
/// never go through the minimum-image convention.
pub struct PotentialModel {
    internal: PairPotential,
    lennard_jones: LennardJones,
    coulomb: Coulomb,
    parallel: bool,
}

impl PotentialModel {
    pub fn new(
        internal: impl Into<PairPotential>,
        lennard_jones: LennardJones,
        coulomb: Coulomb,
    ) -> Self {
        Self {
            internal: internal.into(),
            lennard_jones,
            coulomb,
            parallel: false,
        }
    }

    /// Evaluate external pairs across rayon workers. Partial accumulators
    /// are summed in a fixed chunk order, so the result is reproducible for
    /// a given chunk size, though not bit-identical to the serial path.
    pub fn set_parallel(&mut self, enabled: bool) {
        self.parallel = enabled;
    }

    /// Evaluate into a fresh buffer.
    pub fn evaluate(&self, system: &System) -> Result<PotentialEval, Error> {
        let mut forces = vec![[0.0; 3]; system.atoms().num_atoms()];
        let energies = self.evaluate_into(system, &mut forces)?;
        Ok(PotentialEval { forces, energies })
    }

    /// Evaluate into a caller-supplied buffer, which is zeroed first.
    pub fn evaluate_into(
        &self,
        system: &System,
        forces: &mut Vec<[f64; 3]>,
    ) -> Result<Energies, Error> {
        forces.clear();
        forces.resize(system.atoms().num_atoms(), [0.0; 3]);

        let internal = self.accumulate_internal(system, forces)?;
        let external = if self.parallel {
            self.accumulate_external_parallel(system, forces)?
        } else {
            self.accumulate_external(system, forces)?
        };

        Ok(Energies { internal, external })
    }

    fn accumulate_internal(
        &self,
        system: &System,
        forces: &mut [[f64; 3]],
    ) -> Result<f64, Error> {
        let positions = system.atoms().positions();
        let mut energy = 0.0;
        for (i, j) in system.topology().bonded_pairs() {
            // bonded pairs use the raw separation; molecules are assumed
            // small relative to the box
            let delta = [
                positions[i][0] - positions[j][0],
                positions[i][1] - positions[j][1],
                positions[i][2] - positions[j][2],
            ];
            let (e, pair_force) = pair_contribution(&self.internal, delta)
                .ok_or_else(|| divergence(system, i, j))?;
            energy += e;
            add_pair_force(forces, i, j, pair_force);
        }
        Ok(energy)
    }

    fn external_pair(
        &self,
        system: &System,
        i: usize,
        j: usize,
    ) -> Result<(f64, [f64; 3]), Error> {
        let positions = system.atoms().positions();
        let delta = system.boundary().minimum_image(positions[i], positions[j]);
        let r2 = delta[0] * delta[0] + delta[1] * delta[1] + delta[2] * delta[2];
        let r = r2.sqrt();
        let qq = system.atoms().charge(i) * system.atoms().charge(j);

        let energy = self.lennard_jones.energy(r) + qq * self.coulomb.energy(r);
        let f_mag =
            self.lennard_jones.force_magnitude(r) + qq * self.coulomb.force_magnitude(r);
        if !energy.is_finite() || !f_mag.is_finite() || r == 0.0 {
            return Err(divergence(system, i, j));
        }
        let scale = f_mag / r;
        Ok((
            energy,
            [scale * delta[0], scale * delta[1], scale * delta[2]],
        ))
    }

    fn accumulate_external(
        &self,
        system: &System,
        forces: &mut [[f64; 3]],
    ) -> Result<f64, Error> {
        let n = system.atoms().num_atoms();
        let topology = system.topology();
        let mut energy = 0.0;
        for i in 0..n {
            for j in i + 1..n {
                if topology.same_molecule(i, j) {
                    continue;
                }
                let (e, pair_force) = self.external_pair(system, i, j)?;
                energy += e;
                add_pair_force(forces, i, j, pair_force);
            }
        }
        Ok(energy)
    }

    fn accumulate_external_parallel(
        &self,
        system: &System,
        forces: &mut [[f64; 3]],
    ) -> Result<f64, Error> {
        let n = system.atoms().num_atoms();
        let topology = system.topology();
        let pairs: Vec<(usize, usize)> = (0..n)
            .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
            .filter(|&(i, j)| !topology.same_molecule(i, j))
            .collect();

        // One disjoint accumulator per chunk; collect() preserves chunk
        // order so the final sum is independent of worker scheduling.
        let partials: Vec<(Vec<[f64; 3]>, f64)> = pairs
            .par_chunks(PAIR_CHUNK)
            .map(|chunk| {
                let mut local = vec![[0.0; 3]; n];
                let mut energy = 0.0;
                for &(i, j) in chunk {
                    let (e, pair_force) = self.external_pair(system, i, j)?;
                    energy += e;
                    add_pair_force(&mut local, i, j, pair_force);
                }
                Ok((local, energy))
            })
            .collect::<Result<_, Error>>()?;

        let mut energy = 0.0;
        for (local, e) in partials {
            energy += e;
            for (total, partial) in forces.iter_mut().zip(local.iter()) {
                total[0] += partial[0];
                total[1] += partial[1];
                total[2] += partial[2];
            }
        }
        Ok(energy)
    }
}

/// Energy and force vector on atom `i` for a potential that is a pure
/// function of separation. `delta` points from `j` to `i`. Returns None on
/// any non-finite intermediate.
fn pair_contribution(
    potential: &PairPotential,
    delta: [f64; 3],
) -> Option<(f64, [f64; 3])> {
    let r2 = delta[0] * delta[0] + delta[1] * delta[1] + delta[2] * delta[2];
    let r = r2.sqrt();
    if r == 0.0 || !r.is_finite() {
        return None;
    }
    let energy = potential.energy(r);
    let f_mag = potential.force_magnitude(r);
    if !energy.is_finite() || !f_mag.is_finite() {
        return None;
    }
    let scale = f_mag / r;
    Some((
        energy,
        [scale * delta[0], scale * delta[1], scale * delta[2]],
    ))
}

fn add_pair_force(forces: &mut [[f64; 3]], i: usize, j: usize, f: [f64; 3]) {
    forces[i][0] += f[0];
    forces[i][1] += f[1];
    forces[i][2] += f[2];
    forces[j][0] -= f[0];
    forces[j][1] -= f[1];
    forces[j][2] -= f[2];
}

fn divergence(system: &System, i: usize, j: usize) -> Error {
    Error::divergence(
        system.step(),
        format!("non-finite interaction between atoms {} and {}", i, j),
    )
}
