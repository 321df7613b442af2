use crate::lattice::Cubic;
use crate::topology::MoleculeTemplate;
use crate::{Atoms, Boundary, Error, Topology};

/// The full simulation state: atoms, their grouping into molecules, the
/// periodic box, and the clock. Constructed once at initialization and
/// mutated in place only by the integrator.
#[derive(Clone, Debug)]
pub struct System {
    atoms: Atoms,
    topology: Topology,
    boundary: Boundary,
    time: f64,
    step: usize,
}

impl System {
    pub fn new(atoms: Atoms, topology: Topology, boundary: Boundary) -> Self {
        Self {
            atoms,
            topology,
            boundary,
            time: 0.0,
            step: 0,
        }
    }

    /// Build a system of `count` copies of `template` with molecule centers
    /// on a cubic lattice inside the box.
    pub fn replicated(
        template: &MoleculeTemplate,
        count: usize,
        boundary: Boundary,
    ) -> Result<Self, Error> {
        if count == 0 {
            return Err(Error::config("at least one molecule is required"));
        }
        let lattice = Cubic::fit(&boundary, count)?;
        let centers = lattice.sites(&boundary, count)?;

        let mut atoms = Atoms::new();
        let mut molecules = Vec::with_capacity(count);
        for center in centers {
            molecules.push(template.instantiate(&mut atoms, center)?);
        }
        let topology = Topology::new(molecules, atoms.num_atoms())?;
        let mut system = Self::new(atoms, topology, boundary);
        system.wrap_positions();
        Ok(system)
    }

    pub fn atoms(&self) -> &Atoms {
        &self.atoms
    }
    pub fn atoms_mut(&mut self) -> &mut Atoms {
        &mut self.atoms
    }
    pub fn topology(&self) -> &Topology {
        &self.topology
    }
    pub fn boundary(&self) -> &Boundary {
        &self.boundary
    }
    pub fn time(&self) -> f64 {
        self.time
    }
    pub fn step(&self) -> usize {
        self.step
    }

    pub(crate) fn advance_clock(&mut self, timestep: f64) {
        self.time += timestep;
        self.step += 1;
    }

    /// Wrap every atom position back into the box.
    pub(crate) fn wrap_positions(&mut self) {
        if !self.boundary.is_periodic() {
            return;
        }
        let boundary = self.boundary;
        for p in self.atoms.positions.iter_mut() {
            *p = boundary.wrap(*p);
        }
    }

    /// Fail if any position or velocity is non-finite.
    pub(crate) fn check_finite(&self) -> Result<(), Error> {
        let finite = |v: &[f64; 3]| v.iter().all(|x| x.is_finite());
        if self.atoms.positions().iter().all(finite) && self.atoms.velocities().iter().all(finite)
        {
            Ok(())
        } else {
            Err(Error::divergence(
                self.step,
                "non-finite atom position or velocity",
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replicated_builds_full_topology() {
        let template = MoleculeTemplate::water_like(0.9);
        let boundary = Boundary::periodic(10.0).unwrap();
        let system = System::replicated(&template, 4, boundary).unwrap();

        assert_eq!(system.atoms().num_atoms(), 12);
        assert_eq!(system.topology().num_molecules(), 4);
        assert!(system
            .atoms()
            .positions()
            .iter()
            .all(|p| p.iter().all(|&x| (0.0..10.0).contains(&x))));
    }

    #[test]
    fn replicated_rejects_zero_molecules() {
        let template = MoleculeTemplate::water_like(0.9);
        let boundary = Boundary::periodic(10.0).unwrap();
        assert!(System::replicated(&template, 0, boundary).is_err());
    }

    #[test]
    fn wrap_positions_respects_box() {
        let template = MoleculeTemplate::water_like(0.9);
        let boundary = Boundary::periodic(4.0).unwrap();
        let mut system = System::replicated(&template, 1, boundary).unwrap();
        system.atoms_mut().set_position(0, [4.5, -0.5, 2.0]);
        system.wrap_positions();
        assert_eq!(system.atoms().positions()[0], [0.5, 3.5, 2.0]);
    }
}
