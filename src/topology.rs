use std::collections::HashSet;

use crate::Error;

/// One molecule: its member atoms and the bonded pairs that feel the
/// internal potential. Atom and bond indices are global atom indices.
#[derive(Clone, Debug)]
pub struct Molecule {
    atoms: Vec<usize>,
    bonds: Vec<(usize, usize)>,
}

impl Molecule {
    pub fn new(atoms: Vec<usize>, bonds: Vec<(usize, usize)>) -> Self {
        Self { atoms, bonds }
    }
    pub fn atoms(&self) -> &[usize] {
        &self.atoms
    }
    pub fn bonds(&self) -> &[(usize, usize)] {
        &self.bonds
    }
}

/// Grouping of all atoms into molecules.
///
/// Invariant: every atom index below `num_atoms` belongs to exactly one
/// molecule, and every bond connects two distinct atoms of the same molecule.
#[derive(Clone, Debug)]
pub struct Topology {
    molecules: Vec<Molecule>,
    molecule_of: Vec<usize>,
}

impl Topology {
    /// Validate and build the topology over `num_atoms` atoms.
    pub fn new(molecules: Vec<Molecule>, num_atoms: usize) -> Result<Self, Error> {
        let mut molecule_of = vec![usize::MAX; num_atoms];
        let mut seen_bonds: HashSet<(usize, usize)> = HashSet::new();
        for (m, molecule) in molecules.iter().enumerate() {
            for &i in &molecule.atoms {
                if i >= num_atoms {
                    return Err(Error::config(format!(
                        "molecule {} references atom {} but only {} atoms exist",
                        m, i, num_atoms
                    )));
                }
                if molecule_of[i] != usize::MAX {
                    return Err(Error::config(format!(
                        "atom {} belongs to molecules {} and {}",
                        i, molecule_of[i], m
                    )));
                }
                molecule_of[i] = m;
            }
            for &(i, j) in &molecule.bonds {
                if i == j {
                    return Err(Error::config(format!(
                        "molecule {} bonds atom {} to itself",
                        m, i
                    )));
                }
                let in_molecule =
                    |a: usize| a < num_atoms && molecule.atoms.contains(&a);
                if !in_molecule(i) || !in_molecule(j) {
                    return Err(Error::config(format!(
                        "bond ({}, {}) is not internal to molecule {}",
                        i, j, m
                    )));
                }
                // a pair listed twice would double-count the internal potential
                if !seen_bonds.insert((i.min(j), i.max(j))) {
                    return Err(Error::config(format!(
                        "bond ({}, {}) in molecule {} is listed more than once",
                        i, j, m
                    )));
                }
            }
        }
        if let Some(orphan) = molecule_of.iter().position(|&m| m == usize::MAX) {
            return Err(Error::config(format!(
                "atom {} does not belong to any molecule",
                orphan
            )));
        }
        Ok(Self {
            molecules,
            molecule_of,
        })
    }

    pub fn num_molecules(&self) -> usize {
        self.molecules.len()
    }
    pub fn molecules(&self) -> &[Molecule] {
        &self.molecules
    }

    /// Index of the molecule owning atom `i`.
    pub fn molecule_of(&self, i: usize) -> usize {
        self.molecule_of[i]
    }

    /// Whether two atoms belong to the same molecule.
    pub fn same_molecule(&self, i: usize, j: usize) -> bool {
        self.molecule_of[i] == self.molecule_of[j]
    }

    /// All bonded pairs across all molecules.
    pub fn bonded_pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.molecules.iter().flat_map(|m| m.bonds.iter().copied())
    }
}

/// One atom of a molecule template: species, mass, charge, and position
/// offset from the molecule center.
#[derive(Clone, Debug)]
pub struct TemplateAtom {
    pub species: String,
    pub mass: f64,
    pub charge: f64,
    pub offset: [f64; 3],
}

impl TemplateAtom {
    pub fn new(species: &str, mass: f64, charge: f64, offset: [f64; 3]) -> Self {
        Self {
            species: String::from(species),
            mass,
            charge,
            offset,
        }
    }
}

/// Reusable molecule geometry; bond indices are local to the template.
/// Replicating it across lattice sites builds the initial configuration.
#[derive(Clone, Debug)]
pub struct MoleculeTemplate {
    atoms: Vec<TemplateAtom>,
    bonds: Vec<(usize, usize)>,
}

impl MoleculeTemplate {
    pub fn new(atoms: Vec<TemplateAtom>, bonds: Vec<(usize, usize)>) -> Result<Self, Error> {
        for &(i, j) in &bonds {
            if i == j || i >= atoms.len() || j >= atoms.len() {
                return Err(Error::config(format!(
                    "template bond ({}, {}) is invalid for {} atoms",
                    i,
                    j,
                    atoms.len()
                )));
            }
        }
        Ok(Self { atoms, bonds })
    }

    /// Three-atom bent molecule in the style of water: a heavy charged
    /// center bonded to two light atoms of half the opposite charge, at a
    /// right angle.
    pub fn water_like(bond_length: f64) -> Self {
        let b = bond_length;
        Self {
            atoms: vec![
                TemplateAtom::new("O", 16.0, -0.8, [0.0, 0.0, 0.0]),
                TemplateAtom::new("H", 1.0, 0.4, [b, 0.0, 0.0]),
                TemplateAtom::new("H", 1.0, 0.4, [0.0, b, 0.0]),
            ],
            bonds: vec![(0, 1), (0, 2)],
        }
    }

    pub fn num_atoms(&self) -> usize {
        self.atoms.len()
    }
    pub fn atoms(&self) -> &[TemplateAtom] {
        &self.atoms
    }

    /// Append one copy centered at `center`, returning the molecule record
    /// with global atom indices.
    pub fn instantiate(
        &self,
        atoms: &mut crate::Atoms,
        center: [f64; 3],
    ) -> Result<Molecule, Error> {
        let base = atoms.num_atoms();
        let mut indices = Vec::with_capacity(self.atoms.len());
        for a in &self.atoms {
            indices.push(atoms.add_atom(
                &a.species,
                a.mass,
                a.charge,
                [
                    center[0] + a.offset[0],
                    center[1] + a.offset[1],
                    center[2] + a.offset[2],
                ],
            )?);
        }
        let bonds = self
            .bonds
            .iter()
            .map(|&(i, j)| (base + i, base + j))
            .collect();
        Ok(Molecule::new(indices, bonds))
    }
}
