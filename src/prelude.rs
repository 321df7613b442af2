pub use crate::atoms::Atoms;
pub use crate::boundary::Boundary;
pub use crate::compute;
pub use crate::config::Config;
pub use crate::error::Error;
pub use crate::integrators::{Integrator, VelocityVerlet};
pub use crate::output::{CsvSink, FrameSink, MemorySink, TrajectoryFrame};
pub use crate::potential::{
    BondForce, Coulomb, Energies, LennardJones, PairPotentialTrait, PotentialModel,
};
pub use crate::simulation::{RunReport, RunState, Simulation};
pub use crate::system::System;
pub use crate::topology::{Molecule, MoleculeTemplate, TemplateAtom, Topology};
