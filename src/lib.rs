//! molmd: a small molecular-dynamics engine for rigid-topology molecules.
//!
//! Molecules interact through an intramolecular bonded potential (supplied
//! as an opaque closed form) and an intermolecular Coulomb + Lennard-Jones
//! potential under periodic boundary conditions, integrated with velocity
//! Verlet.

pub mod atoms;
pub mod boundary;
pub mod compute;
pub mod config;
pub mod error;
pub mod integrators;
pub mod lattice;
pub mod output;
pub mod potential;
pub mod prelude;
pub mod simulation;
pub mod system;
pub mod topology;

pub use atoms::Atoms;
pub use boundary::Boundary;
pub use config::Config;
pub use error::Error;
pub use integrators::{Integrator, VelocityVerlet};
pub use simulation::{RunReport, RunState, Simulation};
pub use system::System;
pub use topology::{Molecule, MoleculeTemplate, Topology};
