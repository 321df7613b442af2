use super::Integrator;
use crate::potential::{Energies, PotentialModel};
use crate::{Error, System};

/// Velocity-Verlet integrator.
///
/// Symplectic and time-reversible: total energy oscillates around its
/// initial value without systematic drift for a well-chosen timestep.
pub struct VelocityVerlet {
    timestep: f64,
}

impl VelocityVerlet {
    pub fn new(timestep: f64) -> Result<Self, Error> {
        if !(timestep > 0.0) {
            return Err(Error::config(format!(
                "timestep should be positive, found {}",
                timestep
            )));
        }
        Ok(Self { timestep })
    }

    /// v += forces/m * dt/2
    fn increment_velocity_halfstep(&self, system: &mut System, forces: &[[f64; 3]]) {
        let half_ts = 0.5 * self.timestep;
        for i in 0..system.atoms().num_atoms() {
            let mass = system.atoms().mass(i);
            system.atoms_mut().increment_velocity(
                i,
                [
                    half_ts * forces[i][0] / mass,
                    half_ts * forces[i][1] / mass,
                    half_ts * forces[i][2] / mass,
                ],
            );
        }
    }

    /// x += v * dt
    fn increment_positions(&self, system: &mut System) {
        let ts = self.timestep;
        for i in 0..system.atoms().num_atoms() {
            let vel = system.atoms().velocities()[i];
            system
                .atoms_mut()
                .increment_position(i, [ts * vel[0], ts * vel[1], ts * vel[2]]);
        }
    }
}

impl Integrator for VelocityVerlet {
    fn step(
        &self,
        system: &mut System,
        model: &PotentialModel,
        forces: &mut Vec<[f64; 3]>,
    ) -> Result<Energies, Error> {
        self.increment_velocity_halfstep(system, forces);
        self.increment_positions(system);
        system.wrap_positions();
        system.advance_clock(self.timestep);
        system.check_finite()?;

        // forces at the new, wrapped positions feed the closing half-kick
        let energies = model.evaluate_into(system, forces)?;
        self.increment_velocity_halfstep(system, forces);
        Ok(energies)
    }

    fn timestep(&self) -> f64 {
        self.timestep
    }
}
