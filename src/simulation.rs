use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, info, warn};

use crate::integrators::Integrator;
use crate::output::{FrameSink, TrajectoryFrame};
use crate::potential::{Energies, PotentialModel};
use crate::{Error, System};

/// Orchestrator run states.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Initialized,
    Equilibrating,
    Running,
    Completed,
    Aborted,
}

/// Summary of a run that ended without error.
#[derive(Clone, Copy, Debug)]
pub struct RunReport {
    /// Final state: `Completed`, or `Aborted` if an external stop was
    /// requested mid-run.
    pub state: RunState,
    pub steps_completed: usize,
    pub frames_emitted: usize,
    /// True if at least one frame failed to reach the sink.
    pub output_degraded: bool,
    pub final_energies: Energies,
}

/// Owns the System and drives the step loop: equilibrate, run, record
/// diagnostics, emit trajectory frames.
///
/// Errors from the numerical core (`Divergence`) abort the run; errors from
/// the sink are downgraded to warnings so I/O trouble never corrupts the
/// simulation itself.
pub struct Simulation<I: Integrator, S: FrameSink> {
    system: System,
    model: PotentialModel,
    integrator: I,
    sink: S,
    state: RunState,
    equilibration_steps: usize,
    output_interval: usize,
    output_degraded: bool,
    stop: Arc<AtomicBool>,
    forces: Vec<[f64; 3]>,
}

impl<I: Integrator, S: FrameSink> Simulation<I, S> {
    pub fn new(system: System, model: PotentialModel, integrator: I, sink: S) -> Self {
        Self {
            system,
            model,
            integrator,
            sink,
            state: RunState::Initialized,
            equilibration_steps: 0,
            output_interval: 100,
            output_degraded: false,
            stop: Arc::new(AtomicBool::new(false)),
            forces: Vec::new(),
        }
    }

    // Getters
    pub fn system(&self) -> &System {
        &self.system
    }
    pub fn state(&self) -> RunState {
        self.state
    }
    pub fn sink(&self) -> &S {
        &self.sink
    }
    pub fn into_sink(self) -> S {
        self.sink
    }

    // Setters
    pub fn set_equilibration_steps(&mut self, steps: usize) {
        self.equilibration_steps = steps;
    }
    pub fn set_output_interval(&mut self, every: usize) -> Result<(), Error> {
        if every == 0 {
            return Err(Error::config("output interval should be at least 1"));
        }
        self.output_interval = every;
        Ok(())
    }

    /// Handle for requesting an orderly stop; checked once per step.
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        self.stop.clone()
    }

    /// Run equilibration then `total_steps` recorded steps.
    ///
    /// On a `Divergence` error the state moves to `Aborted` and the error
    /// surfaces to the caller; every frame already handed to the sink is
    /// preserved and the sink is flushed on all exit paths. An external stop
    /// request also ends in `Aborted` but returns the report.
    pub fn run(&mut self, total_steps: usize) -> Result<RunReport, Error> {
        if total_steps == 0 {
            return Err(Error::config("total steps should be at least 1"));
        }
        let result = self.run_inner(total_steps);
        if let Err(e) = self.sink.flush() {
            warn!("trajectory flush failed: {}", e);
            self.output_degraded = true;
        }
        match result {
            Ok(report) => {
                self.state = report.state;
                info!(
                    "run {:?} after {} steps, {} frames",
                    report.state, report.steps_completed, report.frames_emitted
                );
                Ok(RunReport {
                    output_degraded: self.output_degraded,
                    ..report
                })
            }
            Err(e) => {
                self.state = RunState::Aborted;
                warn!("run aborted at step {}: {}", self.system.step(), e);
                Err(e)
            }
        }
    }

    fn run_inner(&mut self, total_steps: usize) -> Result<RunReport, Error> {
        // Initial forces; coincident atoms surface here, before any step.
        let mut energies = self.model.evaluate_into(&self.system, &mut self.forces)?;
        let mut frames_emitted = 0;
        let mut stopped = false;

        if self.equilibration_steps > 0 {
            self.state = RunState::Equilibrating;
            info!("equilibrating for {} steps", self.equilibration_steps);
            for _ in 0..self.equilibration_steps {
                if self.stop_requested() {
                    stopped = true;
                    break;
                }
                energies = self
                    .integrator
                    .step(&mut self.system, &self.model, &mut self.forces)?;
            }
        }

        if !stopped {
            self.state = RunState::Running;
            info!(
                "running {} steps of size {}",
                total_steps,
                self.integrator.timestep()
            );
            for n in 1..=total_steps {
                if self.stop_requested() {
                    stopped = true;
                    break;
                }
                energies = self
                    .integrator
                    .step(&mut self.system, &self.model, &mut self.forces)?;
                if n % self.output_interval == 0 {
                    self.emit_frame(&energies);
                    frames_emitted += 1;
                }
            }
        }

        Ok(RunReport {
            state: if stopped {
                RunState::Aborted
            } else {
                RunState::Completed
            },
            steps_completed: self.system.step(),
            frames_emitted,
            output_degraded: self.output_degraded,
            final_energies: energies,
        })
    }

    fn stop_requested(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }

    fn emit_frame(&mut self, energies: &Energies) {
        let frame = TrajectoryFrame::capture(&self.system, energies);
        debug!(
            "frame at step {}: E = {}, T = {}",
            frame.step,
            frame.total_energy(),
            frame.temperature
        );
        if let Err(e) = self.sink.write_frame(frame) {
            warn!("dropping trajectory frame: {}", e);
            self.output_degraded = true;
        }
    }
}
