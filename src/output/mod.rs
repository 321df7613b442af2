//! Trajectory recording.
//!
//! The orchestrator produces immutable [`TrajectoryFrame`]s at a fixed step
//! cadence and hands them to a [`FrameSink`]. The on-disk encoding is the
//! sink's concern; the core only guarantees frames arrive in non-decreasing
//! step order and are never touched after emission.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::compute;
use crate::potential::Energies;
use crate::{Error, System};

/// Snapshot of the system at one recorded step. Immutable once captured.
#[derive(Clone, Debug)]
pub struct TrajectoryFrame {
    pub step: usize,
    pub time: f64,
    pub positions: Vec<[f64; 3]>,
    pub velocities: Vec<[f64; 3]>,
    pub kinetic_energy: f64,
    pub potential_energy: f64,
    pub temperature: f64,
}

impl TrajectoryFrame {
    pub fn capture(system: &System, energies: &Energies) -> Self {
        Self {
            step: system.step(),
            time: system.time(),
            positions: system.atoms().positions().clone(),
            velocities: system.atoms().velocities().clone(),
            kinetic_energy: compute::kinetic_energy(system),
            potential_energy: energies.total(),
            temperature: compute::temperature(system),
        }
    }

    pub fn total_energy(&self) -> f64 {
        self.kinetic_energy + self.potential_energy
    }
}

/// Consumer of trajectory frames. Implementations own the frames they are
/// given and must tolerate being flushed more than once.
pub trait FrameSink {
    fn write_frame(&mut self, frame: TrajectoryFrame) -> Result<(), Error>;
    fn flush(&mut self) -> Result<(), Error> {
        Ok(())
    }
}

/// Keeps every frame in memory. The sink used by tests and small runs.
#[derive(Debug, Default)]
pub struct MemorySink {
    frames: Vec<TrajectoryFrame>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn frames(&self) -> &[TrajectoryFrame] {
        &self.frames
    }
    pub fn into_frames(self) -> Vec<TrajectoryFrame> {
        self.frames
    }
}

impl FrameSink for MemorySink {
    fn write_frame(&mut self, frame: TrajectoryFrame) -> Result<(), Error> {
        self.frames.push(frame);
        Ok(())
    }
}

#[derive(Serialize)]
struct CsvRow {
    step: usize,
    time: f64,
    atom: usize,
    x: f64,
    y: f64,
    z: f64,
    vx: f64,
    vy: f64,
    vz: f64,
    kinetic_energy: f64,
    potential_energy: f64,
    temperature: f64,
}

/// Writes frames as tidy CSV, one row per atom per frame, flushing every
/// `flush_interval` frames.
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
    flush_interval: usize,
    frames_since_flush: usize,
}

impl CsvSink<File> {
    pub fn create(path: impl AsRef<Path>) -> Result<Self, Error> {
        Ok(Self::from_writer(
            csv::Writer::from_path(path).map_err(Error::Output)?,
        ))
    }
}

impl<W: Write> CsvSink<W> {
    pub fn from_writer(writer: csv::Writer<W>) -> Self {
        Self {
            writer,
            flush_interval: 10,
            frames_since_flush: 0,
        }
    }

    pub fn set_flush_interval(&mut self, frames: usize) {
        self.flush_interval = frames.max(1);
    }
}

impl<W: Write> FrameSink for CsvSink<W> {
    fn write_frame(&mut self, frame: TrajectoryFrame) -> Result<(), Error> {
        for (atom, (p, v)) in frame
            .positions
            .iter()
            .zip(frame.velocities.iter())
            .enumerate()
        {
            self.writer.serialize(CsvRow {
                step: frame.step,
                time: frame.time,
                atom,
                x: p[0],
                y: p[1],
                z: p[2],
                vx: v[0],
                vy: v[1],
                vz: v[2],
                kinetic_energy: frame.kinetic_energy,
                potential_energy: frame.potential_energy,
                temperature: frame.temperature,
            })?;
        }
        self.frames_since_flush += 1;
        if self.frames_since_flush >= self.flush_interval {
            self.flush()?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Error> {
        self.frames_since_flush = 0;
        self.writer.flush().map_err(csv::Error::from)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::potential::Energies;
    use crate::{Atoms, Boundary, Molecule, Topology};

    fn one_atom_system() -> System {
        let mut atoms = Atoms::new();
        atoms.add_atom("A", 2.0, 0.0, [1.0, 2.0, 3.0]).unwrap();
        atoms.set_velocity(0, [0.5, 0.0, 0.0]);
        let topology = Topology::new(vec![Molecule::new(vec![0], vec![])], 1).unwrap();
        System::new(atoms, topology, Boundary::periodic(10.0).unwrap())
    }

    #[test]
    fn capture_records_diagnostics() {
        let system = one_atom_system();
        let energies = Energies {
            internal: 0.25,
            external: 0.5,
        };
        let frame = TrajectoryFrame::capture(&system, &energies);
        assert_eq!(frame.step, 0);
        assert_eq!(frame.positions.len(), 1);
        assert_eq!(frame.kinetic_energy, 0.25); // 1/2 * 2.0 * 0.5^2
        assert_eq!(frame.potential_energy, 0.75);
        assert_eq!(frame.total_energy(), 1.0);
    }

    #[test]
    fn csv_sink_round_trip() {
        let system = one_atom_system();
        let frame = TrajectoryFrame::capture(&system, &Energies::default());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trajectory.csv");
        let mut sink = CsvSink::create(&path).unwrap();
        sink.write_frame(frame).unwrap();
        sink.flush().unwrap();
        drop(sink);

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let rows: Vec<csv::StringRecord> =
            reader.records().collect::<Result<_, _>>().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "0"); // step
        assert_eq!(&rows[0][3], "1.0"); // x
    }

    #[test]
    fn memory_sink_keeps_order() {
        let system = one_atom_system();
        let mut sink = MemorySink::new();
        for _ in 0..3 {
            sink.write_frame(TrajectoryFrame::capture(&system, &Energies::default()))
                .unwrap();
        }
        assert_eq!(sink.frames().len(), 3);
    }
}
