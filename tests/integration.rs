use molmd::prelude::*;

fn water_model() -> PotentialModel {
    PotentialModel::new(
        BondForce::harmonic(100.0, 0.9),
        LennardJones::new(0.5, 1.0).unwrap(),
        Coulomb::new(1.0).unwrap(),
    )
}

fn two_water_simulation() -> Simulation<VelocityVerlet, MemorySink> {
    let template = MoleculeTemplate::water_like(0.9);
    let system =
        System::replicated(&template, 2, Boundary::periodic(10.0).unwrap()).unwrap();
    let verlet = VelocityVerlet::new(0.001).unwrap();
    Simulation::new(system, water_model(), verlet, MemorySink::new())
}

#[test]
fn end_to_end_two_molecules() {
    // two 3-atom molecules, L = 10, dt = 0.001, 1000 steps, interval 100
    let mut sim = two_water_simulation();
    sim.set_output_interval(100).unwrap();

    let initial = compute::total_energy(
        sim.system(),
        &water_model().evaluate(sim.system()).unwrap().energies,
    );

    let report = sim.run(1000).unwrap();
    assert_eq!(report.state, RunState::Completed);
    assert_eq!(report.frames_emitted, 10);
    assert!(!report.output_degraded);

    let frames = sim.sink().frames();
    assert_eq!(frames.len(), 10);
    for pair in frames.windows(2) {
        assert!(pair[1].step > pair[0].step);
        assert!(pair[1].time > pair[0].time);
    }

    // microcanonical run: total energy stays within 1% of its initial value
    let scale = initial.abs().max(1.0);
    for frame in frames {
        let drift = (frame.total_energy() - initial).abs() / scale;
        assert!(
            drift < 0.01,
            "energy drifted {:.4}% at step {}",
            100.0 * drift,
            frame.step
        );
    }
}

#[test]
fn momentum_is_conserved() {
    let mut sim = two_water_simulation();
    sim.set_output_interval(100).unwrap();
    sim.run(500).unwrap();

    // zero initial velocities, pairwise-balanced forces: momentum stays zero
    let p = compute::momentum(sim.system());
    for c in p {
        assert!(c.abs() < 1e-9, "net momentum component {}", c);
    }
}

#[test]
fn positions_stay_wrapped() {
    let mut sim = two_water_simulation();
    sim.set_output_interval(50).unwrap();
    sim.run(200).unwrap();
    for p in sim.system().atoms().positions() {
        assert!(p.iter().all(|&x| (0.0..10.0).contains(&x)));
    }
}

#[test]
fn zero_box_length_fails_before_any_frame() {
    let config = Config::from_toml_str(
        r#"
        box_length = 0.0
        num_molecules = 1
        timestep = 0.001
        total_steps = 10
        lj_epsilon = 1.0
        lj_sigma = 1.0
        coulomb_constant = 1.0
    "#,
    );
    assert!(matches!(config, Err(Error::Configuration(_))));
    assert!(matches!(
        Boundary::periodic(0.0),
        Err(Error::Configuration(_))
    ));
}

#[test]
fn coincident_atoms_abort_on_first_evaluation() {
    let mut atoms = Atoms::new();
    atoms.add_atom("A", 1.0, 0.5, [5.0, 5.0, 5.0]).unwrap();
    atoms.add_atom("A", 1.0, -0.5, [5.0, 5.0, 5.0]).unwrap();
    let topology = Topology::new(
        vec![
            Molecule::new(vec![0], vec![]),
            Molecule::new(vec![1], vec![]),
        ],
        2,
    )
    .unwrap();
    let system = System::new(atoms, topology, Boundary::periodic(10.0).unwrap());

    let mut sim = Simulation::new(
        system,
        water_model(),
        VelocityVerlet::new(0.001).unwrap(),
        MemorySink::new(),
    );
    let result = sim.run(10);
    assert!(matches!(result, Err(Error::Divergence { step: 0, .. })));
    assert_eq!(sim.state(), RunState::Aborted);
    // no frame was produced before the failure
    assert!(sim.sink().frames().is_empty());
}

#[test]
fn failing_sink_degrades_output_but_not_the_run() {
    use std::io;

    // sink whose writes always fail, standing in for a broken output path
    struct FailingSink;
    impl FrameSink for FailingSink {
        fn write_frame(&mut self, _frame: TrajectoryFrame) -> Result<(), Error> {
            Err(Error::Output(csv::Error::from(io::Error::new(
                io::ErrorKind::Other,
                "sink unavailable",
            ))))
        }
    }

    let template = MoleculeTemplate::water_like(0.9);
    let system =
        System::replicated(&template, 2, Boundary::periodic(10.0).unwrap()).unwrap();
    let mut sim = Simulation::new(
        system,
        water_model(),
        VelocityVerlet::new(0.001).unwrap(),
        FailingSink,
    );
    sim.set_output_interval(10).unwrap();

    // I/O failure is downgraded: the numerical run still completes
    let report = sim.run(50).unwrap();
    assert_eq!(report.state, RunState::Completed);
    assert_eq!(report.steps_completed, 50);
    assert!(report.output_degraded);
    assert_eq!(sim.state(), RunState::Completed);
}

#[test]
fn mid_run_divergence_preserves_emitted_frames() {
    // collaborator-supplied bond form that goes non-finite past r = 2: a
    // constant repulsive force drives the pair there after ~100 steps
    let bond = BondForce::from_fn(|r| {
        if r < 2.0 {
            (0.0, 1.0)
        } else {
            (f64::NAN, f64::NAN)
        }
    });
    let mut atoms = Atoms::new();
    atoms.add_atom("A", 1.0, 0.0, [4.5, 5.0, 5.0]).unwrap();
    atoms.add_atom("A", 1.0, 0.0, [5.5, 5.0, 5.0]).unwrap();
    let topology =
        Topology::new(vec![Molecule::new(vec![0, 1], vec![(0, 1)])], 2).unwrap();
    let system = System::new(atoms, topology, Boundary::periodic(10.0).unwrap());

    let model = PotentialModel::new(
        bond,
        LennardJones::new(0.0, 1.0).unwrap(),
        Coulomb::new(0.0).unwrap(),
    );
    let mut sim = Simulation::new(
        system,
        model,
        VelocityVerlet::new(0.01).unwrap(),
        MemorySink::new(),
    );
    sim.set_output_interval(20).unwrap();

    let result = sim.run(1000);
    assert!(matches!(result, Err(Error::Divergence { .. })));
    assert_eq!(sim.state(), RunState::Aborted);

    // frames emitted before the failure survive the abort, in order
    let frames = sim.sink().frames();
    assert!(frames.len() >= 3, "only {} frames before abort", frames.len());
    for pair in frames.windows(2) {
        assert!(pair[1].step > pair[0].step);
    }
    assert!(frames.last().unwrap().step < sim.system().step());
}

#[test]
fn thermalized_run_reports_sane_temperature() {
    use rand::SeedableRng;

    let template = MoleculeTemplate::water_like(0.9);
    let mut system =
        System::replicated(&template, 8, Boundary::periodic(12.0).unwrap()).unwrap();
    let mut rng = rand::rngs::StdRng::seed_from_u64(42);
    system.atoms_mut().set_temperature(0.5, &mut rng).unwrap();
    assert!((compute::temperature(&system) - 0.5).abs() < 1e-9);

    let mut sim = Simulation::new(
        system,
        water_model(),
        VelocityVerlet::new(0.0005).unwrap(),
        MemorySink::new(),
    );
    sim.set_equilibration_steps(100);
    sim.set_output_interval(50).unwrap();
    let report = sim.run(200).unwrap();

    assert_eq!(report.frames_emitted, 4);
    for frame in sim.sink().frames() {
        assert!(frame.temperature > 0.0 && frame.temperature.is_finite());
    }
}
