use molmd::prelude::*;

/// Two water-like molecules in a periodic box, trajectory printed to stdout.
fn main() -> Result<(), Error> {
    let config = Config::from_toml_str(
        r#"
        box_length = 10.0
        num_molecules = 2
        timestep = 0.001
        equilibration_steps = 200
        total_steps = 1000
        output_interval = 100
        target_temperature = 0.5
        lj_epsilon = 0.5
        lj_sigma = 1.0
        coulomb_constant = 1.0

        [internal_potential]
        kind = "harmonic"
        k = 100.0
        r0 = 0.9
    "#,
    )?;

    // the bonded closed form comes from outside the core; here a harmonic
    // bond built from the opaque parameter table
    let params = config.internal_potential.clone().unwrap();
    let bond = BondForce::harmonic(
        params["k"].as_float().unwrap(),
        params["r0"].as_float().unwrap(),
    );

    let template = MoleculeTemplate::water_like(params["r0"].as_float().unwrap());
    let mut system =
        System::replicated(&template, config.num_molecules, config.boundary()?)?;
    if let Some(t) = config.target_temperature {
        system
            .atoms_mut()
            .set_temperature(t, &mut rand::thread_rng())?;
    }

    let model = PotentialModel::new(bond, config.lennard_jones()?, config.coulomb()?);
    let mut simulation =
        Simulation::new(system, model, config.integrator()?, MemorySink::new());
    simulation.set_equilibration_steps(config.equilibration_steps);
    simulation.set_output_interval(config.output_interval)?;

    let report = simulation.run(config.total_steps)?;
    println!(
        "{} steps, {} frames, final E = {:.6}",
        report.steps_completed,
        report.frames_emitted,
        report.final_energies.total()
    );

    println!("step time kinetic potential temperature");
    for frame in simulation.sink().frames() {
        println!(
            "{} {:.3} {:.6} {:.6} {:.6}",
            frame.step,
            frame.time,
            frame.kinetic_energy,
            frame.potential_energy,
            frame.temperature
        );
    }
    Ok(())
}
