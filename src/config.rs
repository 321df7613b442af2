use serde::Deserialize;

use crate::potential::{Coulomb, LennardJones};
use crate::{Boundary, Error, VelocityVerlet};

fn default_output_interval() -> usize {
    100
}

/// Run configuration, usually deserialized from TOML.
///
/// `internal_potential` is carried opaquely: the crate never interprets it,
/// the caller forwards it to whatever generates the bonded closed form.
#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    pub box_length: f64,
    pub num_molecules: usize,
    pub timestep: f64,
    #[serde(default)]
    pub equilibration_steps: usize,
    pub total_steps: usize,
    #[serde(default = "default_output_interval")]
    pub output_interval: usize,
    /// Absent means initial velocities are zero (microcanonical cold start).
    #[serde(default)]
    pub target_temperature: Option<f64>,
    pub lj_epsilon: f64,
    pub lj_sigma: f64,
    pub coulomb_constant: f64,
    #[serde(default)]
    pub internal_potential: Option<toml::Value>,
}

impl Config {
    pub fn from_toml_str(text: &str) -> Result<Self, Error> {
        let config: Config =
            toml::from_str(text).map_err(|e| Error::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject invalid input before any simulation state exists.
    pub fn validate(&self) -> Result<(), Error> {
        if !(self.box_length > 0.0) {
            return Err(Error::config(format!(
                "box_length should be positive, found {}",
                self.box_length
            )));
        }
        if self.num_molecules == 0 {
            return Err(Error::config("num_molecules should be at least 1"));
        }
        if !(self.timestep > 0.0) {
            return Err(Error::config(format!(
                "timestep should be positive, found {}",
                self.timestep
            )));
        }
        if self.total_steps == 0 {
            return Err(Error::config("total_steps should be at least 1"));
        }
        if self.output_interval == 0 {
            return Err(Error::config("output_interval should be at least 1"));
        }
        if let Some(t) = self.target_temperature {
            if !(t >= 0.0) {
                return Err(Error::config(format!(
                    "target_temperature should be non-negative, found {}",
                    t
                )));
            }
        }
        // potential constructors re-check their own parameters
        LennardJones::new(self.lj_epsilon, self.lj_sigma)?;
        Coulomb::new(self.coulomb_constant)?;
        Ok(())
    }

    // Component constructors from the validated values
    pub fn boundary(&self) -> Result<Boundary, Error> {
        Boundary::periodic(self.box_length)
    }
    pub fn lennard_jones(&self) -> Result<LennardJones, Error> {
        LennardJones::new(self.lj_epsilon, self.lj_sigma)
    }
    pub fn coulomb(&self) -> Result<Coulomb, Error> {
        Coulomb::new(self.coulomb_constant)
    }
    pub fn integrator(&self) -> Result<VelocityVerlet, Error> {
        VelocityVerlet::new(self.timestep)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"
        box_length = 10.0
        num_molecules = 2
        timestep = 0.001
        total_steps = 1000
        output_interval = 100
        lj_epsilon = 0.5
        lj_sigma = 1.0
        coulomb_constant = 1.0

        [internal_potential]
        kind = "harmonic"
        k = 100.0
        r0 = 0.9
    "#;

    #[test]
    fn parses_valid_toml() {
        let config = Config::from_toml_str(VALID).unwrap();
        assert_eq!(config.num_molecules, 2);
        assert_eq!(config.equilibration_steps, 0);
        assert!(config.target_temperature.is_none());

        let table = config.internal_potential.unwrap();
        assert_eq!(table["kind"].as_str(), Some("harmonic"));
        assert_eq!(table["k"].as_float(), Some(100.0));
    }

    #[test]
    fn rejects_zero_box() {
        let text = VALID.replace("box_length = 10.0", "box_length = 0.0");
        assert!(matches!(
            Config::from_toml_str(&text),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn rejects_zero_molecules() {
        let text = VALID.replace("num_molecules = 2", "num_molecules = 0");
        assert!(Config::from_toml_str(&text).is_err());
    }

    #[test]
    fn rejects_negative_temperature() {
        // insert before the [internal_potential] table so it stays top-level
        let text = VALID.replace(
            "timestep = 0.001",
            "timestep = 0.001\ntarget_temperature = -1.0",
        );
        assert!(Config::from_toml_str(&text).is_err());
    }

    #[test]
    fn missing_required_field_is_an_error() {
        assert!(Config::from_toml_str("box_length = 10.0").is_err());
    }
}
