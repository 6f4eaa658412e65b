use std::path::Path;

use serde::Deserialize;

use crate::error::SimResult;
use crate::solver::SolverParams;

/// Config file looked up in the working directory.
pub const CONFIG_FILE: &str = "fluidbox.yaml";

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub physics: PhysicsConfig,
    pub input: InputConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    pub grid_size: usize,
    pub dt: f32,
    pub diffusion: f32,
    pub viscosity: f32,
    pub solver_iterations: usize,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    /// Dye added per frame while the left button is held.
    pub density_step: f32,
    /// Dye removed from every cell per frame.
    pub fade_step: f32,
    /// Cursor delta (cells) to force multiplier.
    pub force_scale: f32,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    pub cell_px: usize,
    pub target_fps: usize,
    pub grayscale: bool,
    pub overlay: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            physics: PhysicsConfig::default(),
            input: InputConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        let solver = SolverParams::default();
        Self {
            grid_size: 80,
            dt: solver.dt,
            diffusion: solver.diff,
            viscosity: solver.visc,
            solver_iterations: solver.iterations,
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            density_step: 800.0,
            fade_step: 0.08,
            force_scale: 0.5,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            cell_px: 8,
            target_fps: 60,
            grayscale: false,
            overlay: true,
        }
    }
}

impl PhysicsConfig {
    pub fn solver_params(&self) -> SolverParams {
        SolverParams {
            dt: self.dt,
            diff: self.diffusion,
            visc: self.viscosity,
            iterations: self.solver_iterations,
        }
    }
}

pub fn parse(contents: &str) -> SimResult<Config> {
    Ok(serde_yaml::from_str(contents)?)
}

/// Load [`CONFIG_FILE`] if present; any failure falls back to defaults.
pub fn load() -> Config {
    load_from(Path::new(CONFIG_FILE))
}

pub fn load_from(path: &Path) -> Config {
    if !path.exists() {
        return Config::default();
    }
    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            log::warn!("failed to read {}: {e}; using defaults", path.display());
            return Config::default();
        }
    };
    match parse(&contents) {
        Ok(cfg) => {
            log::info!("loaded {}", path.display());
            cfg
        }
        Err(e) => {
            log::warn!("failed to parse {}: {e}; using defaults", path.display());
            Config::default()
        }
    }
}
