/// Interactive range for the dye diffusion rate.
pub const DIFF_MIN: f32 = 0.0;
pub const DIFF_MAX: f32 = 1e-3;
pub const DIFF_STEP: f32 = (DIFF_MAX - DIFF_MIN) / 200.0;

/// Interactive range for the velocity viscosity.
pub const VISC_MIN: f32 = 1e-6;
pub const VISC_MAX: f32 = 1e-3;
pub const VISC_STEP: f32 = (VISC_MAX - VISC_MIN) / 200.0;

/// Solver parameters for the fluid simulation.
/// Read once at the start of every tick; changes take effect on the next one.
#[derive(Clone, Debug, PartialEq)]
pub struct SolverParams {
    /// Simulation seconds per tick.
    pub dt: f32,
    /// Dye diffusion rate.
    pub diff: f32,
    /// Velocity viscosity.
    pub visc: f32,
    /// Gauss-Seidel sweeps per linear solve.
    pub iterations: usize,
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            dt: 0.35,
            // Diffusion starts disabled; the user dials it in.
            diff: 0.0,
            visc: 1e-6,
            iterations: 12,
        }
    }
}

impl SolverParams {
    /// Diffusion moved by `steps` increments of [`DIFF_STEP`], clamped to range.
    pub fn stepped_diffusion(&self, steps: i32) -> f32 {
        (self.diff + DIFF_STEP * steps as f32).clamp(DIFF_MIN, DIFF_MAX)
    }

    /// Viscosity moved by `steps` increments of [`VISC_STEP`], clamped to range.
    pub fn stepped_viscosity(&self, steps: i32) -> f32 {
        (self.visc + VISC_STEP * steps as f32).clamp(VISC_MIN, VISC_MAX)
    }

    /// Diffusion as a percentage of its interactive range.
    pub fn diffusion_percent(&self) -> f32 {
        100.0 * (self.diff - DIFF_MIN) / (DIFF_MAX - DIFF_MIN)
    }

    /// Viscosity as a percentage of its interactive range.
    pub fn viscosity_percent(&self) -> f32 {
        100.0 * (self.visc - VISC_MIN) / (VISC_MAX - VISC_MIN)
    }
}
