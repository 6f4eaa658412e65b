use crate::error::SimResult;
use crate::field::Field;
use crate::renderer::{density_to_rgba, Rgba};
use crate::solver::{self, diagnostics, SolverParams};
use crate::state::SimState;

/// Interactive fluid simulation on an `N x N` closed box.
///
/// Owns every field and the solver parameters. Callers inject force and dye
/// between ticks, advance with [`Simulation::tick`] and read the dye back
/// through [`Simulation::render`]. Not meant for concurrent callers.
pub struct Simulation {
    state: SimState,
    params: SolverParams,
}

/// Snapshot of solver health, for logging.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Diagnostics {
    pub total_density: f32,
    pub kinetic_energy: f32,
    pub max_divergence: f32,
}

impl Simulation {
    /// Fails if `grid_size < 10` or the fields cannot be allocated.
    pub fn new(grid_size: usize) -> SimResult<Self> {
        Self::with_params(grid_size, SolverParams::default())
    }

    pub fn with_params(grid_size: usize, params: SolverParams) -> SimResult<Self> {
        let state = SimState::new(grid_size)?;
        log::debug!("allocated {0}x{0} simulation with {1:?}", grid_size, params);
        Ok(Self { state, params })
    }

    pub fn grid_size(&self) -> usize {
        self.state.n
    }

    pub fn params(&self) -> &SolverParams {
        &self.params
    }

    pub fn time_step(&self) -> f32 {
        self.params.dt
    }

    pub fn set_time_step(&mut self, dt: f32) {
        self.params.dt = dt;
    }

    pub fn diffusion(&self) -> f32 {
        self.params.diff
    }

    pub fn set_diffusion(&mut self, diff: f32) {
        self.params.diff = diff;
    }

    pub fn viscosity(&self) -> f32 {
        self.params.visc
    }

    pub fn set_viscosity(&mut self, visc: f32) {
        self.params.visc = visc;
    }

    pub fn solver_iterations(&self) -> usize {
        self.params.iterations
    }

    pub fn set_solver_iterations(&mut self, iterations: usize) {
        self.params.iterations = iterations;
    }

    /// Add a force at grid cell `(x, y)` = `(col, row)`, clamped to the grid.
    pub fn add_force(&mut self, x: i32, y: i32, fx: f32, fy: f32) {
        *self.state.vx.at_mut(y, x) += fx;
        *self.state.vy.at_mut(y, x) += fy;
    }

    /// Add dye at grid cell `(x, y)` = `(col, row)`, clamped to the grid.
    pub fn add_density(&mut self, x: i32, y: i32, amount: f32) {
        *self.state.density.at_mut(y, x) += amount;
    }

    /// Linear dye decay floored at zero, independent of `dt`.
    pub fn fade_density(&mut self, step: f32) {
        for d in self.state.density.iter_mut() {
            *d = (*d - step).max(0.0);
        }
    }

    /// Advance the simulation by one step.
    pub fn tick(&mut self) {
        solver::fluid_step(&mut self.state, &self.params);
    }

    /// Call `sink(col, row, color)` once for every cell of the dye field.
    pub fn render<F>(&self, mut sink: F, grayscale: bool)
    where
        F: FnMut(usize, usize, Rgba),
    {
        let d = &self.state.density;
        for row in 0..d.rows() {
            for col in 0..d.cols() {
                sink(col, row, density_to_rgba(d.at(row as i32, col as i32), grayscale));
            }
        }
    }

    pub fn density(&self) -> &Field {
        &self.state.density
    }

    pub fn velocity_x(&self) -> &Field {
        &self.state.vx
    }

    pub fn velocity_y(&self) -> &Field {
        &self.state.vy
    }

    pub fn diagnostics(&self) -> Diagnostics {
        Diagnostics {
            total_density: diagnostics::total_density(&self.state.density),
            kinetic_energy: diagnostics::kinetic_energy(&self.state.vx, &self.state.vy),
            max_divergence: diagnostics::max_divergence(&self.state.vx, &self.state.vy),
        }
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> &SimState {
        &self.state
    }
}
