mod boundary;
mod core;
pub mod diagnostics;
pub mod params;

// Re-export public API
pub use boundary::FieldType;
pub use self::core::{advect, diffuse, project};
pub use params::SolverParams;

use crate::state::SimState;

/// Full fluid simulation step: dye first, then velocity.
pub fn fluid_step(state: &mut SimState, params: &SolverParams) {
    density_step(state, params);
    velocity_step(state, params);
}

/// Diffuse then advect the dye through the current velocity field.
pub fn density_step(state: &mut SimState, params: &SolverParams) {
    let dt = params.dt;

    // density -> density0 (diffused)
    diffuse(FieldType::Scalar, &mut state.density0, &state.density, params.diff, dt, params.iterations);
    // density0 -> density (transported); density is authoritative again
    advect(FieldType::Scalar, &mut state.density, &state.density0, &state.vx, &state.vy, dt);
}

/// Diffuse, project, self-advect and re-project the velocity field.
pub fn velocity_step(state: &mut SimState, params: &SolverParams) {
    let dt = params.dt;
    let iter = params.iterations;

    // Diffuse velocity: vx/vy -> vx0/vy0
    diffuse(FieldType::Vx, &mut state.vx0, &state.vx, params.visc, dt, iter);
    diffuse(FieldType::Vy, &mut state.vy0, &state.vy, params.visc, dt, iter);

    // Project vx0/vy0; vx/vy are free now and serve as pressure/divergence scratch
    project(&mut state.vx0, &mut state.vy0, &mut state.vx, &mut state.vy, iter);

    // Advect velocity by itself: vx0/vy0 -> vx/vy
    advect(FieldType::Vx, &mut state.vx, &state.vx0, &state.vx0, &state.vy0, dt);
    advect(FieldType::Vy, &mut state.vy, &state.vy0, &state.vx0, &state.vy0, dt);

    // Remove divergence introduced by advection; vx0/vy0 become scratch
    project(&mut state.vx, &mut state.vy, &mut state.vx0, &mut state.vy0, iter);
}
