//! Stable-fluids sandbox: a closed `N x N` box of dye and velocity that is
//! stirred interactively and rendered as colored cells.

pub mod config;
pub mod error;
pub mod field;
pub mod input;
pub mod overlay;
pub mod renderer;
pub mod simulation;
pub mod solver;
pub mod state;
