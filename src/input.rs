use minifb::Key;

use crate::config::InputConfig;
use crate::overlay::OverlayState;
use crate::simulation::Simulation;

/// Discrete user commands, decoupled from the window toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    ToggleGrayscale,
    ToggleOverlay,
    DiffusionDown,
    DiffusionUp,
    ViscosityUp,
    ViscosityDown,
    Quit,
}

/// Keys that fire once on release.
pub const RELEASE_KEYS: [Key; 2] = [Key::F1, Key::F12];
/// Keys that fire on press and repeat while held.
pub const REPEAT_KEYS: [Key; 4] = [Key::Left, Key::Right, Key::Up, Key::Down];

pub fn action_for_key(key: Key) -> Option<KeyAction> {
    match key {
        Key::F1 => Some(KeyAction::ToggleGrayscale),
        Key::F12 => Some(KeyAction::ToggleOverlay),
        Key::Left => Some(KeyAction::DiffusionDown),
        Key::Right => Some(KeyAction::DiffusionUp),
        Key::Up => Some(KeyAction::ViscosityUp),
        Key::Down => Some(KeyAction::ViscosityDown),
        Key::Escape => Some(KeyAction::Quit),
        _ => None,
    }
}

/// Apply an action. Returns false when the app should quit.
pub fn apply_action(action: KeyAction, sim: &mut Simulation, overlay: &mut OverlayState) -> bool {
    match action {
        KeyAction::ToggleGrayscale => overlay.toggle_grayscale(),
        KeyAction::ToggleOverlay => overlay.toggle(),
        KeyAction::DiffusionDown => sim.set_diffusion(sim.params().stepped_diffusion(-1)),
        KeyAction::DiffusionUp => sim.set_diffusion(sim.params().stepped_diffusion(1)),
        KeyAction::ViscosityUp => sim.set_viscosity(sim.params().stepped_viscosity(1)),
        KeyAction::ViscosityDown => sim.set_viscosity(sim.params().stepped_viscosity(-1)),
        KeyAction::Quit => return false,
    }
    true
}

/// What the pointer asks the simulation to do this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Injection {
    /// Grid cell `(col, row)` under the cursor.
    pub cell: (i32, i32),
    pub density: Option<f32>,
    pub force: Option<(f32, f32)>,
}

/// Cursor tracker in grid coordinates.
///
/// The first sample after the cursor enters the window only anchors the
/// position, so re-entry never produces a jump-sized force. Leaving the
/// window releases the buttons.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointerState {
    entered: bool,
    pos: (i32, i32),
    delta: (i32, i32),
    left_down: bool,
}

impl PointerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one cursor sample; `None` means the cursor is outside the window.
    pub fn update(&mut self, cell: Option<(i32, i32)>, left_down: bool) {
        let Some((x, y)) = cell else {
            if self.entered {
                self.entered = false;
                self.left_down = false;
                self.delta = (0, 0);
            }
            return;
        };

        if self.entered {
            self.delta = (x - self.pos.0, y - self.pos.1);
        } else {
            self.entered = true;
            self.delta = (0, 0);
        }
        self.pos = (x, y);
        self.left_down = left_down;
    }

    /// Injection for this frame; consumes the pending cursor delta.
    pub fn take_injection(&mut self, cfg: &InputConfig) -> Option<Injection> {
        if !self.entered {
            return None;
        }
        let density = self.left_down.then_some(cfg.density_step);
        let (dx, dy) = std::mem::take(&mut self.delta);
        let force = (dx != 0 || dy != 0)
            .then(|| (dx as f32 * cfg.force_scale, dy as f32 * cfg.force_scale));
        Some(Injection {
            cell: self.pos,
            density,
            force,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::params::{DIFF_MAX, DIFF_MIN, DIFF_STEP, VISC_MIN};
    use crate::solver::SolverParams;

    #[test]
    fn test_key_mapping() {
        assert_eq!(action_for_key(Key::F1), Some(KeyAction::ToggleGrayscale));
        assert_eq!(action_for_key(Key::F12), Some(KeyAction::ToggleOverlay));
        assert_eq!(action_for_key(Key::Up), Some(KeyAction::ViscosityUp));
        assert_eq!(action_for_key(Key::Left), Some(KeyAction::DiffusionDown));
        assert_eq!(action_for_key(Key::A), None);
        for key in RELEASE_KEYS.iter().chain(REPEAT_KEYS.iter()) {
            assert!(action_for_key(*key).is_some());
        }
    }

    #[test]
    fn test_apply_param_actions_go_through_setters() {
        let mut sim = Simulation::new(10).unwrap();
        let mut overlay = OverlayState::new(true, false);
        assert!(apply_action(KeyAction::DiffusionUp, &mut sim, &mut overlay));
        assert_eq!(sim.diffusion(), DIFF_STEP);
        assert!(apply_action(KeyAction::DiffusionDown, &mut sim, &mut overlay));
        assert!(sim.diffusion().abs() < 1e-9);
        apply_action(KeyAction::ViscosityUp, &mut sim, &mut overlay);
        assert!(sim.viscosity() > VISC_MIN);
        apply_action(KeyAction::ViscosityDown, &mut sim, &mut overlay);
        apply_action(KeyAction::ViscosityDown, &mut sim, &mut overlay);
        assert_eq!(sim.viscosity(), VISC_MIN);
    }

    #[test]
    fn test_diffusion_keys_clamp_at_range_ends() {
        let mut sim = Simulation::new(10).unwrap();
        let mut overlay = OverlayState::new(true, false);
        apply_action(KeyAction::DiffusionDown, &mut sim, &mut overlay);
        assert_eq!(sim.diffusion(), DIFF_MIN);
        for _ in 0..250 {
            apply_action(KeyAction::DiffusionUp, &mut sim, &mut overlay);
        }
        assert_eq!(sim.diffusion(), DIFF_MAX);
    }

    #[test]
    fn test_apply_toggles_and_quit() {
        let mut sim = Simulation::new(10).unwrap();
        let mut overlay = OverlayState::new(true, false);
        apply_action(KeyAction::ToggleOverlay, &mut sim, &mut overlay);
        apply_action(KeyAction::ToggleGrayscale, &mut sim, &mut overlay);
        assert_eq!(overlay, OverlayState::new(false, true));
        assert!(!apply_action(KeyAction::Quit, &mut sim, &mut overlay));
        assert_eq!(sim.params(), &SolverParams::default());
    }

    #[test]
    fn test_first_move_only_anchors() {
        let cfg = InputConfig::default();
        let mut p = PointerState::new();
        assert_eq!(p.take_injection(&cfg), None);

        p.update(Some((10, 20)), false);
        let inj = p.take_injection(&cfg).unwrap();
        assert_eq!(inj.cell, (10, 20));
        assert_eq!(inj.force, None);
        assert_eq!(inj.density, None);
    }

    #[test]
    fn test_motion_produces_scaled_force_once() {
        let cfg = InputConfig::default();
        let mut p = PointerState::new();
        p.update(Some((10, 10)), false);
        p.take_injection(&cfg);
        p.update(Some((14, 8)), false);
        let inj = p.take_injection(&cfg).unwrap();
        assert_eq!(inj.cell, (14, 8));
        assert_eq!(inj.force, Some((2.0, -1.0)));
        // Delta is consumed.
        assert_eq!(p.take_injection(&cfg).unwrap().force, None);
    }

    #[test]
    fn test_left_button_adds_density() {
        let cfg = InputConfig::default();
        let mut p = PointerState::new();
        p.update(Some((5, 5)), true);
        assert_eq!(p.take_injection(&cfg).unwrap().density, Some(800.0));
        p.update(Some((5, 5)), true);
        let inj = p.take_injection(&cfg).unwrap();
        assert_eq!(inj.density, Some(800.0));
        assert_eq!(inj.force, None);
    }

    #[test]
    fn test_leaving_releases_buttons_and_reanchors() {
        let cfg = InputConfig::default();
        let mut p = PointerState::new();
        p.update(Some((5, 5)), true);
        assert!(p.left_down);
        p.update(None, true);
        assert!(!p.entered);
        assert!(!p.left_down);
        assert_eq!(p.take_injection(&cfg), None);

        // Re-entry far away must not produce a force.
        p.update(Some((70, 70)), false);
        let inj = p.take_injection(&cfg).unwrap();
        assert_eq!(inj.force, None);
        assert_eq!(inj.density, None);
    }
}
