use crate::solver::SolverParams;

/// Weight of the previous frame time in the running average.
const FRAME_TIME_SMOOTHING: f64 = 0.9;
const FPS_WINDOW_MS: f64 = 1000.0;

/// Display toggles driven by F1 / F12.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OverlayState {
    pub visible: bool,
    pub grayscale: bool,
}

impl OverlayState {
    pub fn new(visible: bool, grayscale: bool) -> Self {
        Self { visible, grayscale }
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    pub fn toggle_grayscale(&mut self) {
        self.grayscale = !self.grayscale;
    }
}

/// Smoothed frame time and a once-per-second frame counter.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameStats {
    frame_time_ms: f64,
    acc_ms: f64,
    frames: usize,
    fps: usize,
}

impl FrameStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for one finished frame. Returns true when a new fps sample
    /// was taken.
    pub fn record(&mut self, delta_ms: f64) -> bool {
        self.frame_time_ms =
            self.frame_time_ms * FRAME_TIME_SMOOTHING + delta_ms * (1.0 - FRAME_TIME_SMOOTHING);
        self.acc_ms += delta_ms;
        self.frames += 1;
        if self.acc_ms > FPS_WINDOW_MS {
            self.fps = self.frames;
            self.acc_ms -= FPS_WINDOW_MS;
            self.frames = 0;
            return true;
        }
        false
    }

    pub fn frame_time_ms(&self) -> f64 {
        self.frame_time_ms
    }

    pub fn fps(&self) -> usize {
        self.fps
    }
}

/// Status lines shown in the top-left corner.
pub fn overlay_lines(params: &SolverParams, stats: &FrameStats, grayscale: bool) -> Vec<String> {
    vec![
        format!("frame time: {:05.2}ms ({}fps)", stats.frame_time_ms(), stats.fps()),
        format!("diffusion: {:.6} ({:.1}%)", params.diff, params.diffusion_percent()),
        format!("viscosity: {:.6} ({:.1}%)", params.visc, params.viscosity_percent()),
        format!("render mode: {}", if grayscale { "gray" } else { "color" }),
    ]
}
