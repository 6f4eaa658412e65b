use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

use fluidbox::config::{self, Config};
use fluidbox::error::SimResult;
use fluidbox::overlay::{self, FrameStats, OverlayState};
use fluidbox::simulation::Simulation;
use fluidbox::{input, renderer};

struct Defaults;

impl Defaults {
    const HEADLESS_TICKS: usize = 200;
    const HEADLESS_LOG_EVERY: usize = 50;
    /// Radians the scripted stir rotates per tick.
    const HEADLESS_SPIN: f32 = 0.1;
    /// Cursor travel (cells per tick) the scripted stir imitates.
    const HEADLESS_STIR_CELLS: f32 = 4.0;
}

/// `--headless [ticks]`: `None` when running with a window.
fn parse_headless(args: &[String]) -> Option<usize> {
    let pos = args.iter().position(|a| a == "--headless")?;
    let ticks = args
        .get(pos + 1)
        .and_then(|t| t.parse().ok())
        .unwrap_or(Defaults::HEADLESS_TICKS);
    Some(ticks)
}

/// Ctrl+C flips the returned flag; failure to install is not fatal.
fn install_ctrlc() -> Arc<AtomicBool> {
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    }) {
        log::warn!("could not install Ctrl+C handler: {e}");
    }
    running
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cfg = config::load();
    let args: Vec<String> = std::env::args().collect();

    let result = match parse_headless(&args) {
        Some(ticks) => run_headless(&cfg, ticks),
        None => run_gui(&cfg),
    };
    if let Err(e) = result {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn create_simulation(cfg: &Config, mode: &str) -> SimResult<Simulation> {
    let sim = Simulation::with_params(cfg.physics.grid_size, cfg.physics.solver_params())?;
    log::info!(
        "fluidbox {mode}: grid {0}x{0}, dt {1}, diffusion {2}, viscosity {3}, {4} iterations",
        sim.grid_size(),
        sim.time_step(),
        sim.diffusion(),
        sim.viscosity(),
        sim.solver_iterations(),
    );
    Ok(sim)
}

fn run_gui(cfg: &Config) -> SimResult<()> {
    let mut sim = create_simulation(cfg, "window")?;
    let render_cfg = renderer::RenderConfig::new(sim.grid_size(), cfg.display.cell_px);
    let w = render_cfg.frame_width;
    let h = render_cfg.frame_height;

    let mut window = Window::new("fluidbox", w, h, WindowOptions::default())?;
    window.set_target_fps(cfg.display.target_fps);

    let running = install_ctrlc();

    let mut overlay_state = OverlayState::new(cfg.display.overlay, cfg.display.grayscale);
    let mut pointer = input::PointerState::new();
    let mut stats = FrameStats::new();
    let mut frame = renderer::FrameBuffer::new(render_cfg);
    let mut framebuf: Vec<u32> = Vec::with_capacity(w * h);
    let mut last_frame = Instant::now();

    'frames: while window.is_open() && running.load(Ordering::SeqCst) {
        // --- Keyboard ---
        let released = input::RELEASE_KEYS.into_iter().filter(|&k| window.is_key_released(k));
        let repeated = input::REPEAT_KEYS
            .into_iter()
            .filter(|&k| window.is_key_pressed(k, KeyRepeat::Yes));
        let quit = window.is_key_pressed(Key::Escape, KeyRepeat::No).then_some(Key::Escape);
        for key in released.chain(repeated).chain(quit) {
            let Some(action) = input::action_for_key(key) else { continue };
            if !input::apply_action(action, &mut sim, &mut overlay_state) {
                break 'frames;
            }
        }

        let lines = if overlay_state.visible {
            overlay::overlay_lines(sim.params(), &stats, overlay_state.grayscale)
        } else {
            Vec::new()
        };

        sim.fade_density(cfg.input.fade_step);

        // --- Pointer ---
        let cell = window
            .get_mouse_pos(MouseMode::Discard)
            .map(|(x, y)| frame.cfg.pixel_to_cell(x, y));
        pointer.update(cell, window.get_mouse_down(MouseButton::Left));
        if let Some(inj) = pointer.take_injection(&cfg.input) {
            let (x, y) = inj.cell;
            if let Some(amount) = inj.density {
                sim.add_density(x, y, amount);
            }
            if let Some((fx, fy)) = inj.force {
                sim.add_force(x, y, fx, fy);
            }
        }

        sim.tick();

        sim.render(|col, row, color| frame.put_cell(col, row, color), overlay_state.grayscale);
        frame.draw_overlay(&lines);
        frame.to_argb(&mut framebuf);

        window.update_with_buffer(&framebuf, w, h)?;

        let now = Instant::now();
        let delta = now.duration_since(last_frame);
        last_frame = now;
        if stats.record(delta.as_secs_f64() * 1000.0) {
            let d = sim.diagnostics();
            log::debug!(
                "{:.2}ms/frame, {} fps, dye {:.1}, energy {:.4}, max div {:.2e}",
                stats.frame_time_ms(),
                stats.fps(),
                d.total_density,
                d.kinetic_energy,
                d.max_divergence,
            );
        }
    }

    log::info!("window closed");
    Ok(())
}

fn mean_tick_time(elapsed: Duration, ticks: usize) -> Duration {
    if ticks == 0 {
        return Duration::ZERO;
    }
    elapsed.div_f64(ticks as f64)
}

/// Scripted stir at the grid centre, no window.
fn run_headless(cfg: &Config, ticks: usize) -> SimResult<()> {
    let mut sim = create_simulation(cfg, "headless")?;
    let running = install_ctrlc();

    let center = (sim.grid_size() / 2) as i32;
    let force = Defaults::HEADLESS_STIR_CELLS * cfg.input.force_scale;
    let started = Instant::now();
    let mut done = 0;

    for tick in 0..ticks {
        if !running.load(Ordering::SeqCst) {
            log::info!("interrupted after {tick} ticks");
            break;
        }
        let angle = tick as f32 * Defaults::HEADLESS_SPIN;

        sim.fade_density(cfg.input.fade_step);
        sim.add_density(center, center, cfg.input.density_step);
        sim.add_force(center, center, force * angle.cos(), force * angle.sin());
        sim.tick();
        done = tick + 1;

        if done % Defaults::HEADLESS_LOG_EVERY == 0 {
            let d = sim.diagnostics();
            log::info!(
                "tick {done}: dye {:.1}, energy {:.4}, max div {:.2e}",
                d.total_density,
                d.kinetic_energy,
                d.max_divergence,
            );
        }
    }

    let elapsed = started.elapsed();
    let d = sim.diagnostics();
    let per_tick = mean_tick_time(elapsed, done);
    log::info!(
        "{done} ticks in {:.2?} ({:.2?}/tick); dye {:.1}, energy {:.4}, max div {:.2e}",
        elapsed,
        per_tick,
        d.total_density,
        d.kinetic_energy,
        d.max_divergence,
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_headless_absent() {
        assert_eq!(parse_headless(&args(&["fluidbox"])), None);
    }

    #[test]
    fn test_parse_headless_default_ticks() {
        assert_eq!(parse_headless(&args(&["fluidbox", "--headless"])), Some(200));
        assert_eq!(parse_headless(&args(&["fluidbox", "--headless", "soon"])), Some(200));
    }

    #[test]
    fn test_parse_headless_explicit_ticks() {
        assert_eq!(parse_headless(&args(&["fluidbox", "--headless", "30"])), Some(30));
    }

    #[test]
    fn test_headless_run_small_grid() {
        let mut cfg = Config::default();
        cfg.physics.grid_size = 16;
        assert!(run_headless(&cfg, 5).is_ok());
    }

    #[test]
    fn test_headless_zero_ticks() {
        let mut cfg = Config::default();
        cfg.physics.grid_size = 10;
        assert!(run_headless(&cfg, 0).is_ok());
    }

    #[test]
    fn test_mean_tick_time() {
        assert_eq!(mean_tick_time(Duration::from_secs(3), 0), Duration::ZERO);
        let mean = mean_tick_time(Duration::from_millis(500), 50);
        assert!((mean.as_secs_f64() - 0.010).abs() < 1e-8);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_mean_tick_time_beyond_u32_ticks() {
        let ticks = u32::MAX as usize + 1;
        let elapsed = Duration::from_secs(u32::MAX as u64 + 1);
        assert_eq!(mean_tick_time(elapsed, ticks), Duration::from_secs(1));
    }

    #[test]
    fn test_headless_rejects_tiny_grid() {
        let mut cfg = Config::default();
        cfg.physics.grid_size = 4;
        assert!(run_headless(&cfg, 5).is_err());
    }
}
