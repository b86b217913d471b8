//! Terminal lunar lander (default binary).
//!
//! Sizes the field to the terminal, generates a level and runs it at a fixed
//! tick with crossterm input and the framebuffer renderer. Logs go to a file
//! because the terminal is busy showing the game.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use log::info;

use lunar_lander::core::{HazardField, Level, LevelConfig, MeteorField};
use lunar_lander::input::{InputHandler, DEFAULT_KEY_RELEASE_TIMEOUT_MS};
use lunar_lander::term::{terminal_size, FrameBuffer, GameView, TerminalRenderer, Viewport};
use lunar_lander::types::{Difficulty, FuelRule, PERMITTED_HITS, TICK_MS};

/// Smallest field that fits the structured layout, the HUD and the banner.
const MIN_WIDTH: u16 = 40;
const MIN_HEIGHT: u16 = 16;

#[derive(Parser, Debug)]
#[command(name = "lunar-lander")]
#[command(about = "Land on the flat bits. Up fires the thruster, shift+arrows thrust while drifting.", long_about = None)]
struct Cli {
    /// Terrain layout: easy, rolling or structured
    #[arg(long, default_value = "easy", value_parser = parse_difficulty)]
    difficulty: Difficulty,

    /// Fuel rule: gated (no thrust on an empty tank) or ungated
    #[arg(long, default_value = "gated", value_parser = parse_fuel_rule)]
    fuel_rule: FuelRule,

    /// Seed for meteors and explosion particles (random when omitted)
    #[arg(long)]
    seed: Option<u32>,

    /// Meteor hits the craft survives before it breaks up
    #[arg(long, default_value_t = PERMITTED_HITS)]
    hits: u32,

    /// No gravity; arrows move the craft and contacts are only reported
    #[arg(long, default_value_t = false)]
    debug_flight: bool,

    /// Thrust stays lit this long after the last press on terminals that
    /// never report key releases
    #[arg(long, default_value_t = DEFAULT_KEY_RELEASE_TIMEOUT_MS)]
    key_release_ms: u32,

    /// Where log output goes
    #[arg(long, default_value = "lunar-lander.log")]
    log_file: PathBuf,
}

fn parse_difficulty(s: &str) -> Result<Difficulty, String> {
    Difficulty::from_str(s).ok_or_else(|| format!("unknown difficulty '{s}' (easy, rolling, structured)"))
}

fn parse_fuel_rule(s: &str) -> Result<FuelRule, String> {
    FuelRule::from_str(s).ok_or_else(|| format!("unknown fuel rule '{s}' (gated, ungated)"))
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_file)?;

    let (width, height) = terminal_size()?;
    if width < MIN_WIDTH || height < MIN_HEIGHT {
        bail!("terminal is {width}x{height}, need at least {MIN_WIDTH}x{MIN_HEIGHT}");
    }

    let seed = cli.seed.unwrap_or_else(clock_seed);
    let config = LevelConfig::default()
        .with_difficulty(cli.difficulty)
        .with_fuel_rule(cli.fuel_rule)
        .with_permitted_hits(cli.hits)
        .with_seed(seed)
        .with_debug_flight(cli.debug_flight);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let input = InputHandler::new(config.debug_flight).with_key_release_timeout_ms(cli.key_release_ms);
    let result = run(&mut term, config, input, width, height);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn run(
    term: &mut TerminalRenderer,
    config: LevelConfig,
    mut input: InputHandler,
    width: u16,
    height: u16,
) -> Result<()> {
    let mut level = Level::new(width, height, config);
    let mut meteors = MeteorField::new(width, height, config.seed.wrapping_add(1));

    let view = GameView::default();
    let viewport = Viewport::new(width, height);
    let mut fb = FrameBuffer::new(width, height);

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(u64::from(TICK_MS));

    loop {
        // Render.
        view.render_into(&level, meteors.meteors(), viewport, &mut fb);
        term.draw_swap(&mut fb)?;

        if level.finished() {
            info!("level finished after {} ticks", level.ticks());
            return wait_for_key();
        }

        // Input with timeout until next tick.
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => {
                        input.handle_key_press(key);
                    }
                    KeyEventKind::Release => input.handle_key_release(key),
                },
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();

            let controls = input.next_input(TICK_MS);
            if controls.menu {
                info!("left the level after {} ticks", level.ticks());
                return Ok(());
            }
            level.tick(controls, &mut meteors);
        }
    }
}

/// Keep the final frame up until a key press.
fn wait_for_key() -> Result<()> {
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(());
            }
        }
    }
}
