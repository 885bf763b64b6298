mod surface;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind, MouseEventKind};
use glyphrain::{Engine, RainConfig};
use std::{
    fs::File,
    path::PathBuf,
    sync::Mutex,
    time::{Duration, Instant},
};
use surface::Terminal;
use tracing::Level;

/// Mouse travel, in cells, that counts as "the user is back".
const MOUSE_WAKE_DISTANCE: u16 = 4;

#[derive(Parser, Debug)]
#[command(version, about = "Digital rain for the terminal")]
struct Args {
    /// RNG seed (random when omitted)
    #[arg(long)]
    seed: Option<u32>,

    /// ms between simulation steps
    #[arg(long, default_value_t = 100)]
    interval_ms: u64,

    /// ms per drawn frame
    #[arg(long, default_value_t = 30)]
    frame_ms: u64,

    /// terminal cells per rain column (kana are two cells wide)
    #[arg(long, default_value_t = 2)]
    cell_width: u16,

    /// share of columns falling at start, 0..1
    #[arg(long, default_value_t = 0.95)]
    density: f32,

    /// chance per step that a trail past the bottom edge freezes, 0..1
    #[arg(long, default_value_t = 0.10)]
    freeze: f32,

    #[arg(long, default_value_t = 30)]
    min_trail: usize,

    #[arg(long, default_value_t = 40)]
    max_trail: usize,

    /// append logs to this file (the terminal is busy drawing)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// debug-level logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn rain_config(&self) -> RainConfig {
        RainConfig {
            tick_interval: Duration::from_millis(self.interval_ms),
            active_probability: self.density,
            freeze_probability: self.freeze,
            min_trail_length: self.min_trail,
            max_trail_length: self.max_trail,
            ..RainConfig::default()
        }
    }
}

fn init_logging(args: &Args) -> Result<()> {
    let Some(path) = &args.log_file else {
        return Ok(());
    };
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("could not open log file {}", path.display()))?;
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(level)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let config = args.rain_config();
    config.validate().context("invalid rain settings")?;
    let seed = args.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, "starting");

    let mut term = Terminal::begin()?;
    let result = run(&mut term, &args, config, seed);
    term.end()?;

    if let Err(err) = &result {
        tracing::error!(error = %err, "rain stopped");
    }
    result
}

fn run(term: &mut Terminal, args: &Args, config: RainConfig, seed: u32) -> Result<()> {
    let cell_width = args.cell_width.max(1) as i32;
    let mut engine = Engine::with_config(
        term.cols as i32,
        term.rows as i32,
        cell_width,
        1,
        seed,
        config,
    )
    .context("terminal too small for rain")?;

    let frame_time = Duration::from_millis(args.frame_ms.clamp(5, 250));
    let start = Instant::now();
    let mut mouse_origin: Option<(u16, u16)> = None;

    loop {
        let frame_start = Instant::now();

        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(k) if k.kind == KeyEventKind::Press => return Ok(()),
                Event::Mouse(m) => match m.kind {
                    MouseEventKind::Down(_) => return Ok(()),
                    MouseEventKind::Moved => {
                        let origin = *mouse_origin.get_or_insert((m.column, m.row));
                        if origin.0.abs_diff(m.column) > MOUSE_WAKE_DISTANCE
                            || origin.1.abs_diff(m.row) > MOUSE_WAKE_DISTANCE
                        {
                            return Ok(());
                        }
                    }
                    _ => {}
                },
                Event::Resize(w, h) => {
                    term.resize(w, h)?;
                    if let Err(err) = engine.resize(w as i32, h as i32) {
                        tracing::warn!(%err, "keeping previous layout");
                    }
                }
                _ => {}
            }
        }

        engine.tick(start.elapsed());

        term.cur.clear();
        for ins in engine.project() {
            term.cur.paint(&ins);
        }
        term.present()?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            std::thread::sleep(frame_time - elapsed);
        }
    }
}
