use anyhow::{Context, bail};
use crossterm::{
    cursor::{Hide, Show as ShowCursor},
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{info, warn};
use std::env;
use std::fs::File;
use std::io::{BufWriter, Stdout, stdout};
use std::time::{Duration, Instant};

use termworks::canvas::Canvas;
use termworks::config::Config;
use termworks::input::{Hud, InputEvent};
use termworks::present::Presenter;
use termworks::show::Show;

struct Options {
    bg_color: (u8, u8, u8),
    seed: Option<u64>,
    fade: Option<f32>,
    log_file: Option<String>,
}

fn print_usage() {
    eprintln!("termworks - Interactive fireworks for the terminal");
    eprintln!();
    eprintln!("Usage: termworks [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --bg-color RRGGBB  Set background color as hex (e.g., --bg-color 1a1b26)");
    eprintln!("  --seed N           Seed the random source for a reproducible show");
    eprintln!("  --fade ALPHA       Trail fade per frame, 0.0 to 1.0 (default 0.35)");
    eprintln!("  --log-file PATH    Write logs to PATH (filter with RUST_LOG)");
    eprintln!();
    eprintln!("Click to launch, hold to keep firing, press b or space for a burst.");
    eprintln!("Press 'q', ESC, or Ctrl+C to exit");
}

fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some((r, g, b))
}

/// `Ok(None)` means usage was requested.
fn parse_args(args: &[String]) -> anyhow::Result<Option<Options>> {
    let mut options = Options {
        bg_color: (0, 0, 0),
        seed: None,
        fade: None,
        log_file: None,
    };

    let mut i = 1;
    while i < args.len() {
        let value = args.get(i + 1);
        match (args[i].as_str(), value) {
            ("help" | "--help" | "-h", _) => return Ok(None),
            ("--bg-color", Some(value)) => {
                options.bg_color = parse_hex_color(value).with_context(|| {
                    format!("Invalid hex color: {value}\nExpected format: RRGGBB (e.g., 1a1b26)")
                })?;
            }
            ("--seed", Some(value)) => {
                options.seed = Some(value.parse().with_context(|| format!("Invalid seed: {value}"))?);
            }
            ("--fade", Some(value)) => {
                let fade: f32 = value.parse().with_context(|| format!("Invalid fade: {value}"))?;
                if !(0.0..=1.0).contains(&fade) {
                    bail!("--fade must be between 0.0 and 1.0, got {fade}");
                }
                options.fade = Some(fade);
            }
            ("--log-file", Some(value)) => options.log_file = Some(value.clone()),
            (flag @ ("--bg-color" | "--seed" | "--fade" | "--log-file"), None) => {
                bail!("{flag} requires a value");
            }
            (arg, _) => bail!("Unknown option: {arg}"),
        }
        i += 2;
    }

    Ok(Some(options))
}

fn init_logging(path: &str) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("cannot create log file {path}"))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

/// Puts the terminal back the way we found it, however the show ends.
struct TerminalGuard;

impl TerminalGuard {
    fn enter(stdout: &mut BufWriter<Stdout>) -> anyhow::Result<Self> {
        terminal::enable_raw_mode().context("cannot enable raw mode")?;
        let guard = TerminalGuard;
        execute!(stdout, EnterAlternateScreen, Hide, Clear(ClearType::All), EnableMouseCapture)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stdout = stdout();
        if let Err(err) = execute!(stdout, ShowCursor, LeaveAlternateScreen, DisableMouseCapture) {
            warn!("failed to restore terminal: {err}");
        }
        if let Err(err) = terminal::disable_raw_mode() {
            warn!("failed to leave raw mode: {err}");
        }
    }
}

fn is_exit(event: &Event) -> bool {
    let Event::Key(key_event) = event else {
        return false;
    };
    key_event.code == KeyCode::Char('q')
        || key_event.code == KeyCode::Esc
        || (key_event.code == KeyCode::Char('c')
            && key_event.modifiers.contains(event::KeyModifiers::CONTROL))
}

fn run(options: Options) -> anyhow::Result<()> {
    let mut config = Config::terminal();
    if let Some(fade) = options.fade {
        config.fade_alpha = fade;
    }
    let rng = match options.seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };
    info!("starting show (seed: {:?}, config: {config:?})", options.seed);

    let stdout = stdout();
    let mut stdout = BufWriter::with_capacity(1024 * 64, stdout);
    let _guard = TerminalGuard::enter(&mut stdout)?;

    let (cols, rows) = terminal::size()?;
    let mut canvas = Canvas::new(cols as usize, rows as usize * 2);
    let mut show = Show::new(config, rng);
    let mut presenter = Presenter::new(options.bg_color);
    let hud = Hud::default();
    info!("canvas {}x{}", canvas.columns(), canvas.rows());

    let start = Instant::now();
    let mut last_frame = start;
    let mut accumulator = 0.0f32;
    const FIXED_DT: f32 = 1.0 / 60.0;

    loop {
        if event::poll(Duration::from_millis(1))? {
            let event = event::read()?;
            if is_exit(&event) {
                break;
            }
            match InputEvent::from_terminal(&event, &hud) {
                Some(InputEvent::Resize) => {
                    let (cols, rows) = terminal::size()?;
                    canvas.resize(cols as usize, rows as usize * 2);
                    execute!(stdout, Clear(ClearType::All))?;
                    info!(
                        "resized canvas to {}x{} ({} rockets, {} sparks live)",
                        canvas.columns(),
                        canvas.rows(),
                        show.simulation().rockets().len(),
                        show.simulation().sparks().len()
                    );
                }
                Some(input) => show.handle(input, start.elapsed(), &canvas),
                None => {}
            }
        }

        let now = Instant::now();
        let frame_time = now.duration_since(last_frame).as_secs_f32();
        last_frame = now;

        accumulator += frame_time;
        if accumulator > FIXED_DT * 3.0 {
            accumulator = FIXED_DT * 3.0;
        }

        let mut stepped = false;
        while accumulator >= FIXED_DT {
            show.frame(start.elapsed(), &mut canvas);
            accumulator -= FIXED_DT;
            stepped = true;
        }

        if stepped {
            presenter.render(&canvas, &hud, &mut stdout)?;
        }
    }

    info!("show over");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();

    let options = match parse_args(&args) {
        Ok(Some(options)) => options,
        Ok(None) => {
            print_usage();
            return Ok(());
        }
        Err(err) => {
            eprintln!("{err:#}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    if let Some(path) = &options.log_file {
        init_logging(path)?;
    }

    run(options)
}
