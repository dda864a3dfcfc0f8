//! calc-widget: calculator in the terminal
//!
//! ```bash
//! calc-widget                              # dark theme, normal size
//! calc-widget --theme light --size large
//! calc-widget --config calc.yaml --log-file calc.log
//! ```
//!
//! Keys: digits, `+ - * /`, `%`, F9 (±), Enter/`=`, Backspace, Esc.
//! `t` toggles the theme, `s` cycles the size, `q` quits. Buttons are clickable.

use std::error::Error;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use calc_widget::appearance::{SizePreset, Theme};
use calc_widget::config::WidgetConfig;
use calc_widget::particles::Bounds;
use calc_widget::tui::{render, CalculatorApp};
use calc_widget::widget::CalculatorWidget;
use clap::Parser;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, MouseButton, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use tracing::{debug, info};

/// Calculator widget for the terminal
#[derive(Debug, Parser)]
#[command(name = "calc-widget", version, about)]
struct Cli {
    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Colour theme (dark, light)
    #[arg(long)]
    theme: Option<Theme>,

    /// Size preset (compact, normal, large)
    #[arg(long)]
    size: Option<SizePreset>,

    /// Disable the particle background
    #[arg(long)]
    no_particles: bool,

    /// Particle seed (defaults to the clock)
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (RUST_LOG filters, default calc_widget=info)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    if let Some(path) = &cli.log_file {
        init_tracing(File::create(path)?);
    }

    let config = build_config(&cli)?;
    info!(theme = %config.theme, size = %config.size, "starting");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &config);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!("exiting");
    result
}

/// Config file first, then CLI flags on top
fn build_config(cli: &Cli) -> Result<WidgetConfig, Box<dyn Error>> {
    let mut config = match &cli.config {
        Some(path) => WidgetConfig::load(path)?,
        None => WidgetConfig::default(),
    };

    if let Some(theme) = cli.theme {
        config = config.with_theme(theme);
    }
    if let Some(size) = cli.size {
        config = config.with_size(size);
    }
    if cli.no_particles {
        config = config.with_particles_enabled(false);
    }
    let seed = cli.seed.or(config.particles.seed).unwrap_or_else(clock_seed);
    config = config.with_seed(seed);

    config.validate()?;
    Ok(config)
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

fn init_tracing(file: File) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("calc_widget=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    config: &WidgetConfig,
) -> Result<(), Box<dyn Error>> {
    let size = terminal.size()?;
    let widget = CalculatorWidget::from_config(
        config,
        Bounds::new(f64::from(size.width), f64::from(size.height)),
    );
    let mut app = CalculatorApp::with_widget(widget);
    let frame_interval = config.frame_interval();
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| render(&app, f))?;

        let timeout = frame_interval.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => app.handle_key_event(key),
                Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                    let size = terminal.size()?;
                    let screen = Rect::new(0, 0, size.width, size.height);
                    app.click(screen, mouse.column, mouse.row);
                }
                Event::Resize(width, height) => app.resize(width, height),
                _ => {}
            }
        }

        if last_tick.elapsed() >= frame_interval {
            app.tick();
            last_tick = Instant::now();
        }

        if app.should_quit() {
            break;
        }
    }

    let history = app.widget().history();
    if !history.is_empty() {
        debug!(entries = history.len(), "tape:\n{}", history.export_formatted());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("calc-widget").chain(args.iter().copied()))
    }

    #[test]
    fn test_cli_defaults() {
        let cli = parse(&[]);
        assert!(cli.config.is_none());
        assert!(cli.theme.is_none());
        assert!(!cli.no_particles);
    }

    #[test]
    fn test_cli_flags_override_defaults() {
        let cli = parse(&["--theme", "light", "--size", "compact", "--no-particles", "--seed", "9"]);
        let config = build_config(&cli).unwrap();
        assert_eq!(config.theme, Theme::Light);
        assert_eq!(config.size, SizePreset::Compact);
        assert!(!config.particles.enabled);
        assert_eq!(config.particles.seed, Some(9));
    }

    #[test]
    fn test_cli_rejects_unknown_theme() {
        let result = Cli::try_parse_from(["calc-widget", "--theme", "sepia"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_file_then_flags() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "theme: light\nsize: large\nparticles:\n  seed: 5").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let cli = parse(&["--config", &path, "--size", "normal"]);
        let config = build_config(&cli).unwrap();
        assert_eq!(config.theme, Theme::Light);
        assert_eq!(config.size, SizePreset::Normal);
        assert_eq!(config.particles.seed, Some(5));
    }

    #[test]
    fn test_missing_config_file_is_error() {
        let cli = parse(&["--config", "/nonexistent/calc.yaml"]);
        assert!(build_config(&cli).is_err());
    }

    #[test]
    fn test_clock_seed_used_without_seed() {
        let cli = parse(&[]);
        let config = build_config(&cli).unwrap();
        assert!(config.particles.seed.is_some());
    }
}
