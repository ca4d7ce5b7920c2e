mod animations;
mod app;
mod render;
mod theme;

use app::{App, AppConfig};
use clap::{Args, Parser, Subcommand, ValueEnum};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
        KeyModifiers, MouseButton, MouseEventKind,
    },
    execute,
    style::ResetColor,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use hanoi_core::{GameState, MoveOutcome, Peg, Solver};
use serde::Serialize;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use theme::ThemeKind;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Tower of Hanoi in the terminal
#[derive(Parser, Debug)]
#[command(name = "hanoi", version, about)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Write logs to this file
    #[arg(long, value_name = "PATH", global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    play: PlayArgs,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play interactively (the default)
    Play(PlayArgs),
    /// Print the optimal solution and exit
    Solve(SolveArgs),
}

#[derive(Args, Debug, Clone)]
struct PlayArgs {
    /// Number of disks
    #[arg(short, long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(3..=8))]
    disks: u8,

    /// Milliseconds between auto-solve moves
    #[arg(short, long, default_value_t = 600)]
    speed_ms: u64,

    /// Color theme
    #[arg(short, long, value_enum, default_value_t = ThemeKind::Dark)]
    theme: ThemeKind,
}

#[derive(Args, Debug, Clone)]
struct SolveArgs {
    /// Number of disks
    #[arg(short, long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(3..=8))]
    disks: u8,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// `hanoi solve --format json` output
#[derive(Debug, Serialize)]
struct SolutionReport {
    disks: u8,
    min_moves: u64,
    moves: Vec<MoveOutcome>,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Solve(args)) => {
            init_tracing(cli.verbose, cli.log_file.as_deref(), true)?;
            let mut stdout = io::stdout().lock();
            write_solution(&mut stdout, args.disks, args.format)
        }
        Some(Command::Play(args)) => {
            init_tracing(cli.verbose, cli.log_file.as_deref(), false)?;
            play(args)
        }
        None => {
            init_tracing(cli.verbose, cli.log_file.as_deref(), false)?;
            play(cli.play)
        }
    }
}

/// Install the global subscriber.
///
/// Logs go to `log_file` if given. Otherwise they go to stderr only when
/// `stderr_fallback` is set, since stderr shares the screen during play.
fn init_tracing(verbose: u8, log_file: Option<&Path>, stderr_fallback: bool) -> io::Result<()> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match log_file {
        Some(path) => {
            let file = File::create(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None if stderr_fallback => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .init();
        }
        None => {}
    }
    Ok(())
}

fn play(args: PlayArgs) -> io::Result<()> {
    let config = AppConfig {
        disks: args.disks as usize,
        auto_interval: Duration::from_millis(args.speed_ms),
        theme: args.theme,
    };
    info!(disks = args.disks, speed_ms = args.speed_ms, theme = ?args.theme, "starting");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let result = run_app(&mut stdout, config);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout, ResetColor, LeaveAlternateScreen, DisableMouseCapture)?;

    if let Err(e) = result {
        error!(error = %e, "terminal session failed");
        eprintln!("Error: {}", e);
    }

    Ok(())
}

fn run_app(stdout: &mut io::Stdout, config: AppConfig) -> io::Result<()> {
    let mut app = App::new(config);
    let mut last_tick = Instant::now();

    loop {
        let tick_rate = app.get_tick_rate();

        render::render(stdout, &mut app)?;
        stdout.flush()?;

        // Handle input with timeout for animation updates
        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout.min(Duration::from_millis(33)))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if key.modifiers.contains(KeyModifiers::CONTROL)
                        && key.code == KeyCode::Char('c')
                    {
                        break;
                    }

                    match app.handle_key(key) {
                        app::AppAction::Continue => {}
                        app::AppAction::Quit => break,
                    }
                }
                Event::Mouse(mouse) => {
                    if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
                        app.handle_mouse(mouse.column, mouse.row);
                    }
                }
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }
    }

    info!(moves = app.game.move_count(), "quit");
    Ok(())
}

/// Replay the optimal solution on a fresh tower and print every move
fn write_solution(out: &mut impl Write, disks: u8, format: OutputFormat) -> io::Result<()> {
    let mut game = GameState::new(disks as usize);
    let mut moves = Vec::with_capacity(game.min_moves() as usize);
    for mv in Solver::new().solve(game.disk_count(), Peg::Left, Peg::Right, Peg::Middle) {
        moves.push(game.apply_move(mv.from, mv.to).map_err(io::Error::other)?);
    }

    let report = SolutionReport {
        disks: game.disk_count(),
        min_moves: game.min_moves(),
        moves,
    };

    match format {
        OutputFormat::Text => {
            writeln!(
                out,
                "{} disks, {} moves from peg 1 to peg 3:",
                report.disks, report.min_moves
            )?;
            let width = report.min_moves.to_string().len();
            for (i, outcome) in report.moves.iter().enumerate() {
                writeln!(
                    out,
                    "{:>width$}. disk {} {} -> {}",
                    i + 1,
                    outcome.disk,
                    outcome.from,
                    outcome.to,
                    width = width
                )?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &report).map_err(io::Error::other)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults_to_play() {
        let cli = Cli::try_parse_from(["hanoi"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.play.disks, 3);
        assert_eq!(cli.play.speed_ms, 600);
        assert_eq!(cli.play.theme, ThemeKind::Dark);

        let cli = Cli::try_parse_from(["hanoi", "--disks", "5", "--theme", "high-contrast"]).unwrap();
        assert_eq!(cli.play.disks, 5);
        assert_eq!(cli.play.theme, ThemeKind::HighContrast);
    }

    #[test]
    fn test_parse_solve_subcommand() {
        let cli = Cli::try_parse_from(["hanoi", "-vv", "solve", "--disks", "4", "--format", "json"])
            .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Some(Command::Solve(args)) => {
                assert_eq!(args.disks, 4);
                assert_eq!(args.format, OutputFormat::Json);
            }
            other => panic!("expected solve, got {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_before_subcommand() {
        let cli = Cli::try_parse_from(["hanoi", "--log-file", "hanoi.log", "solve"]).unwrap();
        assert_eq!(cli.log_file, Some(PathBuf::from("hanoi.log")));
        assert!(matches!(cli.command, Some(Command::Solve(_))));

        let cli = Cli::try_parse_from(["hanoi", "-v", "play", "--disks", "6"]).unwrap();
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Some(Command::Play(args)) => assert_eq!(args.disks, 6),
            other => panic!("expected play, got {:?}", other),
        }

        let cli = Cli::try_parse_from(["hanoi", "-vvv"]).unwrap();
        assert_eq!(cli.verbose, 3);
        assert!(cli.command.is_none());

        let cli = Cli::try_parse_from(["hanoi", "solve", "-v", "--log-file", "x.log"]).unwrap();
        assert_eq!(cli.verbose, 1);
        assert_eq!(cli.log_file, Some(PathBuf::from("x.log")));
    }

    #[test]
    fn test_disk_count_out_of_range_is_rejected() {
        assert!(Cli::try_parse_from(["hanoi", "--disks", "9"]).is_err());
        assert!(Cli::try_parse_from(["hanoi", "solve", "--disks", "2"]).is_err());
    }

    #[test]
    fn test_text_solution() {
        let mut out = Vec::new();
        write_solution(&mut out, 3, OutputFormat::Text).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "3 disks, 7 moves from peg 1 to peg 3:");
        assert_eq!(lines[1], "1. disk 1 1 -> 3");
        assert_eq!(lines[7], "7. disk 1 1 -> 3");
    }

    #[test]
    fn test_json_solution() {
        let mut out = Vec::new();
        write_solution(&mut out, 4, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(value["disks"], 4);
        assert_eq!(value["min_moves"], 15);
        let moves = value["moves"].as_array().unwrap();
        assert_eq!(moves.len(), 15);
        assert_eq!(moves[14]["won"], true);
        assert!(moves[..14].iter().all(|m| m["won"] == false));
    }
}
