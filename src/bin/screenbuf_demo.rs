//! Screen buffer demo
//!
//! Animates the two kinds of prompt the screen buffer is built for: a
//! selection list redrawn as the highlight moves, and a free-form input
//! line that grows and shrinks across the terminal edge.

use std::io::{self, Stdout};
use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use screenbuf::{Config, ConfiguredWidth, ScreenBuf, ScreenBufResult};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const FRAME_DELAY: Duration = Duration::from_millis(120);

const ITEMS: [&str; 5] = ["Red", "Orange", "Yellow", "Green", "Blue"];

const ANSWER: &str = "the quick brown fox jumps over the lazy dog and keeps running";

fn main() -> ExitCode {
    // Logs go to stderr so they never land inside the drawn region
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mut config_path: Option<PathBuf> = None;
    let mut mode = Mode::Select;
    let mut show_help = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-c" | "--config" => {
                i += 1;
                if i < args.len() {
                    config_path = Some(PathBuf::from(&args[i]));
                }
            },
            "--select" => {
                mode = Mode::Select;
            },
            "--input" => {
                mode = Mode::Input;
            },
            "-h" | "--help" => {
                show_help = true;
            },
            other => {
                eprintln!("Unknown argument: {}", other);
                print_help();
                return ExitCode::FAILURE;
            },
        }
        i += 1;
    }

    if show_help {
        print_help();
        return ExitCode::SUCCESS;
    }

    let mut config = match &config_path {
        Some(path) => match Config::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            },
        },
        None => Config::load_or_default(),
    };

    // Menu items always fit on one row
    if mode == Mode::Select {
        config.wrap_aware = false;
    }

    tracing::info!("Running {:?} demo with {:?}", mode, config);

    let mut screen = ScreenBuf::from_config(io::stdout(), &config);
    let result = match mode {
        Mode::Select => run_select(&mut screen),
        Mode::Input => run_input(&mut screen),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Render error: {}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Select,
    Input,
}

type Screen = ScreenBuf<Stdout, ConfiguredWidth>;

/// Move the highlight down the list, then collapse it to the choice
fn run_select(screen: &mut Screen) -> ScreenBufResult<()> {
    let chosen = ITEMS.len() - 2;

    for selected in 0..=chosen {
        screen.write_str("\x1b[1m? Pick a color:\x1b[0m")?;
        for (index, item) in ITEMS.iter().enumerate() {
            if index == selected {
                screen.write_str(&format!("\x1b[36m> {}\x1b[0m", item))?;
            } else {
                screen.write_str(&format!("  {}", item))?;
            }
        }
        screen.flush()?;
        thread::sleep(FRAME_DELAY);
    }

    screen.reset();
    screen.write_str(&format!(
        "\x1b[1m? Pick a color:\x1b[0m \x1b[36m{}\x1b[0m",
        ITEMS[chosen]
    ))?;
    screen.flush()
}

/// Type an answer one character at a time, then delete half of it
fn run_input(screen: &mut Screen) -> ScreenBufResult<()> {
    let chars: Vec<char> = ANSWER.chars().collect();
    let lengths = (0..=chars.len()).chain((chars.len() / 2..chars.len()).rev());

    for len in lengths {
        let typed: String = chars[..len].iter().collect();
        screen.write_str(&format!("\x1b[1m? Say something:\x1b[0m {}", typed))?;
        screen.flush()?;
        thread::sleep(FRAME_DELAY / 2);
    }

    Ok(())
}

fn print_help() {
    println!("Screen Buffer Demo");
    println!();
    println!("Usage: screenbuf-demo [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -c, --config <PATH>  Read settings from a JSON config file");
    println!("      --select         Animate a selection list (default)");
    println!("      --input          Animate a growing and shrinking input line");
    println!("  -h, --help           Show this help message");
    println!();
    println!("Set RUST_LOG=screenbuf=trace to see every flush on stderr.");
}
