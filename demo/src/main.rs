use std::time::Duration;

use beamroute_crossterm::CrosstermDriver;
use beamroute_demo::{DemoConfig, HEIGHT, Visualizer, WIDTH, trace};
use beamroute_search::{BeamConfig, Graph};
use beamroute_ui::{App, AppConfig};
use clap::Parser;
use simple_logger::SimpleLogger;

/// Route finding using beam search, step by step.
#[derive(Parser, Debug)]
#[command(name = "beamroute-demo", version, about)]
struct Cli {
    /// Candidates kept per round
    #[arg(short, long, default_value_t = BeamConfig::DEFAULT_WIDTH)]
    width: usize,

    /// Start node label, preselected in the visualizer
    #[arg(long)]
    start: Option<String>,

    /// Goal node label, preselected in the visualizer
    #[arg(long)]
    goal: Option<String>,

    /// Milliseconds each frontier path stays highlighted
    #[arg(long, default_value_t = 600)]
    delay_ms: u64,

    /// Give up after this many rounds
    #[arg(long)]
    max_rounds: Option<usize>,

    /// Print the rounds to stdout instead of opening the visualizer
    #[arg(long)]
    headless: bool,

    /// Leave the mouse to the terminal; select nodes with the digit keys
    #[arg(long)]
    no_mouse: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn log_level(&self) -> log::LevelFilter {
        // Logs go to stderr, which the visualizer's screen would hide.
        let base = if self.headless {
            log::LevelFilter::Warn
        } else {
            log::LevelFilter::Off
        };
        match self.verbose {
            0 => base,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }

    fn demo_config(&self) -> DemoConfig {
        DemoConfig {
            beam_width: self.width,
            step_delay: Duration::from_millis(self.delay_ms),
            max_rounds: self.max_rounds,
            start: self.start.clone(),
            goal: self.goal.clone(),
        }
    }
}

fn run_headless(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let (Some(start), Some(goal)) = (cli.start.as_deref(), cli.goal.as_deref()) else {
        return Err("--headless needs both --start and --goal".into());
    };
    let graph = Graph::reference();
    for line in trace(&graph, start, goal, cli.demo_config().beam_config())? {
        println!("{line}");
    }
    Ok(())
}

fn run_visualizer(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let model = Visualizer::new(cli.demo_config())?;
    let mut app = App::new(AppConfig {
        model,
        driver: CrosstermDriver::new().with_mouse(!cli.no_mouse),
        width: WIDTH,
        height: HEIGHT,
    });
    app.run()
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = SimpleLogger::new()
        .without_timestamps()
        .with_level(cli.log_level())
        .init()
    {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let result = if cli.headless {
        run_headless(&cli)
    } else {
        run_visualizer(&cli)
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::parse_from(["beamroute-demo"]);
        assert_eq!(cli.width, 2);
        assert_eq!(cli.delay_ms, 600);
        assert!(!cli.headless);
        assert!(!cli.no_mouse);
        assert_eq!(cli.log_level(), log::LevelFilter::Off);
    }

    #[test]
    fn headless_flags() {
        let cli = Cli::parse_from([
            "beamroute-demo",
            "--headless",
            "--start",
            "me",
            "--goal",
            "you",
            "-w",
            "1",
            "-vv",
        ]);
        assert!(cli.headless);
        assert_eq!(cli.log_level(), log::LevelFilter::Debug);
        let config = cli.demo_config();
        assert_eq!(config.beam_width, 1);
        assert_eq!(config.start.as_deref(), Some("me"));
        assert!(run_headless(&cli).is_ok());
    }

    #[test]
    fn no_mouse_flag() {
        let cli = Cli::parse_from(["beamroute-demo", "--no-mouse"]);
        assert!(cli.no_mouse);
    }

    #[test]
    fn headless_requires_endpoints() {
        let cli = Cli::parse_from(["beamroute-demo", "--headless", "--start", "me"]);
        assert!(run_headless(&cli).is_err());
    }
}
