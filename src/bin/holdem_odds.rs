use clap::Parser;
use holdem_odds::analysis::AnalysisResponse;
use holdem_odds::config::EngineConfig;
use holdem_odds::hand::{Board, HoleCards};
use holdem_odds::simulation::{CancelToken, SimError, SimulationResult, Simulator, Spot};
use std::process::ExitCode;
use std::thread;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "holdem-odds",
    version,
    about = "Texas Hold'em win/tie/loss odds against random opponents",
    long_about = "Estimate your equity from the cards you can see.\n\
                  Uses exact enumeration when the board is complete, Monte Carlo otherwise."
)]
struct Args {
    /// Your hole cards, e.g. "As Kd" or "10h 10c"
    #[arg(long)]
    hole: String,

    /// Known board cards (flop, turn, river), e.g. "Qh 7c 2d"
    #[arg(long, default_value = "")]
    board: String,

    /// Players in the hand, including you
    #[arg(short, long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(2..=10))]
    players: u8,

    /// Monte Carlo iterations (defaults to HOLDEM_DEFAULT_ITERATIONS)
    #[arg(short = 'n', long)]
    iterations: Option<u64>,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many milliseconds and report what finished
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Print the JSON response instead of a summary
    #[arg(long)]
    json: bool,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn print_summary(r: &SimulationResult) {
    let hand = &r.hand;
    println!("Hand:    {} ({})", hand.name, hand.description);
    if let Some(sh) = &hand.starting_hand {
        println!("Start:   {} ({}, {})", sh.label, sh.description, sh.tier.as_str());
    }
    if !hand.draws.is_empty() {
        let draws: Vec<String> = hand.draws.iter().map(ToString::to_string).collect();
        println!("Draws:   {}", draws.join(", "));
    }
    println!(
        "Win:     {:.1}%   Tie: {:.1}%   Lose: {:.1}%",
        r.win_pct(),
        r.tie_pct(),
        r.loss_pct()
    );
    println!(
        "Method:  {} ({} iterations, ±{:.2}%, {} ms, seed {})",
        r.method,
        r.iterations_completed(),
        r.margin_pct(),
        r.elapsed.as_millis(),
        r.seed
    );
    println!(
        "Advice:  {}: {} [{} confidence]",
        r.recommendation.action, r.recommendation.reason, r.recommendation.confidence
    );
    if !r.complete {
        println!(
            "(stopped early: {} of {} iterations)",
            r.iterations_completed(),
            r.iterations_target
        );
    }
}

fn report(r: &SimulationResult, json: bool) -> ExitCode {
    if !json {
        print_summary(r);
        return ExitCode::SUCCESS;
    }
    match serde_json::to_string_pretty(&AnalysisResponse::from(r)) {
        Ok(s) => {
            println!("{s}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_tracing();
    let args = Args::parse();

    let config = match EngineConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let spot = args
        .hole
        .parse::<HoleCards>()
        .and_then(|hole| args.board.parse::<Board>().map(|board| (hole, board)))
        .map_err(SimError::from)
        .and_then(|(hole, board)| Spot::new(hole, board, usize::from(args.players - 1)));
    let spot = match spot {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(2);
        }
    };

    let cancel = CancelToken::new();
    if let Some(ms) = args.timeout_ms {
        let timer = cancel.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(ms));
            timer.cancel();
        });
    }

    let iterations = args.iterations.unwrap_or(config.default_iterations);
    match Simulator::new(config).run(&spot, iterations, args.seed, &cancel) {
        Ok(result) => report(&result, args.json),
        Err(SimError::Cancelled(partial)) => report(&partial, args.json),
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(2)
        }
    }
}
