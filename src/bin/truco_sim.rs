//! Play hands between two random agents and report the results.

use clap::{Parser, ValueEnum};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};
use truco_rs::agents::{AgentTable, BotProfile, RandomAgent};
use truco_rs::deck::Deck;
use truco_rs::engine::{deal, play_hand};
use truco_rs::hand::{HandResult, Seat, Victory};
use truco_rs::stakes::StakeLadder;

#[derive(Parser)]
#[command(name = "truco-sim")]
#[command(about = "Play Truco hands between two random agents", version)]
struct Args {
    /// Number of hands to play
    #[arg(short = 'n', long, default_value = "1")]
    hands: u32,

    /// Seed for shuffling and agents; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Stake progression
    #[arg(long, default_value = "paulista")]
    ladder: LadderKind,

    /// Chance an agent asks for a raise when allowed
    #[arg(long, default_value = "0.2")]
    raise: f64,

    /// Write one JSON hand record per line instead of a summary
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LadderKind {
    Paulista,
    Mineiro,
}

impl LadderKind {
    fn ladder(self) -> StakeLadder {
        match self {
            LadderKind::Paulista => StakeLadder::paulista(),
            LadderKind::Mineiro => StakeLadder::mineiro(),
        }
    }
}

#[derive(Debug, Default)]
struct Tally {
    points: [u64; 2],
    wins: [u32; 2],
    runs: u32,
    draws: u32,
}

impl Tally {
    fn add(&mut self, result: HandResult) {
        match result {
            HandResult::Won { winner, points, by } => {
                self.points[winner.index()] += u64::from(points);
                self.wins[winner.index()] += 1;
                if by == Victory::Run {
                    self.runs += 1;
                }
            }
            HandResult::Draw => self.draws += 1,
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    fmt().with_env_filter(filter).with_writer(io::stderr).without_time().init();
}

fn run(args: &Args) -> Result<Tally, Box<dyn std::error::Error>> {
    let base_seed = args.seed.unwrap_or_else(|| rand::rng().random());
    info!(base_seed, hands = args.hands, "starting simulation");
    let mut rng = ChaCha8Rng::seed_from_u64(base_seed);

    let profile = BotProfile::new(args.raise, 0.1, 0.7);
    let mut tally = Tally::default();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for n in 0..args.hands {
        let mut deck = Deck::truco();
        deck.shuffle_with(&mut rng);
        let mut agents = AgentTable::with_agents(
            Box::new(RandomAgent::new(profile.clone().with_seed(rng.random()))),
            Box::new(RandomAgent::new(profile.clone().with_seed(rng.random()))),
        );
        let first = if n % 2 == 0 { Seat::One } else { Seat::Two };

        let mut hand = deal(&mut deck, &mut agents, args.ladder.ladder())?;
        let result = play_hand(&mut hand, &mut agents, first).map_err(|e| {
            warn!(hand = n, error = %e, "hand aborted");
            e
        })?;
        tally.add(result);

        if args.json {
            serde_json::to_writer(&mut out, &hand.record())?;
            writeln!(out)?;
        }
    }
    Ok(tally)
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let tally = match run(&args) {
        Ok(tally) => tally,
        Err(e) => {
            eprintln!("truco-sim: {e}");
            return ExitCode::FAILURE;
        }
    };
    if !args.json {
        println!("hands: {}", args.hands);
        for seat in Seat::BOTH {
            println!(
                "{seat}: {} wins, {} points",
                tally.wins[seat.index()],
                tally.points[seat.index()]
            );
        }
        println!("won by run: {}, drawn: {}", tally.runs, tally.draws);
    }
    ExitCode::SUCCESS
}
