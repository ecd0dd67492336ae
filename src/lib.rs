//! truco-rs: Truco rules engine
//!
//! Goals:
//! - Deterministic resolution of rounds and hands under the rotating manilha rule
//! - The raise ("truco") negotiation as an explicit, bounded state machine
//! - No panics for invalid input; rule-integrity failures are `Result`s
//!
//! ## Quick start: compare two cards
//! ```
//! use truco_rs::cards::{contest, Card, CardContest};
//!
//! // With a Three turned up, Fours are manilhas and beat everything else.
//! let vira: Card = "3c".parse().unwrap();
//! let four: Card = "4d".parse().unwrap();
//! let ace: Card = "As".parse().unwrap();
//! assert_eq!(contest(four, ace, vira), CardContest::FirstWins);
//! ```
//!
//! ## Simulator
//! Play random hands from the command line with:
//! ```sh
//! cargo run --bin truco-sim -- --hands 100 --seed 7
//! ```

pub mod agents;
pub mod cards;
pub mod deck;
pub mod engine;
pub mod hand;
pub mod negotiation;
pub mod round;
pub mod stakes;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
