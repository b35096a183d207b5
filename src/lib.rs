//! holdem-odds: Texas Hold'em hand evaluation and equity estimation
//!
//! Goals:
//! - Correct best-five-of-seven evaluation with a totally ordered strength key
//! - Reproducible Monte Carlo equity (seeded, independent of thread count)
//! - Exact enumeration when the board is complete
//! - No panics for invalid input; use `Result` for recoverable errors
//!
//! ## Quick start: evaluate a Hold'em hand
//! ```
//! use holdem_odds::cards::{Card, Rank, Suit};
//! use holdem_odds::evaluator::{evaluate_holdem, Category};
//! use holdem_odds::hand::{Board, HoleCards};
//!
//! let hole = HoleCards::try_new(
//!     Card::new(Rank::Ace, Suit::Spades),
//!     Card::new(Rank::Ace, Suit::Hearts),
//! ).unwrap();
//! let board = Board::try_new(vec![
//!     Card::new(Rank::King, Suit::Clubs),
//!     Card::new(Rank::Queen, Suit::Diamonds),
//!     Card::new(Rank::Jack, Suit::Hearts),
//!     Card::new(Rank::Three, Suit::Spades),
//!     Card::new(Rank::Two, Suit::Clubs),
//! ]).unwrap();
//!
//! let eval = evaluate_holdem(&hole, &board).unwrap();
//! assert_eq!(eval.category, Category::Pair);
//! ```
//!
//! ## Equity against random hands
//! ```
//! use holdem_odds::simulation::{CancelToken, Simulator, Spot};
//!
//! let spot = Spot::new("Ah Kh".parse().unwrap(), "Qh 7h 2c".parse().unwrap(), 2).unwrap();
//! let result = Simulator::default().run(&spot, 5_000, Some(42), &CancelToken::new()).unwrap();
//! assert!(result.win_pct() + result.tie_pct() + result.loss_pct() > 99.9);
//! ```
//!
//! ## CLI
//! ```sh
//! cargo run --bin holdem-odds -- --hole "As Ah" --players 3
//! ```

pub mod analysis;
pub mod cards;
pub mod classify;
pub mod config;
pub mod deck;
pub mod evaluator;
pub mod hand;
pub mod recommend;
pub mod sampler;
pub mod simulation;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
