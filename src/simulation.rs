//! Equity engine: Monte Carlo sampling, or exact enumeration on a complete board.
//!
//! Monte Carlo trials are grouped in fixed-size batches. Batch `i` draws from a
//! `ChaCha8Rng` seeded with the run seed on stream `i`, so the outcome depends
//! on the seed and batch size only, never on how rayon schedules batches.
//! A [`CancelToken`] is checked before each batch; a cancelled run returns the
//! tallies of the batches that finished.

use crate::cards::Card;
use crate::classify::{classify_current_hand, HandStrength};
use crate::config::EngineConfig;
use crate::deck::{remaining_deck, DeckError};
use crate::evaluator::{evaluate_seven, StrengthKey};
use crate::hand::{validate_holdem, Board, HandError, HoleCards};
use crate::recommend::{recommend, Recommendation};
use crate::sampler::{Dealer, SampleError};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use std::cmp::Ordering;
use std::fmt;
use std::ops::Add;
use std::sync::atomic::{self, AtomicBool};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// z-score of a two-sided 95% interval.
const Z_95: f64 = 1.96;

#[derive(thiserror::Error, Debug, Clone)]
#[non_exhaustive]
pub enum SimError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] HandError),
    #[error("invalid input: {0}")]
    Deck(#[from] DeckError),
    #[error("at least one opponent is required")]
    NoOpponents,
    #[error("iteration count must be positive")]
    ZeroIterations,
    #[error("{requested} iterations requested, the limit is {max}")]
    IterationLimitExceeded { requested: u64, max: u64 },
    #[error("not enough cards: need {needed}, only {available} remain")]
    InsufficientCards { needed: usize, available: usize },
    #[error(
        "simulation cancelled after {} of {} iterations",
        .0.iterations_completed(),
        .0.iterations_target
    )]
    Cancelled(Box<SimulationResult>),
    #[error("could not start worker pool: {0}")]
    ThreadPool(String),
}

impl From<SampleError> for SimError {
    fn from(e: SampleError) -> Self {
        match e {
            SampleError::InsufficientCards { needed, available } => {
                SimError::InsufficientCards { needed, available }
            }
        }
    }
}

impl SimError {
    /// The partial result of a cancelled run.
    pub fn partial(&self) -> Option<&SimulationResult> {
        match self {
            SimError::Cancelled(r) => Some(r),
            _ => None,
        }
    }
}

/// Shared cancellation flag. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, atomic::Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(atomic::Ordering::Relaxed)
    }
}

/// Hero hole cards, the visible board and how many opponents are in the hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spot {
    hero: HoleCards,
    board: Board,
    opponents: usize,
}

impl Spot {
    pub fn new(hero: HoleCards, board: Board, opponents: usize) -> Result<Self, SimError> {
        validate_holdem(&hero, &board)?;
        if opponents == 0 {
            return Err(SimError::NoOpponents);
        }
        Ok(Self { hero, board, opponents })
    }

    pub fn hero(&self) -> &HoleCards {
        &self.hero
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn opponents(&self) -> usize {
        self.opponents
    }

    fn known_cards(&self) -> Vec<Card> {
        let mut known = Vec::with_capacity(7);
        known.extend(self.hero.as_array());
        known.extend_from_slice(self.board.as_slice());
        known
    }
}

/// Showdown counts from the hero's point of view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub wins: u64,
    pub ties: u64,
    pub losses: u64,
}

impl Tally {
    pub fn total(&self) -> u64 {
        self.wins + self.ties + self.losses
    }

    fn pct(&self, count: u64) -> f64 {
        match self.total() {
            0 => 0.0,
            n => count as f64 / n as f64 * 100.0,
        }
    }

    pub fn win_pct(&self) -> f64 {
        self.pct(self.wins)
    }

    pub fn tie_pct(&self) -> f64 {
        self.pct(self.ties)
    }

    pub fn loss_pct(&self) -> f64 {
        self.pct(self.losses)
    }

    pub fn merge(self, other: Tally) -> Tally {
        Tally {
            wins: self.wins + other.wins,
            ties: self.ties + other.ties,
            losses: self.losses + other.losses,
        }
    }

    /// Record hero's key compared with the best opponent key.
    fn record(&mut self, outcome: Ordering) {
        match outcome {
            Ordering::Greater => self.wins += 1,
            Ordering::Equal => self.ties += 1,
            Ordering::Less => self.losses += 1,
        }
    }
}

impl Add for Tally {
    type Output = Tally;
    fn add(self, rhs: Tally) -> Tally {
        self.merge(rhs)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    MonteCarlo,
    Exact,
}

impl Method {
    pub fn label(self) -> &'static str {
        match self {
            Method::MonteCarlo => "Monte Carlo",
            Method::Exact => "Exact",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone)]
pub struct SimulationResult {
    pub tally: Tally,
    pub method: Method,
    /// Iterations the caller asked for.
    pub iterations_requested: u64,
    /// Trials the engine set out to run: the request for Monte Carlo, every
    /// opponent assignment for exact enumeration.
    pub iterations_target: u64,
    pub seed: u64,
    pub elapsed: Duration,
    /// Cards not in hero's hand or on the board.
    pub cards_remaining: usize,
    pub opponents: usize,
    /// False when cancellation stopped the run early.
    pub complete: bool,
    pub hand: HandStrength,
    pub recommendation: Recommendation,
}

impl SimulationResult {
    pub fn iterations_completed(&self) -> u64 {
        self.tally.total()
    }

    pub fn win_pct(&self) -> f64 {
        self.tally.win_pct()
    }

    pub fn tie_pct(&self) -> f64 {
        self.tally.tie_pct()
    }

    pub fn loss_pct(&self) -> f64 {
        self.tally.loss_pct()
    }

    /// Half width of the 95% normal-approximation interval on win %, in percentage points.
    /// Zero for exact enumeration.
    pub fn margin_pct(&self) -> f64 {
        let n = self.tally.total();
        if self.method == Method::Exact || n == 0 {
            return 0.0;
        }
        let p = self.tally.wins as f64 / n as f64;
        Z_95 * (p * (1.0 - p) / n as f64).sqrt() * 100.0
    }
}

/// Runs equity calculations under an [`EngineConfig`].
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    config: EngineConfig,
}

/// How a run will be carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Plan {
    MonteCarlo { iterations: u64 },
    Exact { assignments: u64 },
}

impl Simulator {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Estimate hero's win/tie/loss frequencies.
    ///
    /// `seed` fixes the random stream; `None` draws one from the thread RNG and
    /// reports it in the result so the run can be replayed.
    ///
    /// ```
    /// use holdem_odds::simulation::{CancelToken, Method, Simulator, Spot};
    ///
    /// let board = "Ah Kh 2c 2d 2s".parse().unwrap();
    /// let spot = Spot::new("As Ks".parse().unwrap(), board, 1).unwrap();
    /// let result = Simulator::default().run(&spot, 1_000, Some(7), &CancelToken::new()).unwrap();
    /// assert_eq!(result.method, Method::Exact);
    /// assert_eq!(result.iterations_completed(), 990);
    /// ```
    pub fn run(
        &self,
        spot: &Spot,
        iterations: u64,
        seed: Option<u64>,
        cancel: &CancelToken,
    ) -> Result<SimulationResult, SimError> {
        let started = Instant::now();
        if iterations == 0 {
            return Err(SimError::ZeroIterations);
        }
        if iterations > self.config.max_iterations {
            let max = self.config.max_iterations;
            warn!(requested = iterations, max, "iteration limit exceeded");
            return Err(SimError::IterationLimitExceeded { requested: iterations, max });
        }

        let remaining = remaining_deck(&spot.known_cards())?;
        let board_needed = spot.board.missing();
        let dealer = Dealer::new(&remaining, board_needed, spot.opponents)?;
        let hand = classify_current_hand(&spot.hero, &spot.board)?;
        let seed = seed.unwrap_or_else(|| rand::rng().random());

        let plan = match ordered_assignments(remaining.len(), spot.opponents) {
            Some(assignments) if board_needed == 0 && assignments <= self.config.exact_limit => {
                Plan::Exact { assignments }
            }
            _ => Plan::MonteCarlo { iterations },
        };
        let (method, target) = match plan {
            Plan::MonteCarlo { iterations } => (Method::MonteCarlo, iterations),
            Plan::Exact { assignments } => (Method::Exact, assignments),
        };
        debug!(
            method = method.label(),
            opponents = spot.opponents,
            iterations = target,
            workers = ?self.config.workers,
            seed,
            "starting simulation"
        );

        let work = || match plan {
            Plan::MonteCarlo { iterations } => {
                self.monte_carlo(spot, &dealer, iterations, seed, cancel)
            }
            Plan::Exact { .. } => enumerate_exact(spot, &remaining, cancel),
        };
        let tally = match self.config.workers {
            Some(n) => rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|e| SimError::ThreadPool(e.to_string()))?
                .install(work),
            None => work(),
        };

        let complete = tally.total() == target;
        let recommendation = recommend(tally.win_pct(), tally.tie_pct(), hand.category);
        let result = SimulationResult {
            tally,
            method,
            iterations_requested: iterations,
            iterations_target: target,
            seed,
            elapsed: started.elapsed(),
            cards_remaining: remaining.len(),
            opponents: spot.opponents,
            complete,
            hand,
            recommendation,
        };

        if !complete {
            warn!(
                completed = result.iterations_completed(),
                target,
                "simulation cancelled"
            );
            return Err(SimError::Cancelled(Box::new(result)));
        }
        info!(
            method = method.label(),
            elapsed_ms = result.elapsed.as_millis() as u64,
            win_pct = result.win_pct(),
            "simulation finished"
        );
        Ok(result)
    }

    fn monte_carlo(
        &self,
        spot: &Spot,
        dealer: &Dealer<'_>,
        iterations: u64,
        seed: u64,
        cancel: &CancelToken,
    ) -> Tally {
        let batch_size = self.config.batch_size.max(1);
        let batches = iterations.div_ceil(batch_size);
        let known = spot.board.as_slice();
        let hero = spot.hero.as_array();

        (0..batches)
            .into_par_iter()
            .map(|batch| {
                if cancel.is_cancelled() {
                    return Tally::default();
                }
                let trials = batch_size.min(iterations - batch * batch_size);
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                rng.set_stream(batch);
                let mut dealer = dealer.clone();
                run_batch(hero, known, &mut dealer, &mut rng, trials)
            })
            .reduce(Tally::default, Tally::merge)
    }
}

/// Estimate equity with the default [`EngineConfig`] and no cancellation.
///
/// ```
/// use holdem_odds::simulation::simulate;
///
/// let r = simulate("As Ah".parse().unwrap(), "".parse().unwrap(), 1, 2_000, Some(1)).unwrap();
/// assert!(r.win_pct() > 70.0);
/// ```
pub fn simulate(
    hero: HoleCards,
    board: Board,
    opponents: usize,
    iterations: u64,
    seed: Option<u64>,
) -> Result<SimulationResult, SimError> {
    let spot = Spot::new(hero, board, opponents)?;
    Simulator::default().run(&spot, iterations, seed, &CancelToken::new())
}

fn seven(hole: [Card; 2], board: &[Card; 5]) -> [Card; 7] {
    [hole[0], hole[1], board[0], board[1], board[2], board[3], board[4]]
}

/// Hero against the strongest opponent. Stops at the first opponent who beats hero.
fn showdown<I: IntoIterator<Item = StrengthKey>>(hero: StrengthKey, opponents: I) -> Ordering {
    let mut outcome = Ordering::Greater;
    for key in opponents {
        match hero.cmp(&key) {
            Ordering::Less => return Ordering::Less,
            Ordering::Equal => outcome = Ordering::Equal,
            Ordering::Greater => {}
        }
    }
    outcome
}

fn run_batch(
    hero: [Card; 2],
    known: &[Card],
    dealer: &mut Dealer<'_>,
    rng: &mut ChaCha8Rng,
    trials: u64,
) -> Tally {
    let mut tally = Tally::default();
    let mut board = [hero[0]; 5];
    board[..known.len()].copy_from_slice(known);

    for _ in 0..trials {
        let deal = dealer.deal(rng);
        board[known.len()..].copy_from_slice(deal.board);
        let hero_key = evaluate_seven(&seven(hero, &board)).key();
        let outcome = showdown(
            hero_key,
            deal.opponents().map(|hole| evaluate_seven(&seven(hole, &board)).key()),
        );
        tally.record(outcome);
    }
    tally
}

/// Number of ordered ways to hand disjoint pairs to `opponents` players from `cards` cards.
/// `None` on overflow.
fn ordered_assignments(cards: usize, opponents: usize) -> Option<u64> {
    let mut total = 1u64;
    for k in 0..opponents {
        let n = cards.checked_sub(2 * k)? as u64;
        total = total.checked_mul(n * n.saturating_sub(1) / 2)?;
    }
    Some(total)
}

/// Every ordered assignment of opponent hole cards on a complete board.
fn enumerate_exact(spot: &Spot, remaining: &[Card], cancel: &CancelToken) -> Tally {
    let b = spot.board.as_slice();
    let board = [b[0], b[1], b[2], b[3], b[4]];
    let hero_key = evaluate_seven(&seven(spot.hero.as_array(), &board)).key();

    // each possible opponent hand scored once: (card mask, key)
    let n = remaining.len();
    let hands: Vec<(u64, StrengthKey)> = (0..n)
        .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
        .map(|(i, j)| {
            let hole = [remaining[i], remaining[j]];
            (hole[0].mask() | hole[1].mask(), evaluate_seven(&seven(hole, &board)).key())
        })
        .collect();

    hands
        .par_iter()
        .map(|&(mask, key)| {
            let mut tally = Tally::default();
            if !cancel.is_cancelled() {
                assign(&hands, hero_key, spot.opponents - 1, mask, key, &mut tally);
            }
            tally
        })
        .reduce(Tally::default, Tally::merge)
}

fn assign(
    hands: &[(u64, StrengthKey)],
    hero: StrengthKey,
    left: usize,
    used: u64,
    best: StrengthKey,
    tally: &mut Tally,
) {
    if left == 0 {
        tally.record(hero.cmp(&best));
        return;
    }
    for &(mask, key) in hands {
        if mask & used == 0 {
            assign(hands, hero, left - 1, used | mask, best.max(key), tally);
        }
    }
}
