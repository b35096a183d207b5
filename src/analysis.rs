//! Request/response types for an HTTP front end, plus request validation.
//!
//! The wire shapes mirror the product's JSON API: cards arrive as
//! `{ "rank": "10", "suit": "hearts" }` objects, unrevealed board slots as
//! `null`, and percentages leave rounded to one decimal.

use crate::cards::{Card, Rank, Suit};
use crate::config::EngineConfig;
use crate::evaluator::Category;
use crate::hand::{Board, HandError, HoleCards};
use crate::simulation::{CancelToken, SimError, SimulationResult, Simulator, Spot};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

pub const MIN_PLAYERS: u8 = 2;
pub const MAX_PLAYERS: u8 = 10;

#[derive(thiserror::Error, Debug, Clone)]
#[non_exhaustive]
pub enum AnalysisError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Simulation(SimError),
}

impl AnalysisError {
    /// True when the caller sent something unanswerable (HTTP 4xx territory).
    /// Cancellation and pool start-up failures are not the caller's fault.
    pub fn is_client_error(&self) -> bool {
        match self {
            AnalysisError::InvalidInput(_) => true,
            AnalysisError::Simulation(SimError::Cancelled(_) | SimError::ThreadPool(_)) => false,
            AnalysisError::Simulation(_) => true,
        }
    }

    pub fn partial(&self) -> Option<&SimulationResult> {
        match self {
            AnalysisError::Simulation(e) => e.partial(),
            _ => None,
        }
    }
}

impl From<HandError> for AnalysisError {
    fn from(e: HandError) -> Self {
        AnalysisError::InvalidInput(e.to_string())
    }
}

impl From<SimError> for AnalysisError {
    fn from(e: SimError) -> Self {
        match e {
            SimError::InvalidInput(h) => h.into(),
            SimError::Deck(d) => AnalysisError::InvalidInput(d.to_string()),
            SimError::NoOpponents => AnalysisError::InvalidInput(SimError::NoOpponents.to_string()),
            other => AnalysisError::Simulation(other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInput {
    pub rank: String,
    pub suit: String,
}

impl CardInput {
    pub fn new(rank: impl Into<String>, suit: impl Into<String>) -> Self {
        Self { rank: rank.into(), suit: suit.into() }
    }

    pub fn to_card(&self) -> Result<Card, AnalysisError> {
        let rank =
            Rank::from_str(&self.rank).map_err(|e| AnalysisError::InvalidInput(e.to_string()))?;
        let suit =
            Suit::from_str(&self.suit).map_err(|e| AnalysisError::InvalidInput(e.to_string()))?;
        Ok(Card::new(rank, suit))
    }
}

impl From<Card> for CardInput {
    fn from(c: Card) -> Self {
        let rank = match c.rank() {
            Rank::Ten => "10".to_string(),
            r => r.to_char().to_string(),
        };
        Self { rank, suit: c.suit().name().to_ascii_lowercase() }
    }
}

fn default_player_count() -> u8 {
    MIN_PLAYERS
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub hole_cards: Vec<CardInput>,
    /// Flop, turn, river slots; `None` for streets not yet dealt.
    #[serde(default)]
    pub community_cards: Vec<Option<CardInput>>,
    /// Players at showdown including the hero.
    #[serde(default = "default_player_count")]
    pub player_count: u8,
    /// Falls back to the engine's default iteration count.
    #[serde(default)]
    pub simulation_iterations: Option<u64>,
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandStrengthSummary {
    pub name: String,
    pub description: String,
    /// Category ordinal, 0 (high card) ..= 8 (straight flush).
    pub strength: u8,
    pub kind: String,
    pub draws: Vec<String>,
    /// Present only before the flop.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starting_hand: Option<StartingHandSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartingHandSummary {
    pub label: String,
    pub description: String,
    pub tier: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpponentRange {
    pub profile: String,
    pub range: String,
    pub likely_holdings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationSummary {
    pub action: String,
    pub reason: String,
    pub confidence: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationDetails {
    pub method: String,
    /// Display form of the margin, e.g. "±0.3%".
    pub confidence: String,
    pub confidence_margin: f64,
    pub cards_remaining: usize,
    pub simulation_time_ms: u64,
    pub iterations: u64,
    pub seed: u64,
    pub complete: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub win_probability: f64,
    pub tie_probability: f64,
    pub lose_probability: f64,
    pub hand_strength: HandStrengthSummary,
    pub opponent_ranges: Vec<OpponentRange>,
    pub recommendation: RecommendationSummary,
    pub calculations: CalculationDetails,
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

impl From<&SimulationResult> for AnalysisResponse {
    fn from(r: &SimulationResult) -> Self {
        let margin = round1(r.margin_pct());
        AnalysisResponse {
            win_probability: round1(r.win_pct()),
            tie_probability: round1(r.tie_pct()),
            lose_probability: round1(r.loss_pct()),
            hand_strength: HandStrengthSummary {
                name: r.hand.name.to_string(),
                description: r.hand.description.clone(),
                strength: r.hand.strength,
                kind: r.hand.kind.as_str().to_string(),
                draws: r.hand.draws.iter().map(ToString::to_string).collect(),
                starting_hand: r.hand.starting_hand.as_ref().map(|sh| StartingHandSummary {
                    label: sh.label.to_string(),
                    description: sh.description.clone(),
                    tier: sh.tier.as_str().to_string(),
                }),
            },
            opponent_ranges: opponent_ranges(r.opponents),
            recommendation: RecommendationSummary {
                action: r.recommendation.action.label().to_string(),
                reason: r.recommendation.reason.clone(),
                confidence: r.recommendation.confidence.label().to_string(),
            },
            calculations: CalculationDetails {
                method: r.method.label().to_string(),
                confidence: format!("±{margin:.1}%"),
                confidence_margin: margin,
                cards_remaining: r.cards_remaining,
                simulation_time_ms: r.elapsed.as_millis() as u64,
                iterations: r.iterations_completed(),
                seed: r.seed,
                complete: r.complete,
            },
        }
    }
}

const PROFILES: [(&str, &str, &[&str]); 4] = [
    (
        "Tight-Aggressive",
        "15-20% of hands",
        &["High pairs (99+)", "Strong aces (AQ+)", "Suited connectors (JT+)"],
    ),
    (
        "Loose-Aggressive",
        "25-35% of hands",
        &["Medium pairs (66+)", "Suited cards", "Broadway cards"],
    ),
    ("Tight-Passive", "10-15% of hands", &["Premium pairs (JJ+)", "Strong aces (AK, AQ)"]),
    (
        "Loose-Passive",
        "30-45% of hands",
        &["Any pair", "Suited cards", "Face cards", "Connecting cards"],
    ),
];

/// Cosmetic opponent labels, one per opponent up to four. Not used by the engine.
pub fn opponent_ranges(opponents: usize) -> Vec<OpponentRange> {
    PROFILES
        .iter()
        .take(opponents)
        .map(|(profile, range, holdings)| OpponentRange {
            profile: profile.to_string(),
            range: range.to_string(),
            likely_holdings: holdings.iter().map(|h| h.to_string()).collect(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingEntry {
    /// 1 is the strongest.
    pub rank: u8,
    pub name: String,
    pub description: String,
}

/// Hand rankings reference, strongest first, with the royal flush listed on its own.
pub fn hand_rankings() -> Vec<RankingEntry> {
    let royal = ("Royal Flush", "A, K, Q, J, 10, all the same suit");
    std::iter::once(royal)
        .chain(Category::ALL.iter().rev().map(|c| (c.name(), c.rule())))
        .zip(1u8..)
        .map(|((name, description), rank)| RankingEntry {
            rank,
            name: name.to_string(),
            description: description.to_string(),
        })
        .collect()
}

impl AnalysisRequest {
    /// Check counts and card syntax, then build the engine's view of the hand.
    pub fn to_spot(&self) -> Result<Spot, AnalysisError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.player_count) {
            return Err(AnalysisError::InvalidInput(format!(
                "player count must be between {MIN_PLAYERS} and {MAX_PLAYERS}, got {}",
                self.player_count
            )));
        }
        if self.hole_cards.len() != 2 {
            return Err(HandError::HoleCount(self.hole_cards.len()).into());
        }
        if self.community_cards.len() > Board::MAX_CARDS {
            return Err(HandError::TooManyBoardCards(self.community_cards.len()).into());
        }

        let hole: Vec<Card> =
            self.hole_cards.iter().map(CardInput::to_card).collect::<Result<_, _>>()?;
        let slots: Vec<Option<Card>> = self
            .community_cards
            .iter()
            .map(|slot| slot.as_ref().map(CardInput::to_card).transpose())
            .collect::<Result<_, _>>()?;

        let hero = HoleCards::from_slice(&hole)?;
        let board = Board::from_slots(&slots)?;
        Ok(Spot::new(hero, board, usize::from(self.player_count - 1))?)
    }
}

/// Validate a request, run the engine and shape the response.
///
/// ```
/// use holdem_odds::analysis::{analyze, AnalysisRequest, CardInput};
/// use holdem_odds::config::EngineConfig;
/// use holdem_odds::simulation::CancelToken;
///
/// let request = AnalysisRequest {
///     hole_cards: vec![CardInput::new("A", "spades"), CardInput::new("K", "spades")],
///     community_cards: vec![
///         Some(CardInput::new("A", "hearts")),
///         Some(CardInput::new("K", "hearts")),
///         Some(CardInput::new("2", "clubs")),
///         Some(CardInput::new("2", "diamonds")),
///         Some(CardInput::new("2", "spades")),
///     ],
///     player_count: 2,
///     simulation_iterations: Some(10_000),
///     seed: Some(1),
/// };
/// let response = analyze(&request, &EngineConfig::default(), &CancelToken::new()).unwrap();
/// assert_eq!(response.calculations.method, "Exact");
/// assert_eq!(response.hand_strength.description, "Twos full of Aces");
/// ```
pub fn analyze(
    request: &AnalysisRequest,
    config: &EngineConfig,
    cancel: &CancelToken,
) -> Result<AnalysisResponse, AnalysisError> {
    let spot = request.to_spot()?;
    let iterations = request.simulation_iterations.unwrap_or(config.default_iterations);
    debug!(
        players = request.player_count,
        board = spot.board().len(),
        iterations,
        "analysis request accepted"
    );
    let result = Simulator::new(config.clone()).run(&spot, iterations, request.seed, cancel)?;
    Ok(AnalysisResponse::from(&result))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(
        hole: &[(&str, &str)],
        board: &[Option<(&str, &str)>],
        players: u8,
    ) -> AnalysisRequest {
        AnalysisRequest {
            hole_cards: hole.iter().map(|(r, s)| CardInput::new(*r, *s)).collect(),
            community_cards: board.iter().map(|c| c.map(|(r, s)| CardInput::new(r, s))).collect(),
            player_count: players,
            simulation_iterations: Some(5_000),
            seed: Some(99),
        }
    }

    fn run(req: &AnalysisRequest) -> Result<AnalysisResponse, AnalysisError> {
        analyze(req, &EngineConfig::default(), &CancelToken::new())
    }

    #[test]
    fn card_input_accepts_common_spellings() {
        assert_eq!(CardInput::new("10", "hearts").to_card().unwrap().to_string(), "Th");
        assert_eq!(CardInput::new("T", "h").to_card().unwrap().to_string(), "Th");
        assert_eq!(CardInput::new("q", "♠").to_card().unwrap().to_string(), "Qs");
        assert!(CardInput::new("1", "hearts").to_card().is_err());
        assert!(CardInput::new("A", "stars").to_card().is_err());
    }

    #[test]
    fn card_input_from_card_round_trips() {
        let c: Card = "Td".parse().unwrap();
        let input = CardInput::from(c);
        assert_eq!(input, CardInput::new("10", "diamonds"));
        assert_eq!(input.to_card().unwrap(), c);
    }

    #[test]
    fn validation_errors_are_client_errors() {
        let cases = [
            request(&[("A", "spades")], &[], 2),
            request(&[("A", "spades"), ("K", "spades")], &[None; 6], 2),
            request(&[("A", "spades"), ("K", "spades")], &[], 1),
            request(&[("A", "spades"), ("K", "spades")], &[], 11),
            request(&[("A", "spades"), ("A", "spades")], &[], 2),
            request(&[("A", "spades"), ("K", "spades")], &[Some(("A", "spades"))], 2),
            request(&[("X", "spades"), ("K", "spades")], &[], 2),
        ];
        for req in &cases {
            let err = run(req).unwrap_err();
            assert!(matches!(err, AnalysisError::InvalidInput(_)), "{req:?} -> {err:?}");
            assert!(err.is_client_error());
        }
    }

    #[test]
    fn iteration_limit_is_a_client_error() {
        let mut req = request(&[("A", "spades"), ("K", "spades")], &[], 2);
        req.simulation_iterations = Some(1_000_000);
        let err = run(&req).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::Simulation(SimError::IterationLimitExceeded {
                requested: 1_000_000,
                max: 500_000
            })
        ));
        assert!(err.is_client_error());
    }

    #[test]
    fn cancellation_is_not_a_client_error() {
        let req = request(&[("A", "spades"), ("K", "spades")], &[], 3);
        let cancel = CancelToken::new();
        cancel.cancel();
        let err = analyze(&req, &EngineConfig::default(), &cancel).unwrap_err();
        assert!(!err.is_client_error());
        assert_eq!(err.partial().map(|p| p.complete), Some(false));
    }

    #[test]
    fn response_shape() {
        let req = request(
            &[("J", "hearts"), ("10", "hearts")],
            &[Some(("9", "hearts")), Some(("2", "hearts")), Some(("K", "clubs")), None, None],
            4,
        );
        let resp = run(&req).unwrap();
        assert_eq!(resp.calculations.method, "Monte Carlo");
        assert_eq!(resp.calculations.iterations, 5_000);
        assert_eq!(resp.calculations.cards_remaining, 47);
        assert!(resp.calculations.complete);
        assert!(resp.calculations.confidence_margin > 0.0);
        assert_eq!(resp.opponent_ranges.len(), 3);
        assert_eq!(resp.hand_strength.kind, "drawing_hand");
        assert!(resp.hand_strength.draws.contains(&"Hearts flush draw".to_string()));
        let sum = resp.win_probability + resp.tie_probability + resp.lose_probability;
        assert!((sum - 100.0).abs() <= 0.2);
    }

    #[test]
    fn opponent_profiles_cap_at_four() {
        assert_eq!(opponent_ranges(1).len(), 1);
        assert_eq!(opponent_ranges(9).len(), 4);
        assert_eq!(opponent_ranges(2)[1].profile, "Loose-Aggressive");
    }

    #[test]
    fn rankings_table_lists_ten_hands() {
        let table = hand_rankings();
        assert_eq!(table.len(), 10);
        assert_eq!(table[0].name, "Royal Flush");
        assert_eq!(table[1].name, "Straight Flush");
        assert_eq!(table[9].name, "High Card");
        assert_eq!(table[9].rank, 10);
    }

    #[test]
    fn request_json_defaults() {
        let json = r#"{"hole_cards":[{"rank":"A","suit":"spades"},{"rank":"A","suit":"hearts"}]}"#;
        let req: AnalysisRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.player_count, 2);
        assert!(req.community_cards.is_empty());
        assert_eq!(req.simulation_iterations, None);
    }

    #[test]
    fn response_serializes() {
        let req = request(&[("A", "spades"), ("A", "hearts")], &[], 2);
        let resp = run(&req).unwrap();
        let v: serde_json::Value = serde_json::to_value(&resp).unwrap();
        assert!(v["win_probability"].as_f64().unwrap() > 75.0);
        assert_eq!(v["hand_strength"]["description"], "Pair of Aces");
        assert_eq!(v["calculations"]["seed"], 99);
    }
}
