//! Best-five-card hand evaluation for 5, 6 or 7 cards.
//!
//! Every five-card subset is analysed once (rank histogram, suit histogram,
//! straight mask) and classified by the detectors in priority order. The
//! result carries a packed [`StrengthKey`] whose integer order is poker order.

pub(crate) mod combinations;
pub(crate) mod detector;
pub(crate) mod hand_analysis;
pub(crate) mod rank_groups;
pub(crate) mod straight_info;
pub(crate) mod suit_info;

use crate::cards::{Card, Rank};
use crate::hand::{validate_holdem, Board, HandError, HoleCards};
use core::cmp::Ordering;
use std::fmt;

/// Compact, comparable hand strength. Higher is better; equal keys split the pot.
/// Encodes category and ranked tiebreakers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StrengthKey(u32);

/// Poker hand category from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Category {
    HighCard = 0,
    Pair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::HighCard,
        Category::Pair,
        Category::TwoPair,
        Category::ThreeOfAKind,
        Category::Straight,
        Category::Flush,
        Category::FullHouse,
        Category::FourOfAKind,
        Category::StraightFlush,
    ];

    /// Numeric strength, 0 (high card) ..= 8 (straight flush).
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    pub const fn from_ordinal(n: u8) -> Option<Category> {
        match n {
            0 => Some(Category::HighCard),
            1 => Some(Category::Pair),
            2 => Some(Category::TwoPair),
            3 => Some(Category::ThreeOfAKind),
            4 => Some(Category::Straight),
            5 => Some(Category::Flush),
            6 => Some(Category::FullHouse),
            7 => Some(Category::FourOfAKind),
            8 => Some(Category::StraightFlush),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::Pair => "Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
        }
    }

    /// One-line rule for a hand-rankings reference.
    pub const fn rule(self) -> &'static str {
        match self {
            Category::HighCard => "No other hand is made; highest cards play",
            Category::Pair => "Two cards of the same rank",
            Category::TwoPair => "Two different pairs",
            Category::ThreeOfAKind => "Three cards of the same rank",
            Category::Straight => "Five cards in sequence (A-2-3-4-5 is the lowest)",
            Category::Flush => "Five cards of the same suit",
            Category::FullHouse => "Three of a kind plus a pair",
            Category::FourOfAKind => "Four cards of the same rank",
            Category::StraightFlush => {
                "Five cards in sequence, all the same suit (A-high is a royal flush)"
            }
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Detailed evaluation result. `key` drives ordering.
#[derive(Debug, Clone, Copy)]
#[non_exhaustive]
pub struct Evaluation {
    pub category: Category,
    pub best_five: [Card; 5],
    tiebreak: [Rank; 5],
    key: StrengthKey,
}

impl Ord for Evaluation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl PartialOrd for Evaluation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Evaluation {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Evaluation {}

impl Evaluation {
    pub(crate) fn new(category: Category, best_five: [Card; 5], tiebreak: [Rank; 5]) -> Self {
        let key = StrengthKey::from_parts(category, &tiebreak);
        Self { category, best_five, tiebreak, key }
    }

    /// Return the packed comparable key.
    pub const fn key(&self) -> StrengthKey {
        self.key
    }

    /// Tie-break ranks in significance order. Unused trailing slots hold `Rank::Two`.
    ///
    /// Straights and straight flushes carry only their top card (Five for the wheel);
    /// full houses carry trips then pair.
    pub const fn tiebreak(&self) -> [Rank; 5] {
        self.tiebreak
    }
}

impl StrengthKey {
    const CAT_SHIFT: u32 = 20;
    const RANK_STRIDE: u32 = 4;

    pub fn category(self) -> Category {
        Category::from_ordinal((self.0 >> Self::CAT_SHIFT) as u8).unwrap_or(Category::HighCard)
    }

    /// Pack a category and five rank tiebreakers into a comparable value.
    pub fn from_parts(category: Category, ranks_desc: &[Rank; 5]) -> Self {
        // [ category (4 bits) | r0 (4) | r1 (4) | r2 (4) | r3 (4) | r4 (4) ]
        let mut v: u32 = (category as u32) << Self::CAT_SHIFT;
        for (i, r) in ranks_desc.iter().enumerate() {
            let offset = Self::CAT_SHIFT - Self::RANK_STRIDE * (i as u32 + 1);
            v |= (r.value() as u32) << offset;
        }
        StrengthKey(v)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EvalError {
    #[error("invalid hand: {0}")]
    InvalidHand(#[from] HandError),
    #[error("not enough cards to evaluate: {0} distinct, need 5")]
    NotEnoughCards(usize),
    #[error("too many cards to evaluate: {0}, at most 7")]
    TooManyCards(usize),
    #[error("card {0} appears twice")]
    DuplicateCard(Card),
}

/// Evaluate 5, 6 or 7 distinct cards, returning the best five-card hand.
///
/// ```
/// use holdem_odds::cards::parse_cards;
/// use holdem_odds::evaluator::{evaluate, Category};
///
/// let cards = parse_cards("As Ks Ah Kh 2c 2d 2s").unwrap();
/// let eval = evaluate(&cards).unwrap();
/// assert_eq!(eval.category, Category::FullHouse);
/// ```
pub fn evaluate(cards: &[Card]) -> Result<Evaluation, EvalError> {
    let mut seen = 0u64;
    let mut distinct = 0usize;
    let mut dup = None;
    for &c in cards {
        if seen & c.mask() != 0 {
            dup.get_or_insert(c);
        } else {
            seen |= c.mask();
            distinct += 1;
        }
    }
    if distinct < 5 {
        return Err(EvalError::NotEnoughCards(distinct));
    }
    if let Some(c) = dup {
        return Err(EvalError::DuplicateCard(c));
    }
    match *cards {
        [a, b, c, d, e] => Ok(evaluate_five(&[a, b, c, d, e])),
        [a, b, c, d, e, f] => Ok(evaluate_six(&[a, b, c, d, e, f])),
        [a, b, c, d, e, f, g] => Ok(evaluate_seven(&[a, b, c, d, e, f, g])),
        _ => Err(EvalError::TooManyCards(cards.len())),
    }
}

/// Evaluate a Hold'em hand given hole cards and a complete board.
///
/// ```
/// use holdem_odds::cards::{Card, Rank, Suit};
/// use holdem_odds::evaluator::{evaluate_holdem, Category};
/// use holdem_odds::hand::{Board, HoleCards};
///
/// let hole = HoleCards::try_new(
///     Card::new(Rank::Ace, Suit::Spades),
///     Card::new(Rank::Ace, Suit::Hearts),
/// ).unwrap();
/// let board = Board::try_new(vec![
///     Card::new(Rank::Queen, Suit::Clubs),
///     Card::new(Rank::Jack, Suit::Diamonds),
///     Card::new(Rank::Nine, Suit::Hearts),
///     Card::new(Rank::Three, Suit::Spades),
///     Card::new(Rank::Two, Suit::Clubs),
/// ]).unwrap();
/// let eval = evaluate_holdem(&hole, &board).unwrap();
/// assert_eq!(eval.category, Category::Pair);
/// ```
pub fn evaluate_holdem(hole: &HoleCards, board: &Board) -> Result<Evaluation, EvalError> {
    validate_holdem(hole, board)?;
    let b = board.as_slice();
    if b.len() < 5 {
        return Err(EvalError::NotEnoughCards(b.len() + 2));
    }
    Ok(evaluate_seven(&[hole.first(), hole.second(), b[0], b[1], b[2], b[3], b[4]]))
}

/// Evaluate exactly five cards; detects category and encodes tie-breakers.
pub fn evaluate_five(cards: &[Card; 5]) -> Evaluation {
    use detector::DETECTORS;
    use hand_analysis::HandAnalysis;

    let analysis = HandAnalysis::new(cards);

    // Highest category first; HighCard always matches
    let (category, tiebreak) = DETECTORS
        .iter()
        .find_map(|d| d.tiebreak(&analysis).map(|t| (d.category(), t)))
        .unwrap_or((Category::HighCard, analysis.ranks));

    Evaluation::new(category, analysis.sorted_cards, tiebreak)
}

/// Best of the six five-card subsets.
pub fn evaluate_six(cards: &[Card; 6]) -> Evaluation {
    best_of(cards, &combinations::SIX_CHOOSE_FIVE)
}

/// Best of the 21 five-card subsets. This is the simulation hot path.
pub fn evaluate_seven(cards: &[Card; 7]) -> Evaluation {
    best_of(cards, &combinations::SEVEN_CHOOSE_FIVE)
}

fn best_of<const N: usize>(cards: &[Card; N], table: &[[usize; 5]]) -> Evaluation {
    let pick = |ix: &[usize; 5]| {
        evaluate_five(&[cards[ix[0]], cards[ix[1]], cards[ix[2]], cards[ix[3]], cards[ix[4]]])
    };
    let mut best = pick(&table[0]);
    for ix in &table[1..] {
        let eval = pick(ix);
        if eval > best {
            best = eval;
        }
    }
    best
}

/// Compare two Hold'em hands on a shared board. Returns the ordering or a validation error.
///
/// ```
/// use holdem_odds::cards::{Card, Rank, Suit};
/// use holdem_odds::evaluator::compare_holdem;
/// use holdem_odds::hand::{Board, HoleCards};
/// use std::cmp::Ordering;
///
/// let board = Board::try_new(vec![
///     Card::new(Rank::Queen, Suit::Clubs),
///     Card::new(Rank::Jack, Suit::Diamonds),
///     Card::new(Rank::Nine, Suit::Hearts),
///     Card::new(Rank::Three, Suit::Spades),
///     Card::new(Rank::Two, Suit::Clubs),
/// ]).unwrap();
/// let a = HoleCards::try_new(
///     Card::new(Rank::Ace, Suit::Spades),
///     Card::new(Rank::Ace, Suit::Hearts),
/// ).unwrap();
/// let b = HoleCards::try_new(
///     Card::new(Rank::King, Suit::Spades),
///     Card::new(Rank::King, Suit::Hearts),
/// ).unwrap();
/// let ord = compare_holdem(&a, &b, &board).unwrap();
/// assert_eq!(ord, Ordering::Greater);
/// ```
pub fn compare_holdem(a: &HoleCards, b: &HoleCards, board: &Board) -> Result<Ordering, EvalError> {
    if let Some(c) = a.as_array().into_iter().find(|&c| b.contains(c)) {
        return Err(EvalError::DuplicateCard(c));
    }
    let va = evaluate_holdem(a, board)?;
    let vb = evaluate_holdem(b, board)?;
    Ok(va.cmp(&vb))
}
