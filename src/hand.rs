use crate::cards::{parse_cards, Card};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Rejected hole-card / board input. Raised at the validation boundary, before any dealing.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HandError {
    #[error("duplicate cards in hole cards")]
    DuplicateHoleCards,
    #[error("too many board cards: {0}")]
    TooManyBoardCards(usize),
    #[error("duplicate cards on board")]
    DuplicateBoardCards,
    #[error("hole card {0} also appears on the board")]
    Overlap(Card),
    #[error("expected exactly two hole cards, got {0}")]
    HoleCount(usize),
    #[error("card parse error: {0}")]
    CardParse(String),
}

/// A player's two private hole cards.
///
/// ```
/// use holdem_odds::cards::{Card, Rank, Suit};
/// use holdem_odds::hand::HoleCards;
///
/// let hole = HoleCards::try_new(
///     Card::new(Rank::Ace, Suit::Spades),
///     Card::new(Rank::King, Suit::Spades),
/// ).unwrap();
/// assert_eq!(hole.as_array().len(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HoleCards(Card, Card);

impl HoleCards {
    /// Return the first (left) hole card.
    pub fn first(&self) -> Card {
        self.0
    }

    /// Return the second (right) hole card.
    pub fn second(&self) -> Card {
        self.1
    }

    /// Return both hole cards as a fixed array.
    pub fn as_array(&self) -> [Card; 2] {
        [self.0, self.1]
    }

    pub fn contains(&self, card: Card) -> bool {
        self.0 == card || self.1 == card
    }

    /// Pocket pair (both cards share a rank).
    pub fn is_pair(&self) -> bool {
        self.0.rank() == self.1.rank()
    }

    pub fn is_suited(&self) -> bool {
        self.0.suit() == self.1.suit()
    }

    pub fn try_new(a: Card, b: Card) -> Result<Self, HandError> {
        if a == b {
            return Err(HandError::DuplicateHoleCards);
        }
        Ok(Self(a, b))
    }

    /// Build from two cards already known to be distinct (dealt from one deck).
    pub(crate) fn dealt(a: Card, b: Card) -> Self {
        debug_assert_ne!(a, b);
        Self(a, b)
    }

    pub fn from_slice(slice: &[Card]) -> Result<Self, HandError> {
        if slice.len() != 2 {
            return Err(HandError::HoleCount(slice.len()));
        }
        Self::try_new(slice[0], slice[1])
    }
}

impl fmt::Display for HoleCards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.0, self.1)
    }
}

impl FromStr for HoleCards {
    type Err = HandError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = parse_cards(s).map_err(|e| HandError::CardParse(e.to_string()))?;
        Self::from_slice(&cards)
    }
}

/// Community cards revealed so far (flop, turn, river).
///
/// ```
/// use holdem_odds::cards::{Card, Rank, Suit};
/// use holdem_odds::hand::Board;
///
/// let board = Board::try_new(vec![
///     Card::new(Rank::Two, Suit::Clubs),
///     Card::new(Rank::Three, Suit::Clubs),
///     Card::new(Rank::Four, Suit::Clubs),
/// ]).unwrap();
/// assert_eq!(board.len(), 3);
/// assert_eq!(board.missing(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    cards: Vec<Card>,
}

impl Board {
    pub const MAX_CARDS: usize = 5;

    /// Unchecked constructor; pair with [`validate_holdem`] before use.
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn try_new(cards: Vec<Card>) -> Result<Self, HandError> {
        if cards.len() > Self::MAX_CARDS {
            return Err(HandError::TooManyBoardCards(cards.len()));
        }
        let set: HashSet<Card> = cards.iter().copied().collect();
        if set.len() != cards.len() {
            return Err(HandError::DuplicateBoardCards);
        }
        Ok(Self { cards })
    }

    /// Build from street slots where unrevealed cards are `None`.
    ///
    /// ```
    /// use holdem_odds::cards::{Card, Rank, Suit};
    /// use holdem_odds::hand::Board;
    ///
    /// let flop_only = Board::from_slots(&[
    ///     Some(Card::new(Rank::Ace, Suit::Hearts)),
    ///     Some(Card::new(Rank::Nine, Suit::Clubs)),
    ///     Some(Card::new(Rank::Two, Suit::Spades)),
    ///     None,
    ///     None,
    /// ]).unwrap();
    /// assert_eq!(flop_only.len(), 3);
    /// ```
    pub fn from_slots(slots: &[Option<Card>]) -> Result<Self, HandError> {
        Self::try_new(slots.iter().flatten().copied().collect())
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards still to come before the river.
    pub fn missing(&self) -> usize {
        Self::MAX_CARDS.saturating_sub(self.cards.len())
    }

    pub fn is_complete(&self) -> bool {
        self.cards.len() == Self::MAX_CARDS
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }
}

impl FromStr for Board {
    type Err = HandError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = parse_cards(s).map_err(|e| HandError::CardParse(e.to_string()))?;
        Board::try_new(cards)
    }
}

/// Validate that a pair of hole cards and board form a valid Hold'em state.
/// Allows 0..=5 board cards. Ensures uniqueness across all cards.
///
/// ```
/// use holdem_odds::cards::{Card, Rank, Suit};
/// use holdem_odds::hand::{Board, HoleCards, validate_holdem};
///
/// let hole = HoleCards::try_new(
///     Card::new(Rank::Ace, Suit::Spades),
///     Card::new(Rank::King, Suit::Spades),
/// ).unwrap();
/// let board = Board::try_new(vec![
///     Card::new(Rank::Two, Suit::Clubs),
///     Card::new(Rank::Three, Suit::Clubs),
///     Card::new(Rank::Four, Suit::Clubs),
/// ]).unwrap();
/// validate_holdem(&hole, &board).unwrap();
/// ```
pub fn validate_holdem(hole: &HoleCards, board: &Board) -> Result<(), HandError> {
    if board.len() > Board::MAX_CARDS {
        return Err(HandError::TooManyBoardCards(board.len()));
    }
    // Board built via `new` skips the duplicate check
    let set: HashSet<Card> = board.as_slice().iter().copied().collect();
    if set.len() != board.len() {
        return Err(HandError::DuplicateBoardCards);
    }
    for c in hole.as_array() {
        if set.contains(&c) {
            return Err(HandError::Overlap(c));
        }
    }
    if hole.first() == hole.second() {
        return Err(HandError::DuplicateHoleCards);
    }
    Ok(())
}
