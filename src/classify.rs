//! Naming the hero's current hand from the cards already visible.
//!
//! Only known cards are used: nothing is padded or dealt. With fewer than five
//! cards only rank multiplicity can make a hand, so straights and flushes show
//! up as draws instead.

use crate::cards::{Card, Rank, Suit};
use crate::evaluator::rank_groups::RankGroups;
use crate::evaluator::straight_info::{rank_mask, window};
use crate::evaluator::suit_info::SuitInfo;
use crate::evaluator::{evaluate, Category};
use crate::hand::{validate_holdem, Board, HandError, HoleCards};
use std::fmt;

/// A draw to a stronger made hand on an incomplete board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Draw {
    /// Four cards of one suit.
    FlushDraw(Suit),
    /// Two or more ranks complete a straight.
    OpenEndedStraightDraw,
    /// Exactly one rank completes a straight.
    Gutshot,
}

impl Draw {
    pub fn label(self) -> &'static str {
        match self {
            Draw::FlushDraw(_) => "Flush draw",
            Draw::OpenEndedStraightDraw => "Open-ended straight draw",
            Draw::Gutshot => "Gutshot straight draw",
        }
    }
}

impl fmt::Display for Draw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Draw::FlushDraw(s) => write!(f, "{} flush draw", s.name()),
            _ => f.write_str(self.label()),
        }
    }
}

/// Coarse bucket used by front ends to colour the hand label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandKind {
    MadeHand,
    DrawingHand,
    HighCard,
}

impl HandKind {
    pub fn as_str(self) -> &'static str {
        match self {
            HandKind::MadeHand => "made_hand",
            HandKind::DrawingHand => "drawing_hand",
            HandKind::HighCard => "high_card",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandStrength {
    pub category: Category,
    /// Category name, e.g. "Full House".
    pub name: &'static str,
    /// Specific hand, e.g. "Twos full of Aces".
    pub description: String,
    /// Category ordinal, 0..=8.
    pub strength: u8,
    pub draws: Vec<Draw>,
    pub kind: HandKind,
    /// Starting-hand label, only before the flop.
    pub starting_hand: Option<StartingHand>,
}

/// How playable two hole cards are before any board card is seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StartingTier {
    Marginal,
    Playable,
    Strong,
    Premium,
}

impl StartingTier {
    pub fn as_str(self) -> &'static str {
        match self {
            StartingTier::Marginal => "marginal",
            StartingTier::Playable => "playable",
            StartingTier::Strong => "strong",
            StartingTier::Premium => "premium",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartingHand {
    /// e.g. "Premium Suited".
    pub label: &'static str,
    /// e.g. "AK suited".
    pub description: String,
    pub tier: StartingTier,
}

/// Label two hole cards the way a preflop chart would.
///
/// Pairs of Jacks or better and any Ace-King are premium; other pairs and
/// offsuit Ace-King are strong; other suited hands playable; the rest marginal.
///
/// ```
/// use holdem_odds::classify::{starting_hand, StartingTier};
///
/// let sh = starting_hand(&"Kh Ah".parse().unwrap());
/// assert_eq!(sh.label, "Premium Suited");
/// assert_eq!(sh.description, "AK suited");
/// assert_eq!(sh.tier, StartingTier::Premium);
/// ```
pub fn starting_hand(hole: &HoleCards) -> StartingHand {
    let (hi, lo) = {
        let (a, b) = (hole.first().rank(), hole.second().rank());
        if a >= b { (a, b) } else { (b, a) }
    };
    let big = |r: Rank| r >= Rank::King;

    if hole.is_pair() {
        let (label, tier) = if hi >= Rank::Jack {
            ("Premium Pair", StartingTier::Premium)
        } else {
            ("Pocket Pair", StartingTier::Strong)
        };
        return StartingHand { label, description: format!("Pair of {}", hi.plural()), tier };
    }

    let combo = format!("{}{}", hi.to_char(), lo.to_char());
    let (label, suffix, tier) = match (hole.is_suited(), big(hi) && big(lo)) {
        (true, true) => ("Premium Suited", "suited", StartingTier::Premium),
        (true, false) => ("Suited Cards", "suited", StartingTier::Playable),
        (false, true) => ("Premium Offsuit", "offsuit", StartingTier::Strong),
        (false, false) => ("High Cards", "offsuit", StartingTier::Marginal),
    };
    StartingHand { label, description: format!("{combo} {suffix}"), tier }
}

/// Classify the hero's best hand from hole cards plus the visible board.
///
/// ```
/// use holdem_odds::classify::classify_current_hand;
/// use holdem_odds::evaluator::Category;
///
/// let hole = "Kh Kd".parse().unwrap();
/// let board = "7c 2s 9d".parse().unwrap();
/// let hs = classify_current_hand(&hole, &board).unwrap();
/// assert_eq!(hs.category, Category::Pair);
/// assert_eq!(hs.description, "Pair of Kings");
/// ```
pub fn classify_current_hand(hole: &HoleCards, board: &Board) -> Result<HandStrength, HandError> {
    validate_holdem(hole, board)?;
    let mut cards = Vec::with_capacity(7);
    cards.extend(hole.as_array());
    cards.extend_from_slice(board.as_slice());

    let (category, tiebreak) = if cards.len() >= 5 {
        // validated: distinct and at most seven
        match evaluate(&cards) {
            Ok(eval) => (eval.category, eval.tiebreak()),
            Err(_) => multiplicity_hand(&cards),
        }
    } else {
        multiplicity_hand(&cards)
    };

    let draws = if board.is_complete() { Vec::new() } else { find_draws(&cards, category) };
    let kind = if category > Category::HighCard {
        HandKind::MadeHand
    } else if !draws.is_empty() {
        HandKind::DrawingHand
    } else {
        HandKind::HighCard
    };

    Ok(HandStrength {
        category,
        name: category.name(),
        description: describe(category, &tiebreak),
        strength: category.ordinal(),
        draws,
        kind,
        starting_hand: board.is_empty().then(|| starting_hand(hole)),
    })
}

/// Best rank-multiplicity hand of fewer than five cards.
fn multiplicity_hand(cards: &[Card]) -> (Category, [Rank; 5]) {
    let groups = RankGroups::from_cards(cards);
    let mut tiebreak = [Rank::Two; 5];
    for (slot, (r, _)) in tiebreak.iter_mut().zip(groups.as_slice()) {
        *slot = *r;
    }
    let category = if groups.quad().is_some() {
        Category::FourOfAKind
    } else if groups.has_full_house() {
        Category::FullHouse
    } else if groups.trips().is_some() {
        Category::ThreeOfAKind
    } else {
        match groups.pair_count() {
            0 => Category::HighCard,
            1 => Category::Pair,
            _ => Category::TwoPair,
        }
    };
    (category, tiebreak)
}

fn describe(category: Category, t: &[Rank; 5]) -> String {
    match category {
        Category::StraightFlush if t[0] == Rank::Ace => "Royal flush".to_string(),
        Category::StraightFlush => format!("{}-high straight flush", t[0].name()),
        Category::FourOfAKind => format!("Quad {}", t[0].plural()),
        Category::FullHouse => format!("{} full of {}", t[0].plural(), t[1].plural()),
        Category::Flush => format!("{}-high flush", t[0].name()),
        Category::Straight => format!("{}-high straight", t[0].name()),
        Category::ThreeOfAKind => format!("Trip {}", t[0].plural()),
        Category::TwoPair => format!("{} and {}", t[0].plural(), t[1].plural()),
        Category::Pair => format!("Pair of {}", t[0].plural()),
        Category::HighCard => format!("{} high", t[0].name()),
    }
}

/// Flush and straight draws not already made.
fn find_draws(cards: &[Card], made: Category) -> Vec<Draw> {
    let mut draws = Vec::new();

    if made < Category::Flush {
        // at most six cards here, so only one suit can hold four
        let (suit, count) = SuitInfo::detect(cards).dominant();
        if count == 4 {
            draws.push(Draw::FlushDraw(suit));
        }
    }

    if made < Category::Straight {
        let mask = rank_mask(cards.iter().map(|c| c.rank()));
        // distinct ranks that would complete some five-rank window
        let mut outs = 0u16;
        for top in 5u8..=14 {
            let missing = window(top) & !mask;
            if missing.count_ones() == 1 {
                // bit 1 is the low Ace
                outs |= if missing == 1 << 1 { 1 << 14 } else { missing };
            }
        }
        match outs.count_ones() {
            0 => {}
            1 => draws.push(Draw::Gutshot),
            _ => draws.push(Draw::OpenEndedStraightDraw),
        }
    }

    draws
}
