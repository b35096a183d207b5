use super::hand_analysis::HandAnalysis;
use crate::cards::Rank;
use crate::evaluator::Category;

/// Strategy pattern: each detector recognises one category and yields its tie-break ranks.
pub trait CategoryDetector: Sync {
    fn category(&self) -> Category;

    /// `Some(tiebreak)` when the analysed five cards make this category.
    fn tiebreak(&self, analysis: &HandAnalysis) -> Option<[Rank; 5]>;
}

/// Fill a tie-break array from the front; unused slots stay `Rank::Two`.
fn pad<I: IntoIterator<Item = Rank>>(ranks: I) -> [Rank; 5] {
    let mut out = [Rank::Two; 5];
    for (slot, r) in out.iter_mut().zip(ranks) {
        *slot = r;
    }
    out
}

// ============================================================================
// Detector Implementations (in priority order: highest to lowest)
// ============================================================================

/// Straight Flush: Five consecutive ranks, all same suit
pub struct StraightFlushDetector;

impl CategoryDetector for StraightFlushDetector {
    fn category(&self) -> Category {
        Category::StraightFlush
    }

    fn tiebreak(&self, analysis: &HandAnalysis) -> Option<[Rank; 5]> {
        if !analysis.suit_info.is_flush {
            return None;
        }
        analysis.straight_info.top_rank.map(|top| pad([top]))
    }
}

/// Four of a Kind: Four cards of the same rank
pub struct FourOfAKindDetector;

impl CategoryDetector for FourOfAKindDetector {
    fn category(&self) -> Category {
        Category::FourOfAKind
    }

    fn tiebreak(&self, analysis: &HandAnalysis) -> Option<[Rank; 5]> {
        let quad = analysis.rank_groups.quad()?;
        Some(pad(std::iter::once(quad).chain(analysis.rank_groups.kickers())))
    }
}

/// Full House: Three of a kind plus a pair
pub struct FullHouseDetector;

impl CategoryDetector for FullHouseDetector {
    fn category(&self) -> Category {
        Category::FullHouse
    }

    fn tiebreak(&self, analysis: &HandAnalysis) -> Option<[Rank; 5]> {
        let (trips, pair) = analysis.rank_groups.full_house()?;
        Some(pad([trips, pair]))
    }
}

/// Flush: All five cards of the same suit
pub struct FlushDetector;

impl CategoryDetector for FlushDetector {
    fn category(&self) -> Category {
        Category::Flush
    }

    fn tiebreak(&self, analysis: &HandAnalysis) -> Option<[Rank; 5]> {
        // All 5 cards are kickers in flush ranking
        analysis.suit_info.is_flush.then_some(analysis.ranks)
    }
}

/// Straight: Five consecutive ranks (not all same suit)
pub struct StraightDetector;

impl CategoryDetector for StraightDetector {
    fn category(&self) -> Category {
        Category::Straight
    }

    fn tiebreak(&self, analysis: &HandAnalysis) -> Option<[Rank; 5]> {
        analysis.straight_info.top_rank.map(|top| pad([top]))
    }
}

/// Three of a Kind: Three cards of the same rank
pub struct ThreeOfAKindDetector;

impl CategoryDetector for ThreeOfAKindDetector {
    fn category(&self) -> Category {
        Category::ThreeOfAKind
    }

    fn tiebreak(&self, analysis: &HandAnalysis) -> Option<[Rank; 5]> {
        if analysis.rank_groups.has_full_house() {
            return None;
        }
        let trips = analysis.rank_groups.trips()?;
        Some(pad(std::iter::once(trips).chain(analysis.rank_groups.kickers())))
    }
}

/// Two Pair: Two pairs of cards
pub struct TwoPairDetector;

impl CategoryDetector for TwoPairDetector {
    fn category(&self) -> Category {
        Category::TwoPair
    }

    fn tiebreak(&self, analysis: &HandAnalysis) -> Option<[Rank; 5]> {
        let groups = &analysis.rank_groups;
        (groups.pair_count() >= 2).then(|| pad(groups.pairs().take(2).chain(groups.kickers())))
    }
}

/// One Pair: Two cards of the same rank
pub struct OnePairDetector;

impl CategoryDetector for OnePairDetector {
    fn category(&self) -> Category {
        Category::Pair
    }

    fn tiebreak(&self, analysis: &HandAnalysis) -> Option<[Rank; 5]> {
        let groups = &analysis.rank_groups;
        (groups.pair_count() == 1).then(|| pad(groups.pairs().chain(groups.kickers())))
    }
}

/// High Card: No matching ranks or sequences
pub struct HighCardDetector;

impl CategoryDetector for HighCardDetector {
    fn category(&self) -> Category {
        Category::HighCard
    }

    fn tiebreak(&self, analysis: &HandAnalysis) -> Option<[Rank; 5]> {
        Some(analysis.ranks) // fallback
    }
}

// ============================================================================
// Static detector list (in priority order)
// ============================================================================

pub const DETECTORS: [&dyn CategoryDetector; 9] = [
    &StraightFlushDetector,
    &FourOfAKindDetector,
    &FullHouseDetector,
    &FlushDetector,
    &StraightDetector,
    &ThreeOfAKindDetector,
    &TwoPairDetector,
    &OnePairDetector,
    &HighCardDetector,
];
