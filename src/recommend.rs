//! Rule-table recommendation from equity and made-hand category.
//!
//! The table is fixed: win percentage picks the action through per-category
//! thresholds, so a higher win percentage never recommends a weaker action.
//! Tie percentage only colours the reason text.

use crate::evaluator::Category;
use std::fmt;

/// Discrete action, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Action {
    Fold,
    CheckCall,
    BetRaise,
    AllIn,
}

impl Action {
    pub fn label(self) -> &'static str {
        match self {
            Action::Fold => "Fold",
            Action::CheckCall => "Check/Call",
            Action::BetRaise => "Bet/Raise",
            Action::AllIn => "All-in",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    pub fn label(self) -> &'static str {
        match self {
            Confidence::Low => "Low",
            Confidence::Medium => "Medium",
            Confidence::High => "High",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation {
    pub action: Action,
    pub reason: String,
    pub confidence: Confidence,
}

/// Below this win percentage the hand is folded.
pub const FOLD_BELOW: f64 = 25.0;
/// From here the hand is bet or raised.
pub const BET_FROM: f64 = 55.0;
/// All-in threshold for hands weaker than a full house.
pub const ALL_IN_FROM: f64 = 85.0;
/// All-in threshold when already holding a full house or better.
pub const ALL_IN_FROM_MONSTER: f64 = 70.0;

/// Percentage points from the nearest threshold at which confidence is medium / high.
const MEDIUM_MARGIN: f64 = 5.0;
const HIGH_MARGIN: f64 = 15.0;
/// Tie share worth mentioning in the reason.
const NOTABLE_TIE: f64 = 5.0;

fn all_in_threshold(category: Category) -> f64 {
    if category >= Category::FullHouse {
        ALL_IN_FROM_MONSTER
    } else {
        ALL_IN_FROM
    }
}

/// ```
/// use holdem_odds::evaluator::Category;
/// use holdem_odds::recommend::{recommend, Action};
///
/// assert_eq!(recommend(12.0, 0.5, Category::HighCard).action, Action::Fold);
/// assert_eq!(recommend(90.0, 0.0, Category::Pair).action, Action::AllIn);
/// ```
pub fn recommend(win_pct: f64, tie_pct: f64, category: Category) -> Recommendation {
    let win = if win_pct.is_finite() { win_pct.clamp(0.0, 100.0) } else { 0.0 };
    let all_in = all_in_threshold(category);

    let (action, distance) = if win < FOLD_BELOW {
        (Action::Fold, FOLD_BELOW - win)
    } else if win < BET_FROM {
        (Action::CheckCall, (win - FOLD_BELOW).min(BET_FROM - win))
    } else if win < all_in {
        (Action::BetRaise, (win - BET_FROM).min(all_in - win))
    } else {
        (Action::AllIn, win - all_in)
    };

    let confidence = if distance >= HIGH_MARGIN {
        Confidence::High
    } else if distance >= MEDIUM_MARGIN {
        Confidence::Medium
    } else {
        Confidence::Low
    };

    let mut reason = match action {
        Action::Fold => "Weak hand with poor equity".to_string(),
        Action::CheckCall => "Some equity, but not enough to build the pot".to_string(),
        Action::BetRaise => "Strong hand with high win probability".to_string(),
        Action::AllIn if category >= Category::FullHouse => {
            format!("{} with dominant equity", category.name())
        }
        Action::AllIn => "Dominant equity against the field".to_string(),
    };
    if tie_pct.is_finite() && tie_pct >= NOTABLE_TIE {
        reason.push_str(&format!("; split pot in {tie_pct:.1}% of runouts"));
    }

    Recommendation { action, reason, confidence }
}
