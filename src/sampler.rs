//! Dealing unknown cards without replacement.
//!
//! Both entry points run a partial Fisher–Yates shuffle over a working copy of
//! the remaining deck: only the first `n` positions are shuffled, and those `n`
//! cards are the deal. The shared remaining deck is never mutated.

use crate::cards::Card;
use crate::hand::HoleCards;
use rand::Rng;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SampleError {
    #[error("not enough cards: need {needed}, only {available} remain")]
    InsufficientCards { needed: usize, available: usize },
}

/// Move a uniformly random selection of `n` cards into `work[..n]`.
fn partial_shuffle<R: Rng + ?Sized>(work: &mut [Card], n: usize, rng: &mut R) {
    let len = work.len();
    for i in 0..n {
        let j = rng.random_range(i..len);
        work.swap(i, j);
    }
}

fn check_supply(available: usize, needed: usize) -> Result<(), SampleError> {
    if available < needed {
        return Err(SampleError::InsufficientCards { needed, available });
    }
    Ok(())
}

/// Draw `opponent_count` disjoint hole-card pairs from `remaining`.
///
/// ```
/// use holdem_odds::cards::parse_cards;
/// use holdem_odds::deck::remaining_deck;
/// use holdem_odds::sampler::sample_opponent_hole_cards;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let remaining = remaining_deck(&parse_cards("As Ah").unwrap()).unwrap();
/// let mut rng = ChaCha8Rng::seed_from_u64(1);
/// let hands = sample_opponent_hole_cards(&remaining, 3, &mut rng).unwrap();
/// assert_eq!(hands.len(), 3);
/// ```
pub fn sample_opponent_hole_cards<R: Rng + ?Sized>(
    remaining: &[Card],
    opponent_count: usize,
    rng: &mut R,
) -> Result<Vec<HoleCards>, SampleError> {
    let needed = 2 * opponent_count;
    check_supply(remaining.len(), needed)?;

    let mut work = remaining.to_vec();
    partial_shuffle(&mut work, needed, rng);
    Ok(work[..needed].chunks_exact(2).map(|p| HoleCards::dealt(p[0], p[1])).collect())
}

/// Per-trial dealer owning a reusable working buffer.
///
/// Each call to [`Dealer::deal`] starts over from the same remaining deck, so
/// trials are independent of one another.
#[derive(Debug, Clone)]
pub struct Dealer<'a> {
    remaining: &'a [Card],
    work: Vec<Card>,
    board_needed: usize,
    opponents: usize,
}

/// One trial's unknown cards, borrowed from the dealer's buffer.
#[derive(Debug, Clone, Copy)]
pub struct Deal<'a> {
    /// Cards that complete the board.
    pub board: &'a [Card],
    holes: &'a [Card],
}

impl<'a> Deal<'a> {
    /// Opponent hole cards, two per opponent.
    pub fn opponents(&self) -> impl Iterator<Item = [Card; 2]> + 'a {
        self.holes.chunks_exact(2).map(|p| [p[0], p[1]])
    }
}

impl<'a> Dealer<'a> {
    pub fn new(
        remaining: &'a [Card],
        board_needed: usize,
        opponents: usize,
    ) -> Result<Self, SampleError> {
        check_supply(remaining.len(), board_needed + 2 * opponents)?;
        Ok(Self { remaining, work: remaining.to_vec(), board_needed, opponents })
    }

    /// Cards consumed per trial.
    pub fn cards_per_deal(&self) -> usize {
        self.board_needed + 2 * self.opponents
    }

    pub fn deal<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Deal<'_> {
        let n = self.cards_per_deal();
        self.work.copy_from_slice(self.remaining);
        partial_shuffle(&mut self.work, n, rng);
        let (board, rest) = self.work[..n].split_at(self.board_needed);
        Deal { board, holes: rest }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;
    use crate::deck::remaining_deck;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    fn remaining_after(known: &str) -> Vec<Card> {
        remaining_deck(&parse_cards(known).unwrap()).unwrap()
    }

    #[test]
    fn sampled_hands_are_disjoint_and_unknown() {
        let remaining = remaining_after("As Ah Kd Qc Js");
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let hands = sample_opponent_hole_cards(&remaining, 8, &mut rng).unwrap();

        let mut seen = HashSet::new();
        for h in &hands {
            for c in h.as_array() {
                assert!(remaining.contains(&c));
                assert!(seen.insert(c), "{c} dealt twice");
            }
        }
        assert_eq!(seen.len(), 16);
    }

    #[test]
    fn sampling_too_many_opponents_fails() {
        let remaining = remaining_after("As Ah Kd Qc Js 2c 3d");
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let err = sample_opponent_hole_cards(&remaining, 23, &mut rng).unwrap_err();
        assert_eq!(err, SampleError::InsufficientCards { needed: 46, available: 45 });
        assert!(sample_opponent_hole_cards(&remaining, 22, &mut rng).is_ok());
    }

    #[test]
    fn dealer_requires_board_and_opponent_cards() {
        let remaining = remaining_after("As Ah");
        assert!(Dealer::new(&remaining, 5, 22).is_ok());
        assert_eq!(
            Dealer::new(&remaining, 5, 23).unwrap_err(),
            SampleError::InsufficientCards { needed: 51, available: 50 }
        );
    }

    #[test]
    fn dealer_deals_disjoint_cards_every_trial() {
        let remaining = remaining_after("As Ah 7c");
        let mut dealer = Dealer::new(&remaining, 2, 4).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        for _ in 0..200 {
            let deal = dealer.deal(&mut rng);
            assert_eq!(deal.board.len(), 2);
            let mut seen: HashSet<Card> = deal.board.iter().copied().collect();
            let mut opponents = 0;
            for [a, b] in deal.opponents() {
                assert!(seen.insert(a));
                assert!(seen.insert(b));
                opponents += 1;
            }
            assert_eq!(opponents, 4);
            assert!(seen.iter().all(|c| remaining.contains(c)));
        }
    }

    #[test]
    fn same_seed_same_deal() {
        let remaining = remaining_after("As Ah");
        let mut a = Dealer::new(&remaining, 5, 1).unwrap();
        let mut b = Dealer::new(&remaining, 5, 1).unwrap();
        let da = a.deal(&mut ChaCha8Rng::seed_from_u64(5)).board.to_vec();
        let db = b.deal(&mut ChaCha8Rng::seed_from_u64(5)).board.to_vec();
        assert_eq!(da, db);
    }

    #[test]
    fn every_card_can_be_drawn() {
        let remaining = remaining_after("As Ah");
        let mut dealer = Dealer::new(&remaining, 1, 0).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut seen = HashSet::new();
        for _ in 0..5000 {
            seen.insert(dealer.deal(&mut rng).board[0]);
        }
        assert_eq!(seen.len(), remaining.len());
    }
}
