use crate::cards::{Card, Rank};

/// Groups ranks by their frequency in a hand, sorted by (count desc, rank desc).
///
/// Example: AAAKQ groups as [(Ace, 3), (King, 1), (Queen, 1)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankGroups {
    groups: [(Rank, u8); 13],
    len: usize,
}

impl RankGroups {
    /// Create RankGroups from a rank count array indexed by rank value (2-14).
    pub fn from_counts(rank_counts: &[u8; 15]) -> Self {
        let mut groups = [(Rank::Two, 0u8); 13];
        let mut len = 0;

        for rank in Rank::ALL.iter().rev().copied() {
            let count = rank_counts[rank.value() as usize];
            if count > 0 {
                groups[len] = (rank, count);
                len += 1;
            }
        }

        // Stable: ranks already descending within equal counts
        groups[..len].sort_by(|a, b| b.1.cmp(&a.1));

        Self { groups, len }
    }

    /// Histogram any number of cards (used for partial hands too).
    pub fn from_cards(cards: &[Card]) -> Self {
        let mut counts = [0u8; 15];
        for c in cards {
            counts[c.rank().value() as usize] += 1;
        }
        Self::from_counts(&counts)
    }

    pub fn as_slice(&self) -> &[(Rank, u8)] {
        &self.groups[..self.len]
    }

    fn with_count(&self, n: u8) -> impl Iterator<Item = Rank> + '_ {
        self.as_slice().iter().filter(move |(_, c)| *c == n).map(|(r, _)| *r)
    }

    /// Returns the rank of a four-of-a-kind, if present.
    pub fn quad(&self) -> Option<Rank> {
        self.with_count(4).next()
    }

    /// Returns the highest three-of-a-kind rank, if present.
    pub fn trips(&self) -> Option<Rank> {
        self.with_count(3).next()
    }

    /// Pair ranks, in descending order.
    pub fn pairs(&self) -> impl Iterator<Item = Rank> + '_ {
        self.with_count(2)
    }

    pub fn pair_count(&self) -> usize {
        self.pairs().count()
    }

    /// Singleton (kicker) ranks, in descending order.
    pub fn kickers(&self) -> impl Iterator<Item = Rank> + '_ {
        self.with_count(1)
    }

    /// Best pair-or-better rank other than the trips, for a full house.
    pub fn full_house(&self) -> Option<(Rank, Rank)> {
        let trips = self.trips()?;
        let pair = self
            .as_slice()
            .iter()
            .filter(|(r, c)| *c >= 2 && *r != trips)
            .map(|(r, _)| *r)
            .max()?;
        Some((trips, pair))
    }

    /// Returns true if the hand has both trips and a pair (full house).
    pub fn has_full_house(&self) -> bool {
        self.full_house().is_some()
    }
}
