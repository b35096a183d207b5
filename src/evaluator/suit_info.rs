use crate::cards::{Card, Suit};

/// Suit histogram of a hand and the flush suit, if five cards share one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuitInfo {
    pub counts: [u8; 4],
    pub is_flush: bool,
    pub flush_suit: Option<Suit>,
}

impl SuitInfo {
    pub fn detect(cards: &[Card]) -> Self {
        let mut counts = [0u8; 4];
        for c in cards {
            counts[c.suit().index()] += 1;
        }
        let flush_suit = Suit::ALL.into_iter().find(|s| counts[s.index()] >= 5);
        SuitInfo { counts, is_flush: flush_suit.is_some(), flush_suit }
    }

    /// Most frequent suit and its count (ties go to the higher suit).
    pub fn dominant(&self) -> (Suit, u8) {
        Suit::ALL
            .into_iter()
            .map(|s| (s, self.counts[s.index()]))
            .max_by_key(|&(s, n)| (n, s))
            .unwrap_or((Suit::Spades, 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    #[test]
    fn test_flush() {
        let info = SuitInfo::detect(&parse_cards("As Ks Qs Js 9s").unwrap());
        assert!(info.is_flush);
        assert_eq!(info.flush_suit, Some(Suit::Spades));
    }

    #[test]
    fn test_not_flush() {
        let info = SuitInfo::detect(&parse_cards("As Kh Qs Js 9s").unwrap());
        assert!(!info.is_flush);
        assert_eq!(info.flush_suit, None);
        assert_eq!(info.dominant(), (Suit::Spades, 4));
    }

    #[test]
    fn test_all_clubs() {
        let info = SuitInfo::detect(&parse_cards("2c 3c 4c 5c 7c").unwrap());
        assert!(info.is_flush);
        assert_eq!(info.flush_suit, Some(Suit::Clubs));
        assert_eq!(info.counts, [5, 0, 0, 0]);
    }
}
