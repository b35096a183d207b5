use crate::cards::{Card, Rank, Suit};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DeckError {
    #[error("duplicate card: {0}")]
    DuplicateCard(Card),
}

/// A standard 52-card deck, or what is left of one once known cards are removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// ```
    /// use holdem_odds::deck::Deck;
    ///
    /// let deck = Deck::standard();
    /// assert_eq!(deck.len(), 52);
    /// ```
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(52);
        for s in Suit::ALL {
            for r in Rank::ALL {
                cards.push(Card::new(r, s));
            }
        }
        Self { cards }
    }

    /// The standard deck minus `known`, keeping deck order.
    ///
    /// Fails if `known` names the same card twice; duplicates are never folded together.
    ///
    /// ```
    /// use holdem_odds::cards::parse_cards;
    /// use holdem_odds::deck::Deck;
    ///
    /// let known = parse_cards("As Ah Kd").unwrap();
    /// assert_eq!(Deck::without(&known).unwrap().len(), 49);
    /// ```
    pub fn without(known: &[Card]) -> Result<Self, DeckError> {
        let dead = known_mask(known)?;
        let cards = Self::standard().cards.into_iter().filter(|c| dead & c.mask() == 0).collect();
        Ok(Self { cards })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    pub fn into_vec(self) -> Vec<Card> {
        self.cards
    }
}

/// All 52 cards in deterministic order: suits Clubs, Diamonds, Hearts, Spades; ranks Two..Ace.
pub fn generate_deck() -> Vec<Card> {
    Deck::standard().into_vec()
}

/// `FullDeck − known`. See [`Deck::without`].
pub fn remaining_deck(known: &[Card]) -> Result<Vec<Card>, DeckError> {
    Deck::without(known).map(Deck::into_vec)
}

/// Bitmask of `cards`, rejecting repeats.
pub(crate) fn known_mask(cards: &[Card]) -> Result<u64, DeckError> {
    let mut mask = 0u64;
    for &c in cards {
        if mask & c.mask() != 0 {
            return Err(DeckError::DuplicateCard(c));
        }
        mask |= c.mask();
    }
    Ok(mask)
}
