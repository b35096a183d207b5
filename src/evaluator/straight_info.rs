use crate::cards::Rank;

/// Bit `v` set for every rank value present; an Ace also sets bit 1 so the wheel is contiguous.
pub fn rank_mask<I: IntoIterator<Item = Rank>>(ranks: I) -> u16 {
    let mut mask = 0u16;
    for r in ranks {
        mask |= 1 << r.value();
        if r == Rank::Ace {
            mask |= 1 << 1;
        }
    }
    mask
}

/// Window of five consecutive rank bits ending at `top`.
pub const fn window(top: u8) -> u16 {
    0b1_1111 << (top - 4)
}

/// Information about whether a hand contains a straight and its top rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StraightInfo {
    pub is_straight: bool,
    pub top_rank: Option<Rank>,
}

impl StraightInfo {
    /// Detect the highest straight among `ranks` (any count, any order).
    /// The wheel (A-2-3-4-5) is Five-high.
    pub fn detect(ranks: &[Rank]) -> Self {
        let mask = rank_mask(ranks.iter().copied());
        let top_rank = (5u8..=14)
            .rev()
            .find(|&top| mask & window(top) == window(top))
            .and_then(Rank::from_value);
        StraightInfo { is_straight: top_rank.is_some(), top_rank }
    }
}
