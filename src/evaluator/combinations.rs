/// All C(7,5) = 21 index sets choosing 5 of 7 cards, in lexicographic order.
pub const SEVEN_CHOOSE_FIVE: [[usize; 5]; 21] = [
    [0, 1, 2, 3, 4],
    [0, 1, 2, 3, 5],
    [0, 1, 2, 3, 6],
    [0, 1, 2, 4, 5],
    [0, 1, 2, 4, 6],
    [0, 1, 2, 5, 6],
    [0, 1, 3, 4, 5],
    [0, 1, 3, 4, 6],
    [0, 1, 3, 5, 6],
    [0, 1, 4, 5, 6],
    [0, 2, 3, 4, 5],
    [0, 2, 3, 4, 6],
    [0, 2, 3, 5, 6],
    [0, 2, 4, 5, 6],
    [0, 3, 4, 5, 6],
    [1, 2, 3, 4, 5],
    [1, 2, 3, 4, 6],
    [1, 2, 3, 5, 6],
    [1, 2, 4, 5, 6],
    [1, 3, 4, 5, 6],
    [2, 3, 4, 5, 6],
];

/// All C(6,5) = 6 index sets choosing 5 of 6 cards, in lexicographic order.
pub const SIX_CHOOSE_FIVE: [[usize; 5]; 6] = [
    [0, 1, 2, 3, 4],
    [0, 1, 2, 3, 5],
    [0, 1, 2, 4, 5],
    [0, 1, 3, 4, 5],
    [0, 2, 3, 4, 5],
    [1, 2, 3, 4, 5],
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn check_table(table: &[[usize; 5]], n: usize) {
        let mut seen = HashSet::new();
        for combo in table {
            assert!(combo.iter().all(|&i| i < n));
            for i in 1..5 {
                assert!(combo[i] > combo[i - 1], "not ascending: {combo:?}");
            }
            assert!(seen.insert(*combo), "Duplicate combination found: {combo:?}");
        }
    }

    #[test]
    fn seven_choose_five_is_complete_and_valid() {
        assert_eq!(SEVEN_CHOOSE_FIVE.len(), 21);
        check_table(&SEVEN_CHOOSE_FIVE, 7);
    }

    #[test]
    fn six_choose_five_is_complete_and_valid() {
        assert_eq!(SIX_CHOOSE_FIVE.len(), 6);
        check_table(&SIX_CHOOSE_FIVE, 6);
    }

    #[test]
    fn first_and_last_combinations() {
        assert_eq!(SEVEN_CHOOSE_FIVE[0], [0, 1, 2, 3, 4]);
        assert_eq!(SEVEN_CHOOSE_FIVE[20], [2, 3, 4, 5, 6]);
        assert_eq!(SIX_CHOOSE_FIVE[5], [1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_lexicographic_order() {
        for w in SEVEN_CHOOSE_FIVE.windows(2) {
            assert!(
                w[0] < w[1],
                "Not in lexicographic order: {:?} should come before {:?}",
                w[0],
                w[1]
            );
        }
        for w in SIX_CHOOSE_FIVE.windows(2) {
            assert!(w[0] < w[1]);
        }
    }
}
