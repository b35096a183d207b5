use holdem_odds::cards::{parse_cards, Card, Rank, Suit};
use holdem_odds::evaluator::{evaluate, evaluate_five, Category, EvalError};

fn five(s: &str) -> [Card; 5] {
    let v = parse_cards(s).unwrap();
    [v[0], v[1], v[2], v[3], v[4]]
}

#[test]
fn each_category_is_recognised() {
    let cases = [
        ("As Ks Qs Js Ts", Category::StraightFlush),
        ("5d 4d 3d 2d Ad", Category::StraightFlush),
        ("9c 9d 9h 9s Ac", Category::FourOfAKind),
        ("3c 3d 3h Js Jc", Category::FullHouse),
        ("Kh Th 8h 6h 3h", Category::Flush),
        ("Ac 5c 4d 3h 2s", Category::Straight),
        ("Td Jc Qh Ks As", Category::Straight),
        ("Qc Qd Qh Ts 2c", Category::ThreeOfAKind),
        ("Jc Jd 9c 9h 2s", Category::TwoPair),
        ("Ah Ad Ts 9c 2d", Category::Pair),
        ("Ah Kd 7s 5c 2d", Category::HighCard),
    ];
    for (hand, expected) in cases {
        assert_eq!(evaluate_five(&five(hand)).category, expected, "{hand}");
    }
}

#[test]
fn ace_cannot_wrap_around() {
    assert_eq!(evaluate_five(&five("Qc Kd Ah 2s 3c")).category, Category::HighCard);
}

#[test]
fn wheel_tiebreak_is_five_high() {
    let e = evaluate_five(&five("Ac 5c 4d 3h 2s"));
    assert_eq!(e.tiebreak()[0], Rank::Five);
}

#[test]
fn full_house_tiebreak_is_trips_then_pair() {
    let e = evaluate_five(&five("Jc Js 3c 3d 3h"));
    assert_eq!(&e.tiebreak()[..2], &[Rank::Three, Rank::Jack]);
}

#[test]
fn two_pair_tiebreak_is_high_low_kicker() {
    let e = evaluate_five(&five("2s 9h Jd 9c Jc"));
    assert_eq!(&e.tiebreak()[..3], &[Rank::Jack, Rank::Nine, Rank::Two]);
}

#[test]
fn seven_cards_pick_the_flush_over_the_straight() {
    let e = evaluate(&parse_cards("9h 8h 7c 6h 5d 2h Kh").unwrap()).unwrap();
    assert_eq!(e.category, Category::Flush);
    assert!(e.best_five.iter().all(|c| c.suit() == Suit::Hearts));
}

#[test]
fn two_trips_in_seven_make_the_higher_full_house() {
    let e = evaluate(&parse_cards("7c 7d 7h 4s 4c 4d Ks").unwrap()).unwrap();
    assert_eq!(e.category, Category::FullHouse);
    assert_eq!(&e.tiebreak()[..2], &[Rank::Seven, Rank::Four]);
}

#[test]
fn bad_card_counts_are_rejected() {
    let four = parse_cards("Ac Kc Qc Jc").unwrap();
    assert_eq!(evaluate(&four), Err(EvalError::NotEnoughCards(4)));
    let dup = parse_cards("Ac Kc Qc Jc Ac 9d").unwrap();
    assert!(matches!(evaluate(&dup), Err(EvalError::DuplicateCard(_))));
    let eight = parse_cards("2c 3c 4c 5c 6c 7c 8c 9c").unwrap();
    assert_eq!(evaluate(&eight), Err(EvalError::TooManyCards(8)));
}
