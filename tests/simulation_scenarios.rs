use holdem_odds::config::EngineConfig;
use holdem_odds::simulation::{simulate, CancelToken, Method, SimError, Simulator, Spot};
use std::thread;
use std::time::Duration;

fn spot(hero: &str, board: &str, opponents: usize) -> Spot {
    Spot::new(hero.parse().unwrap(), board.parse().unwrap(), opponents).unwrap()
}

fn with(f: impl FnOnce(&mut EngineConfig)) -> Simulator {
    let mut config = EngineConfig::default();
    f(&mut config);
    Simulator::new(config)
}

#[test]
fn pocket_aces_preflop_heads_up() {
    let r = simulate("As Ah".parse().unwrap(), "".parse().unwrap(), 1, 20_000, Some(2024)).unwrap();
    assert_eq!(r.method, Method::MonteCarlo);
    assert!(r.complete);
    assert_eq!(r.iterations_completed(), 20_000);
    assert!(r.win_pct() > 83.0 && r.win_pct() < 87.5, "win {}", r.win_pct());
    assert!(r.margin_pct() > 0.0 && r.margin_pct() < 1.0);
}

#[test]
fn full_house_on_complete_board_is_enumerated() {
    let r = simulate("As Ks".parse().unwrap(), "Ah Kh 2c 2d 2s".parse().unwrap(), 1, 10_000, None)
        .unwrap();
    assert_eq!(r.method, Method::Exact);
    assert_eq!((r.tally.wins, r.tally.ties, r.tally.losses), (860, 84, 46));
    assert_eq!(r.margin_pct(), 0.0);
    assert_eq!(r.cards_remaining, 45);
}

#[test]
fn too_many_opponents_for_the_deck() {
    let full = spot("As Ks", "Ah Kh 2c 2d 2s", 23);
    let err = Simulator::default().run(&full, 1_000, Some(1), &CancelToken::new()).unwrap_err();
    assert!(matches!(err, SimError::InsufficientCards { needed: 46, available: 45 }));

    let preflop = spot("As Ks", "", 24);
    let err = Simulator::default().run(&preflop, 1_000, Some(1), &CancelToken::new()).unwrap_err();
    assert!(matches!(err, SimError::InsufficientCards { needed: 53, available: 50 }));

    // 22 opponents on a full board use every remaining card but one
    let crowded = spot("As Ks", "Ah Kh 2c 2d 2s", 22);
    let ok = Simulator::default().run(&crowded, 200, Some(1), &CancelToken::new());
    assert!(ok.is_ok());
}

#[test]
fn overlapping_cards_are_invalid_input() {
    let err = Spot::new("As Ks".parse().unwrap(), "As 7d 2c".parse().unwrap(), 1).unwrap_err();
    assert!(matches!(err, SimError::InvalidInput(_)));
}

#[test]
fn cancelled_before_start_reports_nothing_done() {
    let cancel = CancelToken::new();
    cancel.cancel();
    let err =
        Simulator::default().run(&spot("Qs Qd", "", 3), 50_000, Some(5), &cancel).unwrap_err();
    let partial = err.partial().expect("partial result");
    assert_eq!(partial.iterations_completed(), 0);
    assert!(!partial.complete);
    assert_eq!(partial.iterations_target, 50_000);
}

#[test]
fn cancelled_mid_run_keeps_consistent_tallies() {
    let sim = with(|c| c.max_iterations = 5_000_000);
    let cancel = CancelToken::new();
    let timer = cancel.clone();
    let handle = thread::spawn(move || {
        thread::sleep(Duration::from_millis(10));
        timer.cancel();
    });
    let err = sim.run(&spot("7c 2d", "", 9), 5_000_000, Some(9), &cancel).unwrap_err();
    handle.join().unwrap();

    let partial = match err {
        SimError::Cancelled(partial) => partial,
        other => panic!("expected cancellation, got {other}"),
    };
    let t = partial.tally;
    assert!(!partial.complete);
    assert_eq!(t.wins + t.ties + t.losses, partial.iterations_completed());
    assert!(partial.iterations_completed() < 5_000_000);
    // whole batches only
    assert_eq!(partial.iterations_completed() % 1_000, 0);
}

#[test]
fn cancelled_exact_run_reports_partial_enumeration() {
    let s = spot("Ah Qd", "Qs 9h 5c 3d Kc", 2);
    let cancel = CancelToken::new();
    cancel.cancel();
    let err = Simulator::default().run(&s, 1_000, None, &cancel).unwrap_err();
    let partial = err.partial().expect("partial result");
    assert_eq!(partial.method, Method::Exact);
    assert_eq!(partial.iterations_target, 893_970);
    assert_eq!(partial.iterations_completed(), 0);
    assert!(!partial.complete);
}

#[test]
fn exact_run_cancelled_midway_keeps_consistent_tallies() {
    // three opponents: 990 * 903 * 820 assignments, far more than 20 ms of work
    let sim = with(|c| c.exact_limit = 1_000_000_000);
    let s = spot("Ah Qd", "Qs 9h 5c 3d Kc", 3);
    let cancel = CancelToken::new();
    let timer = cancel.clone();
    let handle = thread::spawn(move || {
        thread::sleep(Duration::from_millis(20));
        timer.cancel();
    });
    let err = sim.run(&s, 1_000, None, &cancel).unwrap_err();
    handle.join().unwrap();

    let partial = err.partial().expect("partial result");
    let t = partial.tally;
    assert_eq!(partial.method, Method::Exact);
    assert!(!partial.complete);
    assert_eq!(partial.iterations_target, 990 * 903 * 820);
    assert_eq!(t.wins + t.ties + t.losses, partial.iterations_completed());
    assert!(partial.iterations_completed() < partial.iterations_target);
    assert_eq!(partial.margin_pct(), 0.0);
}

#[test]
fn same_seed_same_answer_on_any_pool_size() {
    let s = spot("Jh Th", "9h 8c 2h", 2);
    let cancel = CancelToken::new();
    let one = with(|c| c.workers = Some(1)).run(&s, 20_000, Some(77), &cancel).unwrap();
    let four = with(|c| c.workers = Some(4)).run(&s, 20_000, Some(77), &cancel).unwrap();
    let global = Simulator::default().run(&s, 20_000, Some(77), &CancelToken::new()).unwrap();
    assert_eq!(one.tally, four.tally);
    assert_eq!(one.tally, global.tally);
}

#[test]
fn different_seeds_differ() {
    let s = spot("Jh Th", "9h 8c 2h", 2);
    let a = Simulator::default().run(&s, 20_000, Some(1), &CancelToken::new()).unwrap();
    let b = Simulator::default().run(&s, 20_000, Some(2), &CancelToken::new()).unwrap();
    assert_ne!(a.tally, b.tally);
}

#[test]
fn monte_carlo_agrees_with_enumeration() {
    let s = spot("Ah Qd", "Qs 9h 5c 3d Kc", 1);
    let exact = Simulator::default().run(&s, 1_000, None, &CancelToken::new()).unwrap();
    let sampled =
        with(|c| c.exact_limit = 0).run(&s, 100_000, Some(3), &CancelToken::new()).unwrap();
    assert_eq!(exact.method, Method::Exact);
    assert_eq!(sampled.method, Method::MonteCarlo);
    assert!((exact.win_pct() - sampled.win_pct()).abs() < 1.0);
    assert!((exact.tie_pct() - sampled.tie_pct()).abs() < 1.0);
}

#[test]
fn iteration_bounds() {
    let s = spot("As Ks", "", 1);
    assert!(matches!(
        Simulator::default().run(&s, 0, None, &CancelToken::new()),
        Err(SimError::ZeroIterations)
    ));
    assert!(matches!(
        Simulator::default().run(&s, 500_001, None, &CancelToken::new()),
        Err(SimError::IterationLimitExceeded { requested: 500_001, max: 500_000 })
    ));
}

#[test]
fn percentages_sum_to_one_hundred() {
    let spots = [("2c 7d", "", 5), ("Ah Kh", "Qh Jh 2c", 3), ("8s 8d", "8c 9d Tc 4h", 2)];
    for (hero, board, n) in spots {
        let s = spot(hero, board, n);
        let r = Simulator::default().run(&s, 3_000, Some(11), &CancelToken::new()).unwrap();
        let sum = r.win_pct() + r.tie_pct() + r.loss_pct();
        assert!((sum - 100.0).abs() < 1e-9, "{hero} / {board}: {sum}");
    }
}
