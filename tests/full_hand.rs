mod common;

use truco_rs::agents::{AgentTable, BotProfile, RandomAgent};
use truco_rs::deck::Deck;
use truco_rs::engine::{deal, play_hand};
use truco_rs::hand::{Hand, HandEvent, HandRecord, HandResult, Seat, Victory, MAX_ROUNDS};
use truco_rs::stakes::StakeLadder;

fn bots(seed: u64, profile: &BotProfile) -> AgentTable {
    AgentTable::with_agents(
        Box::new(RandomAgent::new(profile.clone().with_seed(seed * 2))),
        Box::new(RandomAgent::new(profile.clone().with_seed(seed * 2 + 1))),
    )
}

fn simulate(seed: u64, profile: &BotProfile, ladder: StakeLadder) -> Hand {
    let mut deck = Deck::truco();
    deck.shuffle_seeded(seed);
    let mut agents = bots(seed, profile);
    let mut hand = deal(&mut deck, &mut agents, ladder).expect("full deck deals");
    let first = if seed % 2 == 0 { Seat::One } else { Seat::Two };
    play_hand(&mut hand, &mut agents, first).expect("bots only play dealt cards");
    hand
}

#[test]
fn random_hands_always_finish_consistently() {
    common::init_logging();
    let profile = BotProfile::new(0.5, 0.3, 0.6);
    for seed in 0..300u64 {
        let hand = simulate(seed, &profile, StakeLadder::default());
        let result = hand.result().expect("hand finished");

        assert!(hand.rounds().len() <= MAX_ROUNDS);
        assert!(hand.stake_history().windows(2).all(|w| w[0] < w[1]), "seed {seed}");
        assert_eq!(hand.stake_history().last(), Some(&hand.stake()));
        match result {
            HandResult::Won { points, by: Victory::Rounds, .. } => {
                assert_eq!(points, hand.stake(), "seed {seed}");
            }
            HandResult::Won { points, by: Victory::Run, .. } => {
                assert!(hand.stake_history().contains(&points), "seed {seed}");
            }
            HandResult::Draw => assert_eq!(hand.rounds().len(), MAX_ROUNDS),
        }
        let cards_played = hand
            .events()
            .iter()
            .filter(|e| matches!(e, HandEvent::CardPlayed { .. }))
            .count();
        assert_eq!(cards_played, hand.open_cards().len());
        assert!(cards_played <= 2 * MAX_ROUNDS);
    }
}

#[test]
fn same_seed_replays_the_same_hand() {
    let profile = BotProfile::default();
    for seed in [1, 7, 42] {
        let a = simulate(seed, &profile, StakeLadder::mineiro());
        let b = simulate(seed, &profile, StakeLadder::mineiro());
        assert_eq!(a.record(), b.record());
    }
}

#[test]
fn timid_bots_never_leave_the_initial_stake() {
    let profile = BotProfile::new(0.0, 0.0, 1.0);
    for seed in 0..50u64 {
        let hand = simulate(seed, &profile, StakeLadder::mineiro());
        assert_eq!(hand.stake_history(), &[2]);
        assert!(matches!(
            hand.result(),
            Some(HandResult::Won { points: 2, by: Victory::Rounds, .. }) | Some(HandResult::Draw)
        ));
    }
}

#[test]
fn hand_record_serializes_to_json() {
    let hand = simulate(3, &BotProfile::new(1.0, 0.0, 1.0), StakeLadder::default());
    let json = serde_json::to_value(hand.record()).expect("record serializes");

    assert_eq!(json["stake_history"][0], 1);
    assert!(json["vira"]["rank"].is_string());
    assert!(json["rounds"].as_array().is_some_and(|r| !r.is_empty()));
    assert!(json["events"][0]["RaiseRequested"]["proposed"].is_number());
    assert_eq!(json["events"][0]["RaiseRequested"]["seat"], "Two");
}

#[test]
fn hand_record_survives_a_json_round_trip() {
    for seed in [5, 6] {
        let record = simulate(seed, &BotProfile::new(0.6, 0.4, 0.5), StakeLadder::default()).record();
        let line = serde_json::to_string(&record).expect("record serializes");
        let back: HandRecord = serde_json::from_str(&line).expect("record deserializes");
        assert_eq!(back, record);
    }
}
