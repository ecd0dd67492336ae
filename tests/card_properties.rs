use proptest::prelude::*;
use std::cmp::Ordering;
use truco_rs::cards::{contest, Card, CardContest, Rank, Suit};

fn any_rank() -> impl Strategy<Value = Rank> {
    (0usize..Rank::ALL.len()).prop_map(|i| Rank::ALL[i])
}

fn any_suit() -> impl Strategy<Value = Suit> {
    prop_oneof![Just(Suit::Diamonds), Just(Suit::Hearts), Just(Suit::Clubs), Just(Suit::Spades),]
}

fn any_open_card() -> impl Strategy<Value = Card> {
    (any_rank(), any_suit()).prop_map(|(r, s)| Card::try_new(r, s).expect("open card"))
}

fn any_card() -> impl Strategy<Value = Card> {
    prop_oneof![9 => any_open_card(), 1 => Just(Card::closed())]
}

proptest! {
    #[test]
    fn successor_cycles_through_every_rank(rank in any_rank()) {
        let mut r = rank;
        for step in 1..=10 {
            r = r.next();
            prop_assert!(!r.is_hidden());
            if step < 10 {
                prop_assert_ne!(r, rank);
            }
        }
        prop_assert_eq!(r, rank);
    }

    #[test]
    fn comparison_is_antisymmetric(a in any_card(), b in any_card(), vira in any_open_card()) {
        prop_assert_eq!(a.compare_value_to(&b, &vira), b.compare_value_to(&a, &vira).reverse());
        prop_assert_eq!(contest(a, b, vira), contest(b, a, vira).reversed());
    }

    #[test]
    fn comparison_is_transitive(
        a in any_card(),
        b in any_card(),
        c in any_card(),
        vira in any_open_card(),
    ) {
        let ab = a.compare_value_to(&b, &vira);
        let bc = b.compare_value_to(&c, &vira);
        if ab != Ordering::Less && bc != Ordering::Less {
            prop_assert_ne!(a.compare_value_to(&c, &vira), Ordering::Less);
        }
    }

    #[test]
    fn closed_card_loses_to_any_open_card(open in any_open_card(), vira in any_open_card()) {
        prop_assert_eq!(contest(Card::closed(), open, vira), CardContest::SecondWins);
        prop_assert_eq!(contest(open, Card::closed(), vira), CardContest::FirstWins);
    }

    #[test]
    fn manilha_beats_every_other_open_card(
        suit in any_suit(),
        other in any_open_card(),
        vira in any_open_card(),
    ) {
        let manilha = Card::try_new(vira.rank().next(), suit).expect("open card");
        prop_assert!(manilha.is_manilha(vira));
        if !other.is_manilha(vira) {
            prop_assert_eq!(contest(manilha, other, vira), CardContest::FirstWins);
        } else if other.suit() != suit {
            let expected = if suit.order() > other.suit().order() {
                CardContest::FirstWins
            } else {
                CardContest::SecondWins
            };
            prop_assert_eq!(contest(manilha, other, vira), expected);
        }
    }

    #[test]
    fn plain_cards_of_equal_rank_draw(
        rank in any_rank(),
        a in any_suit(),
        b in any_suit(),
        vira in any_open_card(),
    ) {
        prop_assume!(rank != vira.rank().next());
        let first = Card::try_new(rank, a).expect("open card");
        let second = Card::try_new(rank, b).expect("open card");
        prop_assert_eq!(contest(first, second, vira), CardContest::Draw);
    }

    #[test]
    fn display_parses_back(card in any_card()) {
        let parsed: Card = card.to_string().parse().expect("displayed card parses");
        prop_assert_eq!(parsed, card);
    }
}

#[test]
fn manilha_suits_rank_spades_over_clubs_over_hearts_over_diamonds() {
    let vira: Card = "6c".parse().unwrap();
    let order: Vec<Card> = ["7d", "7h", "7c", "7s"].iter().map(|s| s.parse().unwrap()).collect();
    for pair in order.windows(2) {
        assert_eq!(contest(pair[1], pair[0], vira), CardContest::FirstWins, "{} vs {}", pair[1], pair[0]);
    }
}

#[test]
fn three_as_vira_makes_fours_the_manilha() {
    let vira: Card = "3h".parse().unwrap();
    let four: Card = "4d".parse().unwrap();
    let ace: Card = "As".parse().unwrap();
    assert!(four.is_manilha(vira));
    assert_eq!(contest(four, ace, vira), CardContest::FirstWins);

    let fours: Vec<Card> = ["4s", "4c", "4h", "4d"].iter().map(|s| s.parse().unwrap()).collect();
    for pair in fours.windows(2) {
        assert_eq!(pair[0].compare_value_to(&pair[1], &vira), Ordering::Greater);
    }
}

#[test]
fn closed_cards_tie_only_with_each_other() {
    let vira: Card = "Qd".parse().unwrap();
    assert_eq!(contest(Card::closed(), Card::closed(), vira), CardContest::Draw);
    assert_eq!(contest(Card::closed(), "4h".parse().unwrap(), vira), CardContest::SecondWins);
}
