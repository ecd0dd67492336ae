//! A hand: one deal, up to three rounds, ending in a winner or a draw.

use crate::agents::AgentTable;
use crate::cards::Card;
use crate::round::{Round, RoundPlay};
use crate::stakes::StakeLadder;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

/// Most rounds a single hand can have.
pub const MAX_ROUNDS: usize = 3;

/// One of the two participants of a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seat {
    One,
    Two,
}

impl Seat {
    pub const BOTH: [Seat; 2] = [Seat::One, Seat::Two];

    pub const fn opponent(self) -> Seat {
        match self {
            Seat::One => Seat::Two,
            Seat::Two => Seat::One,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Seat::One => 0,
            Seat::Two => 1,
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.index() + 1)
    }
}

/// Rule-integrity failures. These point at a bug in a collaborator and are
/// never recovered from; the hand is left as it was before the failing call.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RuleViolation {
    #[error("cards in the deck must be unique, {0} was seen twice")]
    DuplicateCard(Card),
    #[error("no agent is seated at {0}")]
    MissingAgent(Seat),
    #[error("a round needs two different seats, got {0} twice")]
    SameSeat(Seat),
    #[error("the hand is already decided")]
    HandAlreadyDecided,
    #[error("a hand has at most three rounds")]
    TooManyRounds,
    #[error("the deck ran out of cards while dealing")]
    DeckExhausted,
}

/// How a hand was won.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Victory {
    /// Decided by the round aggregation table.
    Rounds,
    /// The opponent refused a raise.
    Run,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandResult {
    Won { winner: Seat, points: u32, by: Victory },
    Draw,
}

impl HandResult {
    pub fn winner(&self) -> Option<Seat> {
        match self {
            HandResult::Won { winner, .. } => Some(*winner),
            HandResult::Draw => None,
        }
    }

    /// Points awarded to the winner; zero for a draw.
    pub fn points(&self) -> u32 {
        match self {
            HandResult::Won { points, .. } => *points,
            HandResult::Draw => 0,
        }
    }
}

/// What the rounds played so far say about the hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Pending,
    Winner(Seat),
    Draw,
}

/// Apply the round aggregation table to `rounds`.
///
/// * rounds 1 and 2 won by the same seat: that seat;
/// * round 1 drawn: the winner of round 2, then of round 3, else a draw;
/// * round 1 won and round 2 drawn: the winner of round 1;
/// * rounds 1 and 2 split: the winner of round 3, or of round 1 if round 3 draws.
///
/// Rounds past the point where the hand was decided are ignored.
pub fn decide(rounds: &[Round]) -> Decision {
    let (Some(r1), Some(r2)) = (rounds.first(), rounds.get(1)) else {
        return Decision::Pending;
    };
    match (r1.winner(), r2.winner()) {
        (Some(a), Some(b)) if a == b => return Decision::Winner(a),
        (None, Some(b)) => return Decision::Winner(b),
        (Some(a), None) => return Decision::Winner(a),
        _ => {}
    }
    let Some(r3) = rounds.get(2) else {
        return Decision::Pending;
    };
    match (r3.winner(), r1.winner()) {
        (Some(c), _) => Decision::Winner(c),
        (None, Some(a)) => Decision::Winner(a),
        (None, None) => Decision::Draw,
    }
}

/// Everything that happened in a hand, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum HandEvent {
    RaiseRequested { seat: Seat, proposed: u32 },
    RaiseAccepted { seat: Seat, stake: u32 },
    /// `seat` accepted `accepted` and raised back; the new request follows.
    ReRaised { seat: Seat, accepted: u32 },
    RaiseRefused { seat: Seat, stake: u32 },
    CardPlayed { seat: Seat, card: Card },
    RoundWon { round: usize, seat: Seat, card: Card },
    RoundDrawn { round: usize },
    HandWon { seat: Seat, points: u32, by: Victory },
    HandDrawn,
}

/// Hand state a round may change. Rounds work on a copy and the hand takes
/// it back only when the round finishes cleanly.
#[derive(Debug, Clone)]
pub(crate) struct LiveState {
    pub(crate) stake: u32,
    pub(crate) stake_history: Vec<u32>,
    pub(crate) last_raiser: Option<Seat>,
    pub(crate) card_to_beat: Option<Card>,
    pub(crate) open_cards: Vec<Card>,
    pub(crate) events: Vec<HandEvent>,
}

/// Serializable snapshot of a hand for whoever stores match history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandRecord {
    pub vira: Card,
    pub stake_history: Vec<u32>,
    pub rounds: Vec<Round>,
    pub result: Option<HandResult>,
    pub events: Vec<HandEvent>,
}

#[derive(Debug, Clone)]
pub struct Hand {
    vira: Card,
    ladder: StakeLadder,
    rounds: Vec<Round>,
    result: Option<HandResult>,
    live: LiveState,
}

impl Hand {
    /// Start a hand worth the default ladder's first step.
    ///
    /// ```
    /// use truco_rs::cards::Card;
    /// use truco_rs::hand::{Hand, Seat, HandResult, Victory};
    ///
    /// let mut hand = Hand::new("3c".parse().unwrap());
    /// hand.record_round(Seat::One, "4d".parse().unwrap(), Seat::Two, "As".parse().unwrap()).unwrap();
    /// hand.record_round(Seat::One, "7h".parse().unwrap(), Seat::Two, "7s".parse().unwrap()).unwrap();
    /// assert_eq!(
    ///     hand.result(),
    ///     Some(HandResult::Won { winner: Seat::One, points: 1, by: Victory::Rounds })
    /// );
    /// ```
    pub fn new(vira: Card) -> Self {
        Self::with_ladder(vira, StakeLadder::default())
    }

    pub fn with_ladder(vira: Card, ladder: StakeLadder) -> Self {
        let stake = ladder.initial();
        Self {
            vira,
            ladder,
            rounds: Vec::with_capacity(MAX_ROUNDS),
            result: None,
            live: LiveState {
                stake,
                stake_history: vec![stake],
                last_raiser: None,
                card_to_beat: None,
                open_cards: Vec::new(),
                events: Vec::new(),
            },
        }
    }

    pub fn vira(&self) -> Card {
        self.vira
    }

    pub fn ladder(&self) -> &StakeLadder {
        &self.ladder
    }

    /// Current point value of the hand.
    pub fn stake(&self) -> u32 {
        self.live.stake
    }

    /// Every stake that was in force, starting with the initial one.
    pub fn stake_history(&self) -> &[u32] {
        &self.live.stake_history
    }

    pub fn last_raiser(&self) -> Option<Seat> {
        self.live.last_raiser
    }

    pub fn card_to_beat(&self) -> Option<Card> {
        self.live.card_to_beat
    }

    pub fn open_cards(&self) -> &[Card] {
        &self.live.open_cards
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    pub fn events(&self) -> &[HandEvent] {
        &self.live.events
    }

    pub fn result(&self) -> Option<HandResult> {
        self.result
    }

    pub fn is_done(&self) -> bool {
        self.result.is_some()
    }

    pub(crate) fn live(&self) -> &LiveState {
        &self.live
    }

    /// Seat that leads the next round: the last round's winner, or whoever led
    /// it when it was drawn. Before the first round this is `default`.
    pub fn next_first_to_play(&self, default: Seat) -> Seat {
        self.rounds.last().map(|r| r.winner().unwrap_or(r.first())).unwrap_or(default)
    }

    /// Play one live round with `first` leading, consulting `agents` for raises
    /// and cards.
    pub fn play_round(
        &mut self,
        first: Seat,
        agents: &mut AgentTable,
    ) -> Result<RoundPlay, RuleViolation> {
        self.ensure_open()?;
        let (play, live) = Round::play(self, first, agents)?;
        self.live = live;
        match &play {
            RoundPlay::Completed(round) => self.push_round(round.clone()),
            RoundPlay::HandEnded(result) => self.finish(*result),
        }
        Ok(play)
    }

    /// Append a round rebuilt from a known record. No agent is consulted.
    pub fn record_round(
        &mut self,
        first: Seat,
        first_card: Card,
        second: Seat,
        second_card: Card,
    ) -> Result<Option<HandResult>, RuleViolation> {
        self.ensure_open()?;
        let round = Round::from_cards(first, first_card, second, second_card, self.vira)?;
        self.live.card_to_beat = None;
        for (seat, card) in [(first, first_card), (second, second_card)] {
            self.live.open_cards.push(card);
            self.live.events.push(HandEvent::CardPlayed { seat, card });
        }
        self.push_round(round);
        Ok(self.result)
    }

    pub fn record(&self) -> HandRecord {
        HandRecord {
            vira: self.vira,
            stake_history: self.live.stake_history.clone(),
            rounds: self.rounds.clone(),
            result: self.result,
            events: self.live.events.clone(),
        }
    }

    fn ensure_open(&self) -> Result<(), RuleViolation> {
        if self.result.is_some() {
            return Err(RuleViolation::HandAlreadyDecided);
        }
        if self.rounds.len() >= MAX_ROUNDS {
            return Err(RuleViolation::TooManyRounds);
        }
        Ok(())
    }

    fn push_round(&mut self, round: Round) {
        let number = self.rounds.len() + 1;
        match (round.winner(), round.winning_card()) {
            (Some(seat), Some(card)) => {
                info!(round = number, winner = %seat, card = %card, "round won");
                self.live.events.push(HandEvent::RoundWon { round: number, seat, card });
            }
            _ => {
                info!(round = number, "round drawn");
                self.live.events.push(HandEvent::RoundDrawn { round: number });
            }
        }
        self.rounds.push(round);
        match decide(&self.rounds) {
            Decision::Pending => {}
            Decision::Winner(winner) => self.finish(HandResult::Won {
                winner,
                points: self.live.stake,
                by: Victory::Rounds,
            }),
            Decision::Draw => self.finish(HandResult::Draw),
        }
    }

    fn finish(&mut self, result: HandResult) {
        match result {
            HandResult::Won { winner, points, by } => {
                info!(winner = %winner, points, ?by, "hand won");
                self.live.events.push(HandEvent::HandWon { seat: winner, points, by });
            }
            HandResult::Draw => {
                info!("hand drawn");
                self.live.events.push(HandEvent::HandDrawn);
            }
        }
        self.result = Some(result);
    }
}
