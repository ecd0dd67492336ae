use crate::agents::AgentTable;
use crate::cards::{contest, Card, CardContest};
use crate::engine::HandView;
use crate::hand::{Hand, HandEvent, HandResult, LiveState, RuleViolation, Seat, Victory};
use crate::negotiation::{may_request, negotiate, NegotiationOutcome};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One exchange of a card per seat. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    first: Seat,
    first_card: Card,
    second: Seat,
    second_card: Card,
    winner: Option<Seat>,
}

/// How a live round ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundPlay {
    /// Both cards were played and compared.
    Completed(Round),
    /// A raise was refused before the round could finish.
    HandEnded(HandResult),
}

impl Round {
    /// Build a round from cards already known, e.g. when replaying a record.
    ///
    /// Closed cards may repeat; any other card may appear only once among the
    /// two played cards and the vira.
    ///
    /// ```
    /// use truco_rs::cards::Card;
    /// use truco_rs::hand::{RuleViolation, Seat};
    /// use truco_rs::round::Round;
    ///
    /// let vira: Card = "5h".parse().unwrap();
    /// let round = Round::from_cards(Seat::One, Card::closed(), Seat::Two, Card::closed(), vira).unwrap();
    /// assert!(round.is_draw());
    ///
    /// let err = Round::from_cards(Seat::One, vira, Seat::Two, vira, vira);
    /// assert_eq!(err, Err(RuleViolation::DuplicateCard(vira)));
    /// ```
    pub fn from_cards(
        first: Seat,
        first_card: Card,
        second: Seat,
        second_card: Card,
        vira: Card,
    ) -> Result<Self, RuleViolation> {
        if first == second {
            return Err(RuleViolation::SameSeat(first));
        }
        validate_cards(first_card, second_card, vira)?;
        let winner = match contest(first_card, second_card, vira) {
            CardContest::FirstWins => Some(first),
            CardContest::SecondWins => Some(second),
            CardContest::Draw => None,
        };
        Ok(Self { first, first_card, second, second_card, winner })
    }

    pub fn first(&self) -> Seat {
        self.first
    }

    pub fn second(&self) -> Seat {
        self.second
    }

    pub fn first_card(&self) -> Card {
        self.first_card
    }

    pub fn second_card(&self) -> Card {
        self.second_card
    }

    /// `None` when the round was drawn.
    pub fn winner(&self) -> Option<Seat> {
        self.winner
    }

    pub fn is_draw(&self) -> bool {
        self.winner.is_none()
    }

    pub fn card_of(&self, seat: Seat) -> Card {
        if seat == self.first {
            self.first_card
        } else {
            self.second_card
        }
    }

    pub fn winning_card(&self) -> Option<Card> {
        self.winner.map(|seat| self.card_of(seat))
    }

    /// Play a live round on a copy of the hand state.
    ///
    /// The returned state is meant to replace the hand's own once the call
    /// succeeds; on error the hand keeps what it had.
    pub(crate) fn play(
        hand: &Hand,
        first: Seat,
        agents: &mut AgentTable,
    ) -> Result<(RoundPlay, LiveState), RuleViolation> {
        let second = first.opponent();
        let mut ctx = RoundContext { hand, live: hand.live().clone() };
        ctx.live.card_to_beat = None;

        if let Some(result) = ctx.offer_raise(first, agents)? {
            return Ok((RoundPlay::HandEnded(result), ctx.live));
        }

        let first_card = agents.agent_mut(first)?.choose_card(&ctx.view(first, None));
        ctx.played(first, first_card);
        ctx.live.card_to_beat = Some(first_card);
        agents.agent_mut(second)?.on_opponent_play(first_card);

        if let Some(result) = ctx.offer_raise(second, agents)? {
            return Ok((RoundPlay::HandEnded(result), ctx.live));
        }

        let second_card = agents.agent_mut(second)?.choose_card(&ctx.view(second, None));
        ctx.played(second, second_card);
        ctx.live.card_to_beat = None;
        agents.agent_mut(first)?.on_opponent_play(second_card);

        let round = Round::from_cards(first, first_card, second, second_card, hand.vira())?;
        Ok((RoundPlay::Completed(round), ctx.live))
    }
}

fn validate_cards(first: Card, second: Card, vira: Card) -> Result<(), RuleViolation> {
    for (a, b) in [(first, second), (first, vira), (second, vira)] {
        if !a.is_closed() && a == b {
            return Err(RuleViolation::DuplicateCard(a));
        }
    }
    Ok(())
}

struct RoundContext<'h> {
    hand: &'h Hand,
    live: LiveState,
}

impl RoundContext<'_> {
    fn view(&self, seat: Seat, proposed: Option<u32>) -> HandView<'_> {
        self.view_at(seat, self.live.stake, proposed)
    }

    fn view_at(&self, seat: Seat, stake: u32, proposed: Option<u32>) -> HandView<'_> {
        HandView {
            seat,
            vira: self.hand.vira(),
            stake,
            proposed,
            last_raiser: self.live.last_raiser,
            card_to_beat: self.live.card_to_beat,
            open_cards: &self.live.open_cards,
            rounds: self.hand.rounds(),
        }
    }

    fn played(&mut self, seat: Seat, card: Card) {
        debug!(seat = %seat, card = %card, "card played");
        self.live.open_cards.push(card);
        self.live.events.push(HandEvent::CardPlayed { seat, card });
    }

    /// Give `requester` the chance to raise. Returns the hand result when the
    /// opponent runs.
    fn offer_raise(
        &mut self,
        requester: Seat,
        agents: &mut AgentTable,
    ) -> Result<Option<HandResult>, RuleViolation> {
        if !may_request(self.live.last_raiser, requester) {
            debug!(seat = %requester, "raised last, may not raise again");
            return Ok(None);
        }
        let this = &*self;
        let negotiated = negotiate(
            this.hand.ladder(),
            this.live.stake,
            requester,
            agents,
            |seat, stake, proposed| this.view_at(seat, stake, proposed),
        )?;

        self.live.events.extend(negotiated.events);
        for stake in negotiated.accepted {
            if self.live.stake != stake {
                self.live.stake = stake;
                self.live.stake_history.push(stake);
            }
        }
        match negotiated.outcome {
            NegotiationOutcome::Unchanged => Ok(None),
            NegotiationOutcome::Raised { stake, last_raiser } => {
                self.live.stake = stake;
                self.live.last_raiser = Some(last_raiser);
                Ok(None)
            }
            NegotiationOutcome::Run { winner, stake } => {
                self.live.stake = stake;
                self.live.last_raiser = Some(winner);
                Ok(Some(HandResult::Won { winner, points: stake, by: Victory::Run }))
            }
        }
    }
}
