//! Raise negotiation ("truco").
//!
//! Before playing a card a seat may ask to raise the hand's stake to the next
//! ladder step. The opponent accepts, refuses (and loses the hand at the
//! stake in force before the raise) or raises back, which accepts the
//! proposal and sends a higher one the other way. Every raise climbs the
//! ladder, so a negotiation ends after at most `ladder.len()` responses.

use crate::agents::AgentTable;
use crate::engine::HandView;
use crate::hand::{HandEvent, RuleViolation, Seat};
use crate::stakes::StakeLadder;
use tracing::debug;

/// An agent's answer to a raise request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RaiseResponse {
    Accept,
    ReRaise,
    Refuse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NegotiationState {
    Idle,
    AwaitingResponse { requester: Seat, proposed: u32 },
    Resolved { stake: u32, last_raiser: Seat },
    HandWonByRun { winner: Seat, stake: u32 },
}

/// What a finished negotiation means for the hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NegotiationOutcome {
    Unchanged,
    Raised { stake: u32, last_raiser: Seat },
    Run { winner: Seat, stake: u32 },
}

/// Whether `requester` may ask for a raise given who raised last.
pub fn may_request(last_raiser: Option<Seat>, requester: Seat) -> bool {
    last_raiser != Some(requester)
}

/// The raise state machine for a single negotiation.
///
/// ```
/// use truco_rs::hand::Seat;
/// use truco_rs::negotiation::{Negotiation, NegotiationOutcome, RaiseResponse};
/// use truco_rs::stakes::StakeLadder;
///
/// let ladder = StakeLadder::default();
/// let mut n = Negotiation::new(&ladder, 1);
/// assert!(n.request(Seat::One));
/// n.respond(RaiseResponse::ReRaise);
/// n.respond(RaiseResponse::Refuse);
/// assert_eq!(n.outcome(), NegotiationOutcome::Run { winner: Seat::Two, stake: 3 });
/// ```
#[derive(Debug, Clone)]
pub struct Negotiation<'l> {
    ladder: &'l StakeLadder,
    stake: u32,
    state: NegotiationState,
    accepted: Vec<u32>,
}

impl<'l> Negotiation<'l> {
    pub fn new(ladder: &'l StakeLadder, stake: u32) -> Self {
        Self { ladder, stake, state: NegotiationState::Idle, accepted: Vec::new() }
    }

    pub fn state(&self) -> NegotiationState {
        self.state
    }

    /// Stake agreed so far; a pending proposal is not included.
    pub fn stake(&self) -> u32 {
        self.stake
    }

    /// Stakes accepted during this negotiation, in order.
    pub fn accepted(&self) -> &[u32] {
        &self.accepted
    }

    /// Ask for the next ladder step. Ignored, returning false, when the
    /// negotiation is not idle or the stake is already at the top.
    pub fn request(&mut self, requester: Seat) -> bool {
        if self.state != NegotiationState::Idle {
            return false;
        }
        match self.ladder.next_after(self.stake) {
            Some(proposed) => {
                self.state = NegotiationState::AwaitingResponse { requester, proposed };
                true
            }
            None => false,
        }
    }

    /// Apply the responder's answer to the pending proposal. No-op unless a
    /// proposal is pending.
    pub fn respond(&mut self, response: RaiseResponse) -> NegotiationState {
        let NegotiationState::AwaitingResponse { requester, proposed } = self.state else {
            return self.state;
        };
        self.state = match response {
            RaiseResponse::Refuse => {
                NegotiationState::HandWonByRun { winner: requester, stake: self.stake }
            }
            RaiseResponse::Accept => self.accept(proposed, requester),
            RaiseResponse::ReRaise => match self.ladder.next_after(proposed) {
                Some(next) => {
                    self.stake = proposed;
                    self.accepted.push(proposed);
                    NegotiationState::AwaitingResponse {
                        requester: requester.opponent(),
                        proposed: next,
                    }
                }
                // Nothing left to raise to: take it as a plain accept.
                None => self.accept(proposed, requester),
            },
        };
        self.state
    }

    fn accept(&mut self, proposed: u32, requester: Seat) -> NegotiationState {
        self.stake = proposed;
        self.accepted.push(proposed);
        NegotiationState::Resolved { stake: proposed, last_raiser: requester }
    }

    pub fn outcome(&self) -> NegotiationOutcome {
        match self.state {
            NegotiationState::Idle | NegotiationState::AwaitingResponse { .. } => {
                NegotiationOutcome::Unchanged
            }
            NegotiationState::Resolved { stake, last_raiser } => {
                NegotiationOutcome::Raised { stake, last_raiser }
            }
            NegotiationState::HandWonByRun { winner, stake } => {
                NegotiationOutcome::Run { winner, stake }
            }
        }
    }
}

/// A negotiation driven to its end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Negotiated {
    pub outcome: NegotiationOutcome,
    pub accepted: Vec<u32>,
    pub events: Vec<HandEvent>,
}

/// Run a full negotiation with `requester` asking first.
///
/// `view(seat, stake, proposed)` builds what an agent sees when consulted.
pub fn negotiate<'v, F>(
    ladder: &StakeLadder,
    stake: u32,
    requester: Seat,
    agents: &mut AgentTable,
    view: F,
) -> Result<Negotiated, RuleViolation>
where
    F: Fn(Seat, u32, Option<u32>) -> HandView<'v>,
{
    let unchanged = Negotiated {
        outcome: NegotiationOutcome::Unchanged,
        accepted: Vec::new(),
        events: Vec::new(),
    };
    if ladder.is_max(stake) {
        return Ok(unchanged);
    }
    if !agents.agent_mut(requester)?.wants_to_raise(&view(requester, stake, None)) {
        return Ok(unchanged);
    }

    let mut events = Vec::new();
    let mut machine = Negotiation::new(ladder, stake);
    machine.request(requester);

    while let NegotiationState::AwaitingResponse { requester, proposed } = machine.state() {
        debug!(seat = %requester, stake = machine.stake(), proposed, "raise requested");
        events.push(HandEvent::RaiseRequested { seat: requester, proposed });

        let responder = requester.opponent();
        let response = agents
            .agent_mut(responder)?
            .respond_to_raise(&view(responder, machine.stake(), Some(proposed)));
        let stake_before = machine.stake();
        let state = machine.respond(response);
        debug!(seat = %responder, ?response, ?state, "raise answered");

        match state {
            NegotiationState::AwaitingResponse { .. } => {
                events.push(HandEvent::ReRaised { seat: responder, accepted: proposed });
            }
            NegotiationState::Resolved { stake, .. } => {
                events.push(HandEvent::RaiseAccepted { seat: responder, stake });
            }
            NegotiationState::HandWonByRun { .. } => {
                events.push(HandEvent::RaiseRefused { seat: responder, stake: stake_before });
            }
            NegotiationState::Idle => {}
        }
    }

    Ok(Negotiated {
        outcome: machine.outcome(),
        accepted: machine.accepted().to_vec(),
        events,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accept_moves_to_next_step() {
        let ladder = StakeLadder::default();
        let mut n = Negotiation::new(&ladder, 1);
        assert!(n.request(Seat::One));
        assert_eq!(
            n.state(),
            NegotiationState::AwaitingResponse { requester: Seat::One, proposed: 3 }
        );
        n.respond(RaiseResponse::Accept);
        assert_eq!(n.outcome(), NegotiationOutcome::Raised { stake: 3, last_raiser: Seat::One });
        assert_eq!(n.accepted(), &[3]);
    }

    #[test]
    fn refuse_hands_victory_to_requester_at_previous_stake() {
        let ladder = StakeLadder::default();
        let mut n = Negotiation::new(&ladder, 1);
        n.request(Seat::Two);
        n.respond(RaiseResponse::Refuse);
        assert_eq!(n.outcome(), NegotiationOutcome::Run { winner: Seat::Two, stake: 1 });
        assert!(n.accepted().is_empty());
    }

    #[test]
    fn re_raise_swaps_requester_and_climbs() {
        let ladder = StakeLadder::default();
        let mut n = Negotiation::new(&ladder, 3);
        n.request(Seat::One);
        let state = n.respond(RaiseResponse::ReRaise);
        assert_eq!(state, NegotiationState::AwaitingResponse { requester: Seat::Two, proposed: 9 });
        assert_eq!(n.stake(), 6);
        n.respond(RaiseResponse::Accept);
        assert_eq!(n.outcome(), NegotiationOutcome::Raised { stake: 9, last_raiser: Seat::Two });
        assert_eq!(n.accepted(), &[6, 9]);
    }

    #[test]
    fn re_raise_at_top_is_an_accept() {
        let ladder = StakeLadder::default();
        let mut n = Negotiation::new(&ladder, 9);
        n.request(Seat::One);
        n.respond(RaiseResponse::ReRaise);
        assert_eq!(n.outcome(), NegotiationOutcome::Raised { stake: 12, last_raiser: Seat::One });
    }

    #[test]
    fn request_at_max_is_ignored() {
        let ladder = StakeLadder::default();
        let mut n = Negotiation::new(&ladder, 12);
        assert!(!n.request(Seat::One));
        assert_eq!(n.state(), NegotiationState::Idle);
        assert_eq!(n.outcome(), NegotiationOutcome::Unchanged);
    }

    #[test]
    fn second_request_while_pending_is_ignored() {
        let ladder = StakeLadder::default();
        let mut n = Negotiation::new(&ladder, 1);
        assert!(n.request(Seat::One));
        assert!(!n.request(Seat::Two));
        assert_eq!(
            n.state(),
            NegotiationState::AwaitingResponse { requester: Seat::One, proposed: 3 }
        );
    }

    #[test]
    fn respond_without_request_is_a_no_op() {
        let ladder = StakeLadder::default();
        let mut n = Negotiation::new(&ladder, 1);
        assert_eq!(n.respond(RaiseResponse::Refuse), NegotiationState::Idle);
    }

    #[test]
    fn last_raiser_may_not_raise_again() {
        assert!(may_request(None, Seat::One));
        assert!(may_request(Some(Seat::Two), Seat::One));
        assert!(!may_request(Some(Seat::One), Seat::One));
    }
}
