//! Agents: pluggable players (bots, scripted replays, other frontends).
//!
//! The engine reaches players only through [`PlayerAgent`]. [`AgentTable`]
//! seats one agent per side of a hand so rounds can consult whoever is due.

use crate::cards::Card;
use crate::engine::HandView;
use crate::hand::{RuleViolation, Seat};
use crate::negotiation::RaiseResponse;
use core::fmt;
use std::collections::{BTreeSet, VecDeque};

/// A player seen from the engine.
pub trait PlayerAgent {
    /// Card to play now. The engine trusts the agent to hold it; returning
    /// [`Card::closed`] plays face down.
    fn choose_card(&mut self, view: &HandView<'_>) -> Card;
    /// Answer to the raise proposed in `view.proposed`.
    fn respond_to_raise(&mut self, view: &HandView<'_>) -> RaiseResponse;
    /// Asked before this agent plays a card, when it is allowed to raise.
    fn wants_to_raise(&mut self, view: &HandView<'_>) -> bool;
    /// The opponent just played `card`.
    fn on_opponent_play(&mut self, _card: Card) {}
    /// Cards dealt to this agent for the coming hand.
    fn receive_cards(&mut self, _cards: &[Card]) {}
}

mod bots;

pub use bots::{BotProfile, RandomAgent};

/// Replays pre-decided moves: cards in order, raises before given card
/// numbers and queued answers to raises.
///
/// When a queue runs dry it plays closed cards, never raises and accepts.
#[derive(Debug, Clone, Default)]
pub struct ScriptedAgent {
    cards: VecDeque<Card>,
    responses: VecDeque<RaiseResponse>,
    raise_before: BTreeSet<usize>,
    played: usize,
    seen: Vec<Card>,
}

impl ScriptedAgent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue cards to play, in order.
    pub fn playing<I>(mut self, cards: I) -> Self
    where
        I: IntoIterator<Item = Card>,
    {
        self.cards.extend(cards);
        self
    }

    /// Ask for a raise before playing the card with index `card_number`
    /// (zero based, counted over the whole hand).
    pub fn raising_before(mut self, card_number: usize) -> Self {
        self.raise_before.insert(card_number);
        self
    }

    /// Queue answers to raise requests, in order.
    pub fn responding<I>(mut self, responses: I) -> Self
    where
        I: IntoIterator<Item = RaiseResponse>,
    {
        self.responses.extend(responses);
        self
    }

    /// Opponent cards this agent was told about.
    pub fn seen(&self) -> &[Card] {
        &self.seen
    }
}

impl PlayerAgent for ScriptedAgent {
    fn choose_card(&mut self, _view: &HandView<'_>) -> Card {
        self.played += 1;
        self.cards.pop_front().unwrap_or_else(Card::closed)
    }

    fn respond_to_raise(&mut self, _view: &HandView<'_>) -> RaiseResponse {
        self.responses.pop_front().unwrap_or(RaiseResponse::Accept)
    }

    fn wants_to_raise(&mut self, _view: &HandView<'_>) -> bool {
        self.raise_before.remove(&self.played)
    }

    fn on_opponent_play(&mut self, card: Card) {
        self.seen.push(card);
    }
}

/// The two seats of a hand, each optionally occupied by an agent.
pub struct AgentTable {
    seats: [Option<Box<dyn PlayerAgent>>; 2],
}

impl fmt::Debug for AgentTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flags: String =
            self.seats.iter().map(|a| if a.is_some() { 'A' } else { '-' }).collect();
        write!(f, "AgentTable({flags})")
    }
}

impl Default for AgentTable {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentTable {
    /// A table with both seats empty.
    pub fn new() -> Self {
        Self { seats: [None, None] }
    }

    /// A table with both seats taken.
    pub fn with_agents(one: Box<dyn PlayerAgent>, two: Box<dyn PlayerAgent>) -> Self {
        Self { seats: [Some(one), Some(two)] }
    }

    /// Assign an agent to a seat (or remove when `None`).
    pub fn set_agent(&mut self, seat: Seat, agent: Option<Box<dyn PlayerAgent>>) {
        self.seats[seat.index()] = agent;
    }

    /// Whether a seat currently has an agent assigned.
    pub fn has_agent(&self, seat: Seat) -> bool {
        self.seats[seat.index()].is_some()
    }

    /// The agent at `seat`; an empty seat is a contract violation.
    pub fn agent_mut(&mut self, seat: Seat) -> Result<&mut Box<dyn PlayerAgent>, RuleViolation> {
        self.seats[seat.index()].as_mut().ok_or(RuleViolation::MissingAgent(seat))
    }

    /// Remove all agents.
    pub fn clear(&mut self) {
        for a in &mut self.seats {
            *a = None;
        }
    }
}
