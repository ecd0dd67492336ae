// Engine boundary: the read-only view agents decide from, plus helpers that
// deal a hand from a deck and drive it round by round to a result.

use crate::agents::AgentTable;
use crate::cards::Card;
use crate::deck::Deck;
use crate::hand::{Hand, HandResult, RuleViolation, Seat};
use crate::negotiation::may_request;
use crate::round::Round;
use crate::stakes::StakeLadder;
use tracing::debug;

/// Cards dealt to each seat per hand.
pub const CARDS_PER_SEAT: usize = 3;

/// What an agent may see when it is consulted.
#[derive(Debug, Clone, Copy)]
pub struct HandView<'a> {
    /// The seat being asked.
    pub seat: Seat,
    pub vira: Card,
    /// Stake currently agreed.
    pub stake: u32,
    /// Stake being proposed, when answering a raise.
    pub proposed: Option<u32>,
    pub last_raiser: Option<Seat>,
    /// First card of the current round, until the second one is played.
    pub card_to_beat: Option<Card>,
    pub open_cards: &'a [Card],
    pub rounds: &'a [Round],
}

impl<'a> HandView<'a> {
    /// View of `hand` between rounds, as seen from `seat`.
    pub fn of(hand: &'a Hand, seat: Seat) -> Self {
        Self {
            seat,
            vira: hand.vira(),
            stake: hand.stake(),
            proposed: None,
            last_raiser: hand.last_raiser(),
            card_to_beat: hand.card_to_beat(),
            open_cards: hand.open_cards(),
            rounds: hand.rounds(),
        }
    }

    /// Whether the asking seat may request a raise right now.
    pub fn may_raise(&self) -> bool {
        may_request(self.last_raiser, self.seat)
    }
}

/// Deal three cards to each seat and turn the vira, starting a new hand.
pub fn deal(
    deck: &mut Deck,
    agents: &mut AgentTable,
    ladder: StakeLadder,
) -> Result<Hand, RuleViolation> {
    for seat in Seat::BOTH {
        let cards = deck.draw_n(CARDS_PER_SEAT);
        if cards.len() < CARDS_PER_SEAT {
            return Err(RuleViolation::DeckExhausted);
        }
        agents.agent_mut(seat)?.receive_cards(&cards);
    }
    let vira = deck.draw().ok_or(RuleViolation::DeckExhausted)?;
    debug!(vira = %vira, manilha = %vira.rank().next(), "hand dealt");
    Ok(Hand::with_ladder(vira, ladder))
}

/// Play rounds until `hand` is decided. `first` leads the first round; later
/// rounds are led per [`Hand::next_first_to_play`].
///
/// ```
/// use truco_rs::agents::{AgentTable, ScriptedAgent};
/// use truco_rs::cards::parse_cards;
/// use truco_rs::engine::play_hand;
/// use truco_rs::hand::{Hand, Seat};
///
/// let one = ScriptedAgent::new().playing(parse_cards("3d 3h").unwrap());
/// let two = ScriptedAgent::new().playing(parse_cards("7s 7h").unwrap());
/// let mut agents = AgentTable::with_agents(Box::new(one), Box::new(two));
/// let mut hand = Hand::new("Kc".parse().unwrap());
///
/// let result = play_hand(&mut hand, &mut agents, Seat::One).unwrap();
/// assert_eq!(result.winner(), Some(Seat::One));
/// assert_eq!(hand.rounds().len(), 2);
/// ```
pub fn play_hand(
    hand: &mut Hand,
    agents: &mut AgentTable,
    first: Seat,
) -> Result<HandResult, RuleViolation> {
    loop {
        if let Some(result) = hand.result() {
            return Ok(result);
        }
        let leader = hand.next_first_to_play(first);
        hand.play_round(leader, agents)?;
    }
}
