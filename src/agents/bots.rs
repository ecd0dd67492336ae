use crate::cards::Card;
use crate::engine::HandView;
use crate::negotiation::RaiseResponse;
use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};

use super::PlayerAgent;

/// Configuration for the random agent's coin flips.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct BotProfile {
    /// Chance of asking for a raise whenever allowed.
    pub raise: f64,
    /// Chance of raising back when asked; checked before `accept`.
    pub re_raise: f64,
    /// Chance of accepting a raise that was not raised back.
    pub accept: f64,
    pub rng_seed: Option<u64>,
}

impl BotProfile {
    pub fn new(raise: f64, re_raise: f64, accept: f64) -> Self {
        Self {
            raise: raise.clamp(0.0, 1.0),
            re_raise: re_raise.clamp(0.0, 1.0),
            accept: accept.clamp(0.0, 1.0),
            rng_seed: None,
        }
    }

    /// Set a deterministic RNG seed for reproducible decisions.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }
}

impl Default for BotProfile {
    fn default() -> Self {
        Self::new(0.2, 0.1, 0.7)
    }
}

/// Plays a uniformly random card from those dealt to it and answers raises
/// by coin flip. There is no strategy here; it exists to exercise the engine.
#[derive(Debug)]
pub struct RandomAgent {
    profile: BotProfile,
    rng: StdRng,
    cards: Vec<Card>,
}

impl RandomAgent {
    pub fn new(profile: BotProfile) -> Self {
        let rng = match profile.rng_seed {
            Some(v) => StdRng::seed_from_u64(v),
            None => {
                let mut seed = [0u8; 32];
                rand::rng().fill_bytes(&mut seed);
                StdRng::from_seed(seed)
            }
        };
        Self { profile, rng, cards: Vec::new() }
    }

    /// Cards still in hand.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

impl PlayerAgent for RandomAgent {
    fn choose_card(&mut self, _view: &HandView<'_>) -> Card {
        if self.cards.is_empty() {
            return Card::closed();
        }
        let idx = self.rng.random_range(0..self.cards.len());
        self.cards.swap_remove(idx)
    }

    fn respond_to_raise(&mut self, _view: &HandView<'_>) -> RaiseResponse {
        if self.rng.random_bool(self.profile.re_raise) {
            RaiseResponse::ReRaise
        } else if self.rng.random_bool(self.profile.accept) {
            RaiseResponse::Accept
        } else {
            RaiseResponse::Refuse
        }
    }

    fn wants_to_raise(&mut self, _view: &HandView<'_>) -> bool {
        self.rng.random_bool(self.profile.raise)
    }

    fn receive_cards(&mut self, cards: &[Card]) {
        self.cards = cards.to_vec();
    }
}
