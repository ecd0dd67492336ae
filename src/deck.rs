use crate::cards::{Card, Rank, Suit};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// The 40-card Truco deck: every open rank in every suit, no eights, nines or tens.
///
/// Cards are dealt from the end of the pile.
#[derive(Debug, Clone)]
pub struct Deck {
    pile: Vec<Card>,
}

impl Deck {
    /// A fresh, ordered deck.
    ///
    /// ```
    /// use truco_rs::deck::Deck;
    ///
    /// let deck = Deck::truco();
    /// assert_eq!(deck.len(), 40);
    /// ```
    pub fn truco() -> Self {
        let pile = Suit::ALL
            .iter()
            .flat_map(|&suit| Rank::ALL.iter().map(move |&rank| (rank, suit)))
            .filter_map(|(rank, suit)| Card::try_new(rank, suit).ok())
            .collect();
        Self { pile }
    }

    pub fn len(&self) -> usize {
        self.pile.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pile.is_empty()
    }

    /// Reorder the pile from `seed`; equal seeds give equal decks.
    pub fn shuffle_seeded(&mut self, seed: u64) {
        self.shuffle_with(&mut ChaCha8Rng::seed_from_u64(seed));
    }

    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.pile.shuffle(rng);
    }

    pub fn draw(&mut self) -> Option<Card> {
        self.pile.pop()
    }

    /// Up to `n` cards; fewer when the pile runs out.
    pub fn draw_n(&mut self, n: usize) -> Vec<Card> {
        let at = self.pile.len().saturating_sub(n);
        let mut cards = self.pile.split_off(at);
        cards.reverse();
        cards
    }
}
