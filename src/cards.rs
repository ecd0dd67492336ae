use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Truco ranks in base strength order, Four (weakest) to Three (strongest).
///
/// `Hidden` is the rank of a face-down card and has no strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rank {
    Hidden = 0,
    Four = 1,
    Five = 2,
    Six = 3,
    Seven = 4,
    Queen = 5,
    Jack = 6,
    King = 7,
    Ace = 8,
    Two = 9,
    Three = 10,
}

impl Rank {
    /// Open ranks in base strength order.
    pub const ALL: [Rank; 10] = [
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Queen,
        Rank::Jack,
        Rank::King,
        Rank::Ace,
        Rank::Two,
        Rank::Three,
    ];

    pub const fn strength(self) -> u8 {
        self as u8
    }

    pub const fn is_hidden(self) -> bool {
        matches!(self, Rank::Hidden)
    }

    /// The rank that becomes manilha when `self` is the vira rank.
    ///
    /// ```
    /// use truco_rs::cards::Rank;
    ///
    /// assert_eq!(Rank::Three.next(), Rank::Four);
    /// assert_eq!(Rank::King.next(), Rank::Ace);
    /// assert_eq!(Rank::Hidden.next(), Rank::Hidden);
    /// ```
    pub const fn next(self) -> Rank {
        match self {
            Rank::Four => Rank::Five,
            Rank::Five => Rank::Six,
            Rank::Six => Rank::Seven,
            Rank::Seven => Rank::Queen,
            Rank::Queen => Rank::Jack,
            Rank::Jack => Rank::King,
            Rank::King => Rank::Ace,
            Rank::Ace => Rank::Two,
            Rank::Two => Rank::Three,
            Rank::Three => Rank::Four,
            Rank::Hidden => Rank::Hidden,
        }
    }

    pub const fn to_char(self) -> char {
        match self {
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Queen => 'Q',
            Rank::Jack => 'J',
            Rank::King => 'K',
            Rank::Ace => 'A',
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Hidden => 'X',
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RankParseError {
    #[error("invalid rank: '{0}'")]
    Invalid(String),
}

impl FromStr for Rank {
    type Err = RankParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Rank::try_from(c),
            _ => Err(RankParseError::Invalid(s.to_string())),
        }
    }
}

impl TryFrom<char> for Rank {
    type Error = RankParseError;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_uppercase() {
            '4' => Ok(Rank::Four),
            '5' => Ok(Rank::Five),
            '6' => Ok(Rank::Six),
            '7' => Ok(Rank::Seven),
            'Q' => Ok(Rank::Queen),
            'J' => Ok(Rank::Jack),
            'K' => Ok(Rank::King),
            'A' => Ok(Rank::Ace),
            '2' => Ok(Rank::Two),
            '3' => Ok(Rank::Three),
            'X' => Ok(Rank::Hidden),
            _ => Err(RankParseError::Invalid(c.to_string())),
        }
    }
}

/// Suits in manilha tie-break order: Diamonds < Hearts < Clubs < Spades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Suit {
    Hidden = 0,
    Diamonds = 1,
    Hearts = 2,
    Clubs = 3,
    Spades = 4,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Diamonds, Suit::Hearts, Suit::Clubs, Suit::Spades];

    pub const fn order(self) -> u8 {
        self as u8
    }

    pub const fn is_hidden(self) -> bool {
        matches!(self, Suit::Hidden)
    }

    pub const fn symbol(self) -> char {
        match self {
            Suit::Diamonds => '♦',
            Suit::Hearts => '♥',
            Suit::Clubs => '♣',
            Suit::Spades => '♠',
            Suit::Hidden => 'x',
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SuitParseError {
    #[error("invalid suit: '{0}'")]
    Invalid(String),
}

impl FromStr for Suit {
    type Err = SuitParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        let mut chars = t.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Suit::try_from(c);
        }
        match t.to_ascii_lowercase().as_str() {
            "diamonds" => Ok(Suit::Diamonds),
            "hearts" => Ok(Suit::Hearts),
            "clubs" => Ok(Suit::Clubs),
            "spades" => Ok(Suit::Spades),
            "hidden" => Ok(Suit::Hidden),
            _ => Err(SuitParseError::Invalid(s.to_string())),
        }
    }
}

impl TryFrom<char> for Suit {
    type Error = SuitParseError;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_lowercase() {
            'd' | '♦' => Ok(Suit::Diamonds),
            'h' | '♥' => Ok(Suit::Hearts),
            'c' | '♣' => Ok(Suit::Clubs),
            's' | '♠' => Ok(Suit::Spades),
            'x' => Ok(Suit::Hidden),
            _ => Err(SuitParseError::Invalid(c.to_string())),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CardError {
    #[error("rank and suit must both be hidden or both be open, got {rank:?} of {suit:?}")]
    HalfHidden { rank: Rank, suit: Suit },
}

/// A Truco card: an open rank + suit pair, or the closed (face-down) card.
///
/// Cards have value equality but no intrinsic ordering; strength depends on
/// the vira of the hand, see [`Card::compare_value_to`].
///
/// ```
/// use truco_rs::cards::{Card, Rank, Suit};
///
/// let card = Card::try_new(Rank::Seven, Suit::Diamonds).unwrap();
/// assert_eq!(card.to_string(), "[7♦]");
/// assert_eq!(Card::closed().to_string(), "[Xx]");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "CardRepr", into = "CardRepr")]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    pub fn try_new(rank: Rank, suit: Suit) -> Result<Self, CardError> {
        if rank.is_hidden() != suit.is_hidden() {
            return Err(CardError::HalfHidden { rank, suit });
        }
        Ok(Self { rank, suit })
    }

    pub const fn closed() -> Self {
        Self { rank: Rank::Hidden, suit: Suit::Hidden }
    }

    pub const fn rank(self) -> Rank {
        self.rank
    }

    pub const fn suit(self) -> Suit {
        self.suit
    }

    pub const fn is_closed(self) -> bool {
        self.rank.is_hidden()
    }

    pub const fn to_tuple(self) -> (Rank, Suit) {
        (self.rank, self.suit)
    }

    /// Whether this card is a manilha for a hand whose vira is `vira`.
    pub fn is_manilha(self, vira: Card) -> bool {
        !self.is_closed() && self.rank == vira.rank.next()
    }

    /// Compare the playing value of two cards under `vira`.
    ///
    /// Closed cards lose to every open card and tie with each other. A manilha
    /// beats any other card; two manilhas are ordered by suit. Otherwise base
    /// rank strength decides and equal ranks tie.
    pub fn compare_value_to(&self, other: &Card, vira: &Card) -> Ordering {
        match (self.is_closed(), other.is_closed()) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            (false, false) => {}
        }
        match (self.is_manilha(*vira), other.is_manilha(*vira)) {
            (true, true) => self.suit.order().cmp(&other.suit.order()),
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => self.rank.strength().cmp(&other.rank.strength()),
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}{}]", self.rank, self.suit)
    }
}

/// Result of putting two cards against each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardContest {
    FirstWins,
    SecondWins,
    Draw,
}

impl CardContest {
    pub fn reversed(self) -> Self {
        match self {
            CardContest::FirstWins => CardContest::SecondWins,
            CardContest::SecondWins => CardContest::FirstWins,
            CardContest::Draw => CardContest::Draw,
        }
    }
}

/// Decide which of `first` and `second` wins under `vira`.
///
/// ```
/// use truco_rs::cards::{contest, Card, CardContest};
///
/// let vira: Card = "3c".parse().unwrap();
/// let manilha: Card = "4d".parse().unwrap();
/// let ace: Card = "As".parse().unwrap();
/// assert_eq!(contest(manilha, ace, vira), CardContest::FirstWins);
/// ```
pub fn contest(first: Card, second: Card, vira: Card) -> CardContest {
    match first.compare_value_to(&second, &vira) {
        Ordering::Greater => CardContest::FirstWins,
        Ordering::Less => CardContest::SecondWins,
        Ordering::Equal => CardContest::Draw,
    }
}

#[derive(Serialize, Deserialize)]
struct CardRepr {
    rank: Rank,
    suit: Suit,
}

impl TryFrom<CardRepr> for Card {
    type Error = CardError;
    fn try_from(repr: CardRepr) -> Result<Self, Self::Error> {
        Card::try_new(repr.rank, repr.suit)
    }
}

impl From<Card> for CardRepr {
    fn from(card: Card) -> Self {
        CardRepr { rank: card.rank, suit: card.suit }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CardParseError {
    #[error("invalid card: '{0}'")]
    Invalid(String),
    #[error(transparent)]
    Rank(#[from] RankParseError),
    #[error(transparent)]
    Suit(#[from] SuitParseError),
    #[error(transparent)]
    Card(#[from] CardError),
}

impl FromStr for Card {
    type Err = CardParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim().trim_start_matches('[').trim_end_matches(']');
        let mut chars = t.chars();
        let (rank_ch, suit_ch) = match (chars.next(), chars.next(), chars.next()) {
            (Some(r), Some(s), None) => (r, s),
            _ => return Err(CardParseError::Invalid(s.to_string())),
        };
        let rank = Rank::try_from(rank_ch)?;
        let suit = Suit::try_from(suit_ch)?;
        Ok(Card::try_new(rank, suit)?)
    }
}

/// Parse multiple cards separated by whitespace or commas.
///
/// ```
/// use truco_rs::cards::{parse_cards, Card, Rank, Suit};
///
/// let cards = parse_cards("As, 4d Xx").unwrap();
/// assert_eq!(cards[0], Card::try_new(Rank::Ace, Suit::Spades).unwrap());
/// assert_eq!(cards[1], Card::try_new(Rank::Four, Suit::Diamonds).unwrap());
/// assert!(cards[2].is_closed());
/// ```
pub fn parse_cards(input: &str) -> Result<Vec<Card>, CardParseError> {
    input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(Card::from_str)
        .collect()
}
