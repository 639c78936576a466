//! Card identities: the immutable `(id, suit, rank)` triple.
//!
//! Two identities form a matching pair when they are distinct instances
//! (different ids) of the same face (equal suit and rank).

use serde::{Deserialize, Serialize};

/// Unique identifier of one physical card in the deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Card suit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    /// All suits in deck order.
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    /// Name used in saves and sprite keys.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Suit::Hearts => "hearts",
            Suit::Diamonds => "diamonds",
            Suit::Clubs => "clubs",
            Suit::Spades => "spades",
        }
    }
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Card rank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    #[serde(rename = "A")]
    Ace,
    #[serde(rename = "02")]
    Two,
    #[serde(rename = "03")]
    Three,
    #[serde(rename = "04")]
    Four,
    #[serde(rename = "05")]
    Five,
    #[serde(rename = "06")]
    Six,
    #[serde(rename = "07")]
    Seven,
    #[serde(rename = "08")]
    Eight,
    #[serde(rename = "09")]
    Nine,
    #[serde(rename = "10")]
    Ten,
    #[serde(rename = "J")]
    Jack,
    #[serde(rename = "Q")]
    Queen,
    #[serde(rename = "K")]
    King,
}

impl Rank {
    /// All ranks in deck order.
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Name used in saves and sprite keys.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "02",
            Rank::Three => "03",
            Rank::Four => "04",
            Rank::Five => "05",
            Rank::Six => "06",
            Rank::Seven => "07",
            Rank::Eight => "08",
            Rank::Nine => "09",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable identity of a card.
///
/// Equality (`==`) compares all three fields and is what persistence uses.
/// Gameplay pairing goes through [`CardIdentity::matches`] instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardIdentity {
    pub id: CardId,
    pub suit: Suit,
    pub rank: Rank,
}

impl CardIdentity {
    /// Create a new identity.
    #[must_use]
    pub const fn new(id: CardId, suit: Suit, rank: Rank) -> Self {
        Self { id, suit, rank }
    }

    /// The `(suit, rank)` face that decides matching.
    #[must_use]
    pub const fn face(&self) -> (Suit, Rank) {
        (self.suit, self.rank)
    }

    /// Check whether two cards form a pair.
    ///
    /// ```
    /// use pair_match::cards::{CardId, CardIdentity, Rank, Suit};
    ///
    /// let a = CardIdentity::new(CardId(0), Suit::Spades, Rank::Queen);
    /// let b = CardIdentity::new(CardId(1), Suit::Spades, Rank::Queen);
    /// let c = CardIdentity::new(CardId(2), Suit::Hearts, Rank::Queen);
    ///
    /// assert!(a.matches(&b));
    /// assert!(!a.matches(&c));
    /// assert!(!a.matches(&a)); // a card never pairs with itself
    /// ```
    #[must_use]
    pub fn matches(&self, other: &CardIdentity) -> bool {
        self.id != other.id && self.face() == other.face()
    }

    /// Sprite key for the presentation layer, e.g. `card_hearts_A`.
    #[must_use]
    pub fn sprite_key(&self) -> String {
        format!("card_{}_{}", self.suit, self.rank)
    }
}

impl std::fmt::Display for CardIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} of {}", self.id, self.rank, self.suit)
    }
}
