use arrayvec::ArrayString;

/// Identifier assigned by the store. Starts at 1 and is never reused.
pub type PlayerId = u64;

/// Player display name - max 15 bytes, stored inline (no heap allocation).
pub type PlayerName = ArrayString<15>;

/// Country code - max 2 bytes, stored inline.
pub type CountryCode = ArrayString<2>;

/// A ranked player as held by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
  /// Store-assigned identifier (immutable once issued)
  pub id: PlayerId,
  pub name: PlayerName,
  pub country: CountryCode,
  /// Ranking key; ties are allowed
  pub score: i64,
}

/// Attributes for a player that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPlayer {
  pub name: PlayerName,
  pub country: CountryCode,
  pub score: i64,
}

/// Partial update of a stored player.
///
/// Fields left as `None` keep their current value. Country has no slot here:
/// it is fixed at creation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerUpdate {
  pub name: Option<PlayerName>,
  pub score: Option<i64>,
}

impl PlayerUpdate {
  pub fn name(mut self, name: PlayerName) -> Self {
    self.name = Some(name);
    self
  }

  pub fn score(mut self, score: i64) -> Self {
    self.score = Some(score);
    self
  }

  /// True when the update carries no fields at all.
  pub fn is_empty(&self) -> bool {
    self.name.is_none() && self.score.is_none()
  }
}

impl Player {
  pub(crate) fn from_new(id: PlayerId, new: NewPlayer) -> Self {
    Self {
      id,
      name: new.name,
      country: new.country,
      score: new.score,
    }
  }

  /// Build the replacement record for `update`, keeping omitted fields.
  pub(crate) fn updated(&self, update: &PlayerUpdate) -> Self {
    Self {
      id: self.id,
      name: update.name.unwrap_or(self.name),
      country: self.country,
      score: update.score.unwrap_or(self.score),
    }
  }
}
