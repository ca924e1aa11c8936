mod error;
mod models;
mod ranking;

pub use error::{Result, StoreError};
pub use models::{CountryCode, NewPlayer, Player, PlayerId, PlayerName, PlayerUpdate};

use parking_lot::RwLock;
use rand::Rng;
use rand::seq::IndexedRandom;
use ranking::RankIndex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// In-memory leaderboard keeping every player addressable by id and by rank.
///
/// Clones share the same state. The record map, the rank index and the id
/// counter sit behind a single reader/writer lock: queries take it shared,
/// mutations take it exclusive for their whole body, so no caller can observe
/// the map and the index out of step.
#[derive(Clone, Default)]
pub struct Store {
  inner: Arc<RwLock<Inner>>,
}

#[derive(Debug)]
struct Inner {
  players: HashMap<PlayerId, Player>,
  ranking: RankIndex,
  next_id: PlayerId,
}

impl Default for Inner {
  fn default() -> Self {
    Self {
      players: HashMap::new(),
      ranking: RankIndex::new(),
      next_id: 1,
    }
  }
}

/// Score of a ranked id. An id in the index without a record is a broken
/// invariant, not a caller error.
fn ranked_score(players: &HashMap<PlayerId, Player>, id: PlayerId) -> i64 {
  match players.get(&id) {
    Some(player) => player.score,
    None => panic!("ranked player {id} has no record"),
  }
}

impl Inner {
  fn record_at(&self, pos: usize) -> Option<&Player> {
    let id = self.ranking.get(pos)?;
    match self.players.get(&id) {
      Some(player) => Some(player),
      None => panic!("ranked player {id} has no record"),
    }
  }

  fn unrank(&mut self, id: PlayerId, score: i64) {
    let Inner {
      players, ranking, ..
    } = self;
    if ranking
      .remove(id, score, |other| ranked_score(players, other))
      .is_none()
    {
      panic!("player {id} is missing from the ranking");
    }
  }

  fn rank(&mut self, id: PlayerId, score: i64) -> usize {
    let Inner {
      players, ranking, ..
    } = self;
    ranking.insert(id, score, |other| ranked_score(players, other))
  }
}

impl Store {
  /// Create an empty store. The first player created gets id 1.
  pub fn new() -> Self {
    Self::default()
  }

  /// Number of players currently stored.
  pub fn len(&self) -> usize {
    self.inner.read().ranking.len()
  }

  pub fn is_empty(&self) -> bool {
    self.inner.read().ranking.is_empty()
  }

  // ========================================================================
  // Queries
  // ========================================================================

  /// All players, best score first (index 0 is rank 1).
  /// Returns `NoPlayers` when the store is empty.
  pub fn list_by_rank(&self) -> Result<Vec<Player>> {
    let inner = self.inner.read();

    if inner.ranking.is_empty() {
      return Err(StoreError::NoPlayers);
    }

    let players = inner
      .ranking
      .iter()
      .map(|id| match inner.players.get(&id) {
        Some(player) => player.clone(),
        None => panic!("ranked player {id} has no record"),
      })
      .collect();

    Ok(players)
  }

  /// Player at a 1-based rank.
  /// Returns `RankOutOfRange` for rank 0 or a rank past the population.
  pub fn get_by_rank(&self, rank: usize) -> Result<Player> {
    let inner = self.inner.read();

    let out_of_range = || StoreError::RankOutOfRange {
      rank,
      population: inner.ranking.len(),
    };

    let pos = rank.checked_sub(1).ok_or_else(out_of_range)?;
    inner.record_at(pos).cloned().ok_or_else(out_of_range)
  }

  /// Uniformly chosen player, using the thread-local RNG.
  pub fn random(&self) -> Result<Player> {
    self.random_with(&mut rand::rng())
  }

  /// Uniformly chosen player, using the supplied RNG.
  pub fn random_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Player> {
    let inner = self.inner.read();

    let id = *inner
      .ranking
      .as_slice()
      .choose(rng)
      .ok_or(StoreError::NoPlayers)?;

    match inner.players.get(&id) {
      Some(player) => Ok(player.clone()),
      None => panic!("ranked player {id} has no record"),
    }
  }

  /// Player by id.
  pub fn get(&self, id: PlayerId) -> Result<Player> {
    self
      .inner
      .read()
      .players
      .get(&id)
      .cloned()
      .ok_or(StoreError::UnknownPlayer(id))
  }

  // ========================================================================
  // Mutations
  // ========================================================================

  /// Assign the next id and rank the new player after any equal scores.
  pub fn create(&self, new: NewPlayer) -> Player {
    let mut inner = self.inner.write();

    let id = inner.next_id;
    inner.next_id += 1;

    let player = Player::from_new(id, new);
    let pos = inner.rank(id, player.score);
    inner.players.insert(id, player.clone());

    debug!(id, score = player.score, rank = pos + 1, "created player");
    player
  }

  /// Apply a partial update. The stored record is replaced as a whole.
  ///
  /// The player only moves in the ranking when its score changes; a changed
  /// score is re-ranked after any players already holding that score.
  pub fn update(&self, id: PlayerId, update: PlayerUpdate) -> Result<Player> {
    let mut inner = self.inner.write();

    let current = inner
      .players
      .get(&id)
      .ok_or(StoreError::UnknownPlayer(id))?;
    let previous_score = current.score;
    let player = current.updated(&update);

    if player.score == previous_score {
      inner.players.insert(id, player.clone());
      debug!(id, score = player.score, "updated player in place");
      return Ok(player);
    }

    inner.unrank(id, previous_score);
    inner.players.insert(id, player.clone());
    let pos = inner.rank(id, player.score);

    debug!(
      id,
      previous_score,
      score = player.score,
      rank = pos + 1,
      "re-ranked player"
    );
    Ok(player)
  }

  /// Remove a player. Missing ids fail with `UnknownPlayer` and change nothing.
  pub fn delete(&self, id: PlayerId) -> Result<()> {
    let mut inner = self.inner.write();

    let score = inner
      .players
      .get(&id)
      .map(|player| player.score)
      .ok_or(StoreError::UnknownPlayer(id))?;

    inner.unrank(id, score);
    inner.players.remove(&id);

    debug!(id, score, "deleted player");
    Ok(())
  }

  /// Panics if the record map and the rank index disagree, or the index is
  /// out of order.
  #[cfg(test)]
  fn assert_consistent(&self) {
    let inner = self.inner.read();
    assert_eq!(inner.ranking.len(), inner.players.len());

    let mut seen = std::collections::HashSet::new();
    for id in inner.ranking.iter() {
      assert!(inner.players.contains_key(&id), "ranked id {id} has no record");
      assert!(seen.insert(id), "id {id} ranked twice");
      assert!(id < inner.next_id);
    }

    let scores: Vec<i64> = inner
      .ranking
      .iter()
      .map(|id| inner.players[&id].score)
      .collect();
    assert!(scores.windows(2).all(|pair| pair[0] >= pair[1]), "{scores:?}");
  }
}
