//! Score-ordered index of player ids.
//!
//! Highest score first. An id inserted with a score equal to existing entries
//! lands after all of them, so equal scores keep their arrival order.
//! Positional lookups are O(1). Insert and remove binary search for the slot
//! and then shift the tail of the vector, which is O(n) in the worst case.

use crate::models::PlayerId;

/// Ids sorted by descending score. Position 0 is rank 1.
#[derive(Debug, Default)]
pub(crate) struct RankIndex {
  ids: Vec<PlayerId>,
}

impl RankIndex {
  pub(crate) fn new() -> Self {
    Self { ids: Vec::new() }
  }

  pub(crate) fn len(&self) -> usize {
    self.ids.len()
  }

  pub(crate) fn is_empty(&self) -> bool {
    self.ids.is_empty()
  }

  /// Id at a 0-based position.
  pub(crate) fn get(&self, pos: usize) -> Option<PlayerId> {
    self.ids.get(pos).copied()
  }

  pub(crate) fn as_slice(&self) -> &[PlayerId] {
    &self.ids
  }

  pub(crate) fn iter(&self) -> impl Iterator<Item = PlayerId> + '_ {
    self.ids.iter().copied()
  }

  /// Insert `id` ranked by `score`, after every entry with an equal score.
  ///
  /// `score_of` resolves the score of ids already in the index.
  /// Returns the 0-based position the id was placed at.
  pub(crate) fn insert<F>(&mut self, id: PlayerId, score: i64, score_of: F) -> usize
  where
    F: Fn(PlayerId) -> i64,
  {
    let pos = self.ids.partition_point(|&other| score_of(other) >= score);
    self.ids.insert(pos, id);
    pos
  }

  /// Remove `id`, whose current score is `score`.
  ///
  /// Binary search narrows the scan to the run of entries sharing `score`.
  /// Returns the 0-based position the id was removed from, or `None` if it
  /// is not in that run.
  pub(crate) fn remove<F>(&mut self, id: PlayerId, score: i64, score_of: F) -> Option<usize>
  where
    F: Fn(PlayerId) -> i64,
  {
    let start = self.ids.partition_point(|&other| score_of(other) > score);
    let run = self.ids[start..].partition_point(|&other| score_of(other) == score);
    let pos = start + self.ids[start..start + run].iter().position(|&other| other == id)?;
    self.ids.remove(pos);
    Some(pos)
  }
}
