//! Position planning for ordered scopes.
//!
//! Topics are ordered within a collection and words within a topic. Display
//! order is always `(position, id)`, so gaps left by deletes are harmless
//! until the next reorder closes them.

use std::collections::HashSet;

use crate::error::{CoreError, Result};
use crate::types::ClientId;

/// A single position write produced by a reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionUpdate {
    pub id: i64,
    pub position: i32,
}

/// Position for an entity appended to a scope whose highest position is
/// `max_existing` (`None` when the scope is empty).
pub fn next_position(max_existing: Option<i32>) -> i32 {
    max_existing.map_or(0, |max| max + 1)
}

/// Resolve client-supplied ids, rejecting unparsable and repeated entries.
pub fn parse_ordering(ordering: &[ClientId]) -> Result<Vec<i64>> {
    let mut seen = HashSet::with_capacity(ordering.len());
    let mut ids = Vec::with_capacity(ordering.len());

    for raw in ordering {
        let id = raw.to_row_id()?;
        if !seen.insert(id) {
            return Err(CoreError::DuplicateId { id });
        }
        ids.push(id);
    }

    Ok(ids)
}

/// Turn a requested ordering into position writes.
///
/// `members` is the scope's current membership. The ordering must name every
/// member exactly once and nothing else; otherwise no writes are produced.
pub fn plan_reorder(members: &[i64], ordering: &[ClientId]) -> Result<Vec<PositionUpdate>> {
    let ids = parse_ordering(ordering)?;
    let member_set: HashSet<i64> = members.iter().copied().collect();

    if let Some(&id) = ids.iter().find(|id| !member_set.contains(id)) {
        return Err(CoreError::ForeignId { id });
    }

    let requested: HashSet<i64> = ids.iter().copied().collect();
    if let Some(&id) = members.iter().find(|id| !requested.contains(id)) {
        return Err(CoreError::MissingId { id });
    }

    Ok(ids
        .into_iter()
        .enumerate()
        .map(|(index, id)| PositionUpdate {
            id,
            position: index as i32,
        })
        .collect())
}
