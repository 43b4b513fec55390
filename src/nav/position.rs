// Vachanamrut Reader - offline-first reader core
// Copyright (C) 2026 Vachanamrut Reader contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.


//! Reading position within a context
//!
//! Drives the slider, progress readout and prev/next buttons.

use crate::content::DiscourseId;

/// Position of a discourse within its reading context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadingPosition {
    /// One-based display index
    pub index: usize,
    pub total: usize,
    pub has_prev: bool,
    pub has_next: bool,
}

/// Locate `id` in `context`. `None` when the context does not contain it.
pub fn position_in(context: &[DiscourseId], id: DiscourseId) -> Option<ReadingPosition> {
    let zero_based = context.iter().position(|&entry| entry == id)?;
    let total = context.len();
    Some(ReadingPosition {
        index: zero_based + 1,
        total,
        has_prev: zero_based > 0,
        has_next: zero_based < total - 1,
    })
}

/// The neighbor of `id` in `context`: offset -1 for prev, +1 for next.
pub fn neighbor(context: &[DiscourseId], id: DiscourseId, offset: isize) -> Option<DiscourseId> {
    let zero_based = context.iter().position(|&entry| entry == id)? as isize;
    let target = zero_based + offset;
    if target < 0 {
        return None;
    }
    context.get(target as usize).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTEXT: [DiscourseId; 5] = [10, 20, 30, 40, 50];

    #[test]
    fn middle_of_context_has_both_neighbors() {
        let position = position_in(&CONTEXT, 30).unwrap();
        assert_eq!(position.index, 3);
        assert_eq!(position.total, 5);
        assert!(position.has_prev);
        assert!(position.has_next);
    }

    #[test]
    fn edges_lose_one_direction() {
        let first = position_in(&CONTEXT, 10).unwrap();
        assert_eq!(first.index, 1);
        assert!(!first.has_prev);
        assert!(first.has_next);

        let last = position_in(&CONTEXT, 50).unwrap();
        assert_eq!(last.index, 5);
        assert!(last.has_prev);
        assert!(!last.has_next);
    }

    #[test]
    fn neighbors_follow_context_order() {
        assert_eq!(neighbor(&CONTEXT, 30, 1), Some(40));
        assert_eq!(neighbor(&CONTEXT, 30, -1), Some(20));
        assert_eq!(neighbor(&CONTEXT, 10, -1), None);
        assert_eq!(neighbor(&CONTEXT, 50, 1), None);
    }

    #[test]
    fn id_outside_context_has_no_position() {
        assert!(position_in(&CONTEXT, 99).is_none());
        assert!(neighbor(&CONTEXT, 99, 1).is_none());
    }
}
