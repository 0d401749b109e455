// Copyright (c) Friend Focus Team
// SPDX-License-Identifier: Apache-2.0

//! Persistence access layer. Every operation is scoped to the owning user:
//! the user id is part of each filter, so ids belonging to someone else match
//! zero rows and fall through as silent no-ops.

pub mod activity;
pub mod closeness_tier;
pub mod event;
pub mod friend;
pub mod friend_activity;
pub mod note;

/// Pair each id with its positional sort order, starting at `base`.
///
/// This is the whole reorder contract: the caller asserts the list is the
/// complete ownership-filtered set, and each row's sort_order is rewritten to
/// its index. Ids repeated in the list produce one write per occurrence; ids
/// omitted keep their previous sort_order.
pub(crate) fn position_assignments(ids: &[i32], base: i32) -> Vec<(i32, i32)> {
    ids.iter()
        .enumerate()
        .map(|(position, id)| (*id, base + position as i32))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assigns_zero_based_positions() {
        assert_eq!(
            position_assignments(&[7, 3, 9], 0),
            vec![(7, 0), (3, 1), (9, 2)]
        );
    }

    #[test]
    fn assigns_one_based_positions() {
        assert_eq!(position_assignments(&[4, 2], 1), vec![(4, 1), (2, 2)]);
    }

    #[test]
    fn empty_list_is_a_no_op() {
        assert!(position_assignments(&[], 0).is_empty());
    }

    #[test]
    fn repeated_ids_each_get_their_occurrence_index() {
        assert_eq!(
            position_assignments(&[5, 5], 0),
            vec![(5, 0), (5, 1)]
        );
    }
}
