// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Ordering of collected results.

use std::cmp::Ordering;

use crate::{
    metric::{Mode, SortKey},
    worker::RepoResult,
};

/// Sorts `results` by the metric of `mode`, largest first.
///
/// Unknown values compare greater than every known value, so repositories
/// that failed to report the ranked metric are listed first.
pub fn rank(results: &mut [RepoResult], mode: Mode,)
{
    let key = mode.sort_key();
    results.sort_by(|left, right| unknown_greatest(value(right, key,), value(left, key,),),);
}

fn value(result: &RepoResult, key: SortKey,) -> Option<u64,>
{
    match key {
        SortKey::Contributors => result.contributors,
        SortKey::Issues => result.issues,
        SortKey::Stars => result.stars,
    }
}

/// Ascending comparison that places `None` above every `Some`.
///
/// Called with swapped arguments to produce descending order.
fn unknown_greatest(left: Option<u64,>, right: Option<u64,>,) -> Ordering
{
    match (left, right,) {
        (Some(left,), Some(right,),) => left.cmp(&right,),
        (None, None,) => Ordering::Equal,
        (None, Some(_,),) => Ordering::Greater,
        (Some(_,), None,) => Ordering::Less,
    }
}
