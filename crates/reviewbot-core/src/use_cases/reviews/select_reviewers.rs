use std::collections::HashSet;

use rand::{seq::SliceRandom, Rng};
use reviewbot_models::User;

/// Pick up to `count` distinct users from `candidates`, skipping `excluded` ids.
///
/// When there are not more eligible users than `count`, all of them are
/// returned in candidate order. Otherwise the pick is uniform and without
/// replacement.
pub fn select_reviewers<R: Rng + ?Sized>(
    rng: &mut R,
    candidates: &[User],
    excluded: &[u64],
    count: usize,
) -> Vec<User> {
    let mut seen = HashSet::new();
    let eligible: Vec<&User> = candidates
        .iter()
        .filter(|u| !excluded.contains(&u.id))
        .filter(|u| seen.insert(u.id))
        .collect();

    if eligible.len() <= count {
        return eligible.into_iter().cloned().collect();
    }

    eligible
        .choose_multiple(rng, count)
        .map(|u| (*u).clone())
        .collect()
}
