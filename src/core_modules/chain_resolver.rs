// THEORY:
// The `ChainResolver` solves the association problem: given every strip's
// ranked left-neighbour guesses, decide which strip sits to the right of each.
//
// It reads the candidate lists backwards. If `S` is at rank `r` of
// `O.left_candidates`, then `O` claims to be `S`'s right neighbour with
// confidence rank `r`. Each round:
// 1.  For every target strip, gather all claimants at the current rank.
// 2.  No claimant: the target is provisionally rightmost (`None`) and joins the
//     unresolved set.
// 3.  One or more claimants: the claimant with the smallest score at this rank
//     wins. Equal scores go to the lowest strip index.
// 4.  If more than one strip is still unresolved, the next round loosens the
//     match to the next rank, over the unresolved strips only.
//
// Escalation stops after rank `MAX_ESCALATION_RANK`. What is left is not an
// error: the mapping may be partial, non-injective or cyclic, and the
// `Sequencer` is built to cope with all three.

use crate::core_modules::strip::{Strip, StripId};
use tracing::{debug, warn};

/// The last candidate rank consulted (ranks 0, 1 and 2 make three rounds).
pub const MAX_ESCALATION_RANK: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Resolution {
    /// Number of rounds that ran.
    pub rounds: usize,
    /// Strips still without a right neighbour after the last round.
    pub unresolved: Vec<StripId>,
}

/// Assigns `right_neighbor` on every strip, escalating through candidate ranks.
pub fn resolve(strips: &mut [Strip]) -> Resolution {
    let mut targets: Vec<StripId> = (0..strips.len()).collect();
    let mut rank = 0;

    loop {
        let mut unresolved = Vec::new();
        for &target in &targets {
            let neighbor = best_claimant(strips, target, rank);
            strips[target].right_neighbor = neighbor;
            if neighbor.is_none() {
                unresolved.push(target);
            }
        }
        debug!(rank, targets = targets.len(), unresolved = unresolved.len(), "resolution round");

        if unresolved.len() <= 1 || rank >= MAX_ESCALATION_RANK {
            if unresolved.len() > 1 {
                warn!(
                    unresolved = unresolved.len(),
                    "several strips still have no right neighbour; chains will be spliced in scan order"
                );
            }
            return Resolution {
                rounds: rank + 1,
                unresolved,
            };
        }

        targets = unresolved;
        rank += 1;
    }
}

/// The strip whose `rank`-th left candidate is `target` with the lowest score.
fn best_claimant(strips: &[Strip], target: StripId, rank: usize) -> Option<StripId> {
    strips
        .iter()
        .enumerate()
        .filter_map(|(id, strip)| {
            strip
                .left_candidates
                .get(rank)
                .filter(|candidate| candidate.strip == target)
                .map(|candidate| (id, candidate.score))
        })
        .min_by_key(|&(_, score)| score)
        .map(|(id, _)| id)
}
