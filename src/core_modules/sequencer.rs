// THEORY:
// The `Sequencer` walks the right-neighbour relation and lays every strip out in
// one left-to-right order.
//
// The relation coming out of the resolver is best-effort, so the walk has to
// tolerate dead ends, cycles and several disjoint chains:
// 1.  **Chain Growth**: from each strip not yet placed, follow `right_neighbor`
//     and collect a local chain.
// 2.  **Termination**: a chain ends at `None` (or an index past the end), at a
//     strip already in the chain (a cycle), or at a strip placed by an earlier
//     chain. It is then appended to the end of the result.
// 3.  **Splicing**: if the next strip is the current head of the result, the
//     chain was found to precede everything placed so far and is prepended.
//
// Every strip is placed exactly once, whatever the relation looks like.

use crate::core_modules::strip::{Strip, StripId};
use std::collections::VecDeque;
use tracing::debug;

/// The ordered strips plus how many separate chains had to be joined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    pub order: Vec<StripId>,
    pub chains: usize,
}

pub fn sequence(strips: &[Strip]) -> Sequence {
    let mut order: VecDeque<StripId> = VecDeque::with_capacity(strips.len());
    let mut placed = vec![false; strips.len()];
    let mut chains = 0;

    for start in 0..strips.len() {
        if placed[start] {
            continue;
        }

        let mut chain = vec![start];
        let mut current = start;
        let prepend = loop {
            match strips[current].right_neighbor {
                None => break false,
                Some(next) if next >= strips.len() => break false,
                Some(next) if chain.contains(&next) => break false,
                Some(next) if order.front() == Some(&next) => break true,
                Some(next) if placed[next] => break false,
                Some(next) => {
                    chain.push(next);
                    current = next;
                }
            }
        };

        for &id in &chain {
            placed[id] = true;
        }
        if prepend {
            for &id in chain.iter().rev() {
                order.push_front(id);
            }
        } else {
            order.extend(chain);
        }
        chains += 1;
    }

    debug!(strips = strips.len(), chains, "sequenced strips");
    Sequence {
        order: order.into(),
        chains,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linked(neighbors: &[Option<StripId>]) -> Vec<Strip> {
        neighbors
            .iter()
            .enumerate()
            .map(|(i, &right)| {
                let mut strip = Strip::new(i as u32, i as u32);
                strip.right_neighbor = right;
                strip
            })
            .collect()
    }

    fn assert_permutation(order: &[StripId], len: usize) {
        let mut sorted = order.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..len).collect::<Vec<_>>());
    }

    #[test]
    fn follows_a_single_chain() {
        let strips = linked(&[Some(2), None, Some(3), Some(1)]);
        let sequence = sequence(&strips);
        assert_eq!(sequence.order, vec![0, 2, 3, 1]);
        assert_eq!(sequence.chains, 1);
    }

    #[test]
    fn later_chain_is_prepended_onto_head() {
        // 0 -> 2 is found first; 1 -> 3 -> 0 runs into its head.
        let strips = linked(&[Some(2), Some(3), None, Some(0)]);
        let sequence = sequence(&strips);
        assert_eq!(sequence.order, vec![1, 3, 0, 2]);
        assert_eq!(sequence.chains, 2);
    }

    #[test]
    fn cycles_terminate() {
        let strips = linked(&[Some(1), Some(2), Some(0)]);
        let sequence = sequence(&strips);
        assert_eq!(sequence.order, vec![0, 1, 2]);
    }

    #[test]
    fn all_none_keeps_scan_order() {
        let strips = linked(&[None, None, None]);
        let sequence = sequence(&strips);
        assert_eq!(sequence.order, vec![0, 1, 2]);
        assert_eq!(sequence.chains, 3);
    }

    #[test]
    fn chain_into_placed_middle_is_appended() {
        // 2 points at 1, which is placed but is not the head.
        let strips = linked(&[Some(1), None, Some(1)]);
        let sequence = sequence(&strips);
        assert_eq!(sequence.order, vec![0, 1, 2]);
        assert_permutation(&sequence.order, 3);
    }

    #[test]
    fn non_injective_relation_places_everything_once() {
        let strips = linked(&[Some(3), Some(3), Some(3), None, Some(0)]);
        let sequence = sequence(&strips);
        assert_permutation(&sequence.order, 5);
        assert_eq!(sequence.order, vec![4, 0, 3, 1, 2]);
    }

    #[test]
    fn dangling_neighbor_ends_the_chain() {
        let strips = linked(&[Some(7), Some(0), None]);
        let sequence = sequence(&strips);
        assert_eq!(sequence.order, vec![1, 0, 2]);
        assert_permutation(&sequence.order, 3);
    }

    #[test]
    fn single_strip() {
        let strips = linked(&[None]);
        assert_eq!(sequence(&strips).order, vec![0]);
    }

    #[test]
    fn empty_input() {
        let sequence = sequence(&[]);
        assert!(sequence.order.is_empty());
        assert_eq!(sequence.chains, 0);
    }
}
