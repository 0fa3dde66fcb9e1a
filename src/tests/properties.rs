use crate::counts::{Accumulate, Counts};
use crate::gallop::{count_adaptive, count_adaptive_observed, ProbeLog, ITERATION_TOLERANCE};
use crate::linear::count_linear;
use proptest::prelude::*;

/// Sorted vectors over a small alphabet so runs are common.
fn sorted_small_alphabet() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(0u8..8, 0..600).prop_map(|mut v| {
        v.sort_unstable();
        v
    })
}

/// Sorted vectors over the full byte range.
fn sorted_bytes() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..600).prop_map(|mut v| {
        v.sort_unstable();
        v
    })
}

proptest! {
    /// Property 1: Equivalence
    /// Both counters produce the same mapping on any sorted input.
    #[test]
    fn prop_equivalence(input in sorted_bytes()) {
        let linear = count_linear(&input);
        let adaptive = count_adaptive(&input).unwrap();
        prop_assert_eq!(linear.counts, adaptive.counts);
    }

    /// Property 2: Equivalence with long runs
    #[test]
    fn prop_equivalence_long_runs(input in sorted_small_alphabet()) {
        let linear = count_linear(&input);
        let adaptive = count_adaptive(&input).unwrap();
        prop_assert_eq!(linear.counts, adaptive.counts);
    }

    /// Property 3: Conservation
    /// Counts sum to the sequence length and keys are exactly the distinct values.
    #[test]
    fn prop_conservation(input in sorted_small_alphabet()) {
        let tally = count_adaptive(&input).unwrap();
        prop_assert_eq!(tally.counts.total(), input.len());

        let mut distinct = input.clone();
        distinct.dedup();
        prop_assert_eq!(tally.counts.len(), distinct.len());
        for value in &distinct {
            prop_assert!(tally.counts.get(value) > 0);
        }
    }

    /// Property 4: Bounded worst case
    /// The adaptive counter never needs more than length + tolerance operations.
    #[test]
    fn prop_bounded_operations(input in sorted_bytes()) {
        let tally = count_adaptive(&input).unwrap();
        prop_assert!(
            tally.operations <= input.len() + ITERATION_TOLERANCE,
            "{} operations for length {}",
            tally.operations,
            input.len()
        );
    }

    /// Property 5: Sub-linearity on skewed input
    /// All-but-one identical elements are classified in fewer than n operations.
    #[test]
    fn prop_skewed_sublinear(common: u8, len in 21usize..5000, odd_first: bool) {
        let mut input = vec![common; len - 1];
        let other = common.wrapping_add(1);
        if odd_first && other < common {
            input.insert(0, other);
        } else if other > common {
            input.push(other);
        } else {
            input.push(common);
        }

        let tally = count_adaptive(&input).unwrap();
        prop_assert_eq!(tally.counts.total(), len);
        prop_assert!(
            tally.operations < len,
            "{} operations for length {}",
            tally.operations,
            len
        );
    }

    /// Property 6: No re-probing
    /// Within one run's search, no index is probed twice.
    #[test]
    fn prop_no_reprobe(input in sorted_small_alphabet()) {
        let mut log = ProbeLog::new();
        let mut counts = Counts::new();
        count_adaptive_observed(&mut counts, &input, Accumulate::Fresh, &mut log).unwrap();

        for &(start, _) in &log.runs {
            let mut probes = log.probes_for(start);
            let probed = probes.len();
            probes.sort_unstable();
            probes.dedup();
            prop_assert_eq!(probes.len(), probed, "run at {} re-probed", start);
        }
    }

    /// Property 7: Runs tile the sequence
    /// Closed runs are contiguous, cover every index, and each is a maximal block.
    #[test]
    fn prop_runs_tile_sequence(input in sorted_small_alphabet()) {
        let mut log = ProbeLog::new();
        let mut counts = Counts::new();
        count_adaptive_observed(&mut counts, &input, Accumulate::Fresh, &mut log).unwrap();

        let mut next = 0;
        for &(start, end) in &log.runs {
            prop_assert_eq!(start, next);
            prop_assert!(input[start..=end].iter().all(|v| *v == input[start]));
            if end + 1 < input.len() {
                prop_assert_ne!(input[end + 1], input[end]);
            }
            next = end + 1;
        }
        prop_assert_eq!(next, input.len());
    }

    /// Property 8: Merge equals counting the concatenation
    #[test]
    fn prop_merge_accumulates(a in sorted_small_alphabet(), b in sorted_small_alphabet()) {
        let mut merged = Counts::new();
        count_adaptive_observed(&mut merged, &a, Accumulate::Fresh, &mut ()).unwrap();
        count_adaptive_observed(&mut merged, &b, Accumulate::Merge, &mut ()).unwrap();

        let mut both = a.clone();
        both.extend(b);
        prop_assert_eq!(merged, count_linear(&both).counts);
    }
}

/// Bolero fuzz test: unsorted input never trips a guard
#[cfg(test)]
#[test]
fn fuzz_unsorted_no_error() {
    bolero::check!().with_type::<Vec<u8>>().for_each(|input| {
        let tally = count_adaptive(input).expect("guards must hold on any input");

        // Order is not checked, but every element still lands in some run
        assert_eq!(tally.counts.total(), input.len());
        assert!(tally.operations <= input.len() + ITERATION_TOLERANCE);
    });
}

/// Bolero fuzz test: sorted input matches the baseline
#[cfg(test)]
#[test]
fn fuzz_sorted_equivalence() {
    bolero::check!()
        .with_type::<Vec<u8>>()
        .for_each(|input| {
            let mut data = input.clone();
            data.sort_unstable();

            let linear = count_linear(&data);
            let adaptive = count_adaptive(&data).unwrap();
            assert_eq!(
                linear.counts, adaptive.counts,
                "counters disagree on {:?}",
                data
            );
        });
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_concrete_scenario() {
        let data: Vec<char> = "aaaaabbccc".chars().collect();
        let linear = count_linear(&data);
        let adaptive = count_adaptive(&data).unwrap();

        let expected: Counts<char> = vec![('a', 5), ('b', 2), ('c', 3)].into_iter().collect();
        assert_eq!(linear.counts, expected);
        assert_eq!(adaptive.counts, expected);
        assert_eq!(linear.operations, 10);
        assert!(adaptive.operations < 10);
    }

    #[test]
    fn test_single_element_both_counters() {
        let linear = count_linear(&['q']);
        let adaptive = count_adaptive(&['q']).unwrap();
        assert_eq!(linear.operations, 1);
        assert_eq!(adaptive.operations, 1);
        assert_eq!(adaptive.counts.get(&'q'), 1);
    }

    #[test]
    fn test_distinct_integers() {
        let data: Vec<i64> = (0..1000).map(|i| i * 3 - 500).collect();
        let adaptive = count_adaptive(&data).unwrap();
        assert_eq!(adaptive.counts, count_linear(&data).counts);
        assert!(adaptive.operations <= data.len() + ITERATION_TOLERANCE);
    }

    #[test]
    fn test_strings() {
        let data = vec!["ant", "ant", "bee", "cat", "cat", "cat"];
        let adaptive = count_adaptive(&data).unwrap();
        assert_eq!(adaptive.counts.get(&"cat"), 3);
        assert_eq!(adaptive.counts.get(&"bee"), 1);
    }
}
