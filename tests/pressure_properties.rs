use limtop::pressure::{
    Ceiling, NamedMetric, ResourceSample, compute_percentage, resolve_effective_ceiling,
    select_binding,
};
use proptest::prelude::*;

fn ceiling() -> impl Strategy<Value = Ceiling> {
    prop_oneof![
        1 => Just(Ceiling::Unlimited),
        4 => (0u64..=1_000_000).prop_map(Ceiling::Limited),
    ]
}

proptest! {
    #[test]
    fn percentage_is_never_negative(value in 0u64..=1_000_000, c in ceiling()) {
        let p = compute_percentage(&ResourceSample::new(value, c));
        prop_assert!(p >= 0.0);
        prop_assert!(p.is_finite());
    }

    #[test]
    fn percentage_matches_the_plain_ratio(value in 0u64..=1_000_000, max in 1u64..=1_000_000) {
        let p = compute_percentage(&ResourceSample::new(value, Ceiling::Limited(max)));
        let expected = 100.0 * value as f64 / max as f64;
        prop_assert!((p - expected).abs() <= expected.abs() * 1e-12);
    }

    #[test]
    fn percentage_is_monotone_in_usage(a in 0u64..=1_000_000, b in 0u64..=1_000_000, max in 1u64..=1_000_000) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let p_lo = compute_percentage(&ResourceSample::new(lo, Ceiling::Limited(max)));
        let p_hi = compute_percentage(&ResourceSample::new(hi, Ceiling::Limited(max)));
        prop_assert!(p_lo <= p_hi);
    }

    #[test]
    fn effective_ceiling_ignores_input_order(ceilings in prop::collection::vec(ceiling(), 0..8)) {
        let forward = resolve_effective_ceiling(ceilings.iter().copied());
        let mut reversed = ceilings.clone();
        reversed.reverse();
        prop_assert_eq!(forward, resolve_effective_ceiling(reversed));
    }

    #[test]
    fn effective_ceiling_associates(ceilings in prop::collection::vec(ceiling(), 2..8), split in 1usize..7) {
        let split = split.min(ceilings.len() - 1);
        let left = resolve_effective_ceiling(ceilings[..split].iter().copied());
        let right = resolve_effective_ceiling(ceilings[split..].iter().copied());
        let grouped = resolve_effective_ceiling([left, right]);
        prop_assert_eq!(grouped, resolve_effective_ceiling(ceilings.iter().copied()));
    }

    #[test]
    fn effective_ceiling_is_unlimited_only_when_all_are(ceilings in prop::collection::vec(ceiling(), 1..8)) {
        let resolved = resolve_effective_ceiling(ceilings.iter().copied());
        if ceilings.iter().any(|c| !c.is_unlimited()) {
            prop_assert!(!resolved.is_unlimited());
        } else {
            prop_assert!(resolved.is_unlimited());
        }
    }

    #[test]
    fn binding_pressure_is_the_maximum(samples in prop::collection::vec((0u64..=10_000, ceiling()), 1..6)) {
        let metrics: Vec<NamedMetric> = samples
            .iter()
            .map(|&(value, c)| NamedMetric::new("m", value, c))
            .collect();
        let binding = select_binding(&metrics).unwrap();
        for metric in &metrics {
            prop_assert!(compute_percentage(&metric.sample) <= binding.percent);
        }
    }
}
