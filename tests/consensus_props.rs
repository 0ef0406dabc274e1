// tests/consensus_props.rs
//
// Invariant checks for the consensus engine, driven by small hand-built
// bundles rather than a property-test harness: weight renormalization,
// output ranges, idempotence, and the two monotonicity guarantees.

use film_consensus::{compute_consensus, RatingBundle, RatingObservation, RatingSource};

fn obs(raw: f64) -> RatingObservation {
    RatingObservation::new(raw)
}

/// A spread of bundles: empty, singletons, pairs, full house, malformed.
fn sample_bundles() -> Vec<RatingBundle> {
    vec![
        RatingBundle::new(),
        RatingBundle::new().with(RatingSource::Imdb, obs(8.0).with_votes(250_000)),
        RatingBundle::new().with(RatingSource::RtAudience, obs(70.0)),
        RatingBundle::new()
            .with(RatingSource::Imdb, obs(8.0))
            .with(RatingSource::RtCritic, obs(90.0)),
        RatingBundle::new()
            .with(RatingSource::Metacritic, obs(55.0))
            .with(RatingSource::Tmdb, obs(6.1).with_votes(900)),
        RatingSource::ALL.iter().map(|s| (*s, obs(64.0))).collect(),
        RatingBundle::new()
            .with(RatingSource::Imdb, obs(42.0)) // out of native range
            .with(RatingSource::Metacritic, obs(-3.0)),
    ]
}

#[test]
fn weights_sum_to_one_whenever_sources_are_present() {
    for b in sample_bundles() {
        let r = compute_consensus(&b);
        if b.is_empty() {
            assert!(r.weights_used.is_empty());
            continue;
        }
        let sum: f64 = r.weights_used.values().sum();
        assert!(
            (sum - 1.0).abs() < 1e-9,
            "weights must sum to 1.0 for {:?}, got {sum}",
            b
        );
    }
}

#[test]
fn outputs_stay_in_range() {
    for b in sample_bundles() {
        let r = compute_consensus(&b);
        if let Some(score) = r.consensus {
            assert!(score <= 100);
        } else {
            assert!(
                b.is_empty(),
                "null score only when the bundle has no usable sources"
            );
        }
        assert!(r.confidence <= 100);
        for v in r.normalized.values() {
            assert!((0.0..=100.0).contains(v), "normalized out of range: {v}");
        }
    }
}

#[test]
fn recomputation_is_idempotent() {
    for b in sample_bundles() {
        let first = compute_consensus(&b);
        let second = compute_consensus(&b);
        assert_eq!(first, second, "same bundle must yield identical results");
    }
}

#[test]
fn adding_a_source_at_the_blend_value_leaves_the_score_fixed() {
    let base = RatingBundle::new()
        .with(RatingSource::Imdb, obs(8.0))
        .with(RatingSource::RtCritic, obs(90.0));
    let before = compute_consensus(&base);
    assert_eq!(before.consensus, Some(85));

    // Metacritic exactly at the current blend.
    let extended = base.with(RatingSource::Metacritic, obs(85.0));
    let after = compute_consensus(&extended);
    assert_eq!(after.consensus, Some(85));
}

#[test]
fn adding_any_source_never_decreases_confidence() {
    let mut bundle = RatingBundle::new();
    let mut last = compute_consensus(&bundle).confidence;

    let additions = [
        (RatingSource::Metacritic, obs(40.0)),
        (RatingSource::RtCritic, obs(95.0)),
        (RatingSource::RtAudience, obs(10.0)),
        (RatingSource::Imdb, obs(7.0).with_votes(3_000)),
        (RatingSource::Tmdb, obs(7.2).with_votes(800)),
    ];
    for (source, o) in additions {
        bundle.insert(source, o);
        let now = compute_consensus(&bundle).confidence;
        assert!(
            now >= last,
            "confidence dropped from {last} to {now} after adding {source}"
        );
        last = now;
    }
}

#[test]
fn vote_volume_raises_confidence_with_breadth_held_equal() {
    let quiet = RatingBundle::new()
        .with(RatingSource::Imdb, obs(8.0).with_votes(0))
        .with(RatingSource::Tmdb, obs(8.0).with_votes(0));
    let loud = RatingBundle::new()
        .with(RatingSource::Imdb, obs(8.0).with_votes(1_000_000))
        .with(RatingSource::Tmdb, obs(8.0).with_votes(1_000_000));

    assert!(compute_consensus(&loud).confidence > compute_consensus(&quiet).confidence);
}

#[test]
fn audience_only_bundle_uses_the_equal_split_fallback() {
    let b = RatingBundle::new().with(RatingSource::RtAudience, obs(70.0));
    let r = compute_consensus(&b);
    assert_eq!(r.consensus, Some(70));
    assert!((r.weights_used[&RatingSource::RtAudience] - 1.0).abs() < 1e-9);
}
