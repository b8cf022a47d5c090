use super::*;
use approx::assert_abs_diff_eq;

#[test]
fn phase_cycle_is_fixed() {
    let mut p = Phase::Immersed;
    let mut seen = vec![p];
    for _ in 0..5 {
        p = p.next();
        seen.push(p);
    }
    assert_eq!(
        seen,
        vec![
            Phase::Immersed,
            Phase::Exiting,
            Phase::Overview,
            Phase::Panning,
            Phase::Entering,
            Phase::Immersed,
        ]
    );
    assert_eq!(Phase::Panning.to_string(), "panning");
}

#[test]
fn default_table_totals_nine_and_a_half_seconds() {
    let d = PhaseDurations::default();
    d.validate().unwrap();
    assert_abs_diff_eq!(d.total(), 9.5, epsilon = 1e-12);
    assert_eq!(d.duration(Phase::Immersed), f64::INFINITY);
}

#[test]
fn shares_tile_the_unit_interval() {
    let d = PhaseDurations::default();
    let mut prev_end = 0.0;
    for phase in Phase::TIMED {
        let (start, end) = d.share(phase);
        assert_abs_diff_eq!(start, prev_end, epsilon = 1e-12);
        assert!(end > start);
        prev_end = end;
    }
    assert_abs_diff_eq!(prev_end, 1.0, epsilon = 1e-12);
    assert_eq!(d.share(Phase::Immersed), (0.0, 0.0));
}

#[test]
fn phase_to_global_is_continuous_at_boundaries() {
    let d = PhaseDurations::default();
    for w in Phase::TIMED.windows(2) {
        assert_abs_diff_eq!(
            d.phase_to_global(w[0], 1.0),
            d.phase_to_global(w[1], 0.0),
            epsilon = 1e-12
        );
    }
    assert_eq!(d.phase_to_global(Phase::Exiting, 0.0), 0.0);
    assert_abs_diff_eq!(d.phase_to_global(Phase::Entering, 1.0), 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(
        d.phase_to_global(Phase::Exiting, 0.5),
        1.25 / 9.5,
        epsilon = 1e-12
    );
}

#[test]
fn phase_to_global_clamps_local_progress() {
    let d = PhaseDurations::default();
    assert_eq!(
        d.phase_to_global(Phase::Overview, -1.0),
        d.phase_to_global(Phase::Overview, 0.0)
    );
    assert_eq!(
        d.phase_to_global(Phase::Overview, 9.0),
        d.phase_to_global(Phase::Overview, 1.0)
    );
    assert_eq!(d.phase_to_global(Phase::Immersed, 0.7), 0.0);
}

#[test]
fn validate_rejects_non_positive_durations() {
    let d = PhaseDurations {
        overview: 0.0,
        ..PhaseDurations::default()
    };
    assert!(d.validate().unwrap_err().to_string().contains("overview"));
    let d = PhaseDurations {
        panning: f64::NAN,
        ..PhaseDurations::default()
    };
    assert!(d.validate().is_err());
}
