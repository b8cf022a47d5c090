use super::*;
use std::{cell::RefCell, rc::Rc};

fn controller() -> (TransitionController, Rc<RefCell<Vec<Phase>>>) {
    let mut c = TransitionController::new(0, PhaseDurations::default()).unwrap();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    c.on_phase_change(move |p| sink.borrow_mut().push(p));
    (c, seen)
}

const SEQUENCE: [Phase; 5] = [
    Phase::Exiting,
    Phase::Overview,
    Phase::Panning,
    Phase::Entering,
    Phase::Immersed,
];

fn run_with_dt(dt: f64) -> Vec<Phase> {
    let (mut c, seen) = controller();
    assert!(c.start_transition(1));
    let mut guard = 0;
    while c.is_running() {
        c.update(dt);
        guard += 1;
        assert!(guard < 1_000_000, "transition never completed");
    }
    let out = seen.borrow().clone();
    out
}

#[test]
fn starts_settled() {
    let (c, _) = controller();
    assert!(!c.is_running());
    assert_eq!(c.state(), TransitionState::settled(0));
}

#[test]
fn phase_order_is_fixed_for_any_step_size() {
    for dt in [1.0 / 240.0, 1.0 / 60.0, 0.1, 0.7, 2.0, 5.0, 100.0] {
        assert_eq!(run_with_dt(dt), SEQUENCE.to_vec(), "dt = {dt}");
    }
}

#[test]
fn start_notifies_exiting_and_keeps_from() {
    let (mut c, seen) = controller();
    assert!(c.start_transition(1));
    let s = c.state();
    assert_eq!(s.phase, Phase::Exiting);
    assert_eq!(s.progress, 0.0);
    assert_eq!(s.from_portal, 0);
    assert_eq!(s.to_portal, 1);
    assert_eq!(*seen.borrow(), vec![Phase::Exiting]);
}

#[test]
fn second_trigger_while_running_is_ignored() {
    let (mut c, seen) = controller();
    assert!(c.start_transition(1));
    assert!(!c.start_transition(2));
    assert_eq!(c.state().to_portal, 1);
    assert_eq!(seen.borrow().len(), 1);

    c.update(1.0);
    assert!(!c.start_transition(2));
    assert_eq!(c.state().to_portal, 1);
}

#[test]
fn update_is_noop_when_idle() {
    let (mut c, seen) = controller();
    c.update(10.0);
    assert_eq!(c.state(), TransitionState::settled(0));
    assert!(seen.borrow().is_empty());
}

#[test]
fn progress_is_monotonic_and_clamped_within_phase() {
    let (mut c, _) = controller();
    c.start_transition(1);
    let mut last = (Phase::Exiting, 0.0);
    while c.is_running() {
        c.update(0.013);
        let s = c.state();
        assert!((0.0..=1.0).contains(&s.progress));
        if s.phase == last.0 {
            assert!(s.progress >= last.1, "{:?} regressed", s.phase);
        }
        last = (s.phase, s.progress);
    }
}

#[test]
fn partial_update_reports_fraction_of_phase() {
    let (mut c, _) = controller();
    c.start_transition(1);
    c.update(1.25);
    let s = c.state();
    assert_eq!(s.phase, Phase::Exiting);
    assert!((s.progress - 0.5).abs() < 1e-12);
}

#[test]
fn leftover_time_carries_into_next_phase() {
    let (mut c, _) = controller();
    c.start_transition(1);
    c.update(2.5 + 0.75);
    let s = c.state();
    assert_eq!(s.phase, Phase::Overview);
    assert!((s.progress - 0.5).abs() < 1e-12);
}

#[test]
fn completion_settles_on_target() {
    let (mut c, _) = controller();
    c.start_transition(1);
    for _ in 0..570 {
        c.update(1.0 / 60.0);
    }
    assert!(!c.is_running());
    assert_eq!(c.state(), TransitionState::settled(1));

    // A fresh transition starts from the new steady portal.
    assert!(c.start_transition(0));
    assert_eq!(c.state().from_portal, 1);
    assert_eq!(c.state().to_portal, 0);
}

#[test]
fn global_progress_spans_the_transition() {
    let (mut c, _) = controller();
    c.start_transition(1);
    let d = *c.durations();
    assert_eq!(c.state().global_progress(&d), 0.0);
    c.update(4.75);
    assert!((c.state().global_progress(&d) - 0.5).abs() < 1e-12);
}

#[test]
fn new_rejects_invalid_durations() {
    let bad = PhaseDurations {
        entering: -1.0,
        ..PhaseDurations::default()
    };
    assert!(TransitionController::new(0, bad).is_err());
}
