use std::collections::HashSet;
use std::time::{Duration, Instant};

use paperfold::animation::{AnimationState, collect_element_ids};
use paperfold::{Easing, EasingSet, Element, Transitions};

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

fn default_curves() -> Vec<Easing> {
    let set = EasingSet::default();
    vec![
        set.opening.height,
        set.opening.rotate,
        set.closing.height,
        set.closing.rotate,
    ]
}

// =============================================================================
// Easing Function Tests
// =============================================================================

#[test]
fn test_easing_presets() {
    assert_eq!(Easing::Linear.apply(0.25), 0.25);
    assert_eq!(Easing::EaseIn.apply(0.5), 0.25);
    assert_eq!(Easing::EaseOut.apply(0.5), 0.75);
    assert_eq!(Easing::EaseInOut.apply(0.5), 0.5);
}

#[test]
fn test_easing_boundaries() {
    let mut all = vec![
        Easing::Linear,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
    ];
    all.extend(default_curves());

    for easing in all {
        assert_eq!(easing.apply(0.0), 0.0, "{easing} at 0");
        assert_eq!(easing.apply(1.0), 1.0, "{easing} at 1");
        // Progress outside the unit interval clamps
        assert_eq!(easing.apply(-0.5), 0.0, "{easing} below 0");
        assert_eq!(easing.apply(1.5), 1.0, "{easing} above 1");
    }
}

#[test]
fn test_cubic_bezier_monotonic() {
    for easing in default_curves() {
        let mut prev = 0.0;
        for i in 1..=20 {
            let t = i as f32 / 20.0;
            let val = easing.apply(t);
            assert!(val >= prev - 1e-5, "{easing} not monotonic at t={t}");
            prev = val;
        }
    }
}

#[test]
fn test_cubic_bezier_diagonal_is_linear() {
    let easing = Easing::cubic_bezier(0.0, 0.0, 1.0, 1.0);
    for t in [0.1, 0.3, 0.5, 0.7, 0.9] {
        assert!((easing.apply(t) - t).abs() < 1e-3, "at t={t}");
    }
}

#[test]
fn test_cubic_bezier_matches_ease_curve() {
    // CSS `ease` at x=0.5 lands near 0.8024
    let ease = Easing::cubic_bezier(0.25, 0.1, 0.25, 1.0);
    assert!((ease.apply(0.5) - 0.8024).abs() < 1e-3);
}

// =============================================================================
// Parsing
// =============================================================================

#[test]
fn test_parse_css_notation() {
    assert_eq!("linear".parse::<Easing>().unwrap(), Easing::Linear);
    assert_eq!("ease-in".parse::<Easing>().unwrap(), Easing::EaseIn);
    assert_eq!("ease-out".parse::<Easing>().unwrap(), Easing::EaseOut);
    assert_eq!(" ease-in-out ".parse::<Easing>().unwrap(), Easing::EaseInOut);
    assert_eq!(
        "cubic-bezier(0.1, 0, 0.75, 1)".parse::<Easing>().unwrap(),
        Easing::cubic_bezier(0.1, 0.0, 0.75, 1.0)
    );
    assert_eq!(
        "cubic-bezier(0.2,0,0.95,1)".parse::<Easing>().unwrap(),
        Easing::cubic_bezier(0.2, 0.0, 0.95, 1.0)
    );
}

#[test]
fn test_display_round_trips_css() {
    let easing = Easing::cubic_bezier(0.1, 0.0, 0.75, 1.0);
    assert_eq!(easing.to_string(), "cubic-bezier(0.1, 0, 0.75, 1)");
    assert_eq!(Easing::EaseInOut.to_string(), "ease-in-out");
}

#[test]
fn test_parse_rejects_garbage() {
    for input in [
        "bounce",
        "cubic-bezier(0.1, 0, 0.75)",
        "cubic-bezier(a, b, c, d)",
        "cubic-bezier(0.1, 0, 0.75, 1",
        "cubic-bezier(1.5, 0, 0.5, 1)",
        "cubic-bezier(0.5, 0, -0.1, 1)",
    ] {
        assert!(input.parse::<Easing>().is_err(), "{input}");
    }
}

#[test]
fn test_y_control_points_may_overshoot() {
    assert!("cubic-bezier(0.5, -0.5, 0.5, 1.5)".parse::<Easing>().is_ok());
}

// =============================================================================
// Transitions Builder Tests
// =============================================================================

#[test]
fn test_transitions_builder() {
    let t = Transitions::new()
        .height(ms(300), Easing::EaseOut)
        .opacity(ms(300), Easing::Linear);
    assert!(t.has_any());
    assert_eq!(t.height.map(|c| c.easing), Some(Easing::EaseOut));
    assert!(t.transform.is_none());
    assert!(!Transitions::new().has_any());
    assert_eq!(
        t.to_css().as_deref(),
        Some("height 300ms ease-out, opacity 300ms linear")
    );
    assert_eq!(Transitions::new().to_css(), None);
}

// =============================================================================
// Animation State Tests
// =============================================================================

fn panel(height: f32) -> Element {
    Element::box_()
        .id("panel")
        .height(height)
        .transitions(Transitions::new().height(ms(100), Easing::Linear))
}

#[test]
fn test_height_change_interpolates() {
    let mut state = AnimationState::new();
    let t0 = Instant::now();

    state.update(&panel(0.0), t0);
    assert!(state.height_at("panel", t0).is_none());

    state.update(&panel(10.0), t0);
    assert!(state.has_active_transitions(t0));
    let mid = state.height_at("panel", t0 + ms(50)).unwrap();
    assert!((mid - 5.0).abs() < 0.01);
    assert_eq!(state.height_at("panel", t0 + ms(100)), Some(10.0));
    assert!(!state.has_active_transitions(t0 + ms(100)));
}

#[test]
fn test_retarget_starts_from_current_value() {
    let mut state = AnimationState::new();
    let t0 = Instant::now();

    state.update(&panel(0.0), t0);
    state.update(&panel(10.0), t0);
    // Halfway through, reverse direction
    state.update(&panel(0.0), t0 + ms(50));
    let start = state.height_at("panel", t0 + ms(50)).unwrap();
    assert!((start - 5.0).abs() < 0.01);
}

#[test]
fn test_no_transition_without_config() {
    let mut state = AnimationState::new();
    let t0 = Instant::now();
    state.update(&Element::box_().id("plain").height(0.0), t0);
    state.update(&Element::box_().id("plain").height(10.0), t0);
    assert!(state.height_at("plain", t0).is_none());
}

#[test]
fn test_reduced_motion_skips_transitions() {
    let mut state = AnimationState::new();
    state.set_reduced_motion(true);
    let t0 = Instant::now();
    state.update(&panel(0.0), t0);
    state.update(&panel(10.0), t0);
    assert!(state.height_at("panel", t0).is_none());
}

#[test]
fn test_cleanup_drops_removed_elements() {
    let mut state = AnimationState::new();
    let t0 = Instant::now();
    state.update(&panel(0.0), t0);
    state.update(&panel(10.0), t0);

    let tree = Element::box_().id("root").child(Element::text("x").id("x"));
    let ids = collect_element_ids(&tree);
    assert_eq!(ids, HashSet::from(["root".to_string(), "x".to_string()]));

    state.cleanup(&ids);
    assert!(state.height_at("panel", t0).is_none());
}
