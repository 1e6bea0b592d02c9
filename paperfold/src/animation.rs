use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

use crate::element::{Content, Element};
use crate::transitions::Easing;

/// A single active height transition.
#[derive(Debug, Clone)]
struct ActiveTransition {
    from: f32,
    to: f32,
    start: Instant,
    duration: Duration,
    easing: Easing,
}

impl ActiveTransition {
    fn value_at(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.start);
        let progress = if self.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
        };
        let eased = self.easing.apply(progress);
        self.from + (self.to - self.from) * eased
    }
}

/// Tracks element heights across frames and interpolates the ones that
/// changed on elements carrying a height transition.
///
/// Only heights are sampled; rotation and shading belong to the host
/// stylesheet.
#[derive(Debug, Default)]
pub struct AnimationState {
    /// Previous frame's height per element.
    heights: HashMap<String, f32>,
    /// Currently active transitions by element id.
    active: HashMap<String, ActiveTransition>,
    /// Reduced motion flag - when true, transitions complete instantly.
    reduced_motion: bool,
}

impl AnimationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable reduced motion (accessibility).
    pub fn set_reduced_motion(&mut self, enabled: bool) {
        self.reduced_motion = enabled;
        if enabled {
            self.active.clear();
        }
    }

    /// Returns true if any transition is running at `now`.
    pub fn has_active_transitions(&self, now: Instant) -> bool {
        self.active
            .values()
            .any(|t| now.saturating_duration_since(t.start) < t.duration)
    }

    /// Detect height changes in the tree and start transitions for them.
    pub fn update(&mut self, root: &Element, now: Instant) {
        self.active
            .retain(|_, t| now.saturating_duration_since(t.start) < t.duration);
        self.update_element(root, now);
    }

    fn update_element(&mut self, element: &Element, now: Instant) {
        if let Some(current) = element.height {
            let previous = self.heights.insert(element.id.clone(), current);
            if let (Some(previous), Some(config)) = (previous, element.transitions.height) {
                if previous != current && !self.reduced_motion {
                    // Retarget from wherever a running transition currently is.
                    let from = self
                        .active
                        .get(&element.id)
                        .map_or(previous, |existing| existing.value_at(now));
                    self.active.insert(
                        element.id.clone(),
                        ActiveTransition {
                            from,
                            to: current,
                            start: now,
                            duration: config.duration,
                            easing: config.easing,
                        },
                    );
                }
            }
        }

        if let Content::Children(children) = &element.content {
            for child in children {
                self.update_element(child, now);
            }
        }
    }

    /// Interpolated height of `element_id` at `now`.
    /// Returns None if the element has no active transition.
    pub fn height_at(&self, element_id: &str, now: Instant) -> Option<f32> {
        self.active.get(element_id).map(|t| t.value_at(now))
    }

    /// Remove transitions and snapshots for elements no longer in tree.
    pub fn cleanup(&mut self, current_ids: &HashSet<String>) {
        self.heights.retain(|id, _| current_ids.contains(id));
        self.active.retain(|id, _| current_ids.contains(id));
    }
}

/// Collect all element IDs from the tree.
pub fn collect_element_ids(element: &Element) -> HashSet<String> {
    let mut ids = HashSet::new();
    collect_ids_recursive(element, &mut ids);
    ids
}

fn collect_ids_recursive(element: &Element, ids: &mut HashSet<String>) {
    ids.insert(element.id.clone());
    if let Content::Children(children) = &element.content {
        for child in children {
            collect_ids_recursive(child, ids);
        }
    }
}
