//! Fold panel construction and instance-scoped styling.

use std::time::Duration;

use super::geometry::FoldGeometry;
use crate::config::EasingPair;
use crate::element::{Content, Element};
use crate::transitions::{Easing, TransitionConfig};

pub const FOLD: &str = "fold";
pub const FOLD_TOP: &str = "fold-top";
pub const FOLD_BOTTOM: &str = "fold-bottom";
pub const FOLD_INNER: &str = "fold-inner";
pub const FOLD_SHADING: &str = "fold-shading";
pub const FOLD_CONTENT: &str = "fold-content";

/// State marker set while the panels collapse and kept once closed.
pub const CLOSED: &str = "closed";
/// State marker on a fully closed container.
pub const HIDDEN: &str = "hidden";

/// Data attribute naming the animator instance that created an element.
pub const SCOPE_KEY: &str = "fold-scope";

pub(crate) fn is_owned(element: &Element, scope: &str) -> bool {
    element.get_data(SCOPE_KEY).is_some_and(|owner| owner == scope)
}

/// Build fold panel `geometry.index` with its two halves, each carrying one
/// clone of `snapshot`.
pub(crate) fn build_panel(
    scope: &str,
    geometry: &FoldGeometry,
    initial_height: f32,
    snapshot: &Content,
) -> Element {
    let id = format!("{scope}:fold-{}", geometry.index);

    let top = half(
        scope,
        &format!("{id}:top"),
        FOLD_TOP,
        geometry.half_height,
        content_layer(scope, &format!("{id}:top"), snapshot).top(geometry.top_offset),
    );
    let bottom = half(
        scope,
        &format!("{id}:bottom"),
        FOLD_BOTTOM,
        geometry.half_height,
        content_layer(scope, &format!("{id}:bottom"), snapshot).bottom(geometry.bottom_offset),
    );

    owned(scope, Element::box_().id(id).class(FOLD))
        .height(initial_height)
        .child(top)
        .child(bottom)
}

fn half(scope: &str, id: &str, class: &str, height: f32, content: Element) -> Element {
    let inner = owned(scope, Element::box_().id(format!("{id}:inner")).class(FOLD_INNER))
        .child(owned(
            scope,
            Element::box_()
                .id(format!("{id}:shading"))
                .class(FOLD_SHADING),
        ))
        .child(content);

    owned(scope, Element::box_().id(id).class(class))
        .height(height)
        .child(inner)
}

fn content_layer(scope: &str, id: &str, snapshot: &Content) -> Element {
    let id = format!("{id}:content");
    let clone = snapshot.clone_scoped(&id);
    owned(scope, Element::box_().id(id).class(FOLD_CONTENT)).content(clone)
}

fn owned(scope: &str, element: Element) -> Element {
    element.data(SCOPE_KEY, scope)
}

/// Set transition timing on every element of this instance inside `container`.
///
/// Panels get the height curve, halves the rotation curve, shading a linear
/// fade. Content clones are never entered, so nested widgets keep their own
/// timing.
pub(crate) fn apply_transitions(
    container: &mut Element,
    scope: &str,
    easing: EasingPair,
    duration: Duration,
) {
    for child in container.children_mut() {
        style_owned(child, scope, easing, duration);
    }
}

fn style_owned(element: &mut Element, scope: &str, easing: EasingPair, duration: Duration) {
    if !is_owned(element, scope) || element.has_class(FOLD_CONTENT) {
        return;
    }

    if element.has_class(FOLD) {
        element.transitions.height = Some(TransitionConfig::new(duration, easing.height));
    }
    if element.has_class(FOLD_TOP) || element.has_class(FOLD_BOTTOM) {
        element.transitions.transform = Some(TransitionConfig::new(duration, easing.rotate));
    }
    if element.has_class(FOLD_SHADING) {
        element.transitions.opacity = Some(TransitionConfig::new(duration, Easing::Linear));
    }

    for child in element.children_mut() {
        style_owned(child, scope, easing, duration);
    }
}

/// Set the height of every panel this instance owns. Returns how many changed.
pub(crate) fn set_panel_heights(container: &mut Element, scope: &str, height: f32) -> usize {
    let mut count = 0;
    for panel in container.children_mut() {
        if is_owned(panel, scope) && panel.has_class(FOLD) {
            panel.height = Some(height);
            count += 1;
        }
    }
    count
}
