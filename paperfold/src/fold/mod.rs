//! The fold animator.
//!
//! A cycle detaches the container's content, replaces it with fold panels
//! built from clones of that content, flips the panel heights after a short
//! delay so the host's transitions run, and restores the content once the
//! configured duration has elapsed.
//!
//! The animator owns no timers. The host calls [`FoldAnimator::tick`] from
//! its event loop and may use [`FoldAnimator::next_deadline`] to decide how
//! long to sleep.

mod geometry;
mod panel;

use std::fmt;
use std::time::Instant;

use log::{debug, trace, warn};

pub use geometry::{FoldGeometry, FoldMetrics};
pub use panel::{
    CLOSED, FOLD, FOLD_BOTTOM, FOLD_CONTENT, FOLD_INNER, FOLD_SHADING, FOLD_TOP, HIDDEN,
    SCOPE_KEY,
};

use crate::config::FoldConfig;
use crate::element::{Content, Element, find_element, find_element_mut, generate_id};
use crate::error::FoldError;

/// Where the widget is in its open/close cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoldState {
    Open,
    Opening,
    Closed,
    Closing,
}

impl FoldState {
    pub fn is_animating(self) -> bool {
        matches!(self, FoldState::Opening | FoldState::Closing)
    }
}

impl fmt::Display for FoldState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FoldState::Open => "open",
            FoldState::Opening => "opening",
            FoldState::Closed => "closed",
            FoldState::Closing => "closing",
        };
        f.write_str(name)
    }
}

/// Terminal state reported to completion callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoldAction {
    Open,
    Close,
}

impl FoldAction {
    pub fn as_str(self) -> &'static str {
        match self {
            FoldAction::Open => "open",
            FoldAction::Close => "close",
        }
    }

    fn settled_state(self) -> FoldState {
        match self {
            FoldAction::Open => FoldState::Open,
            FoldAction::Close => FoldState::Closed,
        }
    }

    fn running_state(self) -> FoldState {
        match self {
            FoldAction::Open => FoldState::Opening,
            FoldAction::Close => FoldState::Closing,
        }
    }
}

impl fmt::Display for FoldAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One-shot callback passed to `open_then`/`close_then`/`toggle_then`.
pub type FoldCallback = Box<dyn FnOnce(FoldAction)>;

/// A pending open or close cycle.
struct Cycle {
    action: FoldAction,
    flip_at: Instant,
    finish_at: Instant,
    flipped: bool,
    callback: Option<FoldCallback>,
}

/// Folds and unfolds the content of one container element.
pub struct FoldAnimator {
    /// Per-instance identifier prefixing every id this animator creates.
    scope: String,
    /// Id of the container in the host's tree.
    target: String,
    config: FoldConfig,
    metrics: FoldMetrics,
    state: FoldState,
    /// Detached content while panels are on screen.
    snapshot: Option<Content>,
    cycle: Option<Cycle>,
    on_complete: Option<Box<dyn FnMut(FoldAction)>>,
}

impl fmt::Debug for FoldAnimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FoldAnimator")
            .field("scope", &self.scope)
            .field("target", &self.target)
            .field("config", &self.config)
            .field("metrics", &self.metrics)
            .field("state", &self.state)
            .field("has_snapshot", &self.snapshot.is_some())
            .finish_non_exhaustive()
    }
}

impl FoldAnimator {
    /// Attach to the container `target` (an id, optionally `#`-prefixed).
    ///
    /// The widget starts `Closed` if the container carries the `hidden`
    /// marker and `Open` otherwise.
    pub fn new(root: &Element, target: &str, config: FoldConfig) -> Result<Self, FoldError> {
        config.validate()?;

        let target = target.strip_prefix('#').unwrap_or(target).to_string();
        let container =
            find_element(root, &target).ok_or_else(|| FoldError::NotAttached(target.clone()))?;
        let metrics = measure(container, None, &target, config.folds)?;
        let state = if container.has_class(HIDDEN) {
            FoldState::Closed
        } else {
            FoldState::Open
        };

        let scope = generate_id("paperfold");
        debug!(
            "{scope}: attached to '{target}' ({} folds of {} rows, {}ms)",
            metrics.folds, metrics.fold_height, config.duration_ms
        );

        Ok(Self {
            scope,
            target,
            config,
            metrics,
            state,
            snapshot: None,
            cycle: None,
            on_complete: None,
        })
    }

    /// Positional form: fold count and duration, everything else default.
    pub fn init(
        root: &Element,
        target: &str,
        folds: u16,
        duration_ms: u64,
    ) -> Result<Self, FoldError> {
        Self::new(
            root,
            target,
            FoldConfig::new().folds(folds).duration_ms(duration_ms),
        )
    }

    /// Callback fired when a cycle completes and no per-call callback was given.
    pub fn on_complete(mut self, callback: impl FnMut(FoldAction) + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    pub fn state(&self) -> FoldState {
        self.state
    }

    pub fn metrics(&self) -> FoldMetrics {
        self.metrics
    }

    pub fn config(&self) -> &FoldConfig {
        &self.config
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn is_animating(&self) -> bool {
        self.cycle.is_some()
    }

    /// Earliest instant at which [`tick`](Self::tick) has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.cycle.as_ref().map(|cycle| {
            if cycle.flipped {
                cycle.finish_at
            } else {
                cycle.flip_at.min(cycle.finish_at)
            }
        })
    }

    pub fn open(&mut self, root: &mut Element, now: Instant) -> Result<(), FoldError> {
        self.start(root, now, FoldAction::Open, None)
    }

    pub fn open_then(
        &mut self,
        root: &mut Element,
        now: Instant,
        callback: impl FnOnce(FoldAction) + 'static,
    ) -> Result<(), FoldError> {
        self.start(root, now, FoldAction::Open, Some(Box::new(callback)))
    }

    pub fn close(&mut self, root: &mut Element, now: Instant) -> Result<(), FoldError> {
        self.start(root, now, FoldAction::Close, None)
    }

    pub fn close_then(
        &mut self,
        root: &mut Element,
        now: Instant,
        callback: impl FnOnce(FoldAction) + 'static,
    ) -> Result<(), FoldError> {
        self.start(root, now, FoldAction::Close, Some(Box::new(callback)))
    }

    /// Open a closed widget, close an open one.
    pub fn toggle(&mut self, root: &mut Element, now: Instant) -> Result<(), FoldError> {
        let action = self.toggle_action();
        self.start(root, now, action, None)
    }

    pub fn toggle_then(
        &mut self,
        root: &mut Element,
        now: Instant,
        callback: impl FnOnce(FoldAction) + 'static,
    ) -> Result<(), FoldError> {
        let action = self.toggle_action();
        self.start(root, now, action, Some(Box::new(callback)))
    }

    fn toggle_action(&self) -> FoldAction {
        match self.state {
            FoldState::Closed | FoldState::Closing => FoldAction::Open,
            FoldState::Open | FoldState::Opening => FoldAction::Close,
        }
    }

    fn start(
        &mut self,
        root: &mut Element,
        now: Instant,
        action: FoldAction,
        callback: Option<FoldCallback>,
    ) -> Result<(), FoldError> {
        if self.cycle.is_some() {
            debug!("{}: rejecting {action}, {} in flight", self.scope, self.state);
            return Err(FoldError::AnimationInProgress(self.state));
        }

        if self.state == action.settled_state() {
            debug!("{}: already {}, nothing to do", self.scope, self.state);
            self.complete(action, callback);
            return Ok(());
        }

        let container = find_element_mut(root, &self.target)
            .ok_or_else(|| FoldError::NotAttached(self.target.clone()))?;
        self.metrics = measure(
            container,
            self.snapshot.as_ref(),
            &self.target,
            self.config.folds,
        )?;

        let initial_height = match action {
            FoldAction::Open => 0.0,
            FoldAction::Close => self.metrics.fold_height,
        };
        self.prepare(container, initial_height, action == FoldAction::Close);

        self.state = action.running_state();
        self.cycle = Some(Cycle {
            action,
            flip_at: now + self.config.flip_delay(),
            finish_at: now + self.config.duration(),
            flipped: false,
            callback,
        });
        debug!("{}: {} started", self.scope, self.state);
        Ok(())
    }

    /// Swap the container's content for freshly built panels.
    fn prepare(&mut self, container: &mut Element, initial_height: f32, closing: bool) {
        container.remove_class(HIDDEN);

        let snapshot = match self.snapshot.take() {
            Some(snapshot) => {
                // Left over from a cycle that finished while detached.
                container.content = Content::None;
                snapshot
            }
            None => std::mem::take(&mut container.content),
        };

        for geometry in self.metrics.iter() {
            container.push_child(panel::build_panel(
                &self.scope,
                &geometry,
                initial_height,
                &snapshot,
            ));
        }
        self.snapshot = Some(snapshot);

        panel::apply_transitions(
            container,
            &self.scope,
            self.config.easing.for_closing(closing),
            self.config.duration(),
        );
    }

    /// Run whatever deferred steps are due at `now`.
    ///
    /// The flip always runs before finalization, even when both fall due in
    /// the same tick. Returns the action that completed, if any.
    pub fn tick(&mut self, root: &mut Element, now: Instant) -> Option<FoldAction> {
        let cycle = self.cycle.as_ref()?;
        let action = cycle.action;
        let finish_due = now >= cycle.finish_at;
        let flip_due = !cycle.flipped && (finish_due || now >= cycle.flip_at);

        if flip_due {
            self.flip(root, action);
            if let Some(cycle) = self.cycle.as_mut() {
                cycle.flipped = true;
            }
        }

        if !finish_due {
            return None;
        }
        let cycle = self.cycle.take()?;
        self.finish(root, cycle);
        Some(action)
    }

    fn flip(&self, root: &mut Element, action: FoldAction) {
        let Some(container) = find_element_mut(root, &self.target) else {
            warn!("{}: container '{}' vanished before flip", self.scope, self.target);
            return;
        };

        let changed = match action {
            FoldAction::Open => {
                container.remove_class(CLOSED);
                panel::set_panel_heights(container, &self.scope, self.metrics.fold_height)
            }
            FoldAction::Close => {
                container.add_class(CLOSED);
                panel::set_panel_heights(container, &self.scope, 0.0)
            }
        };
        trace!("{}: flipped {changed} panels for {action}", self.scope);
    }

    fn finish(&mut self, root: &mut Element, cycle: Cycle) {
        match find_element_mut(root, &self.target) {
            Some(container) => {
                if let Some(snapshot) = self.snapshot.take() {
                    container.content = snapshot;
                }
                if cycle.action == FoldAction::Close {
                    container.add_class(HIDDEN);
                }
            }
            None => {
                warn!(
                    "{}: container '{}' vanished, keeping snapshot",
                    self.scope, self.target
                );
            }
        }

        self.state = cycle.action.settled_state();
        debug!("{}: {}", self.scope, self.state);
        self.complete(cycle.action, cycle.callback);
    }

    fn complete(&mut self, action: FoldAction, callback: Option<FoldCallback>) {
        match callback {
            Some(callback) => callback(action),
            None => {
                if let Some(on_complete) = self.on_complete.as_mut() {
                    on_complete(action);
                }
            }
        }
    }
}

/// Measure the container, preferring a retained snapshot over leftover panels.
fn measure(
    container: &Element,
    snapshot: Option<&Content>,
    target: &str,
    folds: u16,
) -> Result<FoldMetrics, FoldError> {
    let height = match (container.height, snapshot) {
        (Some(height), _) => height,
        (None, Some(snapshot)) => snapshot.intrinsic_height(),
        (None, None) => container.measured_height(),
    };
    if height <= 0.0 {
        return Err(FoldError::NotAttached(target.to_string()));
    }
    FoldMetrics::new(height, folds)
}
