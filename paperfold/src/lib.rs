pub mod animation;
pub mod config;
pub mod element;
pub mod error;
pub mod fold;
pub mod render;
pub mod terminal;
pub mod transitions;

pub use animation::AnimationState;
pub use config::{EasingPair, EasingSet, FoldConfig};
pub use element::{Content, Element, find_element, find_element_mut};
pub use error::FoldError;
pub use fold::{FoldAction, FoldAnimator, FoldCallback, FoldGeometry, FoldMetrics, FoldState};
pub use render::render_lines;
pub use terminal::Terminal;
pub use transitions::{Easing, TransitionConfig, Transitions};
