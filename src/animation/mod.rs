//! # Tweening
//!
//! Time-based interpolation of drawer depths and camera vectors. A
//! [`Tweener`] owns every running animation for one value type and hands
//! back a [`TweenHandle`] per request, so callers can tell whether an
//! animation they started is still the one in charge.

pub mod easing;
pub mod tween;

pub use easing::Easing;
pub use tween::{Interpolate, TweenHandle, Tweener};
