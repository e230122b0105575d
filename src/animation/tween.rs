use cgmath::Vector3;

use super::easing::Easing;

/// Values a tween can interpolate.
pub trait Interpolate: Copy {
    fn interpolate(self, to: Self, t: f32) -> Self;
}

impl Interpolate for f32 {
    fn interpolate(self, to: Self, t: f32) -> Self {
        self + (to - self) * t
    }
}

impl Interpolate for Vector3<f32> {
    fn interpolate(self, to: Self, t: f32) -> Self {
        self + (to - self) * t
    }
}

/// Identifies one animation request.
///
/// Handles are never reused, so a handle from a superseded request stays
/// inactive forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TweenHandle(u64);

#[derive(Debug, Clone)]
struct Tween<K, V> {
    handle: TweenHandle,
    key: K,
    from: V,
    to: V,
    duration: f32,
    elapsed: f32,
    easing: Easing,
}

impl<K, V: Interpolate> Tween<K, V> {
    fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).min(1.0)
        }
    }

    fn sample(&self) -> V {
        self.from.interpolate(self.to, self.easing.apply(self.progress()))
    }
}

/// Drives time-based interpolation of values keyed by what they animate.
///
/// At most one tween runs per key. Requesting a new animation for a key
/// cancels the running one, and the new tween starts from whatever value
/// the caller passes as `from` (normally the current, partially animated
/// value).
#[derive(Debug, Clone)]
pub struct Tweener<K, V> {
    tweens: Vec<Tween<K, V>>,
    next_handle: u64,
}

impl<K, V> Default for Tweener<K, V> {
    fn default() -> Self {
        Self {
            tweens: Vec::new(),
            next_handle: 0,
        }
    }
}

impl<K, V> Tweener<K, V>
where
    K: Copy + PartialEq + std::fmt::Debug,
    V: Interpolate,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts animating `key` from `from` to `to`, replacing any tween
    /// already running on `key`.
    pub fn animate(&mut self, key: K, from: V, to: V, duration: f32, easing: Easing) -> TweenHandle {
        if let Some(previous) = self.active_handle(key) {
            log::debug!("Tween {previous:?} on {key:?} superseded");
            self.cancel(previous);
        }

        let handle = TweenHandle(self.next_handle);
        self.next_handle += 1;

        self.tweens.push(Tween {
            handle,
            key,
            from,
            to,
            duration: duration.max(0.0),
            elapsed: 0.0,
            easing,
        });

        handle
    }

    /// Stops a tween where it is. Returns `false` if it had already finished
    /// or been superseded.
    pub fn cancel(&mut self, handle: TweenHandle) -> bool {
        let before = self.tweens.len();
        self.tweens.retain(|tween| tween.handle != handle);
        self.tweens.len() != before
    }

    pub fn is_active(&self, handle: TweenHandle) -> bool {
        self.tweens.iter().any(|tween| tween.handle == handle)
    }

    pub fn active_handle(&self, key: K) -> Option<TweenHandle> {
        self.find(key).map(|tween| tween.handle)
    }

    /// Destination of the tween running on `key`.
    pub fn destination(&self, key: K) -> Option<V> {
        self.find(key).map(|tween| tween.to)
    }

    /// Destinations of every running tween, in request order.
    pub fn destinations(&self) -> impl Iterator<Item = (K, V)> + '_ {
        self.tweens.iter().map(|tween| (tween.key, tween.to))
    }

    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    /// Moves every tween forward by `dt` seconds and returns the sampled
    /// values. A tween that reaches its end reports its exact destination
    /// once and is then dropped.
    pub fn advance(&mut self, dt: f32) -> Vec<(K, V)> {
        let dt = dt.max(0.0);
        let mut samples = Vec::with_capacity(self.tweens.len());

        for tween in &mut self.tweens {
            tween.elapsed += dt;
            let value = if tween.progress() >= 1.0 {
                tween.to
            } else {
                tween.sample()
            };
            samples.push((tween.key, value));
        }

        self.tweens.retain(|tween| tween.progress() < 1.0);
        samples
    }

    fn find(&self, key: K) -> Option<&Tween<K, V>> {
        self.tweens.iter().find(|tween| tween.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Prop {
        A,
        B,
    }

    #[test]
    fn reaches_destination_and_retires() {
        let mut tweens = Tweener::new();
        let handle = tweens.animate(Prop::A, 0.0_f32, 10.0, 1.0, Easing::Linear);

        let halfway = tweens.advance(0.5);
        assert_eq!(halfway, vec![(Prop::A, 5.0)]);
        assert!(tweens.is_active(handle));

        let end = tweens.advance(0.75);
        assert_eq!(end, vec![(Prop::A, 10.0)]);
        assert!(!tweens.is_active(handle));
        assert!(tweens.is_empty());
        assert!(tweens.advance(0.1).is_empty());
    }

    #[test]
    fn same_key_request_cancels_previous_handle() {
        let mut tweens = Tweener::new();
        let first = tweens.animate(Prop::A, 0.0_f32, 1.0, 1.0, Easing::Linear);
        let second = tweens.animate(Prop::A, 0.3_f32, -1.0, 1.0, Easing::Linear);

        assert_ne!(first, second);
        assert!(!tweens.is_active(first));
        assert!(tweens.is_active(second));
        assert_eq!(tweens.len(), 1);
        assert_eq!(tweens.destination(Prop::A), Some(-1.0));
    }

    #[test]
    fn different_keys_run_side_by_side() {
        let mut tweens = Tweener::new();
        tweens.animate(Prop::A, 0.0_f32, 1.0, 1.0, Easing::Linear);
        tweens.animate(Prop::B, 0.0_f32, 2.0, 2.0, Easing::Linear);

        let samples = tweens.advance(1.0);
        assert_eq!(samples, vec![(Prop::A, 1.0), (Prop::B, 1.0)]);
        assert_eq!(tweens.len(), 1);
    }

    #[test]
    fn cancel_reports_whether_anything_stopped() {
        let mut tweens = Tweener::new();
        let handle = tweens.animate(Prop::B, 0.0_f32, 1.0, 1.0, Easing::Power2In);
        assert!(tweens.cancel(handle));
        assert!(!tweens.cancel(handle));
    }

    #[test]
    fn zero_duration_snaps_on_next_advance() {
        let mut tweens = Tweener::new();
        tweens.animate(Prop::A, Vector3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 2.0, 3.0), 0.0, Easing::Linear);
        let samples = tweens.advance(0.0);
        assert_eq!(samples, vec![(Prop::A, Vector3::new(1.0, 2.0, 3.0))]);
        assert!(tweens.is_empty());
    }
}
