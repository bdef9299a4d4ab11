//! Eased interpolation of the plane icon between poses.
//!
//! The logical pose jumps the moment an action fires. The view, however,
//! glides the icon there, so the sequencer also keeps the tween it would
//! render: positions ease over two seconds, headings over one.

use chrono::{DateTime, TimeDelta, Utc};
use keyframe::EasingFunction;
use keyframe::functions::EaseInOut;
use lingofly_core::geometry::{Heading, NormalizedPoint, Pose};
use lingofly_script::domain::entry::VisualAction;

const POSITION_TWEEN_MILLIS: i64 = 2000;
const HEADING_TWEEN_MILLIS: i64 = 1000;

/// Values that can be blended linearly.
pub trait Lerp: Copy {
    /// Blend from `self` to `other`; `t` in `[0, 1]`.
    #[must_use]
    fn lerp(self, other: Self, t: f64) -> Self;
}

impl Lerp for NormalizedPoint {
    fn lerp(self, other: Self, t: f64) -> Self {
        NormalizedPoint::lerp(self, other, t)
    }
}

impl Lerp for Heading {
    fn lerp(self, other: Self, t: f64) -> Self {
        Heading::lerp(self, other, t)
    }
}

/// An ease-in-out transition between two values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween<T> {
    from: T,
    to: T,
    started_at: DateTime<Utc>,
    duration: TimeDelta,
}

impl<T: Lerp> Tween<T> {
    /// Creates a tween that starts at `started_at` and lasts `duration`.
    #[must_use]
    pub fn new(from: T, to: T, started_at: DateTime<Utc>, duration: TimeDelta) -> Self {
        Self {
            from,
            to,
            started_at,
            duration,
        }
    }

    /// Fraction of the duration elapsed at `now`, clamped to `[0, 1]`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress(&self, now: DateTime<Utc>) -> f64 {
        let total = self.duration.num_milliseconds();
        if total <= 0 {
            return 1.0;
        }
        let elapsed = (now - self.started_at).num_milliseconds();
        (elapsed as f64 / total as f64).clamp(0.0, 1.0)
    }

    /// Whether the tween has reached its target at `now`.
    #[must_use]
    pub fn is_finished(&self, now: DateTime<Utc>) -> bool {
        self.progress(now) >= 1.0
    }

    /// The eased value at `now`.
    #[must_use]
    pub fn sample(&self, now: DateTime<Utc>) -> T {
        let progress = self.progress(now);
        if progress <= 0.0 {
            return self.from;
        }
        if progress >= 1.0 {
            return self.to;
        }
        self.from.lerp(self.to, EaseInOut.y(progress))
    }
}

/// The plane's logical pose together with the tweens that animate it.
#[derive(Debug, Clone)]
pub struct PlaneMotion {
    pose: Pose,
    position_tween: Option<Tween<NormalizedPoint>>,
    heading_tween: Option<Tween<Heading>>,
}

impl PlaneMotion {
    /// Starts at rest at `initial`.
    #[must_use]
    pub fn new(initial: Pose) -> Self {
        Self {
            pose: initial,
            position_tween: None,
            heading_tween: None,
        }
    }

    /// The logical pose: where the icon is headed, ignoring animation.
    #[must_use]
    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// Where the view should draw the icon at `now`.
    #[must_use]
    pub fn rendered(&self, now: DateTime<Utc>) -> Pose {
        Pose {
            position: self
                .position_tween
                .map_or(self.pose.position, |tween| tween.sample(now)),
            heading: self
                .heading_tween
                .map_or(self.pose.heading, |tween| tween.sample(now)),
        }
    }

    /// Whether any tween is still running at `now`.
    #[must_use]
    pub fn is_animating(&self, now: DateTime<Utc>) -> bool {
        self.position_tween.is_some_and(|t| !t.is_finished(now))
            || self.heading_tween.is_some_and(|t| !t.is_finished(now))
    }

    /// Applies an action at `now`. The heading and the position are
    /// overwritten independently; each new tween starts from wherever the
    /// icon is currently drawn.
    pub fn apply(&mut self, action: &VisualAction, now: DateTime<Utc>) {
        let drawn = self.rendered(now);
        if let Some(heading) = action.target_heading {
            self.heading_tween = Some(Tween::new(
                drawn.heading,
                heading,
                now,
                TimeDelta::milliseconds(HEADING_TWEEN_MILLIS),
            ));
            self.pose.heading = heading;
        }
        if let Some(position) = action.target_position {
            self.position_tween = Some(Tween::new(
                drawn.position,
                position,
                now,
                TimeDelta::milliseconds(POSITION_TWEEN_MILLIS),
            ));
            self.pose.position = position;
        }
    }
}
