// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Scopedeck-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Scopedeck and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Paged navigation with slide transitions.
//!
//! [`SlidePages`] only tracks page indices and animation progress. Whoever
//! renders the pages asks it for [`PagePlacement`]s and shifts each page by
//! the returned offset; pages that are not placed are hidden, never dropped.

use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

use smallvec::SmallVec;
use tracing::warn;

pub const SLIDE_DURATION: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideDirection {
    Left,
    Right,
    Up,
    Down,
}

impl SlideDirection {
    /// Unit offset the incoming page starts from.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
            Self::Up => (0, 1),
            Self::Down => (0, -1),
        }
    }
}

impl FromStr for SlideDirection {
    type Err = InvalidDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            other => Err(InvalidDirection {
                token: other.to_owned(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidDirection {
    pub token: String,
}

impl fmt::Display for InvalidDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid slide direction: {:?}", self.token)
    }
}

impl std::error::Error for InvalidDirection {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

/// Where a page sits relative to the viewport origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagePlacement {
    pub page: usize,
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideOutcome {
    Started,
    AlreadyCurrent,
    InvalidDirection,
    OutOfRange,
}

#[derive(Debug, Clone, Copy)]
struct Transition {
    from: usize,
    to: usize,
    offset: (i32, i32),
    started: Instant,
}

#[derive(Debug, Clone)]
pub struct SlidePages {
    count: usize,
    current: usize,
    viewport: Viewport,
    duration: Duration,
    transition: Option<Transition>,
}

impl SlidePages {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            current: 0,
            viewport: Viewport::default(),
            duration: SLIDE_DURATION,
            transition: None,
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The page the controller is showing or sliding towards.
    pub fn target_index(&self) -> usize {
        self.transition.map_or(self.current, |t| t.to)
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Slides to `index`, parsing `direction` as `left`, `right`, `up` or `down`.
    pub fn slide_view(&mut self, index: usize, direction: &str, now: Instant) -> SlideOutcome {
        if index == self.target_index() {
            return SlideOutcome::AlreadyCurrent;
        }
        match direction.parse::<SlideDirection>() {
            Ok(direction) => self.slide(index, direction, now),
            Err(err) => {
                warn!("BUG: {err}");
                SlideOutcome::InvalidDirection
            }
        }
    }

    /// Slides to `index`. A transition still in flight is completed first.
    pub fn slide(&mut self, index: usize, direction: SlideDirection, now: Instant) -> SlideOutcome {
        if index == self.target_index() {
            return SlideOutcome::AlreadyCurrent;
        }
        if index >= self.count {
            warn!(index, count = self.count, "slide target out of range");
            return SlideOutcome::OutOfRange;
        }

        self.finish();
        self.transition = Some(Transition {
            from: self.current,
            to: index,
            offset: direction.offset(),
            started: now,
        });
        SlideOutcome::Started
    }

    /// Jumps to `index` without animation.
    pub fn set_current(&mut self, index: usize) {
        if index < self.count {
            self.transition = None;
            self.current = index;
        }
    }

    /// Snaps an in-flight transition to its end.
    pub fn finish(&mut self) {
        if let Some(transition) = self.transition.take() {
            self.current = transition.to;
        }
    }

    /// Advances the animation. Returns `true` when a transition completed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.transition {
            Some(t) if now.saturating_duration_since(t.started) >= self.duration => {
                self.finish();
                true
            }
            _ => false,
        }
    }

    /// Visible pages and their offsets at `now`.
    pub fn placements(&self, now: Instant) -> SmallVec<[PagePlacement; 2]> {
        let mut out = SmallVec::new();
        let Some(t) = self.transition else {
            out.push(PagePlacement {
                page: self.current,
                x: 0,
                y: 0,
            });
            return out;
        };

        let progress = if self.duration.is_zero() {
            1.0
        } else {
            (now.saturating_duration_since(t.started).as_secs_f64()
                / self.duration.as_secs_f64())
            .min(1.0)
        };
        let eased = ease_out_quad(progress);
        let full_x = f64::from(t.offset.0) * f64::from(self.viewport.width);
        let full_y = f64::from(t.offset.1) * f64::from(self.viewport.height);

        out.push(PagePlacement {
            page: t.from,
            x: (-full_x * eased).round() as i32,
            y: (-full_y * eased).round() as i32,
        });
        out.push(PagePlacement {
            page: t.to,
            x: (full_x * (1.0 - eased)).round() as i32,
            y: (full_y * (1.0 - eased)).round() as i32,
        });
        out
    }
}

fn ease_out_quad(t: f64) -> f64 {
    1.0 - (1.0 - t) * (1.0 - t)
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use tracing::Level;

    use super::{PagePlacement, SlideDirection, SlideOutcome, SlidePages, Viewport, SLIDE_DURATION};
    use crate::test_support::capture_logs;

    fn pages() -> SlidePages {
        let mut pages = SlidePages::new(3);
        pages.set_viewport(Viewport {
            width: 100,
            height: 40,
        });
        pages
    }

    #[test]
    fn sliding_to_current_page_is_a_noop() {
        let now = Instant::now();
        let mut pages = pages();
        assert_eq!(pages.slide_view(0, "right", now), SlideOutcome::AlreadyCurrent);
        assert!(!pages.is_animating());
        assert_eq!(pages.current_index(), 0);
    }

    #[test]
    fn invalid_direction_warns_once_and_keeps_page() {
        let now = Instant::now();
        let mut pages = pages();
        let (outcome, logs) = capture_logs(|| pages.slide_view(1, "sideways", now));

        assert_eq!(outcome, SlideOutcome::InvalidDirection);
        assert_eq!(pages.current_index(), 0);
        assert!(!pages.is_animating());
        assert_eq!(logs.count(Level::WARN), 1);
        assert!(logs.messages()[0].contains("sideways"));
    }

    #[test]
    fn transition_switches_current_only_on_completion() {
        let start = Instant::now();
        let mut pages = pages();
        assert_eq!(pages.slide_view(1, "right", start), SlideOutcome::Started);
        assert_eq!(pages.current_index(), 0);
        assert_eq!(pages.target_index(), 1);

        assert!(!pages.tick(start + Duration::from_millis(100)));
        assert_eq!(pages.current_index(), 0);

        assert!(pages.tick(start + SLIDE_DURATION));
        assert_eq!(pages.current_index(), 1);
        assert!(!pages.is_animating());
    }

    #[test]
    fn placements_ease_pages_across_the_viewport() {
        let start = Instant::now();
        let mut pages = pages();
        pages.slide(1, SlideDirection::Right, start);

        let begin = pages.placements(start);
        assert_eq!(begin[0], PagePlacement { page: 0, x: 0, y: 0 });
        assert_eq!(begin[1], PagePlacement { page: 1, x: 100, y: 0 });

        let half = pages.placements(start + SLIDE_DURATION / 2);
        assert_eq!(half[0].x, -75);
        assert_eq!(half[1].x, 25);

        let end = pages.placements(start + SLIDE_DURATION);
        assert_eq!(end[0].x, -100);
        assert_eq!(end[1].x, 0);
    }

    #[test]
    fn vertical_directions_use_viewport_height() {
        let start = Instant::now();
        let mut pages = pages();
        pages.slide(2, SlideDirection::Down, start);
        let begin = pages.placements(start);
        assert_eq!(begin[1], PagePlacement { page: 2, x: 0, y: -40 });
    }

    #[test]
    fn reentrant_slide_snaps_active_transition() {
        let start = Instant::now();
        let mut pages = pages();
        pages.slide(1, SlideDirection::Right, start);

        let later = start + Duration::from_millis(50);
        assert_eq!(pages.slide(1, SlideDirection::Right, later), SlideOutcome::AlreadyCurrent);
        assert_eq!(pages.current_index(), 0);

        assert_eq!(pages.slide(2, SlideDirection::Right, later), SlideOutcome::Started);
        assert_eq!(pages.current_index(), 1);
        assert_eq!(pages.target_index(), 2);

        assert_eq!(pages.slide(0, SlideDirection::Left, later), SlideOutcome::Started);
        assert_eq!(pages.current_index(), 2);
        assert_eq!(pages.target_index(), 0);
    }

    #[test]
    fn out_of_range_target_is_rejected() {
        let now = Instant::now();
        let mut pages = pages();
        assert_eq!(pages.slide(7, SlideDirection::Left, now), SlideOutcome::OutOfRange);
        assert_eq!(pages.current_index(), 0);
    }

    #[test]
    fn direction_tokens_parse() {
        assert_eq!("up".parse::<SlideDirection>(), Ok(SlideDirection::Up));
        assert_eq!(SlideDirection::Left.offset(), (-1, 0));
        assert!("Right".parse::<SlideDirection>().is_err());
    }
}
