//! Window geometry snapshots and appearance hints.

use webshim_common::{Color, Position, Size};

/// Light or dark chrome, derived from the page background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Appearance {
    Light,
    Dark,
}

impl Appearance {
    pub fn for_background(color: Color) -> Self {
        if color.is_dark() {
            Self::Dark
        } else {
            Self::Light
        }
    }
}

/// Everything a fullscreen or maximize transition may disturb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowGeometry {
    pub position: Position,
    pub size: Size,
    pub frameless: bool,
    pub maximized: bool,
}

/// Result of asking the tracker for a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Already in the requested state.
    Unchanged,
    /// Apply the new state; the prior geometry has been saved.
    Enter,
    /// Undo the state, then restore `restore` if present.
    Leave { restore: Option<WindowGeometry> },
}

/// Remembers the geometry from before the first fullscreen/maximize
/// transition so the inverse transition can put it back exactly.
///
/// One snapshot covers both modes: entering fullscreen while maximized
/// keeps the snapshot taken before maximizing, and it is only handed
/// back once neither mode is active.
#[derive(Debug, Default)]
pub struct GeometryTracker {
    saved: Option<WindowGeometry>,
    fullscreen: bool,
    maximized: bool,
}

impl GeometryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn is_maximized(&self) -> bool {
        self.maximized
    }

    pub fn saved(&self) -> Option<&WindowGeometry> {
        self.saved.as_ref()
    }

    pub fn fullscreen(&mut self, on: bool, current: impl FnOnce() -> WindowGeometry) -> Transition {
        let other = self.maximized;
        Self::toggle(&mut self.saved, &mut self.fullscreen, other, on, current)
    }

    pub fn maximized(&mut self, on: bool, current: impl FnOnce() -> WindowGeometry) -> Transition {
        let other = self.fullscreen;
        Self::toggle(&mut self.saved, &mut self.maximized, other, on, current)
    }

    fn toggle(
        saved: &mut Option<WindowGeometry>,
        flag: &mut bool,
        other_active: bool,
        on: bool,
        current: impl FnOnce() -> WindowGeometry,
    ) -> Transition {
        if *flag == on {
            return Transition::Unchanged;
        }
        *flag = on;
        if on {
            if saved.is_none() {
                *saved = Some(current());
            }
            Transition::Enter
        } else if other_active {
            Transition::Leave { restore: None }
        } else {
            Transition::Leave {
                restore: saved.take(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn windowed() -> WindowGeometry {
        WindowGeometry {
            position: Position::new(120, 80),
            size: Size::new(800, 600),
            frameless: false,
            maximized: false,
        }
    }

    #[test]
    fn appearance_follows_luminance() {
        assert_eq!(
            Appearance::for_background(Color::from_rgb(20, 20, 30)),
            Appearance::Dark
        );
        assert_eq!(
            Appearance::for_background(Color::from_rgb(240, 240, 240)),
            Appearance::Light
        );
    }

    #[test]
    fn fullscreen_round_trip_restores_snapshot() {
        let mut tracker = GeometryTracker::new();
        assert_eq!(tracker.fullscreen(true, windowed), Transition::Enter);
        assert!(tracker.is_fullscreen());
        assert_eq!(tracker.saved(), Some(&windowed()));
        assert_eq!(
            tracker.fullscreen(false, || unreachable!()),
            Transition::Leave {
                restore: Some(windowed())
            }
        );
        assert!(tracker.saved().is_none());
    }

    #[test]
    fn redundant_transitions_do_nothing() {
        let mut tracker = GeometryTracker::new();
        assert_eq!(tracker.fullscreen(false, || unreachable!()), Transition::Unchanged);
        tracker.fullscreen(true, windowed);
        assert_eq!(tracker.fullscreen(true, || unreachable!()), Transition::Unchanged);
    }

    #[test]
    fn snapshot_taken_only_before_first_transition() {
        let mut tracker = GeometryTracker::new();
        tracker.maximized(true, windowed);
        // The geometry seen while maximized must not replace the snapshot.
        assert_eq!(tracker.fullscreen(true, || unreachable!()), Transition::Enter);
        assert_eq!(
            tracker.fullscreen(false, || unreachable!()),
            Transition::Leave { restore: None }
        );
        assert!(tracker.is_maximized());
        assert_eq!(
            tracker.maximized(false, || unreachable!()),
            Transition::Leave {
                restore: Some(windowed())
            }
        );
    }

    #[test]
    fn maximize_round_trip_restores_snapshot() {
        let mut tracker = GeometryTracker::new();
        assert_eq!(tracker.maximized(true, windowed), Transition::Enter);
        assert_eq!(
            tracker.maximized(false, || unreachable!()),
            Transition::Leave {
                restore: Some(windowed())
            }
        );
    }
}
