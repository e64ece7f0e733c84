//! Touch D-pad overlay
//!
//! Four circular buttons arranged around a center point anchored to a
//! bottom corner (or bottom center) of the viewport, clear of the device
//! safe area. Presses map to a direction and a configurable event name.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{DPAD_GAP, DPAD_MIN_EDGE_MARGIN, DPAD_PRESS_FLASH_MS, DPAD_RADIUS};
use crate::input::Direction;

/// Where the pad sits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DPadAnchor {
    #[default]
    BottomRight,
    BottomLeft,
    BottomCenter,
}

/// Device safe-area insets (px), e.g. from `env(safe-area-inset-*)`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SafeArea {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

/// Event names emitted per button
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DPadEvents {
    pub up: String,
    pub down: String,
    pub left: String,
    pub right: String,
}

impl Default for DPadEvents {
    fn default() -> Self {
        Self {
            up: Direction::Up.event_name().to_string(),
            down: Direction::Down.event_name().to_string(),
            left: Direction::Left.event_name().to_string(),
            right: Direction::Right.event_name().to_string(),
        }
    }
}

impl DPadEvents {
    pub fn name(&self, dir: Direction) -> &str {
        match dir {
            Direction::Up => &self.up,
            Direction::Down => &self.down,
            Direction::Left => &self.left,
            Direction::Right => &self.right,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DPadOptions {
    pub events: DPadEvents,
    /// Button radius (px)
    pub radius: f32,
    /// Spacing between the pad center and each button's inner edge (px)
    pub gap: f32,
    pub anchor: DPadAnchor,
}

impl Default for DPadOptions {
    fn default() -> Self {
        Self {
            events: DPadEvents::default(),
            radius: DPAD_RADIUS,
            gap: DPAD_GAP,
            anchor: DPadAnchor::default(),
        }
    }
}

/// Resolved button centers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DPadLayout {
    pub center: Vec2,
    pub up: Vec2,
    pub down: Vec2,
    pub left: Vec2,
    pub right: Vec2,
    pub radius: f32,
}

impl DPadLayout {
    pub fn compute(options: &DPadOptions, viewport: Vec2, inset: SafeArea) -> Self {
        let r = options.radius;
        let offset = r + options.gap;
        let outer = DPAD_MIN_EDGE_MARGIN.max(options.gap);
        // Center to the outermost button edge
        let half_extent = 2.0 * r + options.gap;

        let bottom = viewport.y - inset.bottom - outer - half_extent;
        let center = match options.anchor {
            DPadAnchor::BottomRight => Vec2::new(viewport.x - inset.right - outer - half_extent, bottom),
            DPadAnchor::BottomLeft => Vec2::new(inset.left + outer + half_extent, bottom),
            DPadAnchor::BottomCenter => Vec2::new(viewport.x / 2.0, bottom),
        };

        Self {
            center,
            up: center - Vec2::Y * offset,
            down: center + Vec2::Y * offset,
            left: center - Vec2::X * offset,
            right: center + Vec2::X * offset,
            radius: r,
        }
    }

    pub fn button(&self, dir: Direction) -> Vec2 {
        match dir {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    /// Button under `point`, if any (edge inclusive)
    pub fn hit_test(&self, point: Vec2) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|&dir| self.button(dir).distance_squared(point) <= self.radius * self.radius)
    }
}

/// A press the host should forward as an event
#[derive(Debug, Clone, PartialEq)]
pub struct DPadPress<'a> {
    pub dir: Direction,
    pub event: &'a str,
}

/// Attached/detached D-pad with press highlight timing
#[derive(Debug, Clone)]
pub struct DPadOverlay {
    options: DPadOptions,
    layout: Option<DPadLayout>,
    /// Highlighted button and when the highlight ends (ms)
    pressed: Option<(Direction, f64)>,
}

impl DPadOverlay {
    pub fn new(options: DPadOptions) -> Self {
        Self {
            options,
            layout: None,
            pressed: None,
        }
    }

    pub fn options(&self) -> &DPadOptions {
        &self.options
    }

    /// Place the buttons. No-op if already attached.
    pub fn attach(&mut self, viewport: Vec2, inset: SafeArea) {
        if self.layout.is_some() {
            return;
        }
        self.layout = Some(DPadLayout::compute(&self.options, viewport, inset));
        log::debug!("D-pad attached at {:?}", self.options.anchor);
    }

    /// Re-place after a viewport change; ignored while detached
    pub fn resize(&mut self, viewport: Vec2, inset: SafeArea) {
        if self.layout.is_some() {
            self.layout = Some(DPadLayout::compute(&self.options, viewport, inset));
        }
    }

    pub fn detach(&mut self) {
        self.layout = None;
        self.pressed = None;
    }

    pub fn is_attached(&self) -> bool {
        self.layout.is_some()
    }

    pub fn layout(&self) -> Option<&DPadLayout> {
        self.layout.as_ref()
    }

    /// Pointer down at `point`; highlights the hit button briefly
    pub fn press_at(&mut self, point: Vec2, now_ms: f64) -> Option<DPadPress<'_>> {
        let dir = self.layout.as_ref()?.hit_test(point)?;
        self.pressed = Some((dir, now_ms + DPAD_PRESS_FLASH_MS));
        Some(DPadPress {
            dir,
            event: self.options.events.name(dir),
        })
    }

    /// Pointer up/out: drop any highlight
    pub fn release(&mut self) {
        self.pressed = None;
    }

    pub fn is_highlighted(&self, dir: Direction, now_ms: f64) -> bool {
        matches!(self.pressed, Some((d, until)) if d == dir && now_ms < until)
    }
}

impl Default for DPadOverlay {
    fn default() -> Self {
        Self::new(DPadOptions::default())
    }
}
