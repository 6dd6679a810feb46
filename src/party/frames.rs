use super::colors::Color;
use super::gradient::stop_style;
use crate::svg::{Document, DocumentError, Selection};

/// Minimum time between two stop updates, in milliseconds
pub const FRAME_INTERVAL_MILLIS: f64 = 100.0;

/// The outcome of a single frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollableState {
    /// The document was changed and needs to be repainted
    Modified,
    /// Nothing changed since the previous frame
    Unmodified,
}

/// Something driven once per animation frame by the host
pub trait Pollable {
    /// Advance to `timestamp_millis`, as given by the host's frame clock
    fn frame(&mut self, document: &mut Document, timestamp_millis: f64) -> PollableState;
}

/// Cycles the stop colors of a gradient without relying on `<animate>` elements.
///
/// Every stop walks through the same ramp the declarative variant uses, so stop `i` shows
/// `colors[(i + step) % n]` where `step` advances `n` times per cycle. It never finishes.
#[derive(Debug, Clone)]
pub struct FrameAnimator {
    stops: Selection,
    colors: Vec<Color>,
    speed_millis: f64,
    start: Option<f64>,
    last_update: Option<f64>,
    last_step: Option<usize>,
}

impl FrameAnimator {
    pub fn new(stops: Selection, colors: Vec<Color>, speed_millis: u64) -> Self {
        Self { stops, colors, speed_millis: speed_millis.max(1) as f64, start: None, last_update: None, last_step: None }
    }

    /// The ramp step shown after `elapsed` milliseconds
    pub fn step_at(&self, elapsed: f64) -> usize {
        if self.colors.is_empty() {
            return 0;
        }
        let progress = elapsed.max(0.0) % self.speed_millis / self.speed_millis;
        ((progress * self.colors.len() as f64) as usize).min(self.colors.len() - 1)
    }

    fn paint(&self, document: &mut Document, step: usize) -> Result<(), DocumentError> {
        let colors = &self.colors;
        self.stops.attr_with(document, "style", |index, _| stop_style(&colors[(index + step) % colors.len()]))?;
        Ok(())
    }
}

impl Pollable for FrameAnimator {
    fn frame(&mut self, document: &mut Document, timestamp_millis: f64) -> PollableState {
        if self.colors.is_empty() || self.stops.is_empty() {
            return PollableState::Unmodified;
        }
        let Some(start) = self.start else {
            self.start = Some(timestamp_millis);
            self.last_update = Some(timestamp_millis);
            return PollableState::Unmodified;
        };
        if let Some(last_update) = self.last_update {
            if timestamp_millis - last_update < FRAME_INTERVAL_MILLIS {
                return PollableState::Unmodified;
            }
        }
        self.last_update = Some(timestamp_millis);

        let step = self.step_at(timestamp_millis - start);
        if self.last_step == Some(step) {
            return PollableState::Unmodified;
        }
        self.last_step = Some(step);
        match self.paint(document, step) {
            Ok(()) => PollableState::Modified,
            Err(e) => {
                tracing::warn!("could not paint frame step {step}: {e}");
                PollableState::Unmodified
            }
        }
    }
}
