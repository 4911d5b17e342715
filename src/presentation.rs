//! Presentation messages and the UI-side queue
//!
//! The sensor thread never touches presentation state. It posts
//! [`HeadingSample`]s into a channel; the UI thread owns the
//! [`PresentationQueue`] and drains it in FIFO order into a
//! [`HeadingPresenter`].

use std::time::Duration;

use crossbeam_channel::{Receiver, TryRecvError};

use crate::types::HeadingSample;

/// Pointer rotation duration
pub const POINTER_ANIMATION_DURATION: Duration = Duration::from_millis(500);

/// Rotation of the pointer from the previous bearing to the new one
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerAnimation {
    /// Start angle in degrees
    pub from: f32,
    /// End angle in degrees
    pub to: f32,
    /// Animation length
    pub duration: Duration,
    /// Extra repetitions after the first run
    pub repeat_count: u32,
    /// Whether the pointer holds the final frame once the animation ends
    pub fill_after: bool,
}

impl From<HeadingSample> for PointerAnimation {
    fn from(sample: HeadingSample) -> Self {
        Self {
            from: sample.previous,
            to: sample.current,
            duration: POINTER_ANIMATION_DURATION,
            repeat_count: 0,
            fill_after: true,
        }
    }
}

/// Everything the UI needs for one heading change
#[derive(Debug, Clone, PartialEq)]
pub struct PresentationUpdate {
    /// Rounded bearing text, e.g. `"273°"`
    pub readout: String,
    /// Pointer rotation
    pub animation: PointerAnimation,
}

impl From<HeadingSample> for PresentationUpdate {
    fn from(sample: HeadingSample) -> Self {
        Self {
            readout: readout(sample.current),
            animation: sample.into(),
        }
    }
}

/// Format a bearing for the numeric display
///
/// # Example
/// ```
/// use heading_fusion::presentation::readout;
///
/// assert_eq!(readout(272.6), "273°");
/// ```
pub fn readout(bearing: f32) -> String {
    format!("{}°", bearing.round() as i32)
}

/// UI-side consumer of heading updates
pub trait HeadingPresenter {
    /// Apply one update; called on the thread that owns the queue
    fn present(&mut self, update: PresentationUpdate);
}

impl<F> HeadingPresenter for F
where
    F: FnMut(PresentationUpdate),
{
    fn present(&mut self, update: PresentationUpdate) {
        self(update)
    }
}

/// Receiving end of the sensor-to-UI hand-off
///
/// Created together with a [`SharedEstimator`](crate::SharedEstimator).
#[derive(Debug)]
pub struct PresentationQueue {
    receiver: Receiver<HeadingSample>,
}

impl PresentationQueue {
    pub(crate) fn new(receiver: Receiver<HeadingSample>) -> Self {
        Self { receiver }
    }

    /// Number of samples waiting to be presented
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    /// Whether nothing is waiting
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }

    /// Take the oldest waiting sample without blocking
    pub fn try_next(&self) -> Option<HeadingSample> {
        match self.receiver.try_recv() {
            Ok(sample) => Some(sample),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Present everything currently queued, oldest first
    ///
    /// # Returns
    /// Number of updates presented
    pub fn run_pending<P: HeadingPresenter>(&self, presenter: &mut P) -> usize {
        let mut count = 0;
        for sample in self.receiver.try_iter() {
            presenter.present(sample.into());
            count += 1;
        }
        count
    }

    /// Present updates as they arrive until every sender is gone
    pub fn run<P: HeadingPresenter>(&self, presenter: &mut P) {
        for sample in self.receiver.iter() {
            presenter.present(sample.into());
        }
    }
}
