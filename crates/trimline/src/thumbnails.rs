use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::asset::{Frame, SharedAsset};
use crate::time::RationalTime;

/// Token identifying one thumbnail run; results from older runs are stale.
pub type Generation = u64;

/// One image position in the strip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThumbnailSlot {
    pub image: Option<Frame>,
    /// True while a run that will fill this slot is still in flight.
    pub loading: bool,
}

/// Ordered slots across the strip; slot `i` shows the still at
/// `ceil(duration) * i / len` seconds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThumbnailSet {
    slots: Vec<ThumbnailSlot>,
}

impl ThumbnailSet {
    /// Empty slots waiting for a run.
    pub fn loading(count: usize) -> Self {
        Self {
            slots: vec![
                ThumbnailSlot {
                    image: None,
                    loading: true,
                };
                count
            ],
        }
    }

    /// Slots filled directly from caller-provided stills.
    pub fn from_images(images: Vec<Frame>) -> Self {
        Self {
            slots: images
                .into_iter()
                .map(|image| ThumbnailSlot {
                    image: Some(image),
                    loading: false,
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[ThumbnailSlot] {
        &self.slots
    }

    pub fn is_loading(&self) -> bool {
        self.slots.iter().any(|slot| slot.loading)
    }

    /// Images currently shown, skipping blank slots.
    pub fn images(&self) -> Vec<Frame> {
        self.slots
            .iter()
            .filter_map(|slot| slot.image.clone())
            .collect()
    }

    /// Slot whose horizontal span on a strip of `width` contains `x`.
    pub fn slot_at_x(&self, x: f64, width: f64) -> Option<&ThumbnailSlot> {
        if self.slots.is_empty() || width <= 0.0 || x < 0.0 {
            return None;
        }
        let slot_width = width / self.slots.len() as f64;
        let index = ((x / slot_width).floor() as usize).min(self.slots.len() - 1);
        self.slots.get(index)
    }

    fn publish_first(&mut self, frame: Frame) {
        if let Some(slot) = self.slots.first_mut() {
            slot.image = Some(frame);
        }
    }

    fn publish_batch(&mut self, frames: Vec<Option<Frame>>) {
        let mut frames = frames.into_iter();
        for slot in &mut self.slots {
            if let Some(Some(frame)) = frames.next() {
                slot.image = Some(frame);
            }
            slot.loading = false;
        }
    }
}

/// Results posted from the worker back to the interactive thread.
#[derive(Debug, Clone, PartialEq)]
pub enum ThumbnailMessage {
    FirstFrame {
        generation: Generation,
        frame: Frame,
    },
    Batch {
        generation: Generation,
        frames: Vec<Option<Frame>>,
    },
}

impl ThumbnailMessage {
    pub fn generation(&self) -> Generation {
        match self {
            Self::FirstFrame { generation, .. } | Self::Batch { generation, .. } => *generation,
        }
    }
}

/// Sample times for `frame_count` evenly spaced stills over `duration`.
///
/// The span is the duration rounded up to whole seconds, expressed on the
/// duration's timescale.
///
/// # Example
/// ```
/// use trimline::RationalTime;
/// use trimline::thumbnails::sample_times;
///
/// let times = sample_times(RationalTime::new(5_700, 600).expect("valid"), 4);
/// let values: Vec<i64> = times.iter().map(|time| time.value).collect();
/// assert_eq!(values, vec![0, 1_500, 3_000, 4_500]);
/// ```
pub fn sample_times(duration: RationalTime, frame_count: usize) -> Vec<RationalTime> {
    let total_seconds = duration.ceil_seconds() as f64;
    let timescale = duration.timescale.max(1);
    (0..frame_count)
        .map(|index| {
            let seconds = total_seconds * (index as f64 / frame_count as f64);
            RationalTime {
                value: (seconds * f64::from(timescale)) as i64,
                timescale,
            }
        })
        .collect()
}

/// Background thumbnail generator.
///
/// Every run gets a fresh [`Generation`]. Workers are never interrupted:
/// a superseded run finishes sampling and its messages are dropped by
/// [`ThumbnailPipeline::apply`], which only publishes the current
/// generation.
#[derive(Debug)]
pub struct ThumbnailPipeline {
    sender: Sender<ThumbnailMessage>,
    receiver: Receiver<ThumbnailMessage>,
    current: Generation,
}

impl Default for ThumbnailPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl ThumbnailPipeline {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            sender,
            receiver,
            current: 0,
        }
    }

    /// Marks every run so far as stale without starting a new one.
    pub fn invalidate(&mut self) -> Generation {
        self.current += 1;
        self.current
    }

    /// Starts sampling `asset` on a worker thread.
    pub fn start(&mut self, asset: SharedAsset, frame_count: usize) -> Generation {
        let generation = self.invalidate();
        let sender = self.sender.clone();
        let times = sample_times(asset.duration(), frame_count);
        info!(generation, frame_count, "thumbnail run started");

        thread::spawn(move || run_worker(generation, asset, times, sender));
        generation
    }

    /// Next posted message, if any, without blocking.
    pub fn try_next(&self) -> Option<ThumbnailMessage> {
        self.receiver.try_recv().ok()
    }

    /// Waits up to `timeout` for the next posted message.
    pub fn next_timeout(&self, timeout: Duration) -> Option<ThumbnailMessage> {
        match self.receiver.recv_timeout(timeout) {
            Ok(message) => Some(message),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Publishes `message` into `set` if it belongs to the current run.
    ///
    /// Returns whether anything was published.
    pub fn apply(&self, set: &mut ThumbnailSet, message: ThumbnailMessage) -> bool {
        let generation = message.generation();
        if generation != self.current {
            debug!(generation, current = self.current, "stale thumbnail result dropped");
            return false;
        }

        match message {
            ThumbnailMessage::FirstFrame { frame, .. } => set.publish_first(frame),
            ThumbnailMessage::Batch { frames, .. } => {
                let published = frames.iter().filter(|frame| frame.is_some()).count();
                set.publish_batch(frames);
                info!(generation, published, "thumbnail batch published");
            }
        }
        true
    }
}

fn run_worker(
    generation: Generation,
    asset: SharedAsset,
    times: Vec<RationalTime>,
    sender: Sender<ThumbnailMessage>,
) {
    let mut frames = Vec::with_capacity(times.len());
    for (index, time) in times.into_iter().enumerate() {
        match asset.sample_image(time) {
            Ok(frame) => {
                if index == 0 {
                    let _ = sender.send(ThumbnailMessage::FirstFrame {
                        generation,
                        frame: frame.clone(),
                    });
                }
                frames.push(Some(frame));
            }
            Err(error) => {
                warn!(generation, index, %error, "thumbnail sample failed");
                frames.push(None);
            }
        }
    }

    let _ = sender.send(ThumbnailMessage::Batch { generation, frames });
}
