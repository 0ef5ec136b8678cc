use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::models::analytics::PortfolioSnapshot;

/// Total running time of the profit/loss counter.
pub const COUNTER_DURATION: Duration = Duration::from_millis(1500);

/// Number of frames the counter is split into.
pub const COUNTER_FRAMES: u32 = 60;

/// Ease-out quartic: fast start, gentle landing. `t` is clamped to [0, 1].
pub fn ease_out_quart(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(4)
}

/// One rendered state of the counter.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CounterFrame {
    /// 0 is the initial state, `COUNTER_FRAMES` the last one
    pub frame: u32,
    pub profit_loss_local: f64,
    pub profit_loss_percent: f64,
}

/// Interpolates the profit/loss figures from 0 up to the snapshot values.
///
/// Purely cosmetic. The frame sequence is available without a runtime via
/// [`CounterAnimation::frames`]; [`CounterAnimation::spawn`] plays it on a
/// tokio timer.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterAnimation {
    target_value: f64,
    target_percent: f64,
    frames: u32,
    duration: Duration,
}

impl CounterAnimation {
    pub fn new(snapshot: &PortfolioSnapshot) -> Self {
        Self {
            target_value: snapshot.profit_loss_local,
            target_percent: snapshot.profit_loss_percent,
            frames: COUNTER_FRAMES,
            duration: COUNTER_DURATION,
        }
    }

    /// Delay between two frames.
    pub fn interval(&self) -> Duration {
        self.duration / self.frames.max(1)
    }

    pub fn frame_count(&self) -> u32 {
        self.frames
    }

    pub fn frame_at(&self, frame: u32) -> CounterFrame {
        let frame = frame.min(self.frames);
        let eased = ease_out_quart(f64::from(frame) / f64::from(self.frames.max(1)));
        CounterFrame {
            frame,
            profit_loss_local: self.target_value * eased,
            profit_loss_percent: self.target_percent * eased,
        }
    }

    /// Frames 1 through `COUNTER_FRAMES`, in display order.
    pub fn frames(&self) -> impl Iterator<Item = CounterFrame> + '_ {
        (1..=self.frames).map(move |f| self.frame_at(f))
    }

    /// Play the animation on the current tokio runtime.
    ///
    /// Frames are published through a `watch` channel, starting from the
    /// zero frame. Dropping or cancelling the returned handle stops the timer.
    pub fn spawn(self) -> CounterHandle {
        let (tx, rx) = watch::channel(self.frame_at(0));
        let interval = self.interval();

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick fires immediately; frame 1 is due one interval in.
            ticker.tick().await;
            for frame in 1..=self.frames {
                ticker.tick().await;
                if tx.send(self.frame_at(frame)).is_err() {
                    break;
                }
            }
        });

        CounterHandle { task, rx }
    }
}

/// A running counter. Aborts its timer task when cancelled or dropped.
#[derive(Debug)]
pub struct CounterHandle {
    task: JoinHandle<()>,
    rx: watch::Receiver<CounterFrame>,
}

impl CounterHandle {
    /// A receiver that is notified on every new frame.
    pub fn subscribe(&self) -> watch::Receiver<CounterFrame> {
        self.rx.clone()
    }

    /// The most recently published frame.
    pub fn latest(&self) -> CounterFrame {
        *self.rx.borrow()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Stop the timer. Already published frames stay readable.
    pub fn cancel(&self) {
        self.task.abort();
    }

    /// Wait for the animation to end (completed or cancelled) and return
    /// the last frame it published.
    pub async fn wait(&mut self) -> CounterFrame {
        if !self.task.is_finished() {
            let _ = (&mut self.task).await;
        }
        self.latest()
    }
}

impl Drop for CounterHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
