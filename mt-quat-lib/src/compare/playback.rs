use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use anyhow::{anyhow, Result};
use log::{debug, info};
use nalgebra::Quaternion;
use tokio::time::sleep;

use super::{ComparisonFrame, FrameRenderer};
use crate::common::{OrientationColumns, SensorTable};

/// Shared stop request. Listeners only set it, the playback loop polls it
/// between frames.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Exhausted,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Playing { row: usize },
    Stopped(StopReason),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackOptions {
    pub start: usize,
    pub skip: usize,
    pub interval: Duration,
}

impl Default for PlaybackOptions {
    fn default() -> Self {
        Self {
            start: 0,
            skip: 100,
            interval: Duration::from_millis(500),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlaybackSummary {
    pub frames_rendered: usize,
    pub flips: usize,
    pub max_error: f64,
    pub stop_reason: Option<StopReason>,
}

/// Steps through every `skip`-th row of a table starting at `start`.
pub struct Playback<'a> {
    table: &'a SensorTable,
    columns: OrientationColumns,
    options: PlaybackOptions,
    cancel: CancelFlag,
    state: PlaybackState,
    previous_quaternion: Option<Quaternion<f64>>,
    summary: PlaybackSummary,
}

impl<'a> Playback<'a> {
    pub fn new(table: &'a SensorTable, options: PlaybackOptions, cancel: CancelFlag) -> Result<Self> {
        if options.skip == 0 {
            return Err(anyhow!("row stride must be at least 1"));
        }
        let columns = table.orientation_columns()?;
        Ok(Self {
            table,
            columns,
            options,
            cancel,
            state: PlaybackState::Idle,
            previous_quaternion: None,
            summary: PlaybackSummary::default(),
        })
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn summary(&self) -> &PlaybackSummary {
        &self.summary
    }

    pub fn interval(&self) -> Duration {
        self.options.interval
    }

    /// Moves to the next row and returns its frame, or `None` once stopped.
    pub fn step(&mut self) -> Option<ComparisonFrame> {
        let row = match self.state {
            PlaybackState::Stopped(_) => return None,
            PlaybackState::Idle => self.options.start,
            PlaybackState::Playing { row } => row.saturating_add(self.options.skip),
        };

        if self.cancel.is_cancelled() {
            return self.stop(StopReason::Cancelled);
        }
        if row >= self.table.len() {
            return self.stop(StopReason::Exhausted);
        }

        self.state = PlaybackState::Playing { row };
        let frame = ComparisonFrame::from_table(
            self.table,
            &self.columns,
            row,
            self.previous_quaternion.as_ref(),
        );
        self.previous_quaternion = Some(frame.quaternion);

        self.summary.frames_rendered += 1;
        if frame.flipped {
            self.summary.flips += 1;
        }
        if frame.error > self.summary.max_error {
            self.summary.max_error = frame.error;
        }
        Some(frame)
    }

    fn stop(&mut self, reason: StopReason) -> Option<ComparisonFrame> {
        debug!("playback stopped: {:?}", reason);
        self.state = PlaybackState::Stopped(reason);
        self.summary.stop_reason = Some(reason);
        None
    }
}

/// Renders frames until the table runs out or the cancel flag is set,
/// sleeping `interval` after each frame.
pub async fn play(
    playback: &mut Playback<'_>,
    renderer: &mut impl FrameRenderer,
) -> Result<PlaybackSummary> {
    while let Some(frame) = playback.step() {
        renderer.render(&frame)?;
        sleep(playback.interval()).await;
    }

    let summary = playback.summary().clone();
    renderer.finish(&summary)?;
    info!(
        "rendered {} frames, stop reason: {:?}, flips: {}, max representation error: {:e}",
        summary.frames_rendered,
        summary.stop_reason,
        summary.flips,
        summary.max_error
    );
    Ok(summary)
}
