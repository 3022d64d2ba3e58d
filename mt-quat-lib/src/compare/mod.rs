mod ascii_renderer;
mod comparison_frame;
mod playback;
mod view_config;

use std::path::Path;

use anyhow::Result;

pub use ascii_renderer::AsciiRenderer;
pub use comparison_frame::{ComparisonFrame, QuaternionSource};
pub use playback::{
    play, CancelFlag, Playback, PlaybackOptions, PlaybackState, PlaybackSummary, StopReason,
};
pub use view_config::ViewConfig;

use crate::{common::SensorTable, ConfigError};

pub trait FrameRenderer {
    fn render(&mut self, frame: &ComparisonFrame) -> Result<()>;

    fn finish(&mut self, _summary: &PlaybackSummary) -> Result<()> {
        Ok(())
    }
}

/// Loads the table to compare. Fails before anything is drawn when `path`
/// is not a regular file.
pub fn load_comparison_table(path: &Path) -> Result<SensorTable> {
    if !path.is_file() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()).into());
    }
    SensorTable::read(path)
}
