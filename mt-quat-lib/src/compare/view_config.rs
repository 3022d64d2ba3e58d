use serde::{Deserialize, Serialize};

/// How the orientation panels are drawn. Missing fields in a profile file
/// fall back to the defaults below.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ViewConfig {
    pub elevation_deg: f64,
    pub azimuth_deg: f64,
    pub panel_width: usize,
    pub panel_height: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            elevation_deg: 25.0,
            azimuth_deg: 135.0,
            panel_width: 41,
            panel_height: 21,
        }
    }
}
