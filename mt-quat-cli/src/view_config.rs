use std::{fs::read_to_string, path::Path};

use anyhow::{Context, Result};
use mt_quat_lib::compare::ViewConfig;

pub fn read_view_config<P: AsRef<Path>>(path: P) -> Result<ViewConfig> {
    let path = path.as_ref();
    let config = read_to_string(path)
        .with_context(|| format!("cannot read view config {}", path.display()))?;
    let config: ViewConfig = serde_json::from_str(&config)?;
    Ok(config)
}
