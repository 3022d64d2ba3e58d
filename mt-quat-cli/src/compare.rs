use std::io::stdout;

use anyhow::Result;
use log::info;
use mt_quat_lib::compare::{
    load_comparison_table, play, AsciiRenderer, CancelFlag, Playback, PlaybackOptions, ViewConfig,
};

use crate::{cancel_listener::spawn_cancel_listeners, view_config::read_view_config, CompareArgs};

pub async fn compare(args: CompareArgs) -> Result<()> {
    let table = load_comparison_table(&args.csv)?;
    info!(
        "loaded {} rows from {}{}",
        table.len(),
        args.csv.display(),
        if table.has_quaternion_columns() {
            ""
        } else {
            ", no quaternion columns, computing them per frame"
        }
    );

    let view = match &args.view {
        Some(path) => read_view_config(path)?,
        None => ViewConfig::default(),
    };

    let cancel = CancelFlag::new();
    let mut playback = Playback::new(
        &table,
        PlaybackOptions {
            start: args.start,
            skip: args.skip,
            interval: args.interval,
        },
        cancel.clone(),
    )?;
    spawn_cancel_listeners(cancel);

    let mut renderer = AsciiRenderer::new(stdout(), view);
    play(&mut playback, &mut renderer).await?;
    Ok(())
}
