use std::{io::stdin, thread};

use log::info;
use mt_quat_lib::compare::CancelFlag;

/// Ctrl-C or an Enter key press sets `cancel`; playback stops before its
/// next frame.
pub fn spawn_cancel_listeners(cancel: CancelFlag) {
    let on_ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Ctrl-C received, stopping playback");
            on_ctrl_c.cancel();
        }
    });

    // tokio's stdin would hold the runtime open at exit until a line arrives
    thread::spawn(move || {
        let mut line = String::new();
        if let Ok(read) = stdin().read_line(&mut line) {
            if read > 0 {
                info!("key press received, stopping playback");
                cancel.cancel();
            }
        }
    });
}
