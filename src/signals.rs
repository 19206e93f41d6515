use signal_hook::{
    consts::{SIGINT, SIGTERM},
    iterator::Signals,
};

/// Tell systemd we are up. Best-effort: outside systemd this is a no-op.
pub fn notify_ready() {
    let _ = sd_notify::notify(true, &[sd_notify::NotifyState::Ready]);
}

/// What should we do when the user stops this program?
///
/// Events are handled one at a time and nothing is buffered, so there is
/// nothing to drain: report stopping and leave.
pub fn handle_shutdown() {
    let mut signals =
        Signals::new([SIGINT, SIGTERM]).expect("No signals :(. This really should never happen");

    std::thread::spawn(move || {
        if let Some(signal) = signals.forever().next() {
            log::info!("Received signal {signal}, shutting down");
            let _ = sd_notify::notify(true, &[sd_notify::NotifyState::Stopping]);
            std::process::exit(0);
        }
    });
}
