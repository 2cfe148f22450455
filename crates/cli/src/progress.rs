use indicatif::{ProgressBar, ProgressStyle};

use storekit_core::{Location, StorageKind};

/// Spinner shown while a request to a remote store is in flight. Local
/// operations get a hidden bar.
pub fn request_spinner(location: &Location, msg: &str) -> ProgressBar {
    if location.kind == StorageKind::Local {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.set_message(format!("{msg} ({location})"));
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}
