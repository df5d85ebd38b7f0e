use crate::app::App;
use crate::mpris::MprisHandle;

/// Publish the session state and the current track's display name; the
/// formatted "now playing" label stays in the UI.
pub fn update_mpris(mpris: &MprisHandle, app: &App) {
    mpris.publish(app.state(), app.current_track().map(str::to_string));
}
