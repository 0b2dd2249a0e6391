use crate::app::App;
use crate::mpris::MprisHandle;
use crate::worker::SessionView;

pub fn update_mpris(mpris: &MprisHandle, app: &App, view: &SessionView) {
    mpris.set_track(view.now_playing.as_ref());
    mpris.set_playback(app.playback);
}
