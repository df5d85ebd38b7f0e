//! MPRIS media controls on the session bus.
//!
//! Media keys and tools like `playerctl` issue the same transport commands as
//! the keyboard; they are forwarded to the runtime as `ControlCmd`s. The
//! runtime publishes the session state and the current track's display name
//! back through `MprisHandle`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, mpsc::Sender};
use std::time::Duration;

use async_io::{Timer, block_on};
use log::{info, warn};
use zbus::{Connection, interface};
use zvariant::{ObjectPath, OwnedValue, Value};

use crate::audio::SessionState;

const BUS_NAME: &str = "org.mpris.MediaPlayer2.rawplayer";
const OBJECT_PATH: &str = "/org/mpris/MediaPlayer2";
const TRACK_PATH_PREFIX: &str = "/org/mpris/MediaPlayer2/rawplayer/track";

/// Transport requests coming from media controls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ControlCmd {
    Quit,
    Play,
    Pause,
    PlayPause,
    Stop,
    Next,
    Prev,
}

/// What the bus sees of the playback session.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct Snapshot {
    session: SessionState,
    /// Display name of the track at the session's index.
    track: Option<String>,
}

impl Snapshot {
    fn status(&self) -> &'static str {
        match self.session {
            SessionState::Playing(_) => "Playing",
            SessionState::Paused(_) => "Paused",
            SessionState::Empty | SessionState::Stopped(_) | SessionState::Failed(_) => "Stopped",
        }
    }

    /// `Failed` holds no handle, so `play` would be refused.
    fn can_play(&self) -> bool {
        matches!(
            self.session,
            SessionState::Stopped(_) | SessionState::Playing(_) | SessionState::Paused(_)
        )
    }

    fn can_pause(&self) -> bool {
        matches!(
            self.session,
            SessionState::Playing(_) | SessionState::Paused(_)
        )
    }

    fn can_step(&self) -> bool {
        self.session != SessionState::Empty
    }

    fn metadata(&self) -> HashMap<String, OwnedValue> {
        let mut map = HashMap::new();
        let Some(index) = self.session.index() else {
            return map;
        };

        if let Ok(path) = ObjectPath::try_from(format!("{TRACK_PATH_PREFIX}/{index}")) {
            if let Ok(value) = OwnedValue::try_from(Value::from(path)) {
                map.insert("mpris:trackid".to_string(), value);
            }
        }
        if let Some(track) = &self.track {
            if let Ok(value) = OwnedValue::try_from(Value::from(track.as_str())) {
                map.insert("xesam:title".to_string(), value);
            }
        }
        map
    }
}

type SharedSnapshot = Arc<Mutex<Snapshot>>;

fn read<T>(shared: &SharedSnapshot, f: impl FnOnce(&Snapshot) -> T, fallback: T) -> T {
    shared.lock().map(|s| f(&*s)).unwrap_or(fallback)
}

/// Runtime-side handle used to publish the session to the bus.
pub struct MprisHandle {
    shared: SharedSnapshot,
}

impl MprisHandle {
    pub fn publish(&self, session: SessionState, track: Option<String>) {
        if let Ok(mut s) = self.shared.lock() {
            *s = Snapshot { session, track };
        }
    }
}

struct RootIface {
    tx: Sender<ControlCmd>,
}

#[interface(name = "org.mpris.MediaPlayer2")]
impl RootIface {
    fn raise(&self) {}

    fn quit(&self) {
        let _ = self.tx.send(ControlCmd::Quit);
    }

    #[zbus(property)]
    fn can_quit(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_raise(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn has_track_list(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn identity(&self) -> &str {
        "rawplayer"
    }

    #[zbus(property)]
    fn supported_uri_schemes(&self) -> Vec<String> {
        Vec::new()
    }

    #[zbus(property)]
    fn supported_mime_types(&self) -> Vec<String> {
        Vec::new()
    }
}

struct PlayerIface {
    tx: Sender<ControlCmd>,
    shared: SharedSnapshot,
}

impl PlayerIface {
    fn forward(&self, cmd: ControlCmd) {
        let _ = self.tx.send(cmd);
    }
}

#[interface(name = "org.mpris.MediaPlayer2.Player")]
impl PlayerIface {
    fn next(&self) {
        self.forward(ControlCmd::Next);
    }

    fn previous(&self) {
        self.forward(ControlCmd::Prev);
    }

    fn play(&self) {
        self.forward(ControlCmd::Play);
    }

    fn pause(&self) {
        self.forward(ControlCmd::Pause);
    }

    fn play_pause(&self) {
        self.forward(ControlCmd::PlayPause);
    }

    fn stop(&self) {
        self.forward(ControlCmd::Stop);
    }

    #[zbus(property)]
    fn playback_status(&self) -> &str {
        read(&self.shared, Snapshot::status, "Stopped")
    }

    #[zbus(property)]
    fn can_control(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_play(&self) -> bool {
        read(&self.shared, Snapshot::can_play, false)
    }

    #[zbus(property)]
    fn can_pause(&self) -> bool {
        read(&self.shared, Snapshot::can_pause, false)
    }

    #[zbus(property)]
    fn can_go_next(&self) -> bool {
        read(&self.shared, Snapshot::can_step, false)
    }

    #[zbus(property)]
    fn can_go_previous(&self) -> bool {
        read(&self.shared, Snapshot::can_step, false)
    }

    #[zbus(property)]
    fn metadata(&self) -> HashMap<String, OwnedValue> {
        read(&self.shared, Snapshot::metadata, HashMap::new())
    }
}

/// Claim the bus name and export both interfaces. The returned connection
/// keeps them registered while it is alive.
async fn serve(tx: Sender<ControlCmd>, shared: SharedSnapshot) -> zbus::Result<Connection> {
    let connection = Connection::session().await?;
    connection.request_name(BUS_NAME).await?;

    let server = connection.object_server();
    server.at(OBJECT_PATH, RootIface { tx: tx.clone() }).await?;
    server.at(OBJECT_PATH, PlayerIface { tx, shared }).await?;
    Ok(connection)
}

pub fn spawn_mpris(tx: Sender<ControlCmd>) -> MprisHandle {
    let handle = detached();
    let shared = handle.shared.clone();

    std::thread::spawn(move || {
        block_on(async move {
            match serve(tx, shared).await {
                Ok(_connection) => {
                    info!("MPRIS: media controls registered as {BUS_NAME}");
                    loop {
                        Timer::after(Duration::from_secs(3600)).await;
                    }
                }
                Err(e) => warn!("MPRIS: media controls unavailable: {e}"),
            }
        });
    });

    handle
}

/// A handle that is not connected to any bus, for when media controls are disabled.
pub fn detached() -> MprisHandle {
    MprisHandle {
        shared: Arc::new(Mutex::new(Snapshot::default())),
    }
}
