use crate::error::EngineError;
use crate::library::Track;

/// The capability set the controller needs from an audio backend.
///
/// A handle is bound to exactly one track. `release` consumes it, so a
/// released handle can never be started, paused or stopped again.
pub trait PlaybackEngine {
    type Handle;

    /// Prepare a paused handle for `track`.
    fn create(&mut self, track: &Track) -> Result<Self::Handle, EngineError>;

    fn start(&mut self, handle: &Self::Handle);

    fn pause(&mut self, handle: &Self::Handle);

    fn stop(&mut self, handle: &Self::Handle);

    fn release(&mut self, handle: Self::Handle);

    /// True while the handle is producing audio; false when paused or played out.
    fn is_playing(&self, handle: &Self::Handle) -> bool;
}
