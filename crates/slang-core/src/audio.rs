//! Audio playback controller — one playback slot, owned by one UI control.
//!
//! ```text
//!   play(entry, control)
//!         │
//!         ├── reset previously active control, cancel its session
//!         ├── resolve locator ── none ──▶ Err(NoAudio)
//!         └── spawn session task
//!                 ├── cancelled (superseded)  → nothing reported
//!                 ├── playback ended          → AudioEvent::Finished
//!                 └── playback failed         → AudioEvent::Failed
//! ```
//!
//! Session events come back through an mpsc channel and must be fed to
//! `on_event` by the owner's event loop.  Events from superseded sessions are
//! dropped there, so a late completion never resets a newer control.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use futures_util::future::BoxFuture;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::entry::Entry;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AudioError {
    #[error("No audio found for this slang.")]
    NoAudio,
    #[error("audio not found.")]
    NotFound(String),
    #[error("Audio not supported on this system.")]
    Unsupported,
    #[error("audio could not be played: {0}")]
    Playback(String),
}

/// A playable resource.
#[derive(Debug, Clone, PartialEq)]
pub enum AudioLocator {
    File(PathBuf),
    Url(reqwest::Url),
}

impl fmt::Display for AudioLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => write!(f, "{}", url),
        }
    }
}

/// What entry audio filenames are resolved against.
#[derive(Debug, Clone, PartialEq)]
pub enum AudioBase {
    Dir(PathBuf),
    Url(reqwest::Url),
}

impl AudioBase {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            if let Ok(url) = reqwest::Url::parse(trimmed) {
                return Self::Url(url);
            }
        }
        Self::Dir(PathBuf::from(trimmed))
    }

    /// Locator for `entry`'s clip.  `None` when the entry has no audio.
    /// URL bases get the filename percent-encoded as one path segment.
    pub fn resolve(&self, entry: &Entry) -> Option<AudioLocator> {
        let file = entry.audio_file()?;
        match self {
            Self::Dir(dir) => Some(AudioLocator::File(dir.join(file))),
            Self::Url(base) => {
                let mut url = base.clone();
                url.path_segments_mut().ok()?.pop_if_empty().push(file);
                Some(AudioLocator::Url(url))
            }
        }
    }
}

pub type PlaybackFuture = BoxFuture<'static, Result<(), AudioError>>;

/// The playback engine.  `play` returns a future that resolves when the clip
/// ends on its own (or fails to start); dropping it must stop playback.
pub trait AudioBackend: Send + Sync {
    fn play(&self, locator: &AudioLocator) -> PlaybackFuture;
}

/// Reported by a session task when its playback ends.
#[derive(Debug, Clone, PartialEq)]
pub enum AudioEvent {
    Finished { session: u64 },
    Failed { session: u64, error: AudioError },
}

impl AudioEvent {
    pub fn session(&self) -> u64 {
        match self {
            Self::Finished { session } | Self::Failed { session, .. } => *session,
        }
    }
}

struct Session {
    id: u64,
    cancel: CancellationToken,
}

/// Single-slot playback controller.  `C` is whatever the UI uses to name the
/// control that asked for playback; the controller only compares it.
pub struct AudioController<C> {
    backend: Arc<dyn AudioBackend>,
    base: AudioBase,
    events: mpsc::Sender<AudioEvent>,
    active_control: Option<C>,
    session: Option<Session>,
    next_session: u64,
}

impl<C: Clone + PartialEq + fmt::Debug> AudioController<C> {
    pub fn new(
        backend: Arc<dyn AudioBackend>,
        base: AudioBase,
        events: mpsc::Sender<AudioEvent>,
    ) -> Self {
        Self {
            backend,
            base,
            events,
            active_control: None,
            session: None,
            next_session: 0,
        }
    }

    /// Start playing `entry`'s clip on behalf of `control`.
    ///
    /// Any previous control is reset and any previous session cancelled
    /// before the locator is resolved, so a failing request still leaves the
    /// old control idle.  Must be called inside a tokio runtime.
    pub fn play(&mut self, entry: &Entry, control: Option<C>) -> Result<(), AudioError> {
        self.stop();

        let locator = self.base.resolve(entry).ok_or(AudioError::NoAudio)?;

        self.next_session += 1;
        let id = self.next_session;
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let playback = self.backend.play(&locator);
        let events = self.events.clone();

        info!("audio: session {} playing {} ({})", id, entry.word, locator);
        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    debug!("audio: session {} superseded", id);
                }
                result = playback => {
                    let event = match result {
                        Ok(()) => AudioEvent::Finished { session: id },
                        Err(error) => AudioEvent::Failed { session: id, error },
                    };
                    if events.send(event).await.is_err() {
                        debug!("audio: session {} finished after receiver closed", id);
                    }
                }
            }
        });

        self.session = Some(Session { id, cancel });
        self.active_control = control;
        Ok(())
    }

    /// Stop whatever is playing and return every control to idle.
    pub fn stop(&mut self) {
        if let Some(session) = self.session.take() {
            debug!("audio: cancelling session {}", session.id);
            session.cancel.cancel();
        }
        if let Some(prev) = self.active_control.take() {
            debug!("audio: resetting control {:?}", prev);
        }
    }

    /// Apply a session event.  Returns the failure to surface, if any.
    pub fn on_event(&mut self, event: AudioEvent) -> Option<AudioError> {
        let current = self.session.as_ref().map(|s| s.id);
        if current != Some(event.session()) {
            debug!("audio: ignoring event from stale session {}", event.session());
            return None;
        }

        self.session = None;
        let control = self.active_control.take();
        match event {
            AudioEvent::Finished { session } => {
                debug!("audio: session {} ended, {:?} idle", session, control);
                None
            }
            AudioEvent::Failed { session, error } => {
                warn!("Audio play error (session {}): {:?}", session, error);
                Some(error)
            }
        }
    }

    pub fn active_control(&self) -> Option<&C> {
        self.active_control.as_ref()
    }

    pub fn is_active(&self, control: &C) -> bool {
        self.active_control.as_ref() == Some(control)
    }

    pub fn is_playing(&self) -> bool {
        self.session.is_some()
    }

    pub fn base(&self) -> &AudioBase {
        &self.base
    }
}

impl<C> Drop for AudioController<C> {
    fn drop(&mut self) {
        if let Some(session) = self.session.take() {
            session.cancel.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::fallback_entries;
    use std::sync::Mutex;

    /// Backend whose every playback resolves to `outcome` (or never, if `None`).
    struct FakeBackend {
        outcome: Option<Result<(), AudioError>>,
        played: Arc<Mutex<Vec<AudioLocator>>>,
    }

    impl AudioBackend for FakeBackend {
        fn play(&self, locator: &AudioLocator) -> PlaybackFuture {
            self.played.lock().unwrap().push(locator.clone());
            let outcome = self.outcome.clone();
            Box::pin(async move {
                match outcome {
                    Some(result) => result,
                    None => futures_util::future::pending().await,
                }
            })
        }
    }

    fn controller(
        outcome: Option<Result<(), AudioError>>,
    ) -> (
        AudioController<&'static str>,
        mpsc::Receiver<AudioEvent>,
        Arc<Mutex<Vec<AudioLocator>>>,
    ) {
        let played = Arc::new(Mutex::new(Vec::new()));
        let backend = FakeBackend {
            outcome,
            played: played.clone(),
        };
        let (tx, rx) = mpsc::channel(16);
        let ctl = AudioController::new(Arc::new(backend), AudioBase::parse("assets/audio/"), tx);
        (ctl, rx, played)
    }

    #[tokio::test]
    async fn test_supersession_leaves_one_active_control() {
        let (mut ctl, mut rx, played) = controller(None);
        let entries = fallback_entries();

        ctl.play(&entries[0], Some("x")).unwrap();
        assert!(ctl.is_active(&"x"));

        ctl.play(&entries[1], Some("y")).unwrap();
        assert!(!ctl.is_active(&"x"));
        assert!(ctl.is_active(&"y"));
        assert_eq!(ctl.active_control(), Some(&"y"));

        tokio::task::yield_now().await;
        assert!(rx.try_recv().is_err(), "superseded session must stay silent");
        assert_eq!(played.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_natural_completion_resets_control() {
        let (mut ctl, mut rx, _) = controller(Some(Ok(())));
        ctl.play(&fallback_entries()[2], Some("card")).unwrap();
        assert!(ctl.is_playing());

        let event = rx.recv().await.unwrap();
        assert!(matches!(event, AudioEvent::Finished { .. }));
        assert_eq!(ctl.on_event(event), None);
        assert!(!ctl.is_active(&"card"));
        assert!(!ctl.is_playing());
    }

    #[tokio::test]
    async fn test_start_failure_resets_and_reports() {
        let (mut ctl, mut rx, _) =
            controller(Some(Err(AudioError::NotFound("chililo.mp3".into()))));
        ctl.play(&fallback_entries()[0], Some("card")).unwrap();

        let event = rx.recv().await.unwrap();
        let err = ctl.on_event(event).unwrap();
        assert_eq!(err.to_string(), "audio not found.");
        assert_eq!(ctl.active_control(), None);
    }

    #[tokio::test]
    async fn test_missing_audio_still_resets_previous_control() {
        let (mut ctl, _rx, played) = controller(None);
        let entries = fallback_entries();
        ctl.play(&entries[0], Some("x")).unwrap();

        let silent = Entry {
            audio: None,
            ..entries[1].clone()
        };
        assert_eq!(ctl.play(&silent, Some("y")), Err(AudioError::NoAudio));
        assert!(!ctl.is_active(&"x"));
        assert!(!ctl.is_active(&"y"));
        assert!(!ctl.is_playing());
        assert_eq!(played.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_replay_same_control_starts_new_session() {
        let (mut ctl, mut rx, played) = controller(None);
        let entry = &fallback_entries()[0];
        ctl.play(entry, Some("x")).unwrap();
        ctl.play(entry, Some("x")).unwrap();
        assert!(ctl.is_active(&"x"));
        assert_eq!(played.lock().unwrap().len(), 2);

        ctl.stop();
        assert_eq!(ctl.active_control(), None);
        assert!(!ctl.is_playing());
        tokio::task::yield_now().await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_stale_event_is_ignored() {
        let (mut ctl, _rx, _) = controller(None);
        let entries = fallback_entries();
        ctl.play(&entries[0], Some("x")).unwrap();
        ctl.play(&entries[1], Some("y")).unwrap();

        assert_eq!(ctl.on_event(AudioEvent::Finished { session: 1 }), None);
        assert!(ctl.is_active(&"y"));
        assert!(ctl.is_playing());
    }

    #[tokio::test]
    async fn test_play_without_control() {
        let (mut ctl, _rx, _) = controller(None);
        ctl.play(&fallback_entries()[0], None).unwrap();
        assert!(ctl.is_playing());
        assert_eq!(ctl.active_control(), None);
        ctl.stop();
        assert!(!ctl.is_playing());
    }

    #[test]
    fn test_resolve_dir_base() {
        let base = AudioBase::parse("assets/audio/");
        let entry = &fallback_entries()[1];
        assert_eq!(
            base.resolve(entry),
            Some(AudioLocator::File(PathBuf::from("assets/audio/ni zee.mp3")))
        );
    }

    #[test]
    fn test_resolve_url_base_encodes_filename() {
        let base = AudioBase::parse("https://cdn.example.org/audio/");
        let entry = &fallback_entries()[1];
        let locator = base.resolve(entry).unwrap();
        assert_eq!(
            locator.to_string(),
            "https://cdn.example.org/audio/ni%20zee.mp3"
        );
    }

    #[test]
    fn test_resolve_without_audio() {
        let base = AudioBase::parse("assets/audio/");
        assert_eq!(base.resolve(&Entry::default()), None);
    }
}
