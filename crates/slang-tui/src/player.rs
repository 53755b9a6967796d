//! Audio backends: one short-lived `mpv` process per clip.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Stdio;

use slang_core::audio::{AudioBackend, AudioError, AudioLocator, PlaybackFuture};
use slang_core::platform;
use tracing::{debug, info};

/// mpv's exit status when the file couldn't be opened or played.
const MPV_EXIT_FILE_ERROR: i32 = 2;

pub struct MpvPlayer {
    binary: PathBuf,
}

impl MpvPlayer {
    /// Find `player` beside the executable or on `PATH`.
    pub fn locate(player: &str) -> Option<Self> {
        let binary = platform::find_player_binary(player)?;
        info!("audio: using player {}", binary.display());
        Some(Self { binary })
    }
}

impl AudioBackend for MpvPlayer {
    fn play(&self, locator: &AudioLocator) -> PlaybackFuture {
        let binary = self.binary.clone();
        let locator = locator.clone();
        Box::pin(async move {
            let target: OsString = match &locator {
                AudioLocator::File(path) => {
                    if !path.exists() {
                        return Err(AudioError::NotFound(path.display().to_string()));
                    }
                    path.clone().into_os_string()
                }
                AudioLocator::Url(url) => url.as_str().into(),
            };

            // Dropping the future drops the child, and kill_on_drop stops it.
            let mut child = tokio::process::Command::new(&binary)
                .arg("--no-video")
                .arg("--no-terminal")
                .arg(&target)
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .kill_on_drop(true)
                .spawn()
                .map_err(|e| {
                    AudioError::Playback(format!("failed to start {}: {}", binary.display(), e))
                })?;
            debug!("mpv: pid {:?} playing {}", child.id(), locator);

            let status = child
                .wait()
                .await
                .map_err(|e| AudioError::Playback(e.to_string()))?;
            match status.code() {
                Some(0) => Ok(()),
                Some(MPV_EXIT_FILE_ERROR) => Err(AudioError::NotFound(locator.to_string())),
                _ => Err(AudioError::Playback(format!("mpv exited with {}", status))),
            }
        })
    }
}

/// Used when no player binary is installed.
pub struct NoPlayer;

impl AudioBackend for NoPlayer {
    fn play(&self, _locator: &AudioLocator) -> PlaybackFuture {
        Box::pin(async { Err(AudioError::Unsupported) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_no_player_is_unsupported() {
        let locator = AudioLocator::File(PathBuf::from("kaya.mp3"));
        assert_eq!(NoPlayer.play(&locator).await, Err(AudioError::Unsupported));
    }

    #[tokio::test]
    async fn test_missing_file_fails_before_spawning() {
        let player = MpvPlayer {
            binary: PathBuf::from("/nonexistent/mpv"),
        };
        let locator = AudioLocator::File(PathBuf::from("/nonexistent/audio/kaya.mp3"));
        let err = player.play(&locator).await.unwrap_err();
        assert!(matches!(err, AudioError::NotFound(_)));
        assert_eq!(err.to_string(), "audio not found.");
    }

    #[tokio::test]
    async fn test_missing_binary_reports_playback_error() {
        let dir = tempfile::tempdir().unwrap();
        let clip = dir.path().join("kaya.mp3");
        std::fs::write(&clip, b"not really audio").unwrap();
        let player = MpvPlayer {
            binary: PathBuf::from("/nonexistent/mpv"),
        };
        let err = player.play(&AudioLocator::File(clip)).await.unwrap_err();
        assert!(matches!(err, AudioError::Playback(_)));
    }
}
