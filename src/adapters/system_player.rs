use std::path::Path;
use std::process::Command;

use tracing::info;

use crate::domain::DomainError;
use crate::ports::AudioPlayer;

/// Plays an audio file with the platform's default mechanism.
///
/// The command is selected at compile time per target OS; there is no
/// runtime OS sniffing.
pub struct SystemPlayer;

impl SystemPlayer {
    pub fn new() -> Self {
        Self
    }

    #[cfg(target_os = "macos")]
    fn command(path: &Path) -> Command {
        let mut cmd = Command::new("afplay");
        cmd.arg(path);
        cmd
    }

    #[cfg(target_os = "linux")]
    fn command(path: &Path) -> Command {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(path);
        cmd
    }

    #[cfg(target_os = "windows")]
    fn command(path: &Path) -> Command {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", ""]).arg(path);
        cmd
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    fn command(_path: &Path) -> Command {
        Command::new("false")
    }
}

impl Default for SystemPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioPlayer for SystemPlayer {
    fn play(&self, path: &Path) -> Result<(), DomainError> {
        if !path.exists() {
            return Err(DomainError::FileAccess {
                path: path.to_path_buf(),
                reason: "file not found".to_string(),
            });
        }

        info!(path = %path.display(), "Playing audio");

        let status = Self::command(path)
            .status()
            .map_err(|e| DomainError::Playback(format!("Failed to launch player: {}", e)))?;

        if !status.success() {
            return Err(DomainError::Playback(format!(
                "Player exited with {:?}",
                status.code()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_an_error() {
        let player = SystemPlayer::new();
        let result = player.play(Path::new("/nonexistent/clip.mp3"));
        assert!(matches!(result, Err(DomainError::FileAccess { .. })));
    }
}
