use std::path::Path;

use crate::domain::DomainError;

/// Port for playing an audio file on the host system.
///
/// Playback is an environment-dependent side effect; implementations pick a
/// platform-appropriate command. Failures are reported, not fatal.
pub trait AudioPlayer: Send + Sync {
    fn play(&self, path: &Path) -> Result<(), DomainError>;
}
