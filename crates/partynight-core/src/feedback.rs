use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Named audio cues engines fire at well-defined moments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cue {
    Click,
    Win,
    Lose,
    Pop,
    Buzz,
}

/// Fire-and-forget sink for cues. Implementations must not panic; engines
/// never look at the outcome.
pub trait Feedback: Send + Sync {
    fn cue(&self, cue: Cue);
}

/// Shared handle engines hold on to.
pub type SharedFeedback = Arc<dyn Feedback>;

/// Discards every cue.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullFeedback;

impl Feedback for NullFeedback {
    fn cue(&self, _cue: Cue) {}
}

/// Logs cues at debug level. Used by the headless host.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogFeedback;

impl Feedback for LogFeedback {
    fn cue(&self, cue: Cue) {
        tracing::debug!(?cue, "cue");
    }
}

/// Convenience constructor for engines that do not care about audio.
pub fn silent() -> SharedFeedback {
    Arc::new(NullFeedback)
}
