use std::path::Path;

use crate::foundation::error::MontageResult;

/// Measures the playback length of a media file (the narration, in practice).
///
/// Implemented by the caller; this crate never decodes media.
pub trait DurationProbe {
    /// Duration of the file at `path`, in seconds.
    fn probe_duration(&self, path: &Path) -> MontageResult<f64>;
}

impl<F> DurationProbe for F
where
    F: Fn(&Path) -> MontageResult<f64>,
{
    fn probe_duration(&self, path: &Path) -> MontageResult<f64> {
        self(path)
    }
}
