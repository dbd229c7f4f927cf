use crate::foundation::error::{MontageError, MontageResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Rational frame rate (`num / den` frames per second).
pub struct Fps {
    /// Numerator.
    pub num: u32,
    /// Denominator (must be > 0).
    pub den: u32,
}

impl Fps {
    /// Construct a validated frame rate.
    pub fn new(num: u32, den: u32) -> MontageResult<Self> {
        if den == 0 {
            return Err(MontageError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(MontageError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Check `num > 0 && den > 0` on a value that bypassed [`Fps::new`] (e.g. deserialized).
    pub fn validate(self) -> MontageResult<()> {
        Self::new(self.num, self.den).map(|_| ())
    }

    /// Frames per second as floating point.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Duration of a single frame in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// Convert a frame count back to seconds.
    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * self.frame_duration_secs()
    }

    /// Convert seconds to the nearest whole frame; negative or NaN input maps to 0.
    pub fn secs_to_frames_round(self, secs: f64) -> u64 {
        let frames = (secs * self.as_f64()).round();
        if frames.is_nan() || frames <= 0.0 {
            0
        } else {
            frames as u64
        }
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self { num: 30, den: 1 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Output resolution and frame rate of the rendered montage.
pub struct OutputFormat {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Output frame rate.
    pub fps: Fps,
}

impl OutputFormat {
    /// Validate non-zero dimensions and frame rate.
    pub fn validate(&self) -> MontageResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(MontageError::validation("format width/height must be > 0"));
        }
        self.fps.validate()
    }
}

impl Default for OutputFormat {
    /// UHD 3840x2160 at 30 fps.
    fn default() -> Self {
        Self {
            width: 3840,
            height: 2160,
            fps: Fps::default(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
