/// Sample rate of the capture hardware (16-bit mono)
pub const CAPTURE_SAMPLE_RATE: u32 = 16025;

/// Maximum positive value for 16-bit signed integer (2^15 - 1)
pub const I16_MAX_F32: f32 = 32767.0;

/// Minimum value for 16-bit signed integer (-2^15)
pub const I16_MIN_F32: f32 = -32768.0;

/// Convert a [-1.0, 1.0] float sample to the 16-bit integer range
#[inline]
pub fn f32_to_sample(sample: f32) -> i32 {
    (sample * I16_MAX_F32).round().clamp(I16_MIN_F32, I16_MAX_F32) as i32
}

/// Clamp an integer sample into the 16-bit range
#[inline]
pub fn sample_to_i16(sample: i32) -> i16 {
    sample.clamp(i16::MIN as i32, i16::MAX as i32) as i16
}

/// Duration in seconds of `len` samples at `sample_rate`
#[inline]
pub fn duration_secs(len: usize, sample_rate: u32) -> f64 {
    if sample_rate == 0 {
        return 0.0;
    }
    len as f64 / sample_rate as f64
}
