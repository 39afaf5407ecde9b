use anyhow::{Context, Result};
use libvox_speech::core::{f32_to_sample, sample_to_i16};
use std::io::{Cursor, Write};
use std::path::Path;
use symphonia::core::audio::{AudioBufferRef, Signal};
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::debug;

/// Decoded recording, mixed down to one channel
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedAudio {
    /// samples in the 16-bit integer range
    pub samples: Vec<i32>,
    pub sample_rate: u32,
    /// channel count of the source before mixdown
    pub channels: usize,
}

/// Read an audio file (wav, flac, mp3, ogg, ...) into mono integer samples
pub fn read_audio_file(path: &Path) -> Result<DecodedAudio> {
    let file = std::fs::File::open(path).context("Failed to open audio file")?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());
    read_from_source(mss, path.extension().and_then(|e| e.to_str()))
}

/// Read audio from bytes
pub fn read_audio_from_bytes(bytes: &[u8]) -> Result<DecodedAudio> {
    let cursor = Cursor::new(bytes.to_vec());
    let mss = MediaSourceStream::new(Box::new(cursor), Default::default());
    read_from_source(mss, None)
}

fn read_from_source(mss: MediaSourceStream, extension: Option<&str>) -> Result<DecodedAudio> {
    let mut hint = Hint::new();
    if let Some(ext) = extension {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .context("Unsupported audio format")?;

    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .context("No audio track found")?;

    let track_id = track.id;
    let sample_rate = track
        .codec_params
        .sample_rate
        .context("Unknown sample rate")?;
    let channels = track
        .codec_params
        .channels
        .context("Unknown channel count")?
        .count();

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .context("Failed to create decoder")?;

    let mut samples = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(symphonia::core::errors::Error::IoError(e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break
            }
            Err(e) => return Err(e).context("Error reading packet"),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            Err(symphonia::core::errors::Error::DecodeError(_)) => continue,
            Err(e) => return Err(e).context("Error decoding packet"),
        };

        append_mono(&decoded, &mut samples);
    }

    debug!(
        samples = samples.len(),
        sample_rate, channels, "audio decoded"
    );

    Ok(DecodedAudio {
        samples,
        sample_rate,
        channels,
    })
}

/// Average all channels of each frame into one sample
fn append_mono(buffer: &AudioBufferRef, samples: &mut Vec<i32>) {
    match buffer {
        AudioBufferRef::S16(buf) => {
            let channels = buf.spec().channels.count().max(1);
            for frame in 0..buf.frames() {
                let sum: i32 = (0..channels).map(|ch| buf.chan(ch)[frame] as i32).sum();
                samples.push(sum / channels as i32);
            }
        }
        AudioBufferRef::F32(buf) => {
            let channels = buf.spec().channels.count().max(1);
            for frame in 0..buf.frames() {
                let sum: f32 = (0..channels).map(|ch| buf.chan(ch)[frame]).sum();
                samples.push(f32_to_sample(sum / channels as f32));
            }
        }
        AudioBufferRef::S32(buf) => {
            let channels = buf.spec().channels.count().max(1);
            let scale = 1.0 / 2147483648.0;
            for frame in 0..buf.frames() {
                let sum: f32 = (0..channels)
                    .map(|ch| buf.chan(ch)[frame] as f32 * scale)
                    .sum();
                samples.push(f32_to_sample(sum / channels as f32));
            }
        }
        AudioBufferRef::U8(buf) => {
            let channels = buf.spec().channels.count().max(1);
            for frame in 0..buf.frames() {
                let sum: f32 = (0..channels)
                    .map(|ch| (buf.chan(ch)[frame] as f32 - 128.0) / 128.0)
                    .sum();
                samples.push(f32_to_sample(sum / channels as f32));
            }
        }
        _ => {
            // 24-bit and f64 buffers go through a converted copy
            let mut converted = buffer.make_equivalent::<f32>();
            buffer.convert(&mut converted);
            append_mono(&AudioBufferRef::F32(std::borrow::Cow::Owned(converted)), samples);
        }
    }
}

/// Write mono samples to a 16-bit PCM WAV file
pub fn write_wav(path: &Path, samples: &[i32], sample_rate: u32) -> Result<()> {
    let bytes = write_wav_to_bytes(samples, sample_rate)?;
    std::fs::write(path, bytes).context("Failed to write WAV file")
}

/// Write mono samples to 16-bit PCM WAV in memory
///
/// Samples outside the 16-bit range are clamped.
pub fn write_wav_to_bytes(samples: &[i32], sample_rate: u32) -> Result<Vec<u8>> {
    let mut buffer = Vec::with_capacity(44 + samples.len() * 2);

    let bytes_per_sample = 2;
    let data_size = samples.len() * bytes_per_sample;
    let file_size = 36 + data_size;

    // RIFF header
    buffer.write_all(b"RIFF")?;
    buffer.write_all(&(file_size as u32).to_le_bytes())?;
    buffer.write_all(b"WAVE")?;

    // fmt chunk
    buffer.write_all(b"fmt ")?;
    buffer.write_all(&16u32.to_le_bytes())?;
    buffer.write_all(&1u16.to_le_bytes())?; // PCM
    buffer.write_all(&1u16.to_le_bytes())?; // mono
    buffer.write_all(&sample_rate.to_le_bytes())?;
    let byte_rate = sample_rate * bytes_per_sample as u32;
    buffer.write_all(&byte_rate.to_le_bytes())?;
    buffer.write_all(&(bytes_per_sample as u16).to_le_bytes())?;
    buffer.write_all(&16u16.to_le_bytes())?;

    // data chunk
    buffer.write_all(b"data")?;
    buffer.write_all(&(data_size as u32).to_le_bytes())?;

    for &sample in samples {
        buffer.write_all(&sample_to_i16(sample).to_le_bytes())?;
    }

    Ok(buffer)
}
