//! RIFF/WAVE container encoding for raw 16-bit PCM.
//!
//! The speech service returns headerless little-endian PCM samples. Players
//! need a container, so [`encode`] prepends the canonical 44-byte header and
//! copies the samples through untouched:
//!
//! ```text
//! offset  size  field
//!  0      4     "RIFF"
//!  4      4     36 + data length
//!  8      4     "WAVE"
//! 12      4     "fmt "
//! 16      4     16 (fmt chunk length)
//! 20      2     1 (linear PCM)
//! 22      2     channel count
//! 24      4     sample rate
//! 28      4     byte rate   = rate * channels * 2
//! 32      2     block align = channels * 2
//! 34      2     16 (bits per sample)
//! 36      4     "data"
//! 40      4     data length
//! 44      n     samples
//! ```
//!
//! Every integer is little-endian regardless of host byte order.

use serde::{Deserialize, Serialize};

/// Length of the canonical header preceding the sample data.
pub const HEADER_LEN: usize = 44;

/// Bit depth of every sample this module writes.
pub const BITS_PER_SAMPLE: u16 = 16;

const BYTES_PER_SAMPLE: u16 = BITS_PER_SAMPLE / 8;
const FMT_CHUNK_LEN: u32 = 16;
const FORMAT_PCM: u16 = 1;
/// RIFF size counts everything after the first 8 bytes.
const RIFF_OVERHEAD: u32 = (HEADER_LEN - 8) as u32;

/// Errors raised while encoding or reading a WAV header.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WavError {
    /// Sample rate of zero.
    #[error("sample rate must be positive")]
    InvalidSampleRate,

    /// Channel count of zero.
    #[error("channel count must be positive")]
    InvalidChannelCount,

    /// A derived header field does not fit its width.
    #[error("{field} overflows its header field ({sample_rate} Hz, {channel_count} channels)")]
    FieldOverflow {
        /// Name of the overflowing field.
        field: &'static str,
        /// Requested sample rate.
        sample_rate: u32,
        /// Requested channel count.
        channel_count: u16,
    },

    /// Sample data too large for the 32-bit RIFF size fields.
    #[error("sample data of {len} bytes does not fit a 32-bit RIFF size")]
    DataTooLarge {
        /// Length of the rejected buffer.
        len: usize,
    },

    /// Bytes handed to [`WavHeader::parse`] are not a canonical header.
    #[error("malformed WAV header: {0}")]
    MalformedHeader(String),
}

/// Sample rate and channel layout of a 16-bit PCM stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PcmFormat {
    /// Samples per second per channel.
    pub sample_rate: u32,
    /// Number of interleaved channels.
    pub channel_count: u16,
}

impl PcmFormat {
    /// Fixed output format of the text-to-speech model: 24 kHz mono.
    pub const SPEECH: Self = Self {
        sample_rate: 24_000,
        channel_count: 1,
    };

    /// Build a validated format.
    pub fn new(sample_rate: u32, channel_count: u16) -> Result<Self, WavError> {
        if sample_rate == 0 {
            return Err(WavError::InvalidSampleRate);
        }
        if channel_count == 0 {
            return Err(WavError::InvalidChannelCount);
        }
        Ok(Self {
            sample_rate,
            channel_count,
        })
    }

    /// Confirm a complete header can be written for this format.
    pub fn validate(&self) -> Result<(), WavError> {
        let _ = Self::new(self.sample_rate, self.channel_count)?;
        let _ = self.byte_rate()?;
        let _ = self.block_align()?;
        Ok(())
    }

    /// Bytes per second: `sample_rate * channel_count * 2`.
    pub fn byte_rate(&self) -> Result<u32, WavError> {
        self.sample_rate
            .checked_mul(u32::from(self.channel_count))
            .and_then(|v| v.checked_mul(u32::from(BYTES_PER_SAMPLE)))
            .ok_or_else(|| self.overflow("byte rate"))
    }

    /// Bytes per frame: `channel_count * 2`.
    pub fn block_align(&self) -> Result<u16, WavError> {
        self.channel_count
            .checked_mul(BYTES_PER_SAMPLE)
            .ok_or_else(|| self.overflow("block align"))
    }

    /// Wrap `samples` in a WAV container using this format.
    pub fn encode_wav(&self, samples: &[u8]) -> Result<Vec<u8>, WavError> {
        encode(samples, self.sample_rate, self.channel_count)
    }

    fn overflow(&self, field: &'static str) -> WavError {
        WavError::FieldOverflow {
            field,
            sample_rate: self.sample_rate,
            channel_count: self.channel_count,
        }
    }
}

impl Default for PcmFormat {
    fn default() -> Self {
        Self::SPEECH
    }
}

/// Wrap raw little-endian 16-bit PCM `samples` in a RIFF/WAVE container.
///
/// The output is exactly [`HEADER_LEN`]` + samples.len()` bytes. Either a
/// complete container is returned or an error; never a partial header.
pub fn encode(samples: &[u8], sample_rate: u32, channel_count: u16) -> Result<Vec<u8>, WavError> {
    let format = PcmFormat::new(sample_rate, channel_count)?;
    let byte_rate = format.byte_rate()?;
    let block_align = format.block_align()?;

    let data_len = u32::try_from(samples.len())
        .ok()
        .filter(|len| len.checked_add(RIFF_OVERHEAD).is_some())
        .ok_or(WavError::DataTooLarge { len: samples.len() })?;

    let mut buf = Vec::with_capacity(HEADER_LEN + samples.len());

    buf.extend_from_slice(b"RIFF");
    buf.extend_from_slice(&(RIFF_OVERHEAD + data_len).to_le_bytes());
    buf.extend_from_slice(b"WAVE");

    buf.extend_from_slice(b"fmt ");
    buf.extend_from_slice(&FMT_CHUNK_LEN.to_le_bytes());
    buf.extend_from_slice(&FORMAT_PCM.to_le_bytes());
    buf.extend_from_slice(&channel_count.to_le_bytes());
    buf.extend_from_slice(&sample_rate.to_le_bytes());
    buf.extend_from_slice(&byte_rate.to_le_bytes());
    buf.extend_from_slice(&block_align.to_le_bytes());
    buf.extend_from_slice(&BITS_PER_SAMPLE.to_le_bytes());

    buf.extend_from_slice(b"data");
    buf.extend_from_slice(&data_len.to_le_bytes());
    buf.extend_from_slice(samples);

    debug_assert_eq!(buf.len(), HEADER_LEN + samples.len());
    Ok(buf)
}

/// Fields of a canonical 44-byte WAV header.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WavHeader {
    /// RIFF chunk size (file length minus 8).
    pub riff_size: u32,
    /// Audio format tag (1 = PCM).
    pub audio_format: u16,
    /// Channel count.
    pub channel_count: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bytes per second.
    pub byte_rate: u32,
    /// Bytes per frame.
    pub block_align: u16,
    /// Bits per sample.
    pub bits_per_sample: u16,
    /// Length of the `data` chunk.
    pub data_len: u32,
}

impl WavHeader {
    /// Read the header at the start of `bytes`.
    ///
    /// Only the canonical layout written by [`encode`] is accepted: `fmt `
    /// immediately followed by `data`, no extra chunks.
    pub fn parse(bytes: &[u8]) -> Result<Self, WavError> {
        if bytes.len() < HEADER_LEN {
            return Err(WavError::MalformedHeader(format!(
                "need {HEADER_LEN} bytes, got {}",
                bytes.len()
            )));
        }
        for (offset, magic) in [(0, b"RIFF"), (8, b"WAVE"), (12, b"fmt "), (36, b"data")] {
            if &bytes[offset..offset + 4] != magic {
                return Err(WavError::MalformedHeader(format!(
                    "expected {:?} at offset {offset}",
                    String::from_utf8_lossy(magic)
                )));
            }
        }

        Ok(Self {
            riff_size: le_u32(bytes, 4),
            audio_format: le_u16(bytes, 20),
            channel_count: le_u16(bytes, 22),
            sample_rate: le_u32(bytes, 24),
            byte_rate: le_u32(bytes, 28),
            block_align: le_u16(bytes, 32),
            bits_per_sample: le_u16(bytes, 34),
            data_len: le_u32(bytes, 40),
        })
    }

    /// Sample format described by this header.
    pub fn format(&self) -> PcmFormat {
        PcmFormat {
            sample_rate: self.sample_rate,
            channel_count: self.channel_count,
        }
    }

    /// Playback length in seconds, if the header is self-consistent.
    #[allow(clippy::cast_precision_loss)]
    pub fn duration_secs(&self) -> Option<f64> {
        (self.byte_rate > 0).then(|| f64::from(self.data_len) / f64::from(self.byte_rate))
    }
}

fn le_u16(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

fn le_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

/// Extract the `rate=` parameter from a raw PCM MIME type.
///
/// The speech service labels its output `audio/L16;codec=pcm;rate=24000`.
pub fn pcm_rate_from_mime(mime_type: &str) -> Option<u32> {
    mime_type
        .split(';')
        .skip(1)
        .filter_map(|param| param.split_once('='))
        .find(|(key, _)| key.trim().eq_ignore_ascii_case("rate"))
        .and_then(|(_, value)| value.trim().parse().ok())
        .filter(|rate| *rate > 0)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use proptest::prelude::*;

    fn field_u16(buf: &[u8], offset: usize) -> u16 {
        le_u16(buf, offset)
    }

    fn field_u32(buf: &[u8], offset: usize) -> u32 {
        le_u32(buf, offset)
    }

    // ── Fixed scenarios ──────────────────────────────────────────────

    #[test]
    fn empty_samples_produce_bare_header() {
        let wav = encode(&[], 24_000, 1).unwrap();
        assert_eq!(wav.len(), 44);
        assert_eq!(field_u32(&wav, 40), 0);
        assert_eq!(field_u32(&wav, 4), 36);
    }

    #[test]
    fn four_byte_mono_buffer() {
        let samples = [0x01, 0x02, 0x03, 0x04];
        let wav = encode(&samples, 24_000, 1).unwrap();
        assert_eq!(wav.len(), 48);
        assert_eq!(field_u32(&wav, 40), 4);
        assert_eq!(field_u32(&wav, 24), 24_000);
        assert_eq!(field_u32(&wav, 28), 48_000);
        assert_eq!(&wav[44..], &samples);
    }

    #[test]
    fn stereo_16khz_derived_fields() {
        let samples = vec![0u8; 1000];
        let wav = encode(&samples, 16_000, 2).unwrap();
        assert_eq!(field_u32(&wav, 28), 64_000);
        assert_eq!(field_u16(&wav, 32), 4);
        assert_eq!(wav.len(), 1044);
    }

    #[test]
    fn exact_header_bytes() {
        let wav = encode(&[0xAA, 0xBB], 8_000, 1).unwrap();
        let expected: [u8; 46] = [
            b'R', b'I', b'F', b'F', 38, 0, 0, 0, b'W', b'A', b'V', b'E', //
            b'f', b'm', b't', b' ', 16, 0, 0, 0, 1, 0, 1, 0, //
            0x40, 0x1F, 0, 0, 0x80, 0x3E, 0, 0, 2, 0, 16, 0, //
            b'd', b'a', b't', b'a', 2, 0, 0, 0, 0xAA, 0xBB,
        ];
        assert_eq!(wav, expected);
    }

    #[test]
    fn magic_literals_in_place() {
        let wav = encode(&[0; 10], 44_100, 2).unwrap();
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(&wav[12..16], b"fmt ");
        assert_eq!(&wav[36..40], b"data");
        assert_eq!(field_u32(&wav, 16), 16);
        assert_eq!(field_u16(&wav, 20), 1);
        assert_eq!(field_u16(&wav, 34), 16);
    }

    // ── Errors ───────────────────────────────────────────────────────

    #[test]
    fn zero_sample_rate_rejected() {
        assert_matches!(encode(&[1, 2], 0, 1), Err(WavError::InvalidSampleRate));
    }

    #[test]
    fn zero_channels_rejected() {
        assert_matches!(encode(&[1, 2], 24_000, 0), Err(WavError::InvalidChannelCount));
    }

    #[test]
    fn byte_rate_overflow_rejected() {
        assert_matches!(
            encode(&[], u32::MAX, 2),
            Err(WavError::FieldOverflow { field: "byte rate", .. })
        );
    }

    #[test]
    fn block_align_overflow_rejected() {
        assert_matches!(
            encode(&[], 1, u16::MAX),
            Err(WavError::FieldOverflow { field: "block align", .. })
        );
    }

    #[test]
    fn validate_matches_encode() {
        PcmFormat::SPEECH.validate().unwrap();
        let wide = PcmFormat {
            sample_rate: 24_000,
            channel_count: 40_000,
        };
        assert_matches!(
            wide.validate(),
            Err(WavError::FieldOverflow { field: "block align", .. })
        );
        assert!(wide.encode_wav(&[]).is_err());
        let silent = PcmFormat {
            sample_rate: 0,
            channel_count: 1,
        };
        assert_matches!(silent.validate(), Err(WavError::InvalidSampleRate));
    }

    #[test]
    fn error_messages_are_readable() {
        assert_eq!(
            WavError::InvalidSampleRate.to_string(),
            "sample rate must be positive"
        );
        assert!(
            WavError::DataTooLarge { len: 5 }
                .to_string()
                .contains("5 bytes")
        );
    }

    // ── PcmFormat ────────────────────────────────────────────────────

    #[test]
    fn speech_format_is_24k_mono() {
        assert_eq!(PcmFormat::default(), PcmFormat::SPEECH);
        assert_eq!(PcmFormat::SPEECH.byte_rate().unwrap(), 48_000);
        assert_eq!(PcmFormat::SPEECH.block_align().unwrap(), 2);
    }

    #[test]
    fn format_encode_matches_free_function() {
        let format = PcmFormat::new(22_050, 2).unwrap();
        let samples = [9u8; 8];
        assert_eq!(
            format.encode_wav(&samples).unwrap(),
            encode(&samples, 22_050, 2).unwrap()
        );
    }

    #[test]
    fn format_deserializes_camel_case() {
        let format: PcmFormat =
            serde_json::from_str(r#"{"sampleRate":16000,"channelCount":2}"#).unwrap();
        assert_eq!(format.sample_rate, 16_000);
        assert_eq!(format.channel_count, 2);
    }

    // ── WavHeader ────────────────────────────────────────────────────

    #[test]
    fn header_parses_encoded_output() {
        let wav = encode(&[0; 480], 24_000, 1).unwrap();
        let header = WavHeader::parse(&wav).unwrap();
        assert_eq!(header.riff_size, 36 + 480);
        assert_eq!(header.audio_format, 1);
        assert_eq!(header.format(), PcmFormat::SPEECH);
        assert_eq!(header.byte_rate, 48_000);
        assert_eq!(header.block_align, 2);
        assert_eq!(header.bits_per_sample, 16);
        assert_eq!(header.data_len, 480);
        assert!((header.duration_secs().unwrap() - 0.01).abs() < 1e-9);
    }

    #[test]
    fn header_rejects_short_input() {
        assert_matches!(WavHeader::parse(b"RIFF"), Err(WavError::MalformedHeader(_)));
    }

    #[test]
    fn header_rejects_wrong_magic() {
        let mut wav = encode(&[], 24_000, 1).unwrap();
        wav[8..12].copy_from_slice(b"AVI ");
        let err = WavHeader::parse(&wav).unwrap_err();
        assert!(err.to_string().contains("offset 8"));
    }

    // ── MIME rate ────────────────────────────────────────────────────

    #[test]
    fn rate_from_speech_mime() {
        assert_eq!(
            pcm_rate_from_mime("audio/L16;codec=pcm;rate=24000"),
            Some(24_000)
        );
        assert_eq!(pcm_rate_from_mime("audio/L16; rate=16000"), Some(16_000));
    }

    #[test]
    fn rate_absent_or_invalid() {
        assert_eq!(pcm_rate_from_mime("audio/L16"), None);
        assert_eq!(pcm_rate_from_mime("audio/L16;rate=fast"), None);
        assert_eq!(pcm_rate_from_mime("audio/L16;rate=0"), None);
    }

    // ── Round trip through an independent reader ─────────────────────

    struct Decoded {
        sample_rate: u32,
        channels: usize,
        bits_per_sample: Option<u32>,
        samples: Vec<i16>,
    }

    fn decode_with_symphonia(wav: Vec<u8>) -> Decoded {
        use symphonia::core::audio::SampleBuffer;
        use symphonia::core::codecs::DecoderOptions;
        use symphonia::core::formats::FormatOptions;
        use symphonia::core::io::MediaSourceStream;
        use symphonia::core::meta::MetadataOptions;
        use symphonia::core::probe::Hint;

        let mss = MediaSourceStream::new(Box::new(std::io::Cursor::new(wav)), Default::default());
        let mut hint = Hint::new();
        let _ = hint.with_extension("wav");
        let probed = symphonia::default::get_probe()
            .format(
                &hint,
                mss,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .unwrap();
        let mut format = probed.format;
        let track = format.default_track().unwrap();
        let params = track.codec_params.clone();
        let track_id = track.id;

        let mut decoder = symphonia::default::get_codecs()
            .make(&params, &DecoderOptions::default())
            .unwrap();

        let mut samples = Vec::new();
        loop {
            let packet = match format.next_packet() {
                Ok(p) => p,
                Err(symphonia::core::errors::Error::IoError(ref e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    break;
                }
                Err(e) => panic!("packet read: {e}"),
            };
            if packet.track_id() != track_id {
                continue;
            }
            let decoded = decoder.decode(&packet).unwrap();
            let spec = *decoded.spec();
            let mut buf = SampleBuffer::<i16>::new(decoded.capacity() as u64, spec);
            buf.copy_interleaved_ref(decoded);
            samples.extend_from_slice(buf.samples());
        }

        Decoded {
            sample_rate: params.sample_rate.unwrap(),
            channels: params.channels.unwrap().count(),
            bits_per_sample: params.bits_per_sample,
            samples,
        }
    }

    fn ramp(frames: usize, channels: usize) -> (Vec<u8>, Vec<i16>) {
        let values: Vec<i16> = (0..frames * channels)
            .map(|i| i16::try_from(i % 20_000).unwrap() - 10_000)
            .collect();
        let bytes = values.iter().flat_map(|s| s.to_le_bytes()).collect();
        (bytes, values)
    }

    #[test]
    fn mono_round_trip_through_symphonia() {
        let (bytes, values) = ramp(2_400, 1);
        let decoded = decode_with_symphonia(encode(&bytes, 24_000, 1).unwrap());
        assert_eq!(decoded.sample_rate, 24_000);
        assert_eq!(decoded.channels, 1);
        assert_eq!(decoded.bits_per_sample, Some(16));
        assert_eq!(decoded.samples, values);
    }

    #[test]
    fn stereo_round_trip_through_symphonia() {
        let (bytes, values) = ramp(1_600, 2);
        let decoded = decode_with_symphonia(encode(&bytes, 16_000, 2).unwrap());
        assert_eq!(decoded.sample_rate, 16_000);
        assert_eq!(decoded.channels, 2);
        assert_eq!(decoded.samples, values);
    }

    // ── Properties ───────────────────────────────────────────────────

    proptest! {
        #[test]
        fn length_is_header_plus_payload(
            samples in proptest::collection::vec(any::<u8>(), 0..4096),
            rate in 1u32..200_000,
            channels in 1u16..16,
        ) {
            let wav = encode(&samples, rate, channels).unwrap();
            prop_assert_eq!(wav.len(), HEADER_LEN + samples.len());
            prop_assert_eq!(&wav[HEADER_LEN..], samples.as_slice());
        }

        #[test]
        fn derived_fields_follow_format(
            rate in 1u32..200_000,
            channels in 1u16..16,
        ) {
            let wav = encode(&[0, 0], rate, channels).unwrap();
            prop_assert_eq!(field_u32(&wav, 28), rate * u32::from(channels) * 2);
            prop_assert_eq!(field_u16(&wav, 32), channels * 2);
            prop_assert_eq!(field_u16(&wav, 22), channels);
            prop_assert_eq!(field_u32(&wav, 24), rate);
        }

        #[test]
        fn encoding_is_deterministic(
            samples in proptest::collection::vec(any::<u8>(), 0..512),
            rate in 1u32..100_000,
        ) {
            prop_assert_eq!(encode(&samples, rate, 1).unwrap(), encode(&samples, rate, 1).unwrap());
        }
    }
}
