//! Subcommand handlers.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use omnicut_auth::{
    AuthError, ChainCredentials, CredentialProvider, EnvCredentials, FileCredentials,
};
use omnicut_core::media::{FALLBACK_AUDIO_MIME, FALLBACK_IMAGE_MIME};
use omnicut_core::{PcmFormat, SourceMedia, WavHeader};
use omnicut_settings::OmnicutSettings;
use omnicut_studio::{
    AspectRatio, Progress, ProgressSink, Resolution, Studio, VideoRequest, VideoStyle,
};

/// Arguments of `omnicut video`.
#[derive(Debug)]
pub struct VideoOptions {
    pub prompt: String,
    pub image: Option<PathBuf>,
    pub resolution: Resolution,
    pub aspect_ratio: AspectRatio,
    pub style: VideoStyle,
    pub out: Option<PathBuf>,
}

/// Prints progress lines to stderr so stdout stays clean for results.
struct StderrProgress;

impl ProgressSink for StderrProgress {
    fn report(&self, progress: Progress) {
        eprintln!("{progress}");
    }
}

fn studio(settings: &OmnicutSettings) -> Result<Studio> {
    let credentials = Arc::new(ChainCredentials::standard(
        omnicut_auth::default_auth_file_path(),
    ));
    Ok(Studio::from_settings(settings, credentials)?.with_progress(Arc::new(StderrProgress)))
}

pub async fn video(settings: &OmnicutSettings, options: VideoOptions) -> Result<()> {
    let mut request = VideoRequest::new(options.prompt)
        .with_resolution(options.resolution)
        .with_aspect_ratio(options.aspect_ratio)
        .with_style(options.style);
    if let Some(path) = &options.image {
        let image = SourceMedia::read(path, FALLBACK_IMAGE_MIME)
            .with_context(|| format!("failed to read image {}", path.display()))?;
        request = request.with_image(image);
    }

    let artifact = studio(settings)?.generate_video(request).await?;
    let out = options
        .out
        .unwrap_or_else(|| PathBuf::from(artifact.file_name()));
    artifact
        .write_to(&out)
        .with_context(|| format!("failed to write {}", out.display()))?;
    println!("{}", out.display());
    Ok(())
}

pub async fn dub(
    settings: &OmnicutSettings,
    file: &Path,
    out: Option<PathBuf>,
    transcript: Option<&Path>,
) -> Result<()> {
    let source = SourceMedia::read(file, FALLBACK_AUDIO_MIME)
        .with_context(|| format!("failed to read {}", file.display()))?;

    let result = studio(settings)?.translate_and_dub(source).await?;
    println!("{}", result.translated_text);

    if let Some(path) = transcript {
        std::fs::write(path, &result.translated_text)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }
    let out = out.unwrap_or_else(|| default_dub_path(file));
    result
        .audio
        .write_to(&out)
        .with_context(|| format!("failed to write {}", out.display()))?;
    eprintln!("dub written to {}", out.display());
    Ok(())
}

/// `song.mp3` becomes `song.dub.wav` next to the input.
fn default_dub_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map_or_else(|| "omnicut".to_string(), |s| s.to_string_lossy().into_owned());
    input.with_file_name(format!("{stem}.dub.wav"))
}

pub fn wav_encode(raw: &Path, out: &Path, sample_rate: u32, channels: u16) -> Result<()> {
    let format = PcmFormat::new(sample_rate, channels)?;
    let samples =
        std::fs::read(raw).with_context(|| format!("failed to read {}", raw.display()))?;
    let wav = format.encode_wav(&samples)?;
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(out, &wav).with_context(|| format!("failed to write {}", out.display()))?;
    tracing::info!(path = %out.display(), len = wav.len(), "wav written");
    println!("{}", out.display());
    Ok(())
}

pub fn wav_inspect(file: &Path) -> Result<()> {
    let bytes = std::fs::read(file).with_context(|| format!("failed to read {}", file.display()))?;
    let header = WavHeader::parse(&bytes)?;
    println!("{}", describe_header(&header));
    Ok(())
}

fn describe_header(header: &WavHeader) -> String {
    let duration = header
        .duration_secs()
        .map_or_else(|| "unknown".to_string(), |secs| format!("{secs:.3}s"));
    format!(
        "format:       {}\nchannels:     {}\nsample rate:  {} Hz\nbyte rate:    {}\nblock align:  {}\nbits/sample:  {}\ndata length:  {} bytes\nduration:     {duration}",
        if header.audio_format == 1 { "PCM" } else { "other" },
        header.channel_count,
        header.sample_rate,
        header.byte_rate,
        header.block_align,
        header.bits_per_sample,
        header.data_len,
    )
}

pub fn auth_set_key(path: &Path, key: &str) -> Result<()> {
    omnicut_auth::save_api_key(path, key)?;
    println!("API key saved to {}", path.display());
    Ok(())
}

pub async fn auth_status(path: &Path) -> Result<()> {
    let sources: [Box<dyn CredentialProvider>; 2] = [
        Box::new(EnvCredentials::standard()),
        Box::new(FileCredentials::new(path)),
    ];
    for source in &sources {
        match source.api_key().await {
            Ok(key) => {
                println!("API key {} from {}", key.redacted(), source.name());
                return Ok(());
            }
            Err(AuthError::NotConfigured(_)) => {}
            Err(e) => return Err(e).context(format!("credential source {}", source.name())),
        }
    }
    println!("No API key configured. Set GEMINI_API_KEY or run \"omnicut auth set-key\".");
    Ok(())
}

pub fn auth_clear(path: &Path) -> Result<()> {
    if omnicut_auth::clear_api_key(path)? {
        println!("API key removed from {}", path.display());
    } else {
        println!("No stored API key");
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
