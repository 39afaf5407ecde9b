use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use libvox_speech::Writer;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "vox")]
#[command(version)]
#[command(about = "LPC analysis and yes/no classification of spoken words", long_about = None)]
struct Cli {
    /// Log pipeline decisions (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the 12 LPC coefficients of a recording
    Lpc {
        /// Input samples (text, wav, flac, ...)
        input: PathBuf,
        /// Write coefficients here, one per line
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Recording whose mean is subtracted as DC shift
        #[arg(long)]
        dc_reference: Option<PathBuf>,
        /// Analyze the steady middle windows instead of the first one
        #[arg(long)]
        steady: bool,
        /// Peak amplitude after normalization
        #[arg(long)]
        target_peak: Option<f64>,
        /// JSON config file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Detect the word in a recording and classify it as yes or no
    Classify {
        /// Input samples, ambient noise first unless --noise is given
        input: PathBuf,
        /// Separate ambient noise recording
        #[arg(long)]
        noise: Option<PathBuf>,
        /// Write per-frame energy and zero crossings here
        #[arg(long)]
        frames: Option<PathBuf>,
        /// Average ZCR at or above which the word is "yes"
        #[arg(long)]
        zcr_threshold: Option<f64>,
        /// JSON config file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Extract the detected word to a text or WAV file
    Segment {
        /// Input samples, ambient noise first unless --noise is given
        input: PathBuf,
        /// Output file (.wav for audio, anything else for text)
        #[arg(short, long)]
        output: PathBuf,
        /// Separate ambient noise recording
        #[arg(long)]
        noise: Option<PathBuf>,
        /// JSON config file
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Show sample count, duration and level of a recording
    Info {
        /// Input samples
        input: PathBuf,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Lpc {
            input,
            output,
            dc_reference,
            steady,
            target_peak,
            config,
            json,
        } => {
            let mut config = vox::load_config(config.as_deref())?.lpc;
            if let Some(peak) = target_peak {
                config.target_peak = peak;
            }
            lpc(LpcArgs {
                input,
                output,
                dc_reference,
                steady,
                config,
                json,
            })?;
        }
        Commands::Classify {
            input,
            noise,
            frames,
            zcr_threshold,
            config,
            json,
        } => {
            let mut config = vox::load_config(config.as_deref())?.endpoint;
            if let Some(threshold) = zcr_threshold {
                config.zcr_threshold = threshold;
            }
            classify(&input, noise.as_deref(), frames.as_deref(), &config, json)?;
        }
        Commands::Segment {
            input,
            output,
            noise,
            config,
        } => {
            let config = vox::load_config(config.as_deref())?.endpoint;
            segment(&input, &output, noise.as_deref(), &config)?;
        }
        Commands::Info { input, json } => {
            info_cmd(&input, json)?;
        }
    }

    Ok(())
}

struct LpcArgs {
    input: PathBuf,
    output: Option<PathBuf>,
    dc_reference: Option<PathBuf>,
    steady: bool,
    config: libvox_speech::LpcConfig,
    json: bool,
}

fn lpc(args: LpcArgs) -> Result<()> {
    let report = vox::lpc_report(
        &args.input,
        &args.config,
        args.dc_reference.as_deref(),
        args.steady,
    )?;

    if let Some(ref output) = args.output {
        let text = report
            .windows
            .iter()
            .fold(Writer::new(), |writer, window| {
                writer.coefficients(&window.coefficients)
            })
            .finish();
        fs::write(output, text).context("Failed to write coefficients")?;
        info!(output = %output.display(), "coefficients written");
    }

    if args.json {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{}", json);
        return Ok(());
    }

    println!("LPC Analysis");
    println!("───────────────────────────────");
    println!("  Source:      {}", report.source);
    println!("  DC shift:    {:.3}", report.dc_shift);
    for window in &report.windows {
        println!();
        println!(
            "  Window {} (samples {}..{}){}",
            window.window_index,
            window.start,
            window.start + libvox_speech::LPC_WINDOW,
            if window.stable { "" } else { " [unstable]" }
        );
        for (j, a) in window.coefficients.iter().enumerate() {
            println!("    A[{:>2}] = {:>12.6}", j + 1, a);
        }
    }

    Ok(())
}

fn classify(
    input: &Path,
    noise: Option<&Path>,
    frames_out: Option<&Path>,
    config: &libvox_speech::EndpointConfig,
    json: bool,
) -> Result<()> {
    let report = vox::classify_report(input, noise, config)?;

    if let Some(path) = frames_out {
        let text = Writer::new().frames(&report.report.frames).finish();
        fs::write(path, text).context("Failed to write frame file")?;
        debug!(frames = report.report.frames.len(), "frame file written");
    }

    if json {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{}", json);
        return Ok(());
    }

    let endpoint = &report.report;
    println!("Classification");
    println!("───────────────────────────────");
    println!("  Source:        {}", report.source);
    println!("  Noise level:   {}", endpoint.profile.noise_level);
    println!("  DC shift:      {:.3}", endpoint.profile.dc_shift);
    println!(
        "  Word:          samples {}..{} ({})",
        endpoint.onset,
        endpoint.onset + endpoint.segment_len,
        endpoint.segment_len
    );
    println!("  Frames:        {}", endpoint.result.frame_count);
    println!("  Avg energy:    {:.3}", endpoint.result.average_energy);
    println!("  Avg ZCR:       {:.3}", endpoint.result.average_zcr);
    println!();
    println!("{}", report.word);

    Ok(())
}

fn segment(
    input: &Path,
    output: &Path,
    noise: Option<&Path>,
    config: &libvox_speech::EndpointConfig,
) -> Result<()> {
    let recording = vox::load_recording(input)?;
    let noise = noise.map(vox::load_recording).transpose()?;

    let word = vox::extract_word(
        &recording.samples,
        noise.as_ref().map(|n| n.samples.as_slice()),
        config,
    )?;
    if word.is_empty() {
        bail!("Detected word is empty");
    }

    let is_wav = output
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("wav"));

    if is_wav {
        vox::audio::write_wav(output, &word.samples, recording.sample_rate)?;
    } else {
        let text = Writer::new().samples(&word.samples).finish();
        fs::write(output, text).context("Failed to write word file")?;
    }

    println!(
        "Word: samples {}..{} ({} samples)",
        word.onset,
        word.offset(),
        word.len()
    );
    println!("  Output: {}", output.display());

    Ok(())
}

fn info_cmd(input: &Path, json: bool) -> Result<()> {
    let recording = vox::load_recording(input)?;
    let info = vox::recording_info(&recording);

    if json {
        let json = serde_json::to_string_pretty(&info).context("Failed to serialize info")?;
        println!("{}", json);
        return Ok(());
    }

    println!("Recording");
    println!("───────────────────────────────");
    println!("  Samples:     {}", info.sample_count);
    println!("  Sample rate: {} Hz", info.sample_rate);
    println!("  Duration:    {:.2}s", info.duration_secs);
    println!("  Peak:        {}", info.peak);
    println!("  Mean:        {:.3}", info.mean);

    Ok(())
}
