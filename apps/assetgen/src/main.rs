use anyhow::Context;
use clap::{Parser, Subcommand};
use common::logging::CommonLogger;
use hearmeout_assetgen::{audio, cover, AlbumCoverConfig, AudioBufferConfig};
use log::LevelFilter;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct CLI {
    /// Log debug messages, including timings
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resample sound.wav to 8 kHz and write new_audio.wav and data.h
    Audio,
    /// Convert every image in raw_covers/ into a 152x150 BMP in bmp_covers/
    Covers,
}

fn run_audio() -> anyhow::Result<()> {
    let config = AudioBufferConfig::default();
    let buffer = audio::generate(&config).context("Failed to generate audio buffer")?;
    log::info!(
        "Audio buffer ready: {} sample(s) at {} Hz",
        buffer.len(),
        buffer.sample_rate
    );
    Ok(())
}

fn run_covers() -> anyhow::Result<()> {
    let config = AlbumCoverConfig::default();
    let report = cover::convert_covers(&config).context("Failed to convert album covers")?;

    log::info!(
        "{} converted, {} skipped",
        report.converted(),
        report.skipped()
    );
    if report.skipped() > 0 {
        let names: Vec<String> = report
            .skipped_outcomes()
            .map(|o| o.input().display().to_string())
            .collect();
        log::warn!("Skipped: {}", names.join(", "));
    }
    Ok(())
}

fn main() {
    let cli = CLI::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    CommonLogger::install(level).unwrap_or_else(|err| {
        eprintln!("Failed to install logger: {}", err);
    });

    let result = match cli.command {
        Command::Audio => run_audio(),
        Command::Covers => run_covers(),
    };

    result.unwrap_or_else(|err| {
        log::error!("{:#}", err);
        std::process::exit(1);
    });
}
