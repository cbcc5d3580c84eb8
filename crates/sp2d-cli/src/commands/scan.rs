//! Scan command - run the extractor over a stream of OCR frames and keep the
//! latest complete reading.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, Local};
use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use sp2d_core::{FrameScanner, Reading, ScanStats};

use super::extract::{format_reading, OutputFormat};
use super::{load_config, read_input};

/// Arguments for the scan command.
#[derive(Args)]
pub struct ScanArgs {
    /// Frame files: a glob pattern, a single file, or `-` for stdin
    #[arg(required = true)]
    input: String,

    /// Write the latest reading here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format for the latest reading
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Frame separator inside a file (default from config: form feed)
    #[arg(short, long)]
    delimiter: Option<String>,

    /// Skip stale queued frames and process only the newest one
    #[arg(long)]
    drop_stale: bool,
}

/// A reading as held by the display side.
#[derive(Debug, Clone)]
struct Accepted {
    reading: Reading,
    accepted_at: DateTime<Local>,
}

pub async fn run(args: ScanArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let extractor = config.extractor()?;
    let delimiter = args
        .delimiter
        .clone()
        .unwrap_or_else(|| config.scan.frame_delimiter.clone());
    let drop_stale = args.drop_stale || config.scan.drop_stale_frames;

    let frames = collect_frames(&args.input, &delimiter)?;
    if frames.is_empty() {
        anyhow::bail!("No frames found in {}", args.input);
    }

    info!("Scanning {} frames from {}", frames.len(), args.input);

    let pb = ProgressBar::new(frames.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} frames")?
            .progress_chars("=>-"),
    );

    let (frame_tx, mut frame_rx) = mpsc::channel::<String>(config.scan.channel_capacity.max(1));
    let (reading_tx, mut reading_rx) = watch::channel::<Option<Accepted>>(None);

    // Producer: feed frames in order; back-pressure comes from the channel.
    let producer = tokio::spawn(async move {
        for frame in frames {
            if frame_tx.send(frame).await.is_err() {
                break;
            }
        }
    });

    // Worker: the only writer of the latest reading. In drop mode it skips
    // every queued frame except the newest one.
    let worker_pb = pb.clone();
    let worker = tokio::spawn(async move {
        let sink = move |reading: &Reading| {
            reading_tx.send_replace(Some(Accepted {
                reading: reading.clone(),
                accepted_at: Local::now(),
            }));
        };
        let mut scanner = FrameScanner::new(extractor, sink);
        let mut dropped = 0u64;

        while let Some(mut frame) = frame_rx.recv().await {
            if drop_stale {
                let (newest, skipped) = take_newest(frame, &mut frame_rx);
                if skipped > 0 {
                    debug!("Worker busy, dropped {} stale frame(s)", skipped);
                    worker_pb.inc(skipped);
                    dropped += skipped;
                }
                frame = newest;
            }
            scanner.process_frame(&frame);
            worker_pb.inc(1);
        }

        (scanner.stats(), dropped)
    });

    // Display side: report each new reading; repeats of the same one are quiet.
    let mut shown: Option<Reading> = None;
    while reading_rx.changed().await.is_ok() {
        let accepted = reading_rx.borrow_and_update().clone();
        if let Some(accepted) = accepted {
            if shown.as_ref() != Some(&accepted.reading) {
                pb.suspend(|| {
                    println!(
                        "{} [{}] {}",
                        style("→").cyan(),
                        accepted.accepted_at.format("%H:%M:%S"),
                        accepted.reading
                    )
                });
                shown = Some(accepted.reading);
            }
        }
    }

    producer.await?;
    let (stats, dropped) = worker.await?;
    pb.finish_and_clear();

    let latest = reading_rx.borrow().clone();
    print_summary(&stats, dropped);

    let Some(latest) = latest else {
        anyhow::bail!(
            "No complete SP2D reading detected in {} frames",
            stats.frames
        );
    };

    let output = format_reading(&latest.reading, args.format)?;
    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Latest reading written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total scan time: {:?}", start.elapsed());

    Ok(())
}

/// Gather frames from stdin, one file, or every file matching a glob,
/// splitting each text on the delimiter.
fn collect_frames(input: &str, delimiter: &str) -> anyhow::Result<Vec<String>> {
    if input == "-" {
        let text = read_input(Path::new("-"))?;
        return Ok(split_frames(&text, delimiter));
    }

    let mut files: Vec<PathBuf> = glob(input)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .collect();
    files.sort();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", input);
    }

    let mut frames = Vec::new();
    for path in &files {
        match fs::read_to_string(path) {
            Ok(text) => frames.extend(split_frames(&text, delimiter)),
            Err(e) => warn!("Skipping {}: {}", path.display(), e),
        }
    }

    Ok(frames)
}

fn split_frames(text: &str, delimiter: &str) -> Vec<String> {
    if delimiter.is_empty() {
        return vec![text.to_string()];
    }

    text.split(delimiter)
        .filter(|frame| !frame.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// Replace `frame` with the newest frame already waiting in the queue.
/// Returns that frame and the number of older frames skipped.
fn take_newest(mut frame: String, rx: &mut mpsc::Receiver<String>) -> (String, u64) {
    let mut skipped = 0;
    while let Ok(newer) = rx.try_recv() {
        frame = newer;
        skipped += 1;
    }
    (frame, skipped)
}

fn print_summary(stats: &ScanStats, dropped: u64) {
    eprintln!(
        "{} {} frames scanned, {} complete, {} empty, {} changes, {} dropped",
        style("ℹ").blue(),
        stats.frames,
        stats.complete,
        stats.empty,
        stats.changes,
        dropped
    );
}
