use edge_chains::config::{load_config, BatchToolConfig};
use edge_chains::image::io::{list_frames, load_rgb_frame, save_grayscale_f32, write_json_file};
use edge_chains::{EdgeChainDetector, FrameReport};
use log::{info, warn};
use rayon::prelude::*;
use serde::Serialize;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Instant;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config: BatchToolConfig = load_config(Path::new(&config_path))?;

    if let Some(threads) = config.batch.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads.max(1))
            .build_global()
            .map_err(|e| format!("Failed to configure thread pool: {e}"))?;
    }

    let frames = list_frames(&config.input_dir)?;
    if frames.is_empty() {
        return Err(format!("No frames found in {}", config.input_dir.display()));
    }
    info!("processing {} frames from {}", frames.len(), config.input_dir.display());

    let detector = EdgeChainDetector::new(config.detector.clone());
    let start = Instant::now();
    // frames share nothing; each one runs the single-threaded pipeline
    let results: Vec<FrameSummary> = frames
        .par_iter()
        .map(|path| process_frame(&detector, path, &config))
        .collect();
    let wall_ms = start.elapsed().as_secs_f64() * 1000.0;

    let failed = results.iter().filter(|r| r.error.is_some()).count();
    let summary = BatchSummary {
        frame_count: results.len(),
        failed_count: failed,
        total_chains: results.iter().map(|r| r.chain_count).sum(),
        wall_ms,
        frames: results,
    };
    let summary_path = config.output_dir.join("summary.json");
    write_json_file(&summary_path, &summary)?;

    println!(
        "Processed {} frames ({} failed) in {:.1} ms; summary at {}",
        summary.frame_count,
        summary.failed_count,
        summary.wall_ms,
        summary_path.display()
    );
    Ok(())
}

fn process_frame(detector: &EdgeChainDetector, path: &Path, config: &BatchToolConfig) -> FrameSummary {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "frame".to_string());
    match run_frame(detector, path, &stem, config) {
        Ok(summary) => summary,
        Err(err) => {
            warn!("{}: {err}", path.display());
            FrameSummary {
                frame: path.to_path_buf(),
                chain_count: 0,
                chain_pixel_count: 0,
                total_ms: 0.0,
                error: Some(err),
            }
        }
    }
}

fn run_frame(
    detector: &EdgeChainDetector,
    path: &Path,
    stem: &str,
    config: &BatchToolConfig,
) -> Result<FrameSummary, String> {
    let frame = load_rgb_frame(path)?;
    let edges = detector
        .process_rgb(&frame.as_view())
        .map_err(|e| e.to_string())?;
    let report = FrameReport::from_frame(&edges, detector.params(), Some(path.display().to_string()));

    write_json_file(&config.output_dir.join(format!("{stem}.json")), &report)?;
    if config.batch.save_edge_maps {
        save_grayscale_f32(&edges.edge_map(), &config.output_dir.join(format!("{stem}_edges.png")))?;
    }

    Ok(FrameSummary {
        frame: path.to_path_buf(),
        chain_count: report.chain_count,
        chain_pixel_count: report.chain_pixel_count,
        total_ms: report.timings.total_ms,
        error: None,
    })
}

fn usage() -> String {
    "Usage: edge_chains_batch <config.json>".to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FrameSummary {
    frame: PathBuf,
    chain_count: usize,
    chain_pixel_count: usize,
    total_ms: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchSummary {
    frame_count: usize,
    failed_count: usize,
    total_chains: usize,
    wall_ms: f64,
    frames: Vec<FrameSummary>,
}
