use edge_chains::config::{load_config, EdgeToolConfig};
use edge_chains::image::io::{load_rgb_frame, save_grayscale_f32, write_json_file};
use edge_chains::{EdgeChainDetector, FrameReport};
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config: EdgeToolConfig = load_config(Path::new(&config_path))?;

    let frame = load_rgb_frame(&config.input)?;
    let detector = EdgeChainDetector::new(config.detector.clone());
    let edges = detector
        .process_rgb(&frame.as_view())
        .map_err(|e| format!("Failed to process {}: {e}", config.input.display()))?;

    let report = FrameReport::from_frame(
        &edges,
        detector.params(),
        Some(config.input.display().to_string()),
    );

    save_grayscale_f32(&edges.edge_map(), &config.output.edge_map)?;
    if let Some(path) = &config.output.magnitude_image {
        save_grayscale_f32(&edges.magnitude, path)?;
    }
    write_json_file(&config.output.report_json, &report)?;

    println!(
        "Linked {} anchors into {} chains ({} px) in {:.3} ms",
        report.anchor_count, report.chain_count, report.chain_pixel_count, report.timings.total_ms
    );
    println!("Saved edge map to {}", config.output.edge_map.display());
    println!("Saved report to {}", config.output.report_json.display());

    Ok(())
}

fn usage() -> String {
    "Usage: edge_chains <config.json>".to_string()
}
