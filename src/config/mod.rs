//! JSON configuration for the command-line tools.
//!
//! Detector knobs are embedded as a [`DetectorParams`] object; every field
//! there is optional and falls back to its default.

use crate::detector::DetectorParams;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Config of the single-frame `edge_chains` tool.
#[derive(Debug, Deserialize)]
pub struct EdgeToolConfig {
    /// Image file holding one frame
    pub input: PathBuf,
    #[serde(default)]
    pub detector: DetectorParams,
    pub output: EdgeOutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct EdgeOutputConfig {
    /// 0/255 PNG of chain pixels
    #[serde(rename = "edge_map")]
    pub edge_map: PathBuf,
    /// [`FrameReport`](crate::diagnostics::FrameReport) as JSON
    #[serde(rename = "report_json")]
    pub report_json: PathBuf,
    /// Optional PNG of the thresholded magnitude (clamped to 255)
    #[serde(default, rename = "magnitude_image")]
    pub magnitude_image: Option<PathBuf>,
}

/// Config of the `edge_chains_batch` tool.
#[derive(Debug, Deserialize)]
pub struct BatchToolConfig {
    /// Directory of decoded frames, processed in file-name order
    #[serde(rename = "input_dir")]
    pub input_dir: PathBuf,
    #[serde(default)]
    pub detector: DetectorParams,
    #[serde(default)]
    pub batch: BatchConfig,
    #[serde(rename = "output_dir")]
    pub output_dir: PathBuf,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Worker threads; `None` uses rayon's default pool
    pub threads: Option<usize>,
    /// Write one edge-map PNG per frame next to the reports
    pub save_edge_maps: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            threads: None,
            save_edge_maps: true,
        }
    }
}

pub fn load_config<T: DeserializeOwned>(path: &Path) -> Result<T, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    parse_config(&data).map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

pub fn parse_config<T: DeserializeOwned>(data: &str) -> Result<T, String> {
    serde_json::from_str(data).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_config_fills_detector_defaults() {
        let config: EdgeToolConfig = parse_config(
            r#"{
                "input": "frame.png",
                "detector": { "validateChains": true },
                "output": { "edge_map": "out/edges.png", "report_json": "out/report.json" }
            }"#,
        )
        .unwrap();
        assert_eq!(config.input, PathBuf::from("frame.png"));
        assert!(config.detector.validate_chains);
        assert!(config.detector.smoothing);
        assert!(config.output.magnitude_image.is_none());
    }

    #[test]
    fn batch_config_defaults() {
        let config: BatchToolConfig =
            parse_config(r#"{ "input_dir": "frames", "output_dir": "out" }"#).unwrap();
        assert!(config.batch.save_edge_maps);
        assert_eq!(config.batch.threads, None);
        assert_eq!(config.detector, DetectorParams::default());
    }

    #[test]
    fn missing_output_is_an_error() {
        let err = parse_config::<EdgeToolConfig>(r#"{ "input": "a.png" }"#).unwrap_err();
        assert!(err.contains("output"), "{err}");
    }

    #[test]
    fn unreadable_file_names_the_path() {
        let err = load_config::<EdgeToolConfig>(Path::new("/nonexistent/edge.json")).unwrap_err();
        assert!(err.contains("/nonexistent/edge.json"));
    }
}
