//! Generate the default analyzer configuration file
//!
//! Creates a JSON config with all calibrated thresholds, ready for editing

use season_scan::AnalyzerConfig;
use std::{env, path::Path, process};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <output_config.json>", args[0]);
        eprintln!();
        eprintln!("Example:");
        eprintln!("  {} config/analyzer.json", args[0]);
        process::exit(1);
    }

    let output_path = Path::new(&args[1]);

    // Create parent directory if needed
    if let Some(parent) = output_path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("Error creating directory: {}", e);
            process::exit(1);
        }
    }

    let config = AnalyzerConfig::default();

    match config.to_json_file(output_path) {
        Ok(()) => {
            eprintln!("Configuration saved to {}", output_path.display());
            eprintln!();
            eprintln!("Config summary:");
            eprintln!(
                "  Chroma: vivid > {:.0}, moderate > {:.0}",
                config.chroma.high, config.chroma.low
            );
            eprintln!(
                "  Depth: light L* > {:.0}, medium L* > {:.0}",
                config.depth.light_above, config.depth.medium_above
            );
            eprintln!(
                "  Contrast: high variance > {:.2}, medium > {:.2}",
                config.contrast.high_variance, config.contrast.medium_variance
            );
            eprintln!(
                "  Skin weights: forehead {:.1}, cheek {:.1}, neck {:.1}",
                config.sampling.forehead_weight,
                config.sampling.cheek_weight,
                config.sampling.neck_weight
            );
            eprintln!(
                "  Confidence: {:.0}% lighting / {:.0}% tone, clamped to [{:.2}, {:.2}]",
                config.confidence.lighting_weight * 100.0,
                config.confidence.tone_weight * 100.0,
                config.confidence.min,
                config.confidence.max
            );
        }
        Err(e) => {
            eprintln!("Error saving config: {}", e);
            process::exit(1);
        }
    }
}
