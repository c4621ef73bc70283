//! Command-line interface for season_scan
//!
//! Basic CLI tool for testing season analysis on a single selfie

use season_scan::image_loader::load_image;
use season_scan::{Analysis, AnalyzerConfig, ColorAnalyzer, FaceLocator, FaceRegion};
use std::{env, path::Path, process};
use tracing_subscriber::EnvFilter;

struct Options {
    image_path: String,
    face: Option<FaceRegion>,
    config_path: Option<String>,
    model_path: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let options = parse_args(&args);

    let config = match &options.config_path {
        Some(path) => AnalyzerConfig::from_json_file(Path::new(path)).unwrap_or_else(|e| fail(&e)),
        None => AnalyzerConfig::default(),
    };
    let analyzer = ColorAnalyzer::with_config(config).unwrap_or_else(|e| fail(&e));

    let image_path = Path::new(&options.image_path);
    if !image_path.exists() {
        eprintln!("Error: File '{}' does not exist", image_path.display());
        process::exit(1);
    }
    let image = load_image(image_path).unwrap_or_else(|e| fail(&e));

    let face = match options.face {
        Some(face) => face,
        None => {
            let locator = build_locator(options.model_path.as_deref());
            locator.locate(&image).unwrap_or_else(|e| fail(&e))
        }
    };

    print_analysis(&analyzer.analyze(&image, face));
}

fn parse_args(args: &[String]) -> Options {
    let mut image_path = None;
    let mut face = None;
    let mut config_path = None;
    let mut model_path = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--face" => {
                i += 1;
                let value = args.get(i).map(String::as_str).unwrap_or_default();
                face = Some(parse_face(value).unwrap_or_else(|| {
                    eprintln!("Error: --face expects x,y,width,height in [0, 1], got '{}'", value);
                    process::exit(1);
                }));
            }
            "--config" => {
                i += 1;
                config_path = args.get(i).cloned();
            }
            "--model" => {
                i += 1;
                model_path = args.get(i).cloned();
            }
            "--help" | "-h" => {
                print_help(&args[0]);
                process::exit(0);
            }
            arg if !arg.starts_with("--") => {
                if image_path.is_none() {
                    image_path = Some(arg.to_string());
                } else {
                    eprintln!("Error: Multiple image paths provided");
                    process::exit(1);
                }
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                eprintln!("Use --help for usage information");
                process::exit(1);
            }
        }
        i += 1;
    }

    let Some(image_path) = image_path else {
        print_help(&args[0]);
        process::exit(1);
    };

    Options {
        image_path,
        face,
        config_path,
        model_path,
    }
}

fn parse_face(value: &str) -> Option<FaceRegion> {
    let parts: Vec<f32> = value
        .split(',')
        .map(|part| part.trim().parse().ok())
        .collect::<Option<_>>()?;
    match parts.as_slice() {
        [x, y, w, h] => FaceRegion::new(*x, *y, *w, *h).ok(),
        _ => None,
    }
}

#[cfg(feature = "rustface")]
fn build_locator(model_path: Option<&str>) -> FaceLocator {
    use season_scan::detection::RustfaceDetector;

    let Some(path) = model_path else {
        eprintln!("Error: pass --face or --model <seeta_fd_frontal_v1.0.bin>");
        process::exit(1);
    };
    let detector = RustfaceDetector::from_model_file(Path::new(path)).unwrap_or_else(|e| fail(&e));
    FaceLocator::new(Box::new(detector))
}

#[cfg(not(feature = "rustface"))]
fn build_locator(_model_path: Option<&str>) -> FaceLocator {
    eprintln!("Error: no --face given and face detection needs the `rustface` feature");
    process::exit(1);
}

fn fail(error: &season_scan::AnalysisError) -> ! {
    eprintln!("Analysis failed: {}", error);
    if error.is_recoverable() {
        eprintln!("Suggestion: {}", error.user_message());
    }
    process::exit(1);
}

fn print_help(program_name: &str) {
    eprintln!("Usage: {} [OPTIONS] <image_path>", program_name);
    eprintln!();
    eprintln!("Classify the face in a selfie into one of 12 color seasons.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --face X,Y,W,H   Normalized face box, origin at the bottom-left");
    eprintln!("  --config FILE    Analyzer configuration JSON");
    eprintln!("  --model FILE     SeetaFace model for face detection (feature `rustface`)");
    eprintln!("  --help, -h       Show this help message");
    eprintln!();
    eprintln!("Set RUST_LOG=season_scan=debug to trace the measurements.");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} --face 0.3,0.35,0.4,0.45 selfie.jpg", program_name);
    eprintln!("  {} --model seeta_fd_frontal_v1.0.bin selfie.heic", program_name);
}

fn print_analysis(analysis: &Analysis) {
    let result = &analysis.result;

    // JSON to stdout for programmatic use
    match result.to_json() {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing result: {}", e);
            process::exit(1);
        }
    }

    // Summary to stderr for human reading
    let skin = &analysis.skin;
    eprintln!();
    eprintln!("Season Analysis Summary:");
    eprintln!("  Season: {} ({:?})", result.season, result.season.family());
    eprintln!("  Undertone: {:?}", result.undertone);
    eprintln!("  Contrast: {:?}", result.contrast);
    eprintln!("  Confidence: {:.1}%", result.confidence * 100.0);
    eprintln!();
    eprintln!("  Skin: {}", skin.hex);
    eprintln!(
        "  Lab Values: L*={:.1}, a*={:.1}, b*={:.1} (C*={:.1}, {:?})",
        skin.lab.l, skin.lab.a, skin.lab.b, skin.chroma, skin.chroma_level
    );
    eprintln!("  Depth: {:?}", skin.depth);
    eprintln!(
        "  Luminance variance: {:.3}, feature contrast: {:.3}",
        skin.luminance_variance, skin.relative_contrast
    );
}
