//! Integration tests for the complete selfie-to-season pipeline
//!
//! These tests validate the end-to-end workflow on synthetic photos:
//! - Decoding encoded bytes and locating the face
//! - Skin sampling, Lab conversion and season matching
//! - Confidence scoring
//! - Skin-to-feature contrast on painted eye and lip patches
//! - Configuration loading
//! - Error handling for edge cases

use image::{Rgb, RgbImage};
use rand::rngs::StdRng;
use rand::SeedableRng;
use season_scan::detection::RegionSampler;
use season_scan::{
    analyze_request, AnalysisError, AnalysisRequest, AnalyzerConfig, ChromaLevel, ColorAnalyzer,
    ColorSeason, Contrast, Depth, FaceBounds, FaceDetector, FaceLocator, FaceRegion, RgbSample,
    SeasonFamily, Undertone,
};
use std::io::Cursor;

// ============================================================================
// Helpers
// ============================================================================

/// Uniformly colored photo; the face box, features and neck all share the skin tone
fn uniform_photo(skin: [u8; 3]) -> RgbImage {
    RgbImage::from_pixel(200, 240, Rgb(skin))
}

/// Uniform skin with a white sclera patch and a dark lip patch painted at the
/// feature anchors of [`face`]
///
/// In that box the sclera anchor lands on pixel (80, 105.6) and the lip
/// anchor on (100, 170.4). Each 7×7 patch covers the whole 3×3 jitter grid
/// and misses every skin sample point.
fn photo_with_features(skin: [u8; 3]) -> RgbImage {
    let mut photo = uniform_photo(skin);
    for (cx, cy, color) in [(80, 106, SCLERA), (100, 170, LIP)] {
        for y in cy - 3..=cy + 3 {
            for x in cx - 3..=cx + 3 {
                photo.put_pixel(x, y, Rgb(color));
            }
        }
    }
    photo
}

const SCLERA: [u8; 3] = [255, 255, 255];
const LIP: [u8; 3] = [60, 30, 30];

fn face() -> FaceRegion {
    FaceRegion::new(0.25, 0.2, 0.5, 0.6).unwrap()
}

fn png(image: &RgbImage) -> Vec<u8> {
    let mut bytes = Cursor::new(Vec::new());
    image.write_to(&mut bytes, image::ImageFormat::Png).unwrap();
    bytes.into_inner()
}

struct StubDetector(Vec<FaceBounds>);

impl FaceDetector for StubDetector {
    fn detect(&self, _gray: &[u8], _width: u32, _height: u32) -> Vec<FaceBounds> {
        self.0.clone()
    }
}

fn seeded() -> StdRng {
    StdRng::seed_from_u64(2024)
}

// ============================================================================
// Classification
// ============================================================================

#[test]
fn test_fair_warm_selfie_is_light_spring() {
    let result =
        ColorAnalyzer::new().classify_with_rng(&uniform_photo([214, 156, 112]), face(), &mut seeded());

    assert_eq!(result.season, ColorSeason::LightSpring);
    assert_eq!(result.undertone, Undertone::Warm);
    assert_eq!(result.contrast, Contrast::Low);
    // Good exposure, strong color cast in the skin sample
    assert!((result.confidence - 0.85).abs() < 1e-5, "{}", result.confidence);
}

#[test]
fn test_neutral_medium_selfie_is_soft_summer() {
    let result =
        ColorAnalyzer::new().classify_with_rng(&uniform_photo([125, 112, 110]), face(), &mut seeded());

    assert_eq!(result.season, ColorSeason::SoftSummer);
    assert_eq!(result.undertone, Undertone::Neutral);
    assert!((result.confidence - 0.95).abs() < 1e-5, "{}", result.confidence);
}

#[test]
fn test_cool_deep_selfie_is_winter() {
    let result =
        ColorAnalyzer::new().classify_with_rng(&uniform_photo([95, 80, 90]), face(), &mut seeded());

    assert_eq!(result.undertone, Undertone::Cool);
    assert_eq!(result.season, ColorSeason::CoolWinter);
    assert_eq!(result.season.family(), SeasonFamily::Winter);
}

#[test]
fn test_face_outside_photo_falls_back_to_neutral_gray() {
    let offscreen = FaceRegion::new(3.0, 3.0, 0.4, 0.4).unwrap();
    let analysis =
        ColorAnalyzer::new().analyze_with_rng(&uniform_photo([214, 156, 112]), offscreen, &mut seeded());

    assert_eq!(analysis.skin.sample, RgbSample::NEUTRAL_GRAY);
    assert_eq!(analysis.skin.hex, "#808080");
    assert_eq!(analysis.result.season, ColorSeason::SoftSummer);
    assert_eq!(analysis.result.contrast, Contrast::Low);
}

#[test]
fn test_analyzer_is_shareable_across_threads() {
    let analyzer = std::sync::Arc::new(ColorAnalyzer::new());
    let photo = std::sync::Arc::new(uniform_photo([125, 112, 110]));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let analyzer = analyzer.clone();
            let photo = photo.clone();
            std::thread::spawn(move || analyzer.classify(&photo, face()).season)
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), ColorSeason::SoftSummer);
    }
}

#[test]
fn test_feature_anchors_land_on_eye_and_mouth() {
    let photo = photo_with_features([125, 112, 110]);
    let sampler = RegionSampler::default();

    assert_eq!(
        sampler.sample_sclera(&photo, &face()),
        Some(RgbSample::from_rgb8(&Rgb(SCLERA)))
    );
    assert_eq!(
        sampler.sample_lip(&photo, &face()),
        Some(RgbSample::from_rgb8(&Rgb(LIP)))
    );
    // the patches stay clear of the skin sample points
    let skin = sampler.sample_skin(&photo, &face());
    let expected = RgbSample::from_rgb8(&Rgb([125, 112, 110]));
    for (got, want) in [(skin.r, expected.r), (skin.g, expected.g), (skin.b, expected.b)] {
        assert!((got - want).abs() < 1e-5, "{:?}", skin);
    }
}

#[test]
fn test_feature_contrast_keeps_neutral_medium_skin_out_of_soft_summer() {
    let analysis = ColorAnalyzer::new().analyze_with_rng(
        &photo_with_features([125, 112, 110]),
        face(),
        &mut seeded(),
    );

    // skin Y ~0.45: sclera gap ~0.55, lip gap ~0.30
    assert!(analysis.skin.relative_contrast > 0.08, "{}", analysis.skin.relative_contrast);
    assert!((analysis.skin.relative_contrast - 0.42).abs() < 0.01);
    assert_eq!(analysis.result.undertone, Undertone::Neutral);
    assert_eq!(analysis.skin.depth, Depth::Medium);
    assert_ne!(analysis.result.season, ColorSeason::SoftSummer);
    assert_eq!(analysis.result.season, ColorSeason::SoftAutumn);
}

#[test]
fn test_feature_contrast_moves_moderate_warm_skin_to_spring() {
    // L* ~57, C* ~12.8, undertone score ~10.3: warm, moderate, medium
    let skin = [160, 130, 125];
    let analyzer = ColorAnalyzer::new();

    let flat = analyzer.analyze_with_rng(&uniform_photo(skin), face(), &mut seeded());
    assert_eq!(flat.skin.relative_contrast, 0.0);
    assert_eq!(flat.skin.chroma_level, ChromaLevel::Moderate);
    assert_eq!(flat.skin.depth, Depth::Medium);
    assert_eq!(flat.result.undertone, Undertone::Warm);
    assert_eq!(flat.result.contrast, Contrast::Low);
    assert_eq!(flat.result.season, ColorSeason::WarmAutumn);

    let featured = analyzer.analyze_with_rng(&photo_with_features(skin), face(), &mut seeded());
    assert!(featured.skin.relative_contrast > 0.12, "{}", featured.skin.relative_contrast);
    assert_eq!(featured.result.contrast, Contrast::Low);
    assert_eq!(featured.result.season, ColorSeason::WarmSpring);
    assert_eq!(featured.result.season.family(), SeasonFamily::Spring);
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_config_file_changes_classification() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("analyzer.json");

    // L* of this skin is about 69: raising the light cut moves it to medium depth
    let mut config = AnalyzerConfig::default();
    config.depth.light_above = 72.0;
    config.to_json_file(&path).unwrap();

    let loaded = AnalyzerConfig::from_json_file(&path).unwrap();
    assert_eq!(loaded, config);

    let result = ColorAnalyzer::with_config(loaded).unwrap().classify_with_rng(
        &uniform_photo([214, 156, 112]),
        face(),
        &mut seeded(),
    );
    assert_eq!(result.season, ColorSeason::WarmSpring);
}

#[test]
fn test_invalid_config_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, r#"{"chroma": {"high": 10.0, "low": 12.0}}"#).unwrap();

    assert!(matches!(
        AnalyzerConfig::from_json_file(&path),
        Err(AnalysisError::InvalidParameter { .. })
    ));
}

// ============================================================================
// Request pipeline
// ============================================================================

#[test]
fn test_request_result_serializes_to_flat_json() {
    let request = AnalysisRequest::new(png(&uniform_photo([125, 112, 110]))).with_face(face());
    let result = analyze_request(&ColorAnalyzer::new(), None, &request).unwrap();

    let json: serde_json::Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();
    assert_eq!(json["season"], "softSummer");
    assert_eq!(json["undertone"], "neutral");
    assert_eq!(json["contrast"], "low");
    assert!(json["confidence"].as_f64().unwrap() > 0.9);
}

#[test]
fn test_request_locates_face_with_detector() {
    let locator = FaceLocator::new(Box::new(StubDetector(vec![FaceBounds {
        x: 50.0,
        y: 40.0,
        width: 100.0,
        height: 120.0,
        confidence: 6.5,
    }])));
    let request = AnalysisRequest::new(png(&uniform_photo([95, 80, 90])));
    let result = analyze_request(&ColorAnalyzer::new(), Some(&locator), &request).unwrap();
    assert_eq!(result.season, ColorSeason::CoolWinter);
}

#[test]
fn test_detection_failures_are_recoverable() {
    let bytes = png(&uniform_photo([125, 112, 110]));

    let nobody = FaceLocator::new(Box::new(StubDetector(vec![])));
    let err = analyze_request(&ColorAnalyzer::new(), Some(&nobody), &AnalysisRequest::new(bytes.clone()))
        .unwrap_err();
    assert!(matches!(err, AnalysisError::NoFaceFound));
    assert!(err.is_recoverable());

    let bounds = FaceBounds {
        x: 10.0,
        y: 10.0,
        width: 40.0,
        height: 40.0,
        confidence: 3.0,
    };
    let crowd = FaceLocator::new(Box::new(StubDetector(vec![bounds.clone(), bounds])));
    let err = analyze_request(&ColorAnalyzer::new(), Some(&crowd), &AnalysisRequest::new(bytes))
        .unwrap_err();
    assert!(matches!(err, AnalysisError::MultipleFacesFound { count: 2 }));
    assert!(err.is_recoverable());
}

#[test]
fn test_undecodable_photo_is_invalid_image() {
    let request = AnalysisRequest::new(b"GIF89a truncated".to_vec()).with_face(face());
    let err = analyze_request(&ColorAnalyzer::new(), None, &request).unwrap_err();
    assert!(matches!(err, AnalysisError::InvalidImage { .. }));
}
