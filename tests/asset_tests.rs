//! Asset loader tests
//!
//! Tests for:
//! - Binary loading relative to an injected base directory
//! - Missing-asset and I/O error classification
//! - Image loading channel-count gate and RGBA conversion

use std::path::PathBuf;

use glint::{AssetLoader, GlintError};

// ============================================================================
// Helpers
// ============================================================================

/// The crate root; the demo's own shaders double as fixtures.
fn crate_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// A scratch base directory unique to this test process.
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("glint_{name}_{}", std::process::id()));
    std::fs::create_dir_all(dir.join("assets")).unwrap();
    dir
}

// ============================================================================
// Binary loading
// ============================================================================

#[test]
fn load_binary_reads_relative_to_base_dir() {
    let loader = AssetLoader::new(crate_dir());
    let bytes = loader
        .load_binary("shaders/compiled/position.vert.wgsl")
        .unwrap();
    assert!(!bytes.is_empty());
    assert!(std::str::from_utf8(&bytes).unwrap().contains("@vertex"));
}

#[test]
fn load_binary_missing_file_is_asset_missing() {
    let loader = AssetLoader::new(crate_dir());
    let err = loader.load_binary("shaders/compiled/no_such.vert.wgsl");
    assert!(matches!(err, Err(GlintError::AssetMissing(_))), "{err:?}");
}

#[test]
fn base_dir_is_the_injected_path() {
    let loader = AssetLoader::new("/tmp/somewhere");
    assert_eq!(loader.base_dir(), std::path::Path::new("/tmp/somewhere"));
}

// ============================================================================
// Image loading
// ============================================================================

#[test]
fn load_image_rejects_non_four_channel_requests() {
    // The gate fires before any file read: a base dir that does not exist
    // must still produce the format error, not an I/O error.
    let loader = AssetLoader::new("/nonexistent/base/dir");
    for requested in [0u32, 1, 2, 3, 5] {
        let err = loader.load_image("ignored.bmp", requested);
        assert!(
            matches!(err, Err(GlintError::UnsupportedFormat { requested: r }) if r == requested),
            "{err:?}"
        );
    }
}

#[test]
fn load_image_missing_file_is_io_error() {
    let loader = AssetLoader::new("/nonexistent/base/dir");
    let err = loader.load_image("ignored.png", 4);
    assert!(matches!(err, Err(GlintError::IoError(_))), "{err:?}");
}

#[test]
fn load_image_converts_to_rgba() {
    let base = scratch_dir("rgb_image");
    // A 2x2 three-channel source; loading must widen it to RGBA.
    let rgb = image::RgbImage::from_fn(2, 2, |x, y| image::Rgb([x as u8, y as u8, 7]));
    rgb.save(base.join("assets").join("tiny.png")).unwrap();

    let loader = AssetLoader::new(&base);
    let rgba = loader.load_image("tiny.png", 4).unwrap();
    assert_eq!(rgba.dimensions(), (2, 2));
    assert_eq!(rgba.get_pixel(1, 0).0, [1, 0, 7, 255]);

    std::fs::remove_dir_all(&base).ok();
}

#[test]
fn load_image_decode_failure_is_image_decode_error() {
    let base = scratch_dir("bad_image");
    std::fs::write(base.join("assets").join("junk.png"), b"not an image").unwrap();

    let loader = AssetLoader::new(&base);
    let err = loader.load_image("junk.png", 4);
    assert!(matches!(err, Err(GlintError::ImageDecodeError(_))), "{err:?}");

    std::fs::remove_dir_all(&base).ok();
}
