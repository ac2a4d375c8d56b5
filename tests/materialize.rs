use std::path::Path;

use linux_icons::materialize::{materialize, materialize_async};
use linux_icons::theme::INDEX_FILE_NAME;
use linux_icons::{Config, Context, IconError, IconResolver, Platform, SearchRoots};

const SQUARE_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="16" height="16" viewBox="0 0 16 16">
  <rect x="0" y="0" width="16" height="16" fill="#3366ff"/>
</svg>
"##;

const WIDE_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="32" height="16">
  <rect width="32" height="16" fill="#00aa00"/>
</svg>
"##;

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([200, 10, 10, 255]));
    let mut buf = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

fn write_theme_with_icons(root: &Path) {
    let theme = root.join("Main");
    std::fs::create_dir_all(theme.join("status/22")).unwrap();
    std::fs::write(
        theme.join(INDEX_FILE_NAME),
        "[Icon Theme]\nName=Main\n\n[status/22]\nContext=Status\nSize=22\n",
    )
    .unwrap();
    std::fs::write(theme.join("status/22/vector.svg"), SQUARE_SVG).unwrap();
    std::fs::write(theme.join("status/22/vector.png"), png_bytes(48, 48)).unwrap();
    std::fs::write(theme.join("status/22/raster.png"), png_bytes(48, 48)).unwrap();
}

fn resolver(root: &Path) -> IconResolver {
    IconResolver::new(&Config::default())
        .with_search_roots(SearchRoots::new(vec![root.to_path_buf()]))
        .with_platform(Platform::named("linux"))
        .with_theme("Main")
}

#[test]
fn raster_bytes_pass_through_unchanged() {
    let root = tempfile::tempdir().unwrap();
    write_theme_with_icons(root.path());

    let resolver = resolver(root.path());
    let path = resolver
        .resolve_icon_path("raster", 22, Context::Status)
        .unwrap()
        .unwrap();
    let bytes = resolver
        .resolve_icon_bytes("raster", 22, Context::Status)
        .unwrap()
        .unwrap();
    assert_eq!(bytes, std::fs::read(&path).unwrap());

    // No resizing for raster icons
    let decoded = image::load_from_memory(&bytes).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (48, 48));
}

#[test]
fn vector_wins_and_is_rasterized_to_requested_size() {
    let root = tempfile::tempdir().unwrap();
    write_theme_with_icons(root.path());

    let bytes = resolver(root.path())
        .resolve_icon_bytes("vector", 22, Context::Status)
        .unwrap()
        .unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (22, 22));

    let center = decoded.get_pixel(11, 11);
    assert_eq!(center[3], 255);
    assert!(center[2] > center[0]);
}

#[test]
fn non_square_svg_fills_the_square() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wide.svg");
    std::fs::write(&path, WIDE_SVG).unwrap();

    let bytes = materialize(&path, 24).unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (24, 24));
    assert_eq!(decoded.get_pixel(12, 22)[3], 255);
}

#[test]
fn missing_source_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vanished.png");

    let err = materialize(&path, 22).unwrap_err();
    assert!(matches!(err, IconError::SourceFileMissing(p) if p == path));
}

#[test]
fn not_found_icon_yields_no_bytes() {
    let root = tempfile::tempdir().unwrap();
    write_theme_with_icons(root.path());

    let bytes = resolver(root.path())
        .resolve_icon_bytes("nothing", 22, Context::Status)
        .unwrap();
    assert!(bytes.is_none());
}

#[tokio::test]
async fn async_materialize_matches_blocking() {
    let root = tempfile::tempdir().unwrap();
    write_theme_with_icons(root.path());
    let resolver = resolver(root.path());

    let blocking = resolver
        .resolve_icon_bytes("vector", 22, Context::Status)
        .unwrap();
    let non_blocking = resolver
        .resolve_icon_bytes_async("vector", 22, Context::Status)
        .await
        .unwrap();
    assert!(blocking.is_some());
    assert_eq!(blocking, non_blocking);

    let missing = root.path().join("gone.svg");
    let err = materialize_async(&missing, 22).await.unwrap_err();
    assert!(matches!(err, IconError::SourceFileMissing(_)));
}
