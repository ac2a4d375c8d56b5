use std::io::{Cursor, ErrorKind};
use std::path::Path;

use image::{ImageFormat, RgbaImage};
use resvg::{tiny_skia, usvg};

use crate::error::{IconError, IconResult};

/// Largest edge a vector icon is rendered at.
pub const MAX_RASTER_SIZE: u32 = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconFormat {
    Vector,
    Raster,
}

impl IconFormat {
    pub fn from_path(path: &Path) -> Self {
        let is_svg = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("svg"));
        if is_svg {
            IconFormat::Vector
        } else {
            IconFormat::Raster
        }
    }
}

/// Returns displayable bytes for a resolved icon.
///
/// Vector icons are rendered to a `size`×`size` PNG. Raster icons are returned
/// exactly as stored, whatever their native resolution.
pub fn materialize(path: &Path, size: u32) -> IconResult<Vec<u8>> {
    let bytes = std::fs::read(path).map_err(|e| read_error(path, e))?;
    match IconFormat::from_path(path) {
        IconFormat::Raster => Ok(bytes),
        IconFormat::Vector => rasterize(path, &bytes, size),
    }
}

pub async fn materialize_async(path: &Path, size: u32) -> IconResult<Vec<u8>> {
    let bytes = tokio::fs::read(path).await.map_err(|e| read_error(path, e))?;
    match IconFormat::from_path(path) {
        IconFormat::Raster => Ok(bytes),
        IconFormat::Vector => {
            let path = path.to_path_buf();
            tokio::task::spawn_blocking(move || rasterize(&path, &bytes, size))
                .await
                .map_err(|e| IconError::Io(std::io::Error::other(e)))?
        }
    }
}

/// Renders SVG data into a PNG of exactly `size`×`size` pixels, stretching
/// each axis independently.
pub fn rasterize(path: &Path, svg: &[u8], size: u32) -> IconResult<Vec<u8>> {
    let fail = |message: String| IconError::Rasterize {
        path: path.to_path_buf(),
        message,
    };

    if size > MAX_RASTER_SIZE {
        return Err(fail(format!(
            "{size}px exceeds the {MAX_RASTER_SIZE}px rendering limit"
        )));
    }

    let tree = usvg::Tree::from_data(svg, &usvg::Options::default())
        .map_err(|e| fail(e.to_string()))?;
    let mut pixmap = tiny_skia::Pixmap::new(size, size)
        .ok_or_else(|| fail(format!("cannot allocate a {size}x{size} pixmap")))?;

    let svg_size = tree.size();
    let transform = tiny_skia::Transform::from_scale(
        size as f32 / svg_size.width(),
        size as f32 / svg_size.height(),
    );
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    let rgba: Vec<u8> = pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();
    let img = RgbaImage::from_raw(size, size, rgba)
        .ok_or_else(|| fail("pixel buffer does not fit the image".to_string()))?;

    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .map_err(|e| fail(e.to_string()))?;
    Ok(buf)
}

fn read_error(path: &Path, e: std::io::Error) -> IconError {
    if e.kind() == ErrorKind::NotFound {
        IconError::SourceFileMissing(path.to_path_buf())
    } else {
        IconError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_follows_extension() {
        assert_eq!(IconFormat::from_path(Path::new("a/b.svg")), IconFormat::Vector);
        assert_eq!(IconFormat::from_path(Path::new("a/b.SVG")), IconFormat::Vector);
        assert_eq!(IconFormat::from_path(Path::new("a/b.png")), IconFormat::Raster);
        assert_eq!(IconFormat::from_path(Path::new("a/b.xpm")), IconFormat::Raster);
    }

    #[test]
    fn invalid_svg_is_reported() {
        let err = rasterize(Path::new("bad.svg"), b"not svg", 22).unwrap_err();
        assert!(matches!(err, IconError::Rasterize { .. }));
    }

    #[test]
    fn oversized_render_is_refused() {
        let svg = br#"<svg xmlns="http://www.w3.org/2000/svg" width="16" height="16"/>"#;
        let err = rasterize(Path::new("a.svg"), svg, MAX_RASTER_SIZE + 1).unwrap_err();
        assert!(matches!(err, IconError::Rasterize { .. }));
    }

    #[test]
    fn zero_size_is_reported() {
        let svg = br#"<svg xmlns="http://www.w3.org/2000/svg" width="16" height="16"/>"#;
        assert!(rasterize(Path::new("a.svg"), svg, 0).is_err());
    }
}
