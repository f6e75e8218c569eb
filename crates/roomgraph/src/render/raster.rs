#![forbid(unsafe_code)]

//! PNG output for the SVG drawings.

#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    #[error("failed to parse SVG")]
    SvgParse,
    #[error("failed to allocate pixmap for raster rendering")]
    PixmapAlloc,
    #[error("failed to encode PNG")]
    PngEncode,
}

pub type Result<T> = std::result::Result<T, RasterError>;

#[derive(Debug, Clone)]
pub struct RasterOptions {
    pub scale: f32,
    pub background: Option<String>,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            background: Some("white".to_string()),
        }
    }
}

pub fn svg_to_png(svg: &str, options: &RasterOptions) -> Result<Vec<u8>> {
    let pixmap = svg_to_pixmap(svg, options.scale, options.background.as_deref())?;
    pixmap.encode_png().map_err(|_| RasterError::PngEncode)
}

fn parse_svg_viewbox_size(svg: &str) -> Option<(f32, f32)> {
    // Root `viewBox="minX minY w h"` as written by the SVG renderers of this crate.
    let i = svg.find("viewBox=\"")?;
    let rest = &svg[i + "viewBox=\"".len()..];
    let end = rest.find('"')?;
    let mut it = rest[..end].split_whitespace().skip(2);
    let width = it.next()?.parse::<f32>().ok()?;
    let height = it.next()?.parse::<f32>().ok()?;
    (width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0)
        .then_some((width, height))
}

fn svg_to_pixmap(svg: &str, scale: f32, background: Option<&str>) -> Result<tiny_skia::Pixmap> {
    let mut opt = usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();
    opt.font_family = "Arial".to_string();

    let tree = usvg::Tree::from_str(svg, &opt).map_err(|_| RasterError::SvgParse)?;

    // usvg already maps the viewBox min corner to the origin.
    let (width, height) = parse_svg_viewbox_size(svg).unwrap_or_else(|| {
        let size = tree.size();
        (size.width(), size.height())
    });
    let width_px = (width * scale).ceil().max(1.0) as u32;
    let height_px = (height * scale).ceil().max(1.0) as u32;

    let mut pixmap = tiny_skia::Pixmap::new(width_px, height_px).ok_or(RasterError::PixmapAlloc)?;
    if let Some(color) = background.and_then(parse_background) {
        pixmap.fill(color);
    }

    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    Ok(pixmap)
}

fn parse_background(text: &str) -> Option<tiny_skia::Color> {
    let s = text.trim().to_ascii_lowercase();
    let [r, g, b, a] = match s.as_str() {
        "transparent" => [0, 0, 0, 0],
        "white" => [255, 255, 255, 255],
        "black" => [0, 0, 0, 255],
        _ => {
            let digits: Vec<u8> = s
                .strip_prefix('#')?
                .chars()
                .map(|c| c.to_digit(16).map(|d| d as u8))
                .collect::<Option<_>>()?;
            match *digits.as_slice() {
                [r, g, b] => [r * 17, g * 17, b * 17, 255],
                [r1, r0, g1, g0, b1, b0] => [(r1 << 4) | r0, (g1 << 4) | g0, (b1 << 4) | b0, 255],
                _ => return None,
            }
        }
    };
    Some(tiny_skia::Color::from_rgba8(r, g, b, a))
}
