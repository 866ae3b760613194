//! Row-major grid layout with transparent filler and optional labels.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::{RgbaImage, imageops};
use tracing::{debug, info};

use ifig_latex::LabelRasterizer;
use ifig_model::{FigureError, Panel, Result};

/// Layout and labeling options for grid composition.
pub struct GridOptions<'a> {
    /// Panels per row. Row count is `ceil(len(panels) / panels_per_row)`.
    pub panels_per_row: usize,
    /// Composite a `(a)`/`(0)` label onto each panel.
    pub label_panels: bool,
    /// DPI metadata written to the output file, and the density used for
    /// label rasterization.
    pub dpi: u32,
    /// Label font size in points.
    pub label_size: f32,
    /// Label position relative to each panel's top-left corner, in pixels.
    pub label_offset: (i64, i64),
    /// Label rasterization collaborator. Required when `label_panels`.
    pub rasterizer: Option<&'a dyn LabelRasterizer>,
}

impl Default for GridOptions<'_> {
    fn default() -> Self {
        Self {
            panels_per_row: 2,
            label_panels: false,
            dpi: 300,
            label_size: 10.0,
            label_offset: (10, 10),
            rasterizer: None,
        }
    }
}

/// A composed grid: the raster plus the combined caption string
/// (`"(a) first caption, (b) second caption, ..."` in grid order).
#[derive(Debug)]
pub struct ComposedGrid {
    pub image: RgbaImage,
    pub caption: String,
    dpi: u32,
}

impl ComposedGrid {
    /// Writes the grid as a PNG carrying the configured DPI in its pHYs
    /// metadata.
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let mut encoder = png::Encoder::new(BufWriter::new(file), self.image.width(), self.image.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let pixels_per_meter = (f64::from(self.dpi) / 0.0254).round() as u32;
        encoder.set_pixel_dims(Some(png::PixelDimensions {
            xppu: pixels_per_meter,
            yppu: pixels_per_meter,
            unit: png::Unit::Meter,
        }));
        let mut writer = encoder
            .write_header()
            .map_err(|source| FigureError::Io(std::io::Error::other(source)))?;
        writer
            .write_image_data(self.image.as_raw())
            .map_err(|source| FigureError::Io(std::io::Error::other(source)))?;
        Ok(())
    }
}

/// Arranges panels row-major into a single raster.
///
/// The panel slice may be the full dispatch output or any explicit subset
/// and order chosen by the caller. An incomplete last row is padded with
/// fully-transparent filler sized like the first real panel of that row, so
/// the grid geometry stays uniform. Label rasterization failures abort the
/// whole composition; no partial grid is produced.
pub fn compose(
    panels: &[Panel],
    options: &GridOptions<'_>,
) -> Result<ComposedGrid> {
    if panels.is_empty() {
        return Err(FigureError::InvalidGrid {
            message: "no panels to compose".to_string(),
        });
    }
    if options.panels_per_row == 0 {
        return Err(FigureError::InvalidGrid {
            message: "panels_per_row must be at least 1".to_string(),
        });
    }
    if options.label_panels && options.rasterizer.is_none() {
        return Err(FigureError::InvalidGrid {
            message: "label_panels requires a rasterizer".to_string(),
        });
    }

    let mut images = Vec::with_capacity(panels.len());
    let mut caption = String::new();
    for (index, panel) in panels.iter().enumerate() {
        let decoded = image::load_from_memory(&panel.artifact)
            .map_err(|source| FigureError::ArtifactDecode {
                key: panel.key.to_string(),
                message: source.to_string(),
            })?
            .to_rgba8();

        let label = panel_label(index, panels.len());
        if index > 0 {
            caption.push_str(", ");
        }
        caption.push_str(&label);
        caption.push(' ');
        caption.push_str(&panel.caption);

        images.push(if options.label_panels {
            stamp_label(decoded, &label, options)?
        } else {
            decoded
        });
    }

    let rows: Vec<&[RgbaImage]> = images.chunks(options.panels_per_row).collect();
    let canvas_width = rows
        .iter()
        .map(|row| row_width(row, options.panels_per_row))
        .max()
        .unwrap_or(0);
    let canvas_height: u32 = rows.iter().map(|row| row_height(row)).sum();

    let mut canvas = RgbaImage::new(canvas_width, canvas_height);
    let mut y = 0i64;
    for row in &rows {
        let mut x = 0i64;
        for panel_image in *row {
            imageops::overlay(&mut canvas, panel_image, x, y);
            x += i64::from(panel_image.width());
        }
        // Filler slots stay transparent; the canvas already spans them.
        y += i64::from(row_height(row));
    }

    info!(
        panels = panels.len(),
        rows = rows.len(),
        width = canvas_width,
        height = canvas_height,
        "composed static grid"
    );
    Ok(ComposedGrid {
        image: canvas,
        caption,
        dpi: options.dpi,
    })
}

/// `compose` followed by a PNG write to `path`.
pub fn compose_to_file(
    panels: &[Panel],
    options: &GridOptions<'_>,
    path: &Path,
) -> Result<ComposedGrid> {
    let grid = compose(panels, options)?;
    grid.save(path)?;
    Ok(grid)
}

/// `(a)`..`(z)` for small grids, `(0)`.. beyond that.
fn panel_label(index: usize, total: usize) -> String {
    if total <= 26 {
        let letter = (b'a' + index as u8) as char;
        format!("({letter})")
    } else {
        format!("({index})")
    }
}

fn stamp_label(
    mut panel_image: RgbaImage,
    label: &str,
    options: &GridOptions<'_>,
) -> Result<RgbaImage> {
    let rasterizer = options.rasterizer.ok_or_else(|| FigureError::InvalidGrid {
        message: "label_panels requires a rasterizer".to_string(),
    })?;
    let path = rasterizer
        .rasterize(label, options.label_size, options.dpi, [0.0; 4])
        .map_err(|source| FigureError::LabelRenderFailed {
            label: label.to_string(),
            message: source.to_string(),
        })?;
    let glyph = image::open(&path)
        .map_err(|source| FigureError::LabelRenderFailed {
            label: label.to_string(),
            message: source.to_string(),
        })?
        .to_rgba8();
    debug!(label, path = %path.display(), "stamping panel label");
    imageops::overlay(
        &mut panel_image,
        &glyph,
        options.label_offset.0,
        options.label_offset.1,
    );
    Ok(panel_image)
}

/// Width of a row including transparent filler: short rows are padded to
/// `panels_per_row` slots sized like the row's first panel.
fn row_width(row: &[RgbaImage], panels_per_row: usize) -> u32 {
    let real: u32 = row.iter().map(RgbaImage::width).sum();
    let filler_slots = (panels_per_row - row.len()) as u32;
    let filler_width = row.first().map_or(0, RgbaImage::width);
    real + filler_slots * filler_width
}

fn row_height(row: &[RgbaImage]) -> u32 {
    row.iter().map(RgbaImage::height).max().unwrap_or(0)
}
