//! The built-in demo renderer.
//!
//! Stands in for the external plotting collaborator: draws a bare
//! `amplitude * f(x)` trace as a PNG so the demo subcommand can exercise
//! the whole bake pipeline without a plotting backend.

use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};
use imageproc::drawing::draw_line_segment_mut;

use ifig_core::{BoxError, PanelRenderer};
use ifig_model::{Combination, RenderOutput, Value};

const MARGIN: f32 = 12.0;

/// Renders `amplitude * sin(x)` or `amplitude * cos(x)` over `0..=2pi`.
pub struct WaveRenderer {
    width: u32,
    height: u32,
}

impl WaveRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    fn trace_color(name: &str) -> Rgba<u8> {
        match name {
            "blue" => Rgba([31, 119, 180, 255]),
            "green" => Rgba([44, 160, 44, 255]),
            "red" => Rgba([214, 39, 40, 255]),
            _ => Rgba([0, 0, 0, 255]),
        }
    }
}

impl PanelRenderer for WaveRenderer {
    fn render(&mut self, combination: &Combination) -> Result<RenderOutput, BoxError> {
        let amplitude = combination
            .get("amplitude")
            .and_then(Value::as_numeric)
            .ok_or("demo combination is missing 'amplitude'")?;
        let color = combination
            .get("color")
            .and_then(Value::as_text)
            .ok_or("demo combination is missing 'color'")?
            .to_string();
        let f = combination
            .get("f")
            .and_then(Value::as_text)
            .ok_or("demo combination is missing 'f'")?
            .to_string();

        let mut image = RgbaImage::from_pixel(self.width, self.height, Rgba([255, 255, 255, 255]));
        let mid = self.height as f32 / 2.0;
        let gain = mid - MARGIN;

        // x axis
        draw_line_segment_mut(
            &mut image,
            (0.0, mid),
            (self.width as f32, mid),
            Rgba([160, 160, 160, 255]),
        );

        let trace = Self::trace_color(&color);
        let samples = self.width;
        let mut previous: Option<(f32, f32)> = None;
        for i in 0..=samples {
            let x = i as f32;
            let t = f64::from(x) / f64::from(self.width) * std::f64::consts::TAU;
            let value = match f.as_str() {
                "cos" => amplitude * t.cos(),
                _ => amplitude * t.sin(),
            };
            let y = mid - value as f32 * gain;
            if let Some(start) = previous {
                draw_line_segment_mut(&mut image, start, (x, y), trace);
            }
            previous = Some((x, y));
        }

        let mut artifact = Vec::new();
        image.write_to(&mut Cursor::new(&mut artifact), ImageFormat::Png)?;
        let caption = format!(
            "Amplitude = {amplitude:.2}, color = {color}, f(x) = amplitude * {f}(x)"
        );
        Ok(RenderOutput { artifact, caption })
    }
}
