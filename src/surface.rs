use egui::{Color32, ColorImage, Pos2};
use image::{Rgba, RgbaImage};

use crate::geometry::{self, ArrowGeometry};
use crate::tools::{CompositeMode, LineCap, StrokeStyle};

/// The two raster layers of the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    /// Finished ink
    Committed,
    /// Transient arrow preview, composited over `Committed`
    Preview,
}

/// A pixel mutation emitted by the drawing engine
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Erase a whole layer
    Clear(Layer),
    /// Change how subsequent strokes combine with existing pixels
    SetComposite(CompositeMode),
    /// Straight stroke on the committed layer
    Segment {
        from: Pos2,
        to: Pos2,
        style: StrokeStyle,
    },
    /// Shaft plus filled head
    Arrow {
        from: Pos2,
        to: Pos2,
        color: Color32,
        /// Opacity multiplier, 1.0 for the final arrow
        alpha: f32,
        width: f32,
        head_length: f32,
        layer: Layer,
    },
}

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Raster bitmap the overlay draws into.
///
/// Pixels are stored un-premultiplied. The drawing engine is the only writer.
#[derive(Debug, Clone)]
pub struct Surface {
    committed: RgbaImage,
    preview: RgbaImage,
    composite: CompositeMode,
}

impl Surface {
    /// A fully transparent surface
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            committed: RgbaImage::new(width, height),
            preview: RgbaImage::new(width, height),
            composite: CompositeMode::SourceOver,
        }
    }

    pub fn width(&self) -> u32 {
        self.committed.width()
    }

    pub fn height(&self) -> u32 {
        self.committed.height()
    }

    pub fn size(&self) -> [usize; 2] {
        [self.width() as usize, self.height() as usize]
    }

    pub fn composite_mode(&self) -> CompositeMode {
        self.composite
    }

    pub fn layer(&self, layer: Layer) -> &RgbaImage {
        match layer {
            Layer::Committed => &self.committed,
            Layer::Preview => &self.preview,
        }
    }

    fn layer_mut(&mut self, layer: Layer) -> &mut RgbaImage {
        match layer {
            Layer::Committed => &mut self.committed,
            Layer::Preview => &mut self.preview,
        }
    }

    /// Reallocate both layers. Like a resized HTML canvas, all content is lost.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == self.width() && height == self.height() {
            return;
        }
        log::debug!("Resizing surface to {width}x{height}");
        self.committed = RgbaImage::new(width, height);
        self.preview = RgbaImage::new(width, height);
    }

    /// Erase every pixel of both layers
    pub fn clear(&mut self) {
        clear_image(&mut self.committed);
        clear_image(&mut self.preview);
    }

    /// True when every pixel of both layers is transparent
    pub fn is_blank(&self) -> bool {
        self.committed.pixels().chain(self.preview.pixels()).all(|px| px.0[3] == 0)
    }

    /// The visible pixel: preview over committed
    pub fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        let mut px = *self.committed.get_pixel(x, y);
        let top = self.preview.get_pixel(x, y).0;
        blend_over(&mut px, top, 1.0);
        px
    }

    /// Flatten the preview layer over the committed layer
    pub fn composited(&self) -> RgbaImage {
        let mut out = self.committed.clone();
        for (dst, src) in out.pixels_mut().zip(self.preview.pixels()) {
            blend_over(dst, src.0, 1.0);
        }
        out
    }

    /// Composited pixels ready to upload as an egui texture
    pub fn to_color_image(&self) -> ColorImage {
        ColorImage::from_rgba_unmultiplied(self.size(), self.composited().as_raw())
    }

    /// Apply one engine operation
    pub fn apply(&mut self, op: &DrawOp) {
        match op {
            DrawOp::Clear(layer) => clear_image(self.layer_mut(*layer)),
            DrawOp::SetComposite(mode) => self.composite = *mode,
            DrawOp::Segment { from, to, style } => {
                let mode = self.composite;
                stroke_segment(&mut self.committed, *from, *to, style, 1.0, mode);
            }
            DrawOp::Arrow {
                from,
                to,
                color,
                alpha,
                width,
                head_length,
                layer,
            } => {
                let mode = self.composite;
                let arrow = ArrowGeometry::new(*from, *to, *head_length);
                let shaft = StrokeStyle {
                    color: *color,
                    width: *width,
                    cap: LineCap::Butt,
                    composite: mode,
                };
                let target = self.layer_mut(*layer);
                stroke_segment(target, arrow.tail, arrow.tip, &shaft, *alpha, mode);
                fill_triangle(target, &arrow.head, *color, *alpha, mode);
            }
        }
    }
}

fn clear_image(image: &mut RgbaImage) {
    for px in image.pixels_mut() {
        *px = TRANSPARENT;
    }
}

/// Pixel range covering `[min, max]`, clamped to the image
fn pixel_span(min: f32, max: f32, limit: u32) -> std::ops::Range<u32> {
    let start = min.floor().max(0.0) as u32;
    let end = (max.ceil().max(0.0) as u32).min(limit);
    start.min(end)..end
}

fn stroke_segment(
    image: &mut RgbaImage,
    from: Pos2,
    to: Pos2,
    style: &StrokeStyle,
    alpha: f32,
    mode: CompositeMode,
) {
    let half = style.width / 2.0;
    let bounds = geometry::calculate_bounds(&[from, to], half + 1.0);
    let color = style.color.to_srgba_unmultiplied();

    for y in pixel_span(bounds.min.y, bounds.max.y, image.height()) {
        for x in pixel_span(bounds.min.x, bounds.max.x, image.width()) {
            let center = Pos2::new(x as f32 + 0.5, y as f32 + 0.5);
            let covered = match style.cap {
                LineCap::Round => geometry::distance_to_line_segment(center, from, to) <= half,
                LineCap::Butt => geometry::within_butt_segment(center, from, to, half),
            };
            if covered {
                composite_pixel(image.get_pixel_mut(x, y), color, alpha, mode);
            }
        }
    }
}

fn fill_triangle(image: &mut RgbaImage, triangle: &[Pos2; 3], color: Color32, alpha: f32, mode: CompositeMode) {
    let bounds = geometry::calculate_bounds(triangle, 1.0);
    let color = color.to_srgba_unmultiplied();

    for y in pixel_span(bounds.min.y, bounds.max.y, image.height()) {
        for x in pixel_span(bounds.min.x, bounds.max.x, image.width()) {
            let center = Pos2::new(x as f32 + 0.5, y as f32 + 0.5);
            if geometry::triangle_contains(triangle, center) {
                composite_pixel(image.get_pixel_mut(x, y), color, alpha, mode);
            }
        }
    }
}

fn composite_pixel(dst: &mut Rgba<u8>, src: [u8; 4], alpha: f32, mode: CompositeMode) {
    match mode {
        CompositeMode::SourceOver => blend_over(dst, src, alpha),
        // Erasing is driven by stroke coverage, not by the stroke color's alpha
        CompositeMode::DestinationOut => {
            let remaining = f32::from(dst.0[3]) * (1.0 - alpha.clamp(0.0, 1.0));
            if remaining < 0.5 {
                *dst = TRANSPARENT;
            } else {
                dst.0[3] = remaining.round() as u8;
            }
        }
    }
}

/// Un-premultiplied source-over
fn blend_over(dst: &mut Rgba<u8>, src: [u8; 4], alpha: f32) {
    let src_a = f32::from(src[3]) / 255.0 * alpha.clamp(0.0, 1.0);
    if src_a <= 0.0 {
        return;
    }
    let dst_a = f32::from(dst.0[3]) / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);

    let mut out = [0u8; 4];
    for channel in 0..3 {
        let value = (f32::from(src[channel]) * src_a
            + f32::from(dst.0[channel]) * dst_a * (1.0 - src_a))
            / out_a;
        out[channel] = value.round().clamp(0.0, 255.0) as u8;
    }
    out[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
    *dst = Rgba(out);
}
