//! Compositor: persistence-of-vision fade plus additive strokes.
//!
//! The simulation only talks to a [`Surface`]; [`CanvasSurface`] is the
//! browser implementation on top of `CanvasRenderingContext2d`.

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::motion::Point;

/// HSL colour at full saturation with an alpha channel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsla {
    pub hue: f64,
    pub lightness: f64, // percent
    pub alpha: f64,     // 0..1
}

impl Hsla {
    pub const fn new(hue: f64, lightness: f64, alpha: f64) -> Self {
        Self { hue, lightness, alpha }
    }

    pub fn css(&self) -> String {
        format!(
            "hsla({:.1}, 100%, {:.1}%, {:.3})",
            self.hue, self.lightness, self.alpha
        )
    }
}

/// A single trail segment to draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub from: Point,
    pub to: Point,
    pub color: Hsla,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Blend {
    /// `source-over`
    Normal,
    /// `lighter`: overlapping strokes sum their brightness.
    Additive,
}

impl Blend {
    pub fn composite_operation(self) -> &'static str {
        match self {
            Blend::Normal => "source-over",
            Blend::Additive => "lighter",
        }
    }
}

pub trait Surface {
    /// Overlay the whole surface with black at `alpha` (normal blending).
    fn fade(&mut self, alpha: f64);
    fn set_blend(&mut self, blend: Blend);
    fn stroke(&mut self, stroke: &Stroke);
    /// Reset pixel dimensions; existing pixels are discarded.
    fn resize(&mut self, width: f64, height: f64);
}

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d) -> Self {
        Self { canvas, ctx }
    }

    fn width(&self) -> f64 {
        self.canvas.width() as f64
    }

    fn height(&self) -> f64 {
        self.canvas.height() as f64
    }
}

impl Surface for CanvasSurface {
    fn fade(&mut self, alpha: f64) {
        self.set_blend(Blend::Normal);
        self.ctx
            .set_fill_style(&JsValue::from_str(&format!("rgba(0, 0, 0, {alpha})")));
        self.ctx.fill_rect(0.0, 0.0, self.width(), self.height());
    }

    fn set_blend(&mut self, blend: Blend) {
        // Only fails for unknown operation names, which Blend never produces.
        let _ = self
            .ctx
            .set_global_composite_operation(blend.composite_operation());
    }

    fn stroke(&mut self, stroke: &Stroke) {
        self.ctx.begin_path();
        self.ctx.move_to(stroke.from.x, stroke.from.y);
        self.ctx.line_to(stroke.to.x, stroke.to.y);
        self.ctx
            .set_stroke_style(&JsValue::from_str(&stroke.color.css()));
        self.ctx.stroke();
    }

    fn resize(&mut self, width: f64, height: f64) {
        self.canvas.set_width(width.max(0.0) as u32);
        self.canvas.set_height(height.max(0.0) as u32);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_colour_strings() {
        assert_eq!(Hsla::new(120.0, 55.5, 1.0).css(), "hsla(120.0, 100%, 55.5%, 1.000)");
        assert_eq!(Hsla::new(-12.5, 60.0, 0.5).css(), "hsla(-12.5, 100%, 60.0%, 0.500)");
    }

    #[test]
    fn blend_modes_map_to_canvas_operations() {
        assert_eq!(Blend::Normal.composite_operation(), "source-over");
        assert_eq!(Blend::Additive.composite_operation(), "lighter");
    }
}
