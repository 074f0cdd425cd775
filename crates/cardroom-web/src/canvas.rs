//! [`Canvas`] over an HTML `<canvas>` element's 2D context.

use std::f64::consts::TAU;

use cardroom_core::felt::Canvas;
use cardroom_core::geometry::Point;
use cardroom_core::style::Font;
use tracing::trace;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

pub struct WebCanvas {
    element: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl WebCanvas {
    /// Look up the canvas with DOM id `id`. `None` until it is mounted.
    pub fn find(id: &str) -> Option<Self> {
        let element = web_sys::window()?
            .document()?
            .get_element_by_id(id)?
            .dyn_into::<HtmlCanvasElement>()
            .ok()?;
        let ctx = element
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { element, ctx })
    }

    fn size(&self) -> (f64, f64) {
        (
            f64::from(self.element.width()),
            f64::from(self.element.height()),
        )
    }

    /// Pixels per world unit.
    fn unit(&self) -> f64 {
        let (width, height) = self.size();
        width.min(height)
    }

    fn to_screen(&self, point: Point) -> (f64, f64) {
        let (width, height) = self.size();
        let unit = width.min(height);
        (width / 2.0 + point.x * unit, height / 2.0 - point.y * unit)
    }

    fn rounded_rect_path(
        &self,
        center: Point,
        width: f64,
        height: f64,
        radius: f64,
    ) -> Result<(), JsValue> {
        let unit = self.unit();
        let (cx, cy) = self.to_screen(center);
        let (w, h) = (width * unit, height * unit);
        let r = (radius * unit).min(w / 2.0).min(h / 2.0).max(0.0);
        let (x, y) = (cx - w / 2.0, cy - h / 2.0);

        self.ctx.begin_path();
        self.ctx.move_to(x + r, y);
        self.ctx.arc_to(x + w, y, x + w, y + h, r)?;
        self.ctx.arc_to(x + w, y + h, x, y + h, r)?;
        self.ctx.arc_to(x, y + h, x, y, r)?;
        self.ctx.arc_to(x, y, x + w, y, r)?;
        self.ctx.close_path();
        Ok(())
    }

    fn set_font(&self, font: &Font<'_>) {
        self.ctx.set_font(&font.css(font.size * self.unit()));
    }
}

fn checked(what: &str, result: Result<(), JsValue>) {
    if let Err(e) = result {
        trace!(?e, what, "canvas call failed");
    }
}

impl Canvas for WebCanvas {
    fn clear(&mut self, color: &str) {
        let (width, height) = self.size();
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(0.0, 0.0, width, height);
    }

    fn fill_ellipse(&mut self, center: Point, width: f64, height: f64, color: &str) {
        let unit = self.unit();
        let (x, y) = self.to_screen(center);
        self.ctx.set_fill_style_str(color);
        self.ctx.begin_path();
        checked(
            "ellipse",
            self.ctx
                .ellipse(x, y, width * unit / 2.0, height * unit / 2.0, 0.0, 0.0, TAU),
        );
        self.ctx.fill();
    }

    fn fill_rounded_rect(
        &mut self,
        center: Point,
        width: f64,
        height: f64,
        radius: f64,
        color: &str,
    ) {
        self.ctx.set_fill_style_str(color);
        checked(
            "rounded rect",
            self.rounded_rect_path(center, width, height, radius),
        );
        self.ctx.fill();
    }

    fn fill_circle(&mut self, center: Point, diameter: f64, color: &str) {
        let (x, y) = self.to_screen(center);
        self.ctx.set_fill_style_str(color);
        self.ctx.begin_path();
        checked(
            "circle",
            self.ctx.arc(x, y, diameter * self.unit() / 2.0, 0.0, TAU),
        );
        self.ctx.fill();
    }

    fn fill_text(&mut self, text: &str, center: Point, font: &Font<'_>, color: &str) {
        let (x, y) = self.to_screen(center);
        self.set_font(font);
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");
        self.ctx.set_fill_style_str(color);
        checked("text", self.ctx.fill_text(text, x, y));
    }

    fn measure_text(&self, text: &str, font: &Font<'_>) -> f64 {
        self.set_font(font);
        match self.ctx.measure_text(text) {
            Ok(metrics) => metrics.width() / self.unit(),
            Err(e) => {
                trace!(?e, "measure_text failed");
                0.0
            }
        }
    }
}
