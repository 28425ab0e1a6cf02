use super::VisualEffect;
use crate::core::{BoltSim, EnergyPath};
use crate::dom;
use glam::Vec2;
use instant::Instant;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Lightning-like burst renderer: procedural branching polylines on a 2D
/// canvas, three concentric strokes per path for the glow.
pub struct BoltEffect {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    sim: BoltSim,
    artwork: web::HtmlElement,
    // Bolt birth/lifetime run on a monotonic clock.
    epoch: Instant,
    width: f32,
    height: f32,
}

impl BoltEffect {
    pub fn new(document: &web::Document, artwork: &web::HtmlElement) -> Result<Self, ()> {
        let canvas = document
            .create_element("canvas")
            .map_err(|e| log::error!("canvas create error: {:?}", e))?
            .dyn_into::<web::HtmlCanvasElement>()
            .map_err(|e| log::error!("canvas cast error: {:?}", e))?;
        _ = canvas.set_attribute(
            "style",
            "position: fixed; top: 0; left: 0; width: 100%; height: 100%; \
             pointer-events: none; z-index: 1; mix-blend-mode: screen;",
        );
        let body = document.body().ok_or(())?;
        body.append_child(&canvas)
            .map_err(|e| log::error!("canvas append error: {:?}", e))?;

        let ctx = canvas
            .get_context("2d")
            .map_err(|e| log::error!("2d context error: {:?}", e))?
            .ok_or(())?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| log::error!("2d context cast error: {:?}", e))?;

        let (width, height) = dom::viewport_size();
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let rect = dom::element_rect(artwork);
        let center = Vec2::new(rect.left + rect.width / 2.0, rect.top + rect.height / 2.0);
        let radius = rect.width.max(rect.height) / 2.0;

        Ok(Self {
            canvas,
            ctx,
            sim: BoltSim::new(center, radius),
            artwork: artwork.clone(),
            epoch: Instant::now(),
            width,
            height,
        })
    }

    fn refocus(&mut self) {
        let rect = dom::element_rect(&self.artwork);
        let center = Vec2::new(rect.left + rect.width / 2.0, rect.top + rect.height / 2.0);
        self.sim
            .set_focus(center, rect.width.max(rect.height) / 2.0);
    }

    fn trace(&self, points: &[Vec2]) {
        self.ctx.begin_path();
        if let Some(first) = points.first() {
            self.ctx.move_to(f64::from(first.x), f64::from(first.y));
        }
        for p in points.iter().skip(1) {
            self.ctx.line_to(f64::from(p.x), f64::from(p.y));
        }
    }

    fn stroke_polyline(&self, points: &[Vec2], width: f32, hue: f32, alpha: f32) {
        // Wide soft glow
        self.trace(points);
        self.ctx.set_line_width(f64::from(width * 3.0));
        self.ctx
            .set_stroke_style_str(&format!("hsla({hue}, 100%, 70%, {})", alpha * 0.15));
        self.ctx
            .set_shadow_color(&format!("hsla({hue}, 100%, 90%, {})", alpha * 0.8));
        self.ctx.stroke();

        // Solid mid stroke
        self.trace(points);
        self.ctx.set_line_width(f64::from(width));
        self.ctx
            .set_stroke_style_str(&format!("hsla({hue}, 100%, 70%, {alpha})"));
        self.ctx
            .set_shadow_color(&format!("hsla({hue}, 100%, 90%, {alpha})"));
        self.ctx.stroke();

        // Thin bright core
        self.trace(points);
        self.ctx.set_line_width(f64::from(width * 0.3));
        self.ctx
            .set_stroke_style_str(&format!("hsla({hue}, 80%, 100%, {alpha})"));
        self.ctx.stroke();
    }

    fn draw_path(&self, path: &EnergyPath, now_ms: f64) {
        let alpha = path.alpha(now_ms);
        self.stroke_polyline(&path.points, path.width, path.hue, alpha);
        for branch in &path.branches {
            self.stroke_polyline(&branch.points, branch.width, path.hue, alpha);
        }
    }
}

impl VisualEffect for BoltEffect {
    fn update(&mut self, energy: f32, _hue: f32) {
        let now_ms = self.epoch.elapsed().as_secs_f64() * 1000.0;
        self.ctx
            .clear_rect(0.0, 0.0, f64::from(self.width), f64::from(self.height));

        self.sim.step(&mut rand::thread_rng(), energy, now_ms);

        self.ctx.set_shadow_blur(20.0);
        self.ctx.set_line_cap("round");
        self.ctx.set_line_join("round");
        for path in &self.sim.paths {
            self.draw_path(path, now_ms);
        }
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);
        self.refocus();
    }

    fn cleanup(&mut self) {
        self.canvas.remove();
    }
}
