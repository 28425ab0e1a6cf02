use super::VisualEffect;
use crate::constants::GLOW_RADIUS_FACTOR;
use crate::core::{FogCondition, FogPhase, FogSim, MAX_FOG_FAILURES};
use crate::dom;
use crate::render::{GpuState, SpriteInstance};
use crate::sched;
use glam::Vec2;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Layered glow-sprite cloud around the artwork, rendered with WebGPU.
/// Repeated failures demote it to a plain 2D radial-gradient layer; context
/// loss drops the particles and rebuilds them on recovery.
pub struct FogEffect {
    canvas: web::HtmlCanvasElement,
    gpu: Option<GpuState<'static>>,
    sim: FogSim,
    condition: FogCondition,
    fallback: Option<FallbackLayer>,
    artwork: web::HtmlElement,
    instances: Vec<SpriteInstance>,
}

/// Degraded-mode rendering: a radial gradient repainted by its own
/// cancellable frame loop.
struct FallbackLayer {
    canvas: web::HtmlCanvasElement,
    // (center_x, center_y, glow_radius), shared with the paint loop.
    focus: Rc<Cell<(f32, f32, f32)>>,
    loop_handle: sched::LoopHandle,
}

fn artwork_focus(artwork: &web::HtmlElement) -> (Vec2, f32) {
    let rect = dom::element_rect(artwork);
    let center = Vec2::new(rect.left + rect.width / 2.0, rect.top + rect.height / 2.0);
    (center, rect.width.max(rect.height) * GLOW_RADIUS_FACTOR)
}

fn make_overlay_canvas(document: &web::Document) -> Option<web::HtmlCanvasElement> {
    let canvas = document
        .create_element("canvas")
        .ok()?
        .dyn_into::<web::HtmlCanvasElement>()
        .ok()?;
    _ = canvas.set_attribute(
        "style",
        "position: fixed; top: 0; left: 0; width: 100%; height: 100%; \
         pointer-events: none; z-index: 2; mix-blend-mode: screen;",
    );
    let (w, h) = dom::viewport_size();
    canvas.set_width(w as u32);
    canvas.set_height(h as u32);
    document.body()?.append_child(&canvas).ok()?;
    Some(canvas)
}

impl FogEffect {
    pub async fn new(document: &web::Document, artwork: &web::HtmlElement) -> Option<Self> {
        let canvas = make_overlay_canvas(document)?;
        let (center, glow_radius) = artwork_focus(artwork);
        let sim = FogSim::new(&mut rand::thread_rng(), center, glow_radius);

        let mut effect = Self {
            canvas,
            gpu: None,
            sim,
            condition: FogCondition::new(),
            fallback: None,
            artwork: artwork.clone(),
            instances: Vec::new(),
        };

        // Construction failures count toward the demotion threshold, same
        // as update failures.
        for _ in 0..MAX_FOG_FAILURES {
            let leaked_canvas = Box::leak(Box::new(effect.canvas.clone()));
            match GpuState::new(leaked_canvas).await {
                Ok(gpu) => {
                    effect.gpu = Some(gpu);
                    effect.condition.mark_healthy();
                    log::info!(
                        "fog effect ready ({} particles)",
                        effect.sim.particle_count()
                    );
                    break;
                }
                Err(e) => {
                    log::error!("fog renderer init error: {:?}", e);
                    if effect.condition.record_failure() {
                        effect.enter_fallback(document);
                    }
                }
            }
        }
        Some(effect)
    }

    fn enter_fallback(&mut self, document: &web::Document) {
        log::warn!("fog effect degraded; switching to gradient fallback");
        self.gpu = None;
        self.canvas.remove();
        self.sim.clear();

        let Some(canvas) = make_overlay_canvas(document) else {
            return;
        };
        dom::set_style(&canvas, "opacity", "0.5");
        let (center, glow_radius) = artwork_focus(&self.artwork);
        let focus = Rc::new(Cell::new((center.x, center.y, glow_radius)));

        let paint_canvas = canvas.clone();
        let paint_focus = focus.clone();
        let loop_handle = sched::start_frame_loop(move || paint_fallback(&paint_canvas, &paint_focus));
        self.fallback = Some(FallbackLayer {
            canvas,
            focus,
            loop_handle,
        });
    }

    fn demote(&mut self) {
        if let Some(document) = dom::window_document() {
            self.enter_fallback(&document);
        }
    }

    fn attempt_recovery(&mut self) {
        if let Some(gpu) = &mut self.gpu {
            gpu.reconfigure();
        }
        self.condition.restore_context();
        let (center, glow_radius) = artwork_focus(&self.artwork);
        self.sim.set_focus(center, glow_radius);
        self.sim.populate(&mut rand::thread_rng());
        log::info!("fog effect recovered after context loss");
    }
}

fn paint_fallback(canvas: &web::HtmlCanvasElement, focus: &Rc<Cell<(f32, f32, f32)>>) {
    let Ok(Some(obj)) = canvas.get_context("2d") else {
        return;
    };
    let Ok(ctx) = obj.dyn_into::<web::CanvasRenderingContext2d>() else {
        return;
    };
    let w = f64::from(canvas.width());
    let h = f64::from(canvas.height());
    ctx.clear_rect(0.0, 0.0, w, h);

    let (cx, cy, radius) = focus.get();
    let Ok(gradient) = ctx.create_radial_gradient(
        f64::from(cx),
        f64::from(cy),
        0.0,
        f64::from(cx),
        f64::from(cy),
        f64::from(radius),
    ) else {
        return;
    };
    _ = gradient.add_color_stop(0.0, "rgba(255, 255, 255, 0.2)");
    _ = gradient.add_color_stop(1.0, "rgba(255, 255, 255, 0)");
    ctx.set_fill_style_canvas_gradient(&gradient);
    ctx.fill_rect(0.0, 0.0, w, h);
}

impl VisualEffect for FogEffect {
    fn update(&mut self, energy: f32, hue: f32) {
        match self.condition.phase() {
            FogPhase::Degraded | FogPhase::Disposed => return,
            FogPhase::Active => {}
        }
        if self.condition.context_lost() {
            self.attempt_recovery();
            return;
        }
        let Some(gpu) = &mut self.gpu else {
            return;
        };

        self.sim.update(&mut rand::thread_rng(), energy, hue);

        self.instances.clear();
        for layer in &self.sim.layers {
            for p in layer {
                self.instances.push(SpriteInstance {
                    pos: [p.pos.x + p.wobble, p.pos.y],
                    scale: p.scale,
                    rotation: p.rotation,
                    color: [p.tint[0], p.tint[1], p.tint[2], p.alpha],
                });
            }
        }

        match gpu.render(&self.instances) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("fog surface lost; pausing until recovery");
                self.condition.lose_context();
                self.sim.clear();
            }
            Err(e) => {
                log::error!("fog render error: {:?}", e);
                if self.condition.record_failure() {
                    self.demote();
                }
            }
        }
    }

    fn resize(&mut self, width: f32, height: f32) {
        if let Some(fallback) = &self.fallback {
            fallback.canvas.set_width(width as u32);
            fallback.canvas.set_height(height as u32);
            let (center, glow_radius) = artwork_focus(&self.artwork);
            fallback.focus.set((center.x, center.y, glow_radius));
            return;
        }
        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);
        if let Some(gpu) = &mut self.gpu {
            gpu.resize_if_needed(width as u32, height as u32);
        }
        // In-flight particles keep their positions; only the focal point
        // and glow bound move.
        let (center, glow_radius) = artwork_focus(&self.artwork);
        self.sim.set_focus(center, glow_radius);
    }

    fn cleanup(&mut self) {
        self.condition.dispose();
        if let Some(fallback) = self.fallback.take() {
            fallback.loop_handle.cancel();
            fallback.canvas.remove();
        }
        self.gpu = None;
        self.canvas.remove();
    }
}
