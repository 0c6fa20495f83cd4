// Browser glue: canvas surfaces, the requestAnimationFrame loop, and the
// resize / pointer / theme / typewriter wiring around the particle field

use crate::color::Color;
use crate::config::FieldConfig;
use crate::field::ParticleField;
use crate::raster::PixelBuffer;
use crate::surface::Surface;
use crate::theme::Theme;
use crate::typewriter::{Typewriter, DEFAULT_ROLES};
use crate::Timer;
use gloo::events::EventListener;
use gloo::render::{request_animation_frame, AnimationFrame};
use gloo::timers::callback::Timeout;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use vecmath::Vector2;
use wasm_bindgen::prelude::*;
use wasm_bindgen::{Clamped, JsCast};
use web_sys::{
    CanvasRenderingContext2d, Document, Element, Event, HtmlCanvasElement, ImageData, MouseEvent,
    Window,
};

const ACCENT_PROPERTY: &str = "--accent-color";

#[wasm_bindgen]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RenderMode {
    /// Vector drawing through the 2D context.
    Canvas2d,
    /// Software rasterization presented with a single put_image_data.
    ImageData,
}

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d) -> Self {
        CanvasSurface { canvas, ctx }
    }
}

impl Surface for CanvasSurface {
    fn dimensions(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn clear(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.clear_rect(x, y, width, height);
    }

    #[allow(deprecated)]
    fn fill_circle(&mut self, center: Vector2<f64>, radius: f64, color: &Color) {
        self.ctx.set_fill_style(&JsValue::from_str(&color.css()));
        self.ctx.begin_path();
        let _ = self
            .ctx
            .arc(center[0], center[1], radius, 0.0, 2.0 * std::f64::consts::PI);
        self.ctx.fill();
    }

    #[allow(deprecated)]
    fn line(&mut self, from: Vector2<f64>, to: Vector2<f64>, color: &Color, width: f64) {
        self.ctx.set_stroke_style(&JsValue::from_str(&color.css()));
        self.ctx.set_line_width(width);
        self.ctx.begin_path();
        self.ctx.move_to(from[0], from[1]);
        self.ctx.line_to(to[0], to[1]);
        self.ctx.stroke();
    }
}

struct RasterSurface {
    buffer: PixelBuffer,
    ctx: CanvasRenderingContext2d,
}

impl RasterSurface {
    fn present(&self) -> Result<(), JsValue> {
        let (width, height) = self.buffer.dimensions();
        let image_data = ImageData::new_with_u8_clamped_array_and_sh(
            Clamped(self.buffer.pixel_data()),
            width,
            height,
        )?;
        self.ctx.put_image_data(&image_data, 0.0, 0.0)
    }
}

enum Backend {
    Canvas(CanvasSurface),
    Raster(RasterSurface),
}

struct State {
    field: ParticleField,
    backend: Backend,
    canvas: HtmlCanvasElement,
    // Dropping the handle cancels the pending frame
    next_frame: Option<AnimationFrame>,
}

impl State {
    fn frame(&mut self) -> Result<(), JsValue> {
        #[cfg(feature = "frame-timing")]
        let _timer = Timer::new("ParticleBackground::frame");
        match &mut self.backend {
            Backend::Canvas(surface) => {
                self.field.frame(surface);
                Ok(())
            }
            Backend::Raster(surface) => {
                self.field.frame(&mut surface.buffer);
                surface.present()
            }
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.field.resize(width, height);
        if let Backend::Raster(surface) = &mut self.backend {
            let (width, height) = self.field.dimensions();
            surface.buffer.resize(width, height);
        }
    }
}

// Runs one frame per display refresh until the state's `next_frame` handle
// is dropped. The callback only holds a weak reference, so dropping the
// state also ends the loop.
fn schedule_frame(state: &Rc<RefCell<State>>) {
    let next: Weak<RefCell<State>> = Rc::downgrade(state);
    let handle = request_animation_frame(move |_timestamp| {
        let state = match next.upgrade() {
            Some(state) => state,
            None => return,
        };
        state.borrow_mut().next_frame.take();
        if let Err(err) = state.borrow_mut().frame() {
            log!("frame failed: {:?}", err);
        }
        schedule_frame(&state);
    });
    state.borrow_mut().next_frame = Some(handle);
}

/// Animated particle background bound to a canvas element.
#[wasm_bindgen]
pub struct ParticleBackground {
    window: Window,
    document: Document,
    state: Rc<RefCell<State>>,
    // Installed by `start`, removed by `stop`
    listeners: Vec<EventListener>,
    // Theme buttons stay bound across stop/start
    theme_listeners: Vec<EventListener>,
    running: bool,
}

#[wasm_bindgen]
impl ParticleBackground {
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas_id: &str,
        particle_count: u32,
        mode: RenderMode,
    ) -> Result<ParticleBackground, JsValue> {
        let _timer = Timer::new("ParticleBackground::new");
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window object"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("No document"))?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("Canvas '{}' not found", canvas_id)))?
            .dyn_into()
            .map_err(|_| JsValue::from_str("Element is not a canvas"))?;
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("Canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| JsValue::from_str("Context is not a CanvasRenderingContext2d"))?;

        let (width, height) = window_size(&window)?;
        canvas.set_width(width);
        canvas.set_height(height);

        let config = FieldConfig::default().with_particle_count(particle_count);
        let mut field = ParticleField::new(width, height, config);
        field.set_accent_color(&accent_color(&window, &document)?);
        field.initialize(config.particle_count, &mut rand::thread_rng());

        let backend = match mode {
            RenderMode::Canvas2d => Backend::Canvas(CanvasSurface::new(canvas.clone(), ctx)),
            RenderMode::ImageData => {
                let (width, height) = field.dimensions();
                Backend::Raster(RasterSurface {
                    buffer: PixelBuffer::new(width, height),
                    ctx,
                })
            }
        };

        log!(
            "particle field: {} particles on {}x{} ({:?})",
            particle_count,
            width,
            height,
            mode
        );

        Ok(ParticleBackground {
            window,
            document,
            state: Rc::new(RefCell::new(State {
                field,
                backend,
                canvas,
                next_frame: None,
            })),
            listeners: Vec::new(),
            theme_listeners: Vec::new(),
            running: false,
        })
    }

    /// Installs the resize and pointer listeners and starts the frame loop.
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        let canvas = self.state.borrow().canvas.clone();

        let state = self.state.clone();
        let window = self.window.clone();
        self.listeners
            .push(EventListener::new(&self.window, "resize", move |_event| {
                match window_size(&window) {
                    Ok((width, height)) => {
                        state.borrow_mut().resize(width, height);
                        log!("particle field resized to {}x{}", width, height);
                    }
                    Err(err) => log!("resize ignored: {:?}", err),
                }
            }));

        let state = self.state.clone();
        self.listeners
            .push(EventListener::new(&canvas, "mousemove", move |event: &Event| {
                if let Some(event) = event.dyn_ref::<MouseEvent>() {
                    state
                        .borrow_mut()
                        .field
                        .set_pointer(event.client_x() as f64, event.client_y() as f64);
                }
            }));

        let state = self.state.clone();
        self.listeners
            .push(EventListener::new(&canvas, "mouseleave", move |_event| {
                state.borrow_mut().field.clear_pointer();
            }));

        schedule_frame(&self.state);
        self.running = true;
    }

    /// Cancels the pending frame and removes the resize and pointer listeners.
    pub fn stop(&mut self) {
        self.listeners.clear();
        self.state.borrow_mut().next_frame = None;
        if self.running {
            log!("particle field stopped");
        }
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn particle_count(&self) -> usize {
        self.state.borrow().field.particles().len()
    }

    /// Theme signal: recolors every particle and link from the next frame on.
    pub fn set_accent_color(&mut self, accent: &str) {
        self.state.borrow_mut().field.set_accent_color(accent);
    }

    pub fn ambient_color(&self) -> String {
        self.state.borrow().field.ambient_color().css()
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.state.borrow_mut().resize(width, height);
    }

    pub fn set_pointer(&mut self, x: f64, y: f64) {
        self.state.borrow_mut().field.set_pointer(x, y);
    }

    pub fn clear_pointer(&mut self) {
        self.state.borrow_mut().field.clear_pointer();
    }

    /// Runs a single frame outside the animation loop.
    pub fn render_frame(&mut self) -> Result<(), JsValue> {
        self.state.borrow_mut().frame()
    }

    /// Flips the document theme, updates the toggle button, and recolors the
    /// field from the new accent. Returns the new theme's name.
    pub fn toggle_theme(&mut self) -> Result<String, JsValue> {
        toggle_theme(&self.window, &self.document, &self.state).map(|theme| theme.name().to_owned())
    }

    /// Toggles the theme whenever the element with `button_id` is clicked.
    pub fn bind_theme_toggle(&mut self, button_id: &str) -> Result<(), JsValue> {
        let button = self
            .document
            .get_element_by_id(button_id)
            .ok_or_else(|| JsValue::from_str(&format!("Button '{}' not found", button_id)))?;
        let window = self.window.clone();
        let document = self.document.clone();
        let state = self.state.clone();
        self.theme_listeners
            .push(EventListener::new(&button, "click", move |_event| {
                if let Err(err) = toggle_theme(&window, &document, &state) {
                    log!("theme toggle failed: {:?}", err);
                }
            }));
        Ok(())
    }
}

struct TypewriterState {
    element: Element,
    typewriter: Typewriter,
    // Dropping the handle cancels the pending tick
    pending: Option<Timeout>,
}

/// Cycles the text of `element_id` through `roles` (or the default roles when
/// `roles` holds no strings). Typing stops on `stop()` or when freed.
#[wasm_bindgen]
pub struct TypewriterEffect {
    state: Rc<RefCell<TypewriterState>>,
}

#[wasm_bindgen]
impl TypewriterEffect {
    #[wasm_bindgen(constructor)]
    pub fn new(element_id: &str, roles: js_sys::Array) -> Result<TypewriterEffect, JsValue> {
        let element = web_sys::window()
            .ok_or_else(|| JsValue::from_str("No window object"))?
            .document()
            .ok_or_else(|| JsValue::from_str("No document"))?
            .get_element_by_id(element_id)
            .ok_or_else(|| JsValue::from_str(&format!("Element '{}' not found", element_id)))?;

        let mut roles: Vec<String> = roles.iter().filter_map(|role| role.as_string()).collect();
        if roles.is_empty() {
            roles = DEFAULT_ROLES.iter().map(|role| role.to_string()).collect();
        }

        let state = Rc::new(RefCell::new(TypewriterState {
            element,
            typewriter: Typewriter::new(roles),
            pending: None,
        }));
        schedule_tick(&state, 0);
        Ok(TypewriterEffect { state })
    }

    pub fn stop(&self) {
        self.state.borrow_mut().pending = None;
    }

    pub fn is_running(&self) -> bool {
        self.state.borrow().pending.is_some()
    }
}

fn schedule_tick(state: &Rc<RefCell<TypewriterState>>, delay_ms: u32) {
    let next: Weak<RefCell<TypewriterState>> = Rc::downgrade(state);
    let timeout = Timeout::new(delay_ms, move || {
        let state = match next.upgrade() {
            Some(state) => state,
            None => return,
        };
        let delay_ms = {
            let mut inner = state.borrow_mut();
            let tick = inner.typewriter.tick();
            inner.element.set_text_content(Some(&tick.text));
            tick.delay_ms
        };
        schedule_tick(&state, delay_ms);
    });
    state.borrow_mut().pending = Some(timeout);
}

fn toggle_theme(
    window: &Window,
    document: &Document,
    state: &Rc<RefCell<State>>,
) -> Result<Theme, JsValue> {
    let root = document
        .document_element()
        .ok_or_else(|| JsValue::from_str("Document has no root element"))?;
    let theme = Theme::from_attribute(root.get_attribute("data-theme").as_deref()).toggled();
    match theme.attribute() {
        Some(value) => root.set_attribute("data-theme", value)?,
        None => root.remove_attribute("data-theme")?,
    }

    if let Some(icon) = document.query_selector(".theme-icon")? {
        icon.set_text_content(Some(theme.icon()));
    }
    if let Some(button) = document.get_element_by_id("theme-toggle") {
        button.set_attribute("aria-pressed", theme.aria_pressed())?;
    }

    let accent = accent_color(window, document)?;
    state.borrow_mut().field.set_accent_color(&accent);
    log!("theme switched to {} (accent '{}')", theme.name(), accent);
    Ok(theme)
}

// The body's computed --accent-color, or an empty string when unset
fn accent_color(window: &Window, document: &Document) -> Result<String, JsValue> {
    let body = match document.body() {
        Some(body) => body,
        None => return Ok(String::new()),
    };
    let accent = match window.get_computed_style(&body)? {
        Some(style) => style.get_property_value(ACCENT_PROPERTY)?,
        None => String::new(),
    };
    Ok(accent.trim().to_owned())
}

fn window_size(window: &Window) -> Result<(u32, u32), JsValue> {
    let width = window
        .inner_width()?
        .as_f64()
        .ok_or_else(|| JsValue::from_str("innerWidth is not a number"))?;
    let height = window
        .inner_height()?
        .as_f64()
        .ok_or_else(|| JsValue::from_str("innerHeight is not a number"))?;
    Ok((width as u32, height as u32))
}
