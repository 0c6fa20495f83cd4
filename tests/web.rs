//! Test suite for the Web and headless browsers.

#![cfg(target_arch = "wasm32")]

extern crate wasm_bindgen_test;
use portfolio_particle_field::web::{ParticleBackground, RenderMode, TypewriterEffect};
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn mount_canvas(id: &str) -> HtmlCanvasElement {
    let document = document();
    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .unwrap()
        .dyn_into()
        .unwrap();
    canvas.set_id(id);
    document.body().unwrap().append_child(&canvas).unwrap();
    canvas
}

#[wasm_bindgen_test]
fn background_sizes_canvas_to_window() {
    let canvas = mount_canvas("bg-size");
    let background = ParticleBackground::new("bg-size", 25, RenderMode::Canvas2d).unwrap();
    assert_eq!(background.particle_count(), 25);

    let window = web_sys::window().unwrap();
    let width = window.inner_width().unwrap().as_f64().unwrap() as u32;
    assert_eq!(canvas.width(), width);
}

#[wasm_bindgen_test]
fn missing_canvas_is_an_error() {
    assert!(ParticleBackground::new("no-such-canvas", 10, RenderMode::Canvas2d).is_err());
}

#[wasm_bindgen_test]
fn image_data_mode_paints_particles() {
    let canvas = mount_canvas("bg-signals");
    let mut background = ParticleBackground::new("bg-signals", 10, RenderMode::ImageData).unwrap();

    background.set_accent_color("#38BDF8");
    assert_eq!(background.ambient_color(), "rgba(56, 189, 248, 0.6)");
    background.set_accent_color("unknown");
    assert_eq!(background.ambient_color(), "rgba(56, 189, 248, 0.6)");

    background.resize(320, 200);
    assert_eq!((canvas.width(), canvas.height()), (320, 200));

    background.set_pointer(10.0, 10.0);
    background.render_frame().unwrap();
    background.clear_pointer();
    background.render_frame().unwrap();

    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")
        .unwrap()
        .unwrap()
        .dyn_into()
        .unwrap();
    let pixels = ctx.get_image_data(0.0, 0.0, 320.0, 200.0).unwrap().data();
    assert_eq!(pixels.len(), 320 * 200 * 4);
    let painted = pixels.chunks(4).filter(|px| px[3] > 0).count();
    assert!(painted >= 10, "only {} pixels painted", painted);
}

#[wasm_bindgen_test]
fn start_and_stop_are_idempotent() {
    mount_canvas("bg-loop");
    let mut background = ParticleBackground::new("bg-loop", 5, RenderMode::Canvas2d).unwrap();
    background.start();
    background.start();
    assert!(background.is_running());
    background.stop();
    background.stop();
    assert!(!background.is_running());
}

#[wasm_bindgen_test]
fn theme_toggle_flips_document_state() {
    mount_canvas("bg-theme");
    let document = document();
    let button = document.create_element("button").unwrap();
    button.set_id("theme-toggle");
    let icon = document.create_element("span").unwrap();
    icon.set_class_name("theme-icon");
    button.append_child(&icon).unwrap();
    document.body().unwrap().append_child(&button).unwrap();

    let mut background = ParticleBackground::new("bg-theme", 5, RenderMode::Canvas2d).unwrap();
    let root = document.document_element().unwrap();

    assert_eq!(background.toggle_theme().unwrap(), "light");
    assert_eq!(root.get_attribute("data-theme").as_deref(), Some("light"));
    assert_eq!(button.get_attribute("aria-pressed").as_deref(), Some("true"));
    assert_eq!(icon.text_content().as_deref(), Some("🌙"));

    assert_eq!(background.toggle_theme().unwrap(), "dark");
    assert_eq!(root.get_attribute("data-theme"), None);
    assert_eq!(button.get_attribute("aria-pressed").as_deref(), Some("false"));
}

#[wasm_bindgen_test]
fn typewriter_needs_its_element() {
    let roles = js_sys::Array::new();
    assert!(TypewriterEffect::new("no-such-element", roles).is_err());

    let element = document().create_element("span").unwrap();
    element.set_id("typewriter-text");
    document().body().unwrap().append_child(&element).unwrap();
    let effect = TypewriterEffect::new("typewriter-text", js_sys::Array::new()).unwrap();
    effect.stop();
    assert!(!effect.is_running());
}

#[wasm_bindgen_test]
fn theme_button_survives_restart() {
    mount_canvas("bg-rebind");
    let document = document();
    let button: HtmlElement = document
        .create_element("button")
        .unwrap()
        .dyn_into()
        .unwrap();
    button.set_id("theme-toggle-bound");
    document.body().unwrap().append_child(&button).unwrap();

    let mut background = ParticleBackground::new("bg-rebind", 5, RenderMode::Canvas2d).unwrap();
    background.bind_theme_toggle("theme-toggle-bound").unwrap();
    background.start();
    background.stop();
    background.start();

    let root = document.document_element().unwrap();
    button.click();
    assert_eq!(root.get_attribute("data-theme").as_deref(), Some("light"));
    button.click();
    assert_eq!(root.get_attribute("data-theme"), None);
    background.stop();
}

#[wasm_bindgen_test]
async fn dropped_typewriter_stops_typing() {
    let element = document().create_element("span").unwrap();
    element.set_id("typewriter-drop");
    document().body().unwrap().append_child(&element).unwrap();

    let roles = js_sys::Array::new();
    roles.push(&"ab".into());
    let effect = TypewriterEffect::new("typewriter-drop", roles).unwrap();
    assert!(effect.is_running());

    // First tick fires immediately, the second one 100ms later
    TimeoutFuture::new(20).await;
    assert_eq!(element.text_content().as_deref(), Some("a"));

    drop(effect);
    TimeoutFuture::new(250).await;
    assert_eq!(element.text_content().as_deref(), Some("a"));
}
