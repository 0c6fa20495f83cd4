#[macro_use]
mod utils;

pub mod color;
pub mod config;
pub mod driver;
pub mod field;
pub mod particle;
pub mod raster;
pub mod surface;
pub mod theme;
pub mod typewriter;
pub mod web;

use wasm_bindgen::prelude::*;
use web_sys::console;

pub use color::{derive_ambient_color, parse_accent, Color, ColorParseError};
pub use config::FieldConfig;
pub use driver::{run, run_frames, CancellationToken};
pub use field::ParticleField;
pub use particle::{Bounds, Particle};
pub use surface::Surface;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
}

/// Times the enclosing scope in the browser console.
pub struct Timer<'a> {
    name: &'a str,
}

impl<'a> Timer<'a> {
    pub fn new(name: &'a str) -> Timer<'a> {
        console::time_with_label(name);
        Timer { name }
    }
}

impl<'a> Drop for Timer<'a> {
    fn drop(&mut self) {
        console::time_end_with_label(self.name);
    }
}
