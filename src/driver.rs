// Frame drivers. The browser loop reschedules itself through
// requestAnimationFrame; these run the same per-frame work synchronously so a
// bounded number of frames can be driven from a test.

use crate::field::ParticleField;
use crate::surface::Surface;
use std::cell::Cell;
use std::rc::Rc;

/// Shared stop flag. Clones observe the same flag.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Rc<Cell<bool>>,
}

impl CancellationToken {
    pub fn new() -> CancellationToken {
        CancellationToken::default()
    }

    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

/// Runs frames until `token` is cancelled, checking before every frame.
/// Returns how many frames ran.
pub fn run<S: Surface + ?Sized>(
    field: &mut ParticleField,
    surface: &mut S,
    token: &CancellationToken,
) -> u64 {
    let mut frames = 0;
    while !token.is_cancelled() {
        field.frame(surface);
        frames += 1;
    }
    frames
}

pub fn run_frames<S: Surface + ?Sized>(field: &mut ParticleField, surface: &mut S, frames: u64) {
    for _ in 0..frames {
        field.frame(surface);
    }
}
