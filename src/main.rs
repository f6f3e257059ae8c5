//! Particle Field entry point
//!
//! On the web this mounts the field into the page. Natively it runs a short
//! headless simulation and logs what would have been drawn.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod web {
    use particle_field::consts::DEFAULT_CONTAINER_ID;
    use particle_field::platform::mount_by_id;
    use particle_field::FieldError;

    pub fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger init failed: {e}").into());
        }

        log::info!("Particle Field starting...");

        match mount_by_id(DEFAULT_CONTAINER_ID) {
            Ok(handle) => handle.forget(),
            Err(FieldError::ContainerMissing(id)) => {
                log::info!("No #{} container on this page, nothing to do", id);
            }
            Err(e) => log::error!("Failed to mount particle field: {}", e),
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    web::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use particle_field::consts::FRAME_MS;
    use particle_field::renderer::RecordingSurface;
    use particle_field::{FieldSettings, ParticleField};

    env_logger::init();
    log::info!("Particle Field (native) starting...");
    log::info!("Native mode is headless - build for wasm32 to see it in a browser");

    let settings = FieldSettings::load();
    let mut field = ParticleField::new(1280.0, 720.0, settings, 42);
    let mut surface = RecordingSurface::new();

    // Sweep the pointer across the middle for the first second
    for frame in 0..180u32 {
        let now = frame as f64 * FRAME_MS;
        if frame < 60 {
            field.pointer_moved(frame as f32 * 20.0, 360.0, now);
        }
        surface.reset();
        field.frame(now, &mut surface);

        if frame % 30 == 0 {
            log::info!(
                "frame {:3}: {} discs, {} links, pointer {}",
                frame,
                surface.circles().count(),
                surface.lines().count(),
                if field.tracker().is_moving() { "moving" } else { "idle" }
            );
        }
    }

    field.resize(640.0, 480.0);
    log::info!("Resized to 640x480: {} particles", field.store().len());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
