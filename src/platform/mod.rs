//! Browser shell
//!
//! Owns the canvas, the event listeners and the animation-frame loop for
//! one mounted field:
//! - Window resize rebuilds the store (next frame picks it up)
//! - Pointer moves over the container feed the tracker
//! - Hidden documents pause the loop
//! - A detached container stops the loop for good

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, EventTarget, HtmlCanvasElement, HtmlElement, MouseEvent, Window};

use crate::error::FieldError;
use crate::field::ParticleField;
use crate::renderer::CanvasSurface;
use crate::schedule::LoopControl;
use crate::settings::FieldSettings;

const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

fn window() -> Result<Window, FieldError> {
    web_sys::window().ok_or(FieldError::NoWindow)
}

fn document() -> Result<Document, FieldError> {
    window()?.document().ok_or(FieldError::NoDocument)
}

/// Milliseconds on the same clock as animation-frame timestamps
fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// DOM side of a mounted field
struct Shell {
    field: ParticleField,
    surface: CanvasSurface,
    canvas: HtmlCanvasElement,
    container: HtmlElement,
    /// Pending animation-frame request, if the loop is running
    frame_id: Option<i32>,
    control: LoopControl,
}

impl Shell {
    /// Match the canvas to the container; returns the new size
    fn fit_canvas(&self) -> (f32, f32) {
        let width = self.container.offset_width().max(0) as u32;
        let height = self.container.offset_height().max(0) as u32;
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        (width as f32, height as f32)
    }
}

/// A registered event listener, kept so it can be removed again
struct Listener {
    target: EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(
        target: &EventTarget,
        kind: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, FieldError> {
        let closure = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            kind,
            closure,
        })
    }

    fn detach(&self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}

struct Inner {
    shell: RefCell<Shell>,
    tick: RefCell<Option<Closure<dyn FnMut(f64)>>>,
    listeners: RefCell<Vec<Listener>>,
}

impl Inner {
    fn request_frame(&self) {
        let Ok(window) = window() else { return };
        let tick = self.tick.borrow();
        let Some(tick) = tick.as_ref() else { return };

        match window.request_animation_frame(tick.as_ref().unchecked_ref()) {
            Ok(id) => self.shell.borrow_mut().frame_id = Some(id),
            Err(e) => log::warn!("requestAnimationFrame failed: {:?}", e),
        }
    }

    /// Request or cancel frames so the loop matches `control`
    fn sync(&self) {
        let (should_run, pending) = {
            let shell = self.shell.borrow();
            (shell.control.should_run(), shell.frame_id)
        };

        match (should_run, pending) {
            (true, None) => {
                self.request_frame();
                log::debug!("Particle loop running");
            }
            (false, Some(id)) => {
                self.shell.borrow_mut().frame_id = None;
                if let Ok(window) = window() {
                    let _ = window.cancel_animation_frame(id);
                }
                log::debug!("Particle loop paused");
            }
            _ => {}
        }
    }

    fn start(&self) {
        self.shell.borrow_mut().control.start();
        self.sync();
    }

    fn stop(&self) {
        self.shell.borrow_mut().control.stop();
        self.sync();
    }

    fn is_running(&self) -> bool {
        self.shell.borrow().frame_id.is_some()
    }

    fn on_frame(&self, time: f64) {
        {
            let mut shell = self.shell.borrow_mut();
            shell.frame_id = None;

            if !shell.container.is_connected() {
                shell.control.detach();
                log::info!("Particle container detached, loop stopped");
                return;
            }

            let Shell { field, surface, .. } = &mut *shell;
            field.frame(time, surface);
        }
        self.sync();
    }

    fn on_resize(&self) {
        let mut shell = self.shell.borrow_mut();
        let (width, height) = shell.fit_canvas();
        shell.field.resize(width, height);

        // Resizing the canvas wiped it; repaint if no frame is coming
        if shell.frame_id.is_none() {
            let Shell { field, surface, .. } = &mut *shell;
            field.draw(surface);
        }
    }

    fn on_pointer_move(&self, event: &MouseEvent) {
        let mut shell = self.shell.borrow_mut();
        let rect = shell.container.get_bounding_client_rect();
        let x = event.client_x() as f64 - rect.left();
        let y = event.client_y() as f64 - rect.top();
        shell.field.pointer_moved(x as f32, y as f32, now_ms());
    }

    fn on_visibility_change(&self, document: &Document) {
        let visible = document.visibility_state() != web_sys::VisibilityState::Hidden;
        self.shell.borrow_mut().control.set_visible(visible);
        self.sync();
    }

    /// Draw one frame without starting the loop
    fn draw_static(&self) {
        let mut shell = self.shell.borrow_mut();
        let Shell { field, surface, .. } = &mut *shell;
        field.step(now_ms());
        field.draw(surface);
    }
}

/// Handle to a field mounted in a page container
#[wasm_bindgen]
pub struct FieldHandle {
    inner: Rc<Inner>,
}

#[wasm_bindgen]
impl FieldHandle {
    /// Ask for the animation loop; it runs whenever the page is visible
    pub fn start(&self) {
        self.inner.start();
    }

    /// Cancel the pending frame and stay stopped until `start`; state is kept
    pub fn stop(&self) {
        self.inner.stop();
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.inner.is_running()
    }

    #[wasm_bindgen(js_name = particleCount)]
    pub fn particle_count(&self) -> usize {
        self.inner.shell.borrow().field.store().len()
    }

    /// Stop, remove listeners and take the canvas out of the page
    pub fn unmount(self) {
        self.inner.stop();
        for listener in self.inner.listeners.borrow_mut().drain(..) {
            listener.detach();
        }
        self.inner.shell.borrow().canvas.remove();
        self.inner.tick.borrow_mut().take();
        log::info!("Particle field unmounted");
    }
}

impl FieldHandle {
    /// Keep the field alive for the rest of the page's life
    pub fn forget(self) {
        std::mem::forget(self);
    }
}

fn create_canvas(document: &Document, container: &HtmlElement) -> Result<HtmlCanvasElement, FieldError> {
    let canvas: HtmlCanvasElement = document
        .create_element("canvas")?
        .dyn_into()
        .map_err(|_| FieldError::Dom("created element is not a canvas".into()))?;

    let style = canvas.style();
    style.set_property("position", "absolute")?;
    style.set_property("top", "0")?;
    style.set_property("left", "0")?;
    style.set_property("width", "100%")?;
    style.set_property("height", "100%")?;
    style.set_property("pointer-events", "none")?;
    container.append_child(&canvas)?;
    Ok(canvas)
}

fn prefers_reduced_motion(window: &Window) -> bool {
    window
        .match_media(REDUCED_MOTION_QUERY)
        .ok()
        .flatten()
        .map(|mql| mql.matches())
        .unwrap_or(false)
}

/// Mount a field into `container` and start animating it
pub fn mount(container: HtmlElement, settings: FieldSettings) -> Result<FieldHandle, FieldError> {
    settings.validate()?;
    let window = window()?;
    let document = document()?;

    let canvas = create_canvas(&document, &container)?;
    let surface = CanvasSurface::new(&canvas)?;

    let pause_when_hidden = settings.pause_when_hidden;
    let reduced_motion = settings.respect_reduced_motion && prefers_reduced_motion(&window);
    let seed = js_sys::Date::now() as u64;

    let mut shell = Shell {
        field: ParticleField::new(0.0, 0.0, settings, seed),
        surface,
        canvas,
        container: container.clone(),
        frame_id: None,
        control: LoopControl::new(),
    };
    let (width, height) = shell.fit_canvas();
    shell.field.resize(width, height);

    let inner = Rc::new(Inner {
        shell: RefCell::new(shell),
        tick: RefCell::new(None),
        listeners: RefCell::new(Vec::new()),
    });

    // Frame callback holds a weak ref so dropping the handle frees everything
    {
        let weak = Rc::downgrade(&inner);
        *inner.tick.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(move |time: f64| {
            if let Some(inner) = weak.upgrade() {
                inner.on_frame(time);
            }
        }));
    }

    let mut listeners = Vec::new();
    listeners.push(Listener::attach(
        &window,
        "resize",
        with_inner(&inner, |inner, _| inner.on_resize()),
    )?);
    listeners.push(Listener::attach(
        &container,
        "mousemove",
        with_inner(&inner, |inner, event| {
            if let Some(event) = event.dyn_ref::<MouseEvent>() {
                inner.on_pointer_move(event);
            }
        }),
    )?);
    listeners.push(Listener::attach(
        &container,
        "mouseleave",
        with_inner(&inner, |inner, _| {
            inner.shell.borrow_mut().field.pointer_left();
        }),
    )?);
    if pause_when_hidden && !reduced_motion {
        let hidden = document.visibility_state() == web_sys::VisibilityState::Hidden;
        inner.shell.borrow_mut().control.set_visible(!hidden);
        let doc = document.clone();
        listeners.push(Listener::attach(
            &document,
            "visibilitychange",
            with_inner(&inner, move |inner, _| inner.on_visibility_change(&doc)),
        )?);
    }
    *inner.listeners.borrow_mut() = listeners;

    let count = inner.shell.borrow().field.store().len();
    if reduced_motion {
        inner.draw_static();
        log::info!("Reduced motion: drew {} particles once", count);
    } else {
        inner.start();
        log::info!("Particle field mounted: {}x{}, {} particles", width, height, count);
    }

    Ok(FieldHandle { inner })
}

/// Adapt a handler to the listener signature through a weak ref
fn with_inner(
    inner: &Rc<Inner>,
    mut handler: impl FnMut(&Inner, &Event) + 'static,
) -> impl FnMut(Event) + 'static {
    let weak: Weak<Inner> = Rc::downgrade(inner);
    move |event: Event| {
        if let Some(inner) = weak.upgrade() {
            handler(&inner, &event);
        }
    }
}

/// Mount into the element with the given id, using stored settings
pub fn mount_by_id(container_id: &str) -> Result<FieldHandle, FieldError> {
    let container: HtmlElement = document()?
        .get_element_by_id(container_id)
        .ok_or_else(|| FieldError::ContainerMissing(container_id.to_string()))?
        .dyn_into()
        .map_err(|_| FieldError::Dom(format!("#{container_id} is not an HTML element")))?;
    mount(container, FieldSettings::load())
}

/// JS entry point: `mountParticles("particles")`
#[wasm_bindgen(js_name = mountParticles)]
pub fn mount_particles(container_id: &str) -> Result<FieldHandle, JsValue> {
    Ok(mount_by_id(container_id)?)
}
