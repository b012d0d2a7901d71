//! Browser adapter: DOM-backed surfaces, listener lifecycle, and the JS export.
//!
//! ARCHITECTURE
//! ============
//! `WebViewport` wraps a [`ViewportController`] over two DOM elements. On
//! construction it attaches window/container listeners and one `ResizeObserver`
//! per element; on `dispose()` (or when dropped) it detaches all of them and
//! drops any pending animation frame, so no callback can reach the controller
//! after teardown. Every handler borrows the controller only for the call that
//! produces actions, then applies those actions with the borrow released, so a
//! JS `onChange` callback may call straight back into the viewport.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::sync::Once;

use gloo::events::{EventListener, EventListenerOptions};
use gloo::render::{AnimationFrame, request_animation_frame};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, HtmlElement, KeyboardEvent, MouseEvent, ResizeObserver};

use crate::config::ViewportConfig;
use crate::controller::{Action, ViewportController};
use crate::geometry::{Point, Size};
use crate::input::{Button, Cursor, Key, Modifiers, should_prevent_default};
use crate::state::ViewportState;
use crate::surface::{ContainerSurface, DocumentSurface};

/// The scrollable element around the page.
pub struct DomContainer {
    element: HtmlElement,
}

impl DomContainer {
    #[must_use]
    pub fn new(element: HtmlElement) -> Self {
        Self { element }
    }

    fn set_cursor(&self, cursor: Cursor) {
        if self.element.style().set_property("cursor", cursor.css()).is_err() {
            tracing::warn!(cursor = cursor.css(), "failed to set viewport cursor");
        }
    }
}

impl ContainerSurface for DomContainer {
    fn size(&self) -> Size {
        Size::new(f64::from(self.element.client_width()), f64::from(self.element.client_height()))
    }

    fn scroll(&self) -> Point {
        Point::new(f64::from(self.element.scroll_left()), f64::from(self.element.scroll_top()))
    }

    fn set_scroll(&mut self, offset: Point) {
        self.element.scroll_to_with_x_and_y(offset.x, offset.y);
    }
}

/// The menu page element. Reports its layout size, which ignores CSS transforms.
pub struct DomDocument {
    element: HtmlElement,
}

impl DomDocument {
    #[must_use]
    pub fn new(element: HtmlElement) -> Self {
        Self { element }
    }
}

impl DocumentSurface for DomDocument {
    fn size(&self) -> Size {
        Size::new(f64::from(self.element.offset_width()), f64::from(self.element.offset_height()))
    }
}

type Core = ViewportController<DomContainer, DomDocument>;

struct Shared {
    core: Core,
    frame: Option<AnimationFrame>,
    on_change: Option<js_sys::Function>,
}

/// Install the panic hook and route `tracing` (via `log`) to the browser console. Idempotent.
pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Debug) {
            // Another logger was installed first; keep it.
            tracing::debug!(error = %e, "console logger not installed");
        }
    });
}

/// Whether keyboard focus is in a field where Space must type a space.
fn focus_in_text_input() -> bool {
    let Some(active) = web_sys::window().and_then(|w| w.document()).and_then(|d| d.active_element()) else {
        return false;
    };
    if matches!(active.tag_name().as_str(), "INPUT" | "TEXTAREA" | "SELECT") {
        return true;
    }
    active.dyn_ref::<HtmlElement>().is_some_and(HtmlElement::is_content_editable)
}

fn map_modifiers(ev: &KeyboardEvent) -> Modifiers {
    Modifiers { shift: ev.shift_key(), ctrl: ev.ctrl_key(), alt: ev.alt_key(), meta: ev.meta_key() }
}

fn pointer_point(ev: &MouseEvent) -> Point {
    Point::new(f64::from(ev.client_x()), f64::from(ev.client_y()))
}

/// Build the `{ scale, panX, panY, fitMode }` object handed to `onChange`.
fn state_to_js(state: ViewportState) -> Result<JsValue, JsValue> {
    let obj = js_sys::Object::new();
    let fields = [
        ("scale", JsValue::from_f64(state.scale)),
        ("panX", JsValue::from_f64(state.pan_x)),
        ("panY", JsValue::from_f64(state.pan_y)),
        ("fitMode", JsValue::from_bool(state.fit_mode)),
    ];
    for (name, value) in fields {
        js_sys::Reflect::set(&obj, &JsValue::from_str(name), &value)?;
    }
    Ok(obj.into())
}

/// Carry out controller actions. Takes only short borrows so callbacks can re-enter.
fn apply(shared: &Rc<RefCell<Shared>>, actions: Vec<Action>) {
    for action in actions {
        match action {
            Action::ViewChanged(state) => {
                let Some(callback) = shared.borrow().on_change.clone() else {
                    continue;
                };
                let value = match state_to_js(state) {
                    Ok(value) => value,
                    Err(e) => {
                        tracing::warn!(error = ?e, "failed to build viewport state object");
                        continue;
                    }
                };
                if let Err(e) = callback.call1(&JsValue::NULL, &value) {
                    tracing::warn!(error = ?e, "viewport onChange callback threw");
                }
            }
            Action::SetCursor(cursor) => shared.borrow().core.container().set_cursor(cursor),
            Action::RequestFrame => schedule_frame(shared),
            // Dropping the handle cancels the browser callback.
            Action::CancelFrame => shared.borrow_mut().frame = None,
        }
    }
}

fn schedule_frame(shared: &Rc<RefCell<Shared>>) {
    let weak: Weak<RefCell<Shared>> = Rc::downgrade(shared);
    let handle = request_animation_frame(move |_ts| {
        let Some(shared) = weak.upgrade() else {
            return;
        };
        shared.borrow_mut().frame = None;
        let actions = shared.borrow_mut().core.on_frame();
        apply(&shared, actions);
    });
    shared.borrow_mut().frame = Some(handle);
}

/// Run one controller operation and apply what it returns.
fn dispatch(shared: &Rc<RefCell<Shared>>, op: impl FnOnce(&mut Core) -> Vec<Action>) {
    let actions = op(&mut shared.borrow_mut().core);
    apply(shared, actions);
}

/// JS-facing viewport controller bound to a container and a page element.
#[wasm_bindgen]
pub struct WebViewport {
    shared: Rc<RefCell<Shared>>,
    listeners: Vec<EventListener>,
    observers: Vec<ResizeObserver>,
    observer_callbacks: Vec<Closure<dyn FnMut(JsValue)>>,
}

#[wasm_bindgen]
impl WebViewport {
    /// Attach to `container` (scrollable) and `page` (the menu document).
    ///
    /// `config_json` is an optional partial [`ViewportConfig`] object.
    #[wasm_bindgen(constructor)]
    pub fn new(container: HtmlElement, page: HtmlElement, config_json: Option<String>) -> Result<WebViewport, JsError> {
        init_logging();
        let config = match config_json.as_deref() {
            Some(raw) => ViewportConfig::from_json(raw).map_err(|e| {
                tracing::warn!(error = %e, "rejected viewport config");
                JsError::new(&e.to_string())
            })?,
            None => ViewportConfig::default(),
        };

        let core = ViewportController::new(DomContainer::new(container.clone()), DomDocument::new(page.clone()), config);
        let shared = Rc::new(RefCell::new(Shared { core, frame: None, on_change: None }));

        let mut viewport =
            WebViewport { shared, listeners: Vec::new(), observers: Vec::new(), observer_callbacks: Vec::new() };
        viewport.attach(&container, &page)?;
        dispatch(&viewport.shared, Core::activate);
        tracing::debug!(initial_fit = config.initial_fit, "viewport attached");
        Ok(viewport)
    }

    #[wasm_bindgen(js_name = zoomIn)]
    pub fn zoom_in(&self) {
        dispatch(&self.shared, Core::zoom_in);
    }

    #[wasm_bindgen(js_name = zoomOut)]
    pub fn zoom_out(&self) {
        dispatch(&self.shared, Core::zoom_out);
    }

    #[wasm_bindgen(js_name = resetZoom)]
    pub fn reset_zoom(&self) {
        dispatch(&self.shared, Core::reset_zoom);
    }

    #[wasm_bindgen(js_name = fitToView)]
    pub fn fit_to_view(&self) {
        dispatch(&self.shared, Core::fit_to_view);
    }

    #[wasm_bindgen(js_name = setFitMode)]
    pub fn set_fit_mode(&self, fit: bool) {
        dispatch(&self.shared, |core| core.set_fit_mode(fit));
    }

    #[wasm_bindgen(js_name = toggleFit)]
    pub fn toggle_fit(&self) {
        dispatch(&self.shared, Core::toggle_fit);
    }

    #[wasm_bindgen(js_name = setScale)]
    pub fn set_scale(&self, scale: f64) {
        dispatch(&self.shared, |core| core.set_scale(scale));
    }

    #[wasm_bindgen(getter)]
    pub fn scale(&self) -> f64 {
        self.shared.borrow().core.state().scale
    }

    #[wasm_bindgen(getter, js_name = panX)]
    pub fn pan_x(&self) -> f64 {
        self.shared.borrow().core.state().pan_x
    }

    #[wasm_bindgen(getter, js_name = panY)]
    pub fn pan_y(&self) -> f64 {
        self.shared.borrow().core.state().pan_y
    }

    #[wasm_bindgen(getter, js_name = fitMode)]
    pub fn fit_mode(&self) -> bool {
        self.shared.borrow().core.state().fit_mode
    }

    /// Toolbar readout such as `"72%"`.
    #[wasm_bindgen(getter, js_name = zoomLabel)]
    pub fn zoom_label(&self) -> String {
        self.shared.borrow().core.state().zoom_label()
    }

    /// Register (or clear) the state-change callback. It receives `{ scale, panX, panY, fitMode }`.
    #[wasm_bindgen(js_name = onChange)]
    pub fn on_change(&self, callback: Option<js_sys::Function>) {
        self.shared.borrow_mut().on_change = callback;
    }

    /// Detach every listener and observer and cancel pending work. Safe to call twice.
    pub fn dispose(&mut self) {
        self.detach();
    }
}

impl WebViewport {
    fn attach(&mut self, container: &HtmlElement, page: &HtmlElement) -> Result<(), JsError> {
        let window = web_sys::window().ok_or_else(|| JsError::new("no window"))?;

        let shared = Rc::clone(&self.shared);
        self.listeners.push(EventListener::new_with_options(
            &window,
            "keydown",
            EventListenerOptions::enable_prevent_default(),
            move |event: &Event| {
                let Some(ev) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                let key = Key::new(ev.key());
                let modifiers = map_modifiers(ev);
                let in_text = focus_in_text_input();
                if should_prevent_default(&key, modifiers, in_text) {
                    ev.prevent_default();
                }
                dispatch(&shared, |core| core.on_key_down(&key, modifiers, in_text));
            },
        ));

        let shared = Rc::clone(&self.shared);
        self.listeners.push(EventListener::new(&window, "keyup", move |event: &Event| {
            let Some(ev) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            let key = Key::new(ev.key());
            dispatch(&shared, |core| core.on_key_up(&key));
        }));

        let shared = Rc::clone(&self.shared);
        self.listeners.push(EventListener::new_with_options(
            container,
            "mousedown",
            EventListenerOptions::enable_prevent_default(),
            move |event: &Event| {
                let Some(ev) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                dispatch(&shared, |core| core.on_pointer_down(pointer_point(ev), Button::from_dom(ev.button())));
                if shared.borrow().core.is_panning() {
                    // Keep the drag from selecting menu text.
                    ev.prevent_default();
                }
            },
        ));

        let shared = Rc::clone(&self.shared);
        self.listeners.push(EventListener::new(&window, "mousemove", move |event: &Event| {
            let Some(ev) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            if !shared.borrow().core.is_panning() {
                return;
            }
            dispatch(&shared, |core| core.on_pointer_move(pointer_point(ev)));
        }));

        let shared = Rc::clone(&self.shared);
        self.listeners.push(EventListener::new(&window, "mouseup", move |event: &Event| {
            let Some(ev) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            dispatch(&shared, |core| core.on_pointer_up(pointer_point(ev), Button::from_dom(ev.button())));
        }));

        let shared = Rc::clone(&self.shared);
        self.listeners.push(EventListener::new(container, "scroll", move |_event: &Event| {
            dispatch(&shared, Core::on_scroll);
        }));

        let shared = Rc::clone(&self.shared);
        self.listeners.push(EventListener::new(&window, "blur", move |_event: &Event| {
            dispatch(&shared, Core::on_blur);
        }));

        self.observe(container, Core::on_container_resize)?;
        self.observe(page, Core::on_document_resize)?;
        Ok(())
    }

    fn observe(&mut self, element: &HtmlElement, handler: fn(&mut Core) -> Vec<Action>) -> Result<(), JsError> {
        let weak = Rc::downgrade(&self.shared);
        let callback = Closure::<dyn FnMut(JsValue)>::new(move |_entries: JsValue| {
            if let Some(shared) = weak.upgrade() {
                dispatch(&shared, handler);
            }
        });
        let observer = ResizeObserver::new(callback.as_ref().unchecked_ref())
            .map_err(|_| JsError::new("ResizeObserver unavailable"))?;
        observer.observe(element);
        self.observers.push(observer);
        self.observer_callbacks.push(callback);
        Ok(())
    }

    fn detach(&mut self) {
        if self.shared.borrow().core.is_disposed() {
            return;
        }
        self.listeners.clear();
        for observer in self.observers.drain(..) {
            observer.disconnect();
        }
        self.observer_callbacks.clear();
        let actions = self.shared.borrow_mut().core.dispose();
        apply(&self.shared, actions);
        let mut shared = self.shared.borrow_mut();
        shared.frame = None;
        shared.on_change = None;
        tracing::debug!("viewport detached");
    }
}

impl Drop for WebViewport {
    fn drop(&mut self) {
        self.detach();
    }
}
