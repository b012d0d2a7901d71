use tracing::{debug, trace, warn};

use crate::config::ViewportConfig;
use crate::consts::RESET_SCALE;
use crate::fit::{FitOutcome, centering_scroll, clamp_scale, compute_fit_scale, zoom_in_scale, zoom_out_scale};
use crate::geometry::{Dimensions, Point};
use crate::input::{Button, Cursor, GestureSession, InputState, Key, Modifiers, Shortcut};
use crate::state::{Mode, ViewportState};
use crate::surface::{ContainerSurface, DocumentSurface};

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

/// Side effects returned from handlers for the host to carry out.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The published state changed; push it to the UI.
    ViewChanged(ViewportState),
    /// Update the cursor shown over the viewport.
    SetCursor(Cursor),
    /// Call [`ViewportController::on_frame`] on the next animation frame.
    RequestFrame,
    /// Drop the previously requested animation frame.
    CancelFrame,
}

/// The viewport state machine.
///
/// Owns scale, pan, and fit flag. Reads sizes and scroll from its two surfaces
/// on demand and never caches them. All mutation happens synchronously inside the
/// handler that caused it; handlers return the [`Action`]s the host must apply.
pub struct ViewportController<C, D> {
    container: C,
    document: D,
    config: ViewportConfig,
    state: ViewportState,
    input: InputState,
    pan_modifier_held: bool,
    cursor: Cursor,
    frame_pending: bool,
    fit_retries: u32,
    disposed: bool,
}

impl<C: ContainerSurface, D: DocumentSurface> ViewportController<C, D> {
    /// Create a controller. Nothing is computed until [`Self::activate`].
    #[must_use]
    pub fn new(container: C, document: D, config: ViewportConfig) -> Self {
        let scale = clamp_scale(RESET_SCALE, config.min_scale_free, config.max_scale);
        Self {
            container,
            document,
            state: ViewportState { scale, pan_x: 0.0, pan_y: 0.0, fit_mode: config.initial_fit },
            config,
            input: InputState::Idle,
            pan_modifier_held: false,
            cursor: Cursor::Default,
            frame_pending: false,
            fit_retries: 0,
            disposed: false,
        }
    }

    /// First computation after the host has attached its listeners.
    pub fn activate(&mut self) -> Vec<Action> {
        self.run(|this, actions| {
            if this.state.fit_mode {
                this.refit(actions);
            } else {
                this.mirror_scroll();
            }
        })
    }

    // --- Zoom operations (toolbar and keyboard) ---

    pub fn zoom_in(&mut self) -> Vec<Action> {
        self.run(|this, actions| {
            this.exit_fit(actions);
            this.state.scale = zoom_in_scale(this.state.scale, &this.config);
        })
    }

    pub fn zoom_out(&mut self) -> Vec<Action> {
        self.run(|this, actions| {
            this.exit_fit(actions);
            this.state.scale = zoom_out_scale(this.state.scale, &this.config);
        })
    }

    /// Back to 100%.
    pub fn reset_zoom(&mut self) -> Vec<Action> {
        self.run(|this, actions| {
            this.exit_fit(actions);
            this.state.scale = clamp_scale(RESET_SCALE, this.config.min_scale_free, this.config.max_scale);
        })
    }

    /// Explicit manual scale. Out-of-range values are clamped; non-finite values are ignored.
    pub fn set_scale(&mut self, scale: f64) -> Vec<Action> {
        if !scale.is_finite() {
            debug!(scale, "ignoring non-finite scale request");
            return Vec::new();
        }
        self.run(|this, actions| {
            this.exit_fit(actions);
            this.state.scale = clamp_scale(scale, this.config.min_scale_free, this.config.max_scale);
        })
    }

    /// Enter fit mode and recompute now.
    pub fn fit_to_view(&mut self) -> Vec<Action> {
        self.run(Self::enter_fit)
    }

    pub fn set_fit_mode(&mut self, fit: bool) -> Vec<Action> {
        if fit {
            return self.fit_to_view();
        }
        self.run(Self::exit_fit)
    }

    pub fn toggle_fit(&mut self) -> Vec<Action> {
        let fit = !self.state.fit_mode;
        self.set_fit_mode(fit)
    }

    /// Run the operation bound to a keyboard shortcut.
    pub fn apply_shortcut(&mut self, shortcut: Shortcut) -> Vec<Action> {
        match shortcut {
            Shortcut::ZoomIn => self.zoom_in(),
            Shortcut::ZoomOut => self.zoom_out(),
            Shortcut::ResetZoom => self.reset_zoom(),
            Shortcut::FitToView => self.fit_to_view(),
        }
    }

    // --- Layout notifications ---

    pub fn on_container_resize(&mut self) -> Vec<Action> {
        self.run(Self::resized)
    }

    /// Page size changed (paper size, page count) independently of the window.
    pub fn on_document_resize(&mut self) -> Vec<Action> {
        self.run(Self::resized)
    }

    /// Deferred recompute tick for an earlier [`Action::RequestFrame`].
    pub fn on_frame(&mut self) -> Vec<Action> {
        self.run(|this, actions| {
            this.frame_pending = false;
            if this.state.fit_mode {
                this.refit(actions);
            }
        })
    }

    /// Native scroll happened (scrollbars, wheel, or our own writes).
    pub fn on_scroll(&mut self) -> Vec<Action> {
        self.run(|this, _| this.mirror_scroll())
    }

    // --- Pointer ---

    /// Begin a drag-to-pan if the pan modifier is held and no drag is in progress.
    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        if !self.pan_modifier_held || button != Button::Primary || self.is_panning() {
            return Vec::new();
        }
        self.run(|this, actions| {
            let session = GestureSession::new(screen_pt, this.container.scroll());
            this.input = InputState::Panning(session);
            this.exit_fit(actions);
            this.set_cursor(Cursor::Grabbing, actions);
            debug!(x = screen_pt.x, y = screen_pt.y, "pan started");
        })
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        let InputState::Panning(session) = self.input else {
            return Vec::new();
        };
        self.run(|this, _| {
            let target = session.scroll_for(screen_pt);
            trace!(x = target.x, y = target.y, "pan scroll");
            this.container.set_scroll(target);
            this.mirror_scroll();
        })
    }

    pub fn on_pointer_up(&mut self, _screen_pt: Point, button: Button) -> Vec<Action> {
        if button != Button::Primary || !self.is_panning() {
            return Vec::new();
        }
        self.run(|this, actions| {
            this.end_gesture(actions);
            debug!("pan ended");
        })
    }

    // --- Keyboard ---

    /// Dispatch zoom shortcuts and track the pan modifier.
    ///
    /// The pan modifier is ignored while focus is in a text input so typing a
    /// space there stays a space.
    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers, focus_in_text_input: bool) -> Vec<Action> {
        if let Some(shortcut) = Shortcut::from_key(key, modifiers) {
            return self.apply_shortcut(shortcut);
        }
        if !key.is_pan_modifier() || focus_in_text_input {
            return Vec::new();
        }
        self.run(|this, actions| {
            this.pan_modifier_held = true;
            if !this.is_panning() {
                this.set_cursor(Cursor::Grab, actions);
            }
        })
    }

    /// Releasing the pan modifier disarms panning. A drag already in progress
    /// continues until the pointer is released.
    pub fn on_key_up(&mut self, key: &Key) -> Vec<Action> {
        if !key.is_pan_modifier() {
            return Vec::new();
        }
        self.run(|this, actions| {
            this.pan_modifier_held = false;
            if !this.is_panning() {
                this.set_cursor(Cursor::Default, actions);
            }
        })
    }

    /// Window lost focus: no key-up or pointer-up will arrive, so release both.
    pub fn on_blur(&mut self) -> Vec<Action> {
        self.run(|this, actions| {
            this.pan_modifier_held = false;
            this.end_gesture(actions);
        })
    }

    // --- Lifecycle ---

    /// Tear down. Cancels a pending deferred fit and ends any gesture; every later
    /// call returns no actions and mutates nothing.
    pub fn dispose(&mut self) -> Vec<Action> {
        if self.disposed {
            return Vec::new();
        }
        let mut actions = Vec::new();
        self.cancel_frame(&mut actions);
        self.input = InputState::Idle;
        self.pan_modifier_held = false;
        self.set_cursor(Cursor::Default, &mut actions);
        self.disposed = true;
        debug!("viewport controller disposed");
        actions
    }

    // --- Queries ---

    #[must_use]
    pub fn state(&self) -> ViewportState {
        self.state
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.state.mode()
    }

    #[must_use]
    pub fn is_panning(&self) -> bool {
        matches!(self.input, InputState::Panning(_))
    }

    #[must_use]
    pub fn pan_modifier_held(&self) -> bool {
        self.pan_modifier_held
    }

    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    #[must_use]
    pub fn frame_pending(&self) -> bool {
        self.frame_pending
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    #[must_use]
    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    /// Fresh sizes from both surfaces.
    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.container.size(), self.document.size())
    }

    #[must_use]
    pub fn container(&self) -> &C {
        &self.container
    }

    pub fn container_mut(&mut self) -> &mut C {
        &mut self.container
    }

    #[must_use]
    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    // --- Internals ---

    /// Apply `f` unless disposed, then append `ViewChanged` if the published state moved.
    fn run(&mut self, f: impl FnOnce(&mut Self, &mut Vec<Action>)) -> Vec<Action> {
        if self.disposed {
            return Vec::new();
        }
        let before = self.state;
        let mut actions = Vec::new();
        f(self, &mut actions);
        if self.state != before {
            actions.push(Action::ViewChanged(self.state));
        }
        actions
    }

    fn resized(&mut self, actions: &mut Vec<Action>) {
        if self.state.fit_mode {
            self.fit_retries = 0;
            self.refit(actions);
        } else {
            self.mirror_scroll();
        }
    }

    fn enter_fit(&mut self, actions: &mut Vec<Action>) {
        if self.is_panning() {
            // Fit owns scroll from here on; a live drag would fight it.
            self.end_gesture(actions);
        }
        if !self.state.fit_mode {
            debug!(scale = self.state.scale, "entering fit mode");
        }
        self.state.fit_mode = true;
        self.fit_retries = 0;
        self.refit(actions);
    }

    fn exit_fit(&mut self, actions: &mut Vec<Action>) {
        if !self.state.fit_mode {
            return;
        }
        debug!(scale = self.state.scale, "leaving fit mode");
        self.state.fit_mode = false;
        self.cancel_frame(actions);
    }

    fn refit(&mut self, actions: &mut Vec<Action>) {
        let dims = self.dimensions();
        match compute_fit_scale(dims, &self.config) {
            FitOutcome::Scale(scale) => {
                self.cancel_frame(actions);
                self.fit_retries = 0;
                self.state.scale = scale;
                self.container.set_scroll(centering_scroll(dims, scale));
                self.mirror_scroll();
                debug!(
                    scale,
                    viewport_w = dims.viewport.width,
                    viewport_h = dims.viewport.height,
                    doc_w = dims.document.width,
                    doc_h = dims.document.height,
                    "fit scale committed"
                );
            }
            FitOutcome::Deferred => {
                if self.frame_pending {
                    return;
                }
                if self.fit_retries >= self.config.max_fit_retries {
                    warn!(retries = self.fit_retries, "viewport still not laid out; waiting for resize");
                    return;
                }
                self.fit_retries += 1;
                self.frame_pending = true;
                actions.push(Action::RequestFrame);
                trace!(attempt = self.fit_retries, "fit deferred to next frame");
            }
        }
    }

    fn end_gesture(&mut self, actions: &mut Vec<Action>) {
        self.input = InputState::Idle;
        let cursor = if self.pan_modifier_held { Cursor::Grab } else { Cursor::Default };
        self.set_cursor(cursor, actions);
    }

    fn cancel_frame(&mut self, actions: &mut Vec<Action>) {
        if self.frame_pending {
            self.frame_pending = false;
            actions.push(Action::CancelFrame);
        }
    }

    fn set_cursor(&mut self, cursor: Cursor, actions: &mut Vec<Action>) {
        if self.cursor != cursor {
            self.cursor = cursor;
            actions.push(Action::SetCursor(cursor));
        }
    }

    fn mirror_scroll(&mut self) {
        let scroll = self.container.scroll();
        self.state.pan_x = scroll.x;
        self.state.pan_y = scroll.y;
    }
}
