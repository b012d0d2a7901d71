//! Canvas viewport controller for the menu editor.
//!
//! The editor shows a fixed-size menu page inside a resizable, scrollable
//! viewport. This crate owns the mapping between the two: the current scale,
//! the pan (scroll) offset, and whether the page is auto-fitted to the
//! viewport. It turns container/document resizes, drag-to-pan gestures, and
//! keyboard shortcuts into that mapping and publishes the result to the UI.
//!
//! The core is browser-independent so it can be tested natively. The `web`
//! feature adds the DOM adapter compiled to WebAssembly.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`controller`] | The viewport state machine and the [`controller::Action`]s it emits |
//! | [`state`] | Published [`state::ViewportState`] and fit/manual [`state::Mode`] |
//! | [`fit`] | Fit-scale computation, clamping, and centering offsets |
//! | [`input`] | Keys, modifiers, shortcuts, cursor affordance, and the pan gesture state |
//! | [`surface`] | Capability traits for the container and document elements |
//! | [`geometry`] | Points, sizes, and the per-computation dimensions snapshot |
//! | [`config`] | Tunable constants loaded from JSON |
//! | [`consts`] | Default design constants |
//! | `web` | Browser adapter (feature `web`) |

pub mod config;
pub mod consts;
pub mod controller;
pub mod fit;
pub mod geometry;
pub mod input;
pub mod state;
pub mod surface;
#[cfg(feature = "web")]
pub mod web;
