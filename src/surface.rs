//! Capability contracts for the two elements the controller reads from.
//!
//! The controller never assumes a widget toolkit. It needs sizes, scroll offsets, and
//! to be told when sizes change. Size-change notification is the host's job: it
//! calls [`crate::controller::ViewportController::on_container_resize`] and
//! [`crate::controller::ViewportController::on_document_resize`].

use crate::geometry::{Point, Size};

/// The scrollable element that shows the page.
pub trait ContainerSurface {
    /// Current rendered size of the visible area.
    fn size(&self) -> Size;

    /// Current native scroll offsets.
    fn scroll(&self) -> Point;

    /// Request new scroll offsets. Implementations clamp to their own scroll range,
    /// so a subsequent [`ContainerSurface::scroll`] may differ from what was requested.
    fn set_scroll(&mut self, offset: Point);
}

/// The page element being displayed.
pub trait DocumentSurface {
    /// Unscaled layout size of the page (before the viewport scale is applied).
    fn size(&self) -> Size;
}
