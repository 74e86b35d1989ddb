// ── Render boundary ──

use crate::error::CoreError;
use crate::project::RenderView;

/// The presentation layer as seen by the sync controller.
///
/// Implementations own escaping and layout. None of these calls may fail:
/// a sink that cannot draw logs and carries on.
pub trait RenderSink {
    /// Draw a freshly applied page.
    fn render(&mut self, view: &RenderView);

    /// Put an error in front of the user. Control returns to an
    /// interactive state afterwards.
    fn show_error(&mut self, error: &CoreError);

    /// Hide the create/edit surface after a successful save or a cancel.
    fn close_editor(&mut self) {}
}
