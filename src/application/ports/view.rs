//! Widget view port interface

use crate::domain::widget::{Element, SessionSnapshot, TextOutput};

/// Port for the visible widget surface.
///
/// Output only: the widget never reads state back from the view.
pub trait WidgetView: Send + Sync {
    fn set_visible(&self, element: Element, visible: bool);

    fn set_text(&self, output: TextOutput, text: &str);

    fn set_slider_value(&self, value: f64);

    fn set_slider_max(&self, max: f64);

    /// Point the still-image element at a URL
    fn set_image_source(&self, url: &str);

    /// Show a full state report
    fn show_status(&self, snapshot: &SessionSnapshot);
}
