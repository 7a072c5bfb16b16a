pub mod popup;
pub mod style;
pub mod widget;

pub use popup::{popup_id, PopupResponse};
pub use style::{MapStyle, MarkerStyle, PopupStyle};
pub use widget::MapView;

use crate::core::map::MapCanvas;

pub trait UiMapExt {
    /// Draws the canvas at its configured size
    fn pin_map(&mut self, canvas: &mut MapCanvas) -> egui::Response;
}

impl UiMapExt for egui::Ui {
    fn pin_map(&mut self, canvas: &mut MapCanvas) -> egui::Response {
        self.add(MapView::new(canvas))
    }
}
