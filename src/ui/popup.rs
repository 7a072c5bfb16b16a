use crate::layers::marker::PopupView;
use crate::ui::style::PopupStyle;
use egui::{Align, Align2, Area, Frame, Id, Layout, Order, Pos2, RichText, Ui, Vec2};

/// What happened to a popup during one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopupResponse {
    pub marker_id: u32,
    pub close_clicked: bool,
}

/// Id of the foreground `Area` holding a marker's popup
pub fn popup_id(marker_id: u32) -> Id {
    Id::new(("pinmap_popup", marker_id))
}

/// Draws one popup with its tip at `tip` (screen coordinates).
///
/// The popup lives in a foreground `Area`, so pointer input over it never
/// reaches the map surface underneath. The close control sits in the top
/// right corner.
pub fn show_popup(ui: &Ui, popup: &PopupView, tip: Pos2, style: &PopupStyle) -> PopupResponse {
    let mut close_clicked = false;

    Area::new(popup_id(popup.marker_id))
        .order(Order::Foreground)
        .pivot(Align2::CENTER_BOTTOM)
        .fixed_pos(tip)
        .constrain(false)
        .show(ui.ctx(), |ui| {
            Frame::none()
                .fill(style.background_color)
                .stroke(style.border_stroke)
                .rounding(style.rounding)
                .inner_margin(style.padding)
                .show(ui, |ui| {
                    ui.set_max_width(style.max_width);

                    ui.horizontal(|ui| {
                        ui.label(
                            RichText::new(&popup.title)
                                .font(style.title_font.clone())
                                .color(style.text_color)
                                .strong(),
                        );
                        if popup.close_button {
                            ui.with_layout(Layout::right_to_left(Align::TOP), |ui| {
                                if ui.small_button("✕").clicked() {
                                    close_clicked = true;
                                }
                            });
                        }
                    });

                    ui.label(
                        RichText::new(&popup.description)
                            .font(style.body_font.clone())
                            .color(style.text_color),
                    );

                    ui.vertical_centered(|ui| {
                        ui.add(
                            egui::Image::from_uri(popup.image.clone())
                                .fit_to_exact_size(Vec2::splat(style.image_size))
                                .maintain_aspect_ratio(true),
                        );
                    });
                });
        });

    PopupResponse {
        marker_id: popup.marker_id,
        close_clicked,
    }
}
