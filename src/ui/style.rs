use crate::core::config::MapConfig;
use egui::{Color32, FontId, Stroke};

/// Style configuration for the map surface
#[derive(Debug, Clone)]
pub struct MapStyle {
    /// Background color of the map surface
    pub background_color: Color32,
    /// Graticule line stroke
    pub grid_stroke: Stroke,
    /// Outline of the map surface
    pub border_stroke: Stroke,
    /// Style for markers
    pub markers: MarkerStyle,
    /// Style for popups
    pub popups: PopupStyle,
}

/// Style for marker glyphs
#[derive(Debug, Clone)]
pub struct MarkerStyle {
    /// Fill color of the pin
    pub fill_color: Color32,
    /// Fill color while the pointer is over the pin
    pub hover_color: Color32,
    /// Pin outline
    pub border_stroke: Stroke,
    /// Color of the dot inside the pin head
    pub dot_color: Color32,
}

/// Style for popups
#[derive(Debug, Clone)]
pub struct PopupStyle {
    pub background_color: Color32,
    pub border_stroke: Stroke,
    pub rounding: f32,
    pub padding: f32,
    pub max_width: f32,
    pub title_font: FontId,
    pub body_font: FontId,
    pub text_color: Color32,
    /// Square edge of the image box
    pub image_size: f32,
}

impl Default for MapStyle {
    fn default() -> Self {
        Self {
            background_color: Color32::from_rgb(232, 236, 230),
            grid_stroke: Stroke::new(1.0, Color32::from_rgb(214, 219, 211)),
            border_stroke: Stroke::new(1.0, Color32::GRAY),
            markers: MarkerStyle::default(),
            popups: PopupStyle::default(),
        }
    }
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            fill_color: Color32::BLUE,
            hover_color: Color32::from_rgb(60, 60, 255),
            border_stroke: Stroke::new(1.0, Color32::from_rgb(0, 0, 140)),
            dot_color: Color32::WHITE,
        }
    }
}

impl Default for PopupStyle {
    fn default() -> Self {
        Self {
            background_color: Color32::WHITE,
            border_stroke: Stroke::new(1.0, Color32::from_gray(190)),
            rounding: 4.0,
            padding: 10.0,
            max_width: 240.0,
            title_font: FontId::proportional(15.0),
            body_font: FontId::proportional(12.0),
            text_color: Color32::BLACK,
            image_size: 200.0,
        }
    }
}

impl MapStyle {
    /// Default style with marker color and popup image size from the config
    pub fn from_config(config: &MapConfig) -> Self {
        let [r, g, b] = config.markers.color;
        let fill_color = Color32::from_rgb(r, g, b);

        let mut style = Self::default();
        style.markers.fill_color = fill_color;
        style.markers.hover_color = fill_color.gamma_multiply(0.8);
        style.markers.border_stroke = Stroke::new(1.0, fill_color.gamma_multiply(0.55));
        style.popups.image_size = config.popup.image_size as f32;
        style.popups.max_width = style.popups.max_width.max(style.popups.image_size + 40.0);
        style
    }
}
