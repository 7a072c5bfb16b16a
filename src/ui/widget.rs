use crate::{
    core::{geo::Point, map::MapCanvas},
    input::events::{InputEvent, MouseButton},
    layers::{base::LayerTrait, marker::Marker},
    ui::{
        popup::show_popup,
        style::{MapStyle, MarkerStyle},
    },
};
use egui::{CursorIcon, Painter, Pos2, Rect, Response, Sense, Shape, Stroke, Ui, Vec2, Widget};

/// Spacing of the background graticule in pixels
const GRID_SPACING: f64 = 100.0;

/// egui widget that draws a `MapCanvas` and feeds pointer input back into it
pub struct MapView<'a> {
    canvas: &'a mut MapCanvas,
    style: MapStyle,
    interactive: bool,
    show_grid: bool,
}

impl<'a> MapView<'a> {
    pub fn new(canvas: &'a mut MapCanvas) -> Self {
        let style = MapStyle::from_config(canvas.config());
        Self {
            canvas,
            style,
            interactive: true,
            show_grid: true,
        }
    }

    pub fn style(mut self, style: MapStyle) -> Self {
        self.style = style;
        self
    }

    /// Enable or disable pan, zoom and marker clicks
    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    pub fn show_grid(mut self, show_grid: bool) -> Self {
        self.show_grid = show_grid;
        self
    }

    fn handle_pointer(&mut self, ui: &Ui, rect: Rect, response: &Response) -> bool {
        let mut changed = false;
        let local = |pos: Pos2| Point::new((pos.x - rect.min.x) as f64, (pos.y - rect.min.y) as f64);

        if response.dragged() {
            let delta = response.drag_delta();
            if delta.length_sq() > 0.0 {
                self.canvas.handle_input(InputEvent::Drag {
                    delta: Point::new(delta.x as f64, delta.y as f64),
                });
                changed = true;
            }
        }

        if response.hovered() {
            let scroll = ui.input(|i| i.raw_scroll_delta.y);
            if scroll.abs() > 0.1 {
                if let Some(pos) = response.hover_pos() {
                    self.canvas.handle_input(InputEvent::Scroll {
                        delta: scroll as f64,
                        position: local(pos),
                    });
                    changed = true;
                }
            }
        }

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let handled = self.canvas.handle_input(InputEvent::Click {
                    position: local(pos),
                    button: MouseButton::Left,
                });
                changed |= handled.is_handled();
            }
        }

        changed
    }

    fn paint_grid(&self, painter: &Painter, rect: Rect) {
        let viewport = self.canvas.viewport();
        let origin = viewport
            .project(&viewport.center, None)
            .subtract(&viewport.size.multiply(0.5));
        let start_x = (GRID_SPACING - origin.x.rem_euclid(GRID_SPACING)) as f32;
        let start_y = (GRID_SPACING - origin.y.rem_euclid(GRID_SPACING)) as f32;

        let mut x = rect.min.x + start_x;
        while x < rect.max.x {
            painter.line_segment(
                [Pos2::new(x, rect.min.y), Pos2::new(x, rect.max.y)],
                self.style.grid_stroke,
            );
            x += GRID_SPACING as f32;
        }
        let mut y = rect.min.y + start_y;
        while y < rect.max.y {
            painter.line_segment(
                [Pos2::new(rect.min.x, y), Pos2::new(rect.max.x, y)],
                self.style.grid_stroke,
            );
            y += GRID_SPACING as f32;
        }
    }

    fn paint_marker(&self, painter: &Painter, rect: Rect, marker: &Marker, hovered: bool) {
        let glyph = marker.glyph_rect(self.canvas.viewport());
        let to_screen = |p: Point| rect.min + Vec2::new(p.x as f32, p.y as f32);
        let min = to_screen(glyph.min);
        let max = to_screen(glyph.max);

        let radius = (glyph.width() / 2.0) as f32;
        let head = Pos2::new((min.x + max.x) / 2.0, min.y + radius);
        let tip = Pos2::new(head.x, max.y);
        paint_pin(painter, head, radius, tip, &self.style.markers, hovered);
    }
}

/// Teardrop pin: a round head over a triangle pointing at `tip`
fn paint_pin(painter: &Painter, head: Pos2, radius: f32, tip: Pos2, style: &MarkerStyle, hovered: bool) {
    let fill = if hovered {
        style.hover_color
    } else {
        style.fill_color
    };
    let shoulder = radius * 0.87;
    let body = vec![
        Pos2::new(head.x - shoulder, head.y + radius * 0.5),
        Pos2::new(head.x + shoulder, head.y + radius * 0.5),
        tip,
    ];
    painter.add(Shape::convex_polygon(body, fill, Stroke::NONE));
    painter.circle(head, radius, fill, style.border_stroke);
    painter.circle_filled(head, radius * 0.35, style.dot_color);
}

impl<'a> Widget for MapView<'a> {
    fn ui(mut self, ui: &mut Ui) -> Response {
        let size = self.canvas.viewport().size;
        let desired_size = Vec2::new(size.x as f32, size.y as f32);
        let (rect, mut response) = ui.allocate_exact_size(desired_size, Sense::click_and_drag());

        if self.interactive && self.handle_pointer(ui, rect, &response) {
            response.mark_changed();
            ui.ctx().request_repaint();
        }

        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, self.style.background_color);
        if self.show_grid {
            self.paint_grid(&painter, rect);
        }

        let hover = response.hover_pos().map(|pos| {
            Point::new((pos.x - rect.min.x) as f64, (pos.y - rect.min.y) as f64)
        });
        let hovered = hover.and_then(|pixel| {
            self.canvas
                .markers()
                .filter(|marker| marker.hit_test(self.canvas.viewport(), &pixel))
                .last()
                .map(|marker| (marker.record_id(), marker.name().to_owned()))
        });
        let hovered_id = hovered.as_ref().map(|(id, _)| *id);
        if self.interactive {
            if let Some((_, name)) = hovered {
                ui.ctx().set_cursor_icon(CursorIcon::PointingHand);
                response = response.on_hover_text(name);
            }
        }

        for marker in self.canvas.markers() {
            self.paint_marker(&painter, rect, marker, hovered_id == Some(marker.record_id()));
        }
        painter.rect_stroke(rect, 0.0, self.style.border_stroke);

        let mut closed = Vec::new();
        for popup in self.canvas.popups_in_view() {
            let anchor = popup.screen_anchor(self.canvas.viewport());
            let tip = rect.min + Vec2::new(anchor.x as f32, anchor.y as f32);
            let popup_response = show_popup(ui, &popup, tip, &self.style.popups);
            if popup_response.close_clicked {
                closed.push(popup_response.marker_id);
            }
        }

        for marker_id in closed {
            self.canvas.handle_input(InputEvent::PopupClose { marker_id });
            response.mark_changed();
            ui.ctx().request_repaint();
        }

        self.canvas.process_events();
        response
    }
}
