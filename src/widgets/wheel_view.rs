use egui::{vec2, Sense, Vec2};

use crate::{
    render::{PainterCanvas, Viewport},
    SpinRequest, Wheel,
};

/// Paints the wheel into the largest square that fits and spins it on click.
pub struct WheelView<'a> {
    wheel: &'a mut Wheel,
}

impl<'a> WheelView<'a> {
    const MIN_SIDE: f32 = 120.0;

    pub fn new(wheel: &'a mut Wheel) -> Self {
        Self { wheel }
    }
}

impl<'a> egui::Widget for WheelView<'a> {
    fn ui(self, ui: &mut egui::Ui) -> egui::Response {
        let available = ui.available_size();
        let side = available.x.min(available.y).max(Self::MIN_SIDE);
        let (rect, resp) = ui.allocate_exact_size(Vec2::splat(side), Sense::click());

        let ppp = ui.ctx().pixels_per_point();
        self.wheel
            .refresh_display(&Viewport::new(rect.size(), ppp));

        let now = ui.input().time;
        if resp.clicked() {
            // rejections are logged by the wheel
            let _ = self.wheel.spin(SpinRequest::Random, now);
        }
        self.wheel.tick(now, ui.ctx());

        let snap = |v: f32| (v * ppp).round() / ppp;
        let offset = vec2(snap(rect.min.x), snap(rect.min.y));
        let painter = ui.painter_at(rect);
        self.wheel.paint(&mut PainterCanvas::new(&painter, offset));

        let hint = if self.wheel.is_spinning() {
            "Spinning..."
        } else {
            "Click to spin"
        };
        resp.on_hover_text_at_pointer(hint)
    }
}
