use egui::{Align, ComboBox, Layout, RichText};

use crate::PersistState;

pub struct DisplaySettings<'a> {
    persist: &'a mut PersistState,
    themes: &'a [String],
}

impl<'a> DisplaySettings<'a> {
    pub fn new(persist: &'a mut PersistState, themes: &'a [String]) -> Self {
        Self { persist, themes }
    }

    pub fn display(self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.monospace("Pixels per point");

            ComboBox::from_id_source("pixels_per_point")
                .width(50.0)
                .selected_text(Self::dpi_repr(self.persist.pixels_per_point))
                .show_ui(ui, |ui| {
                    for n in Self::dpi_range() {
                        ui.selectable_value(
                            &mut self.persist.pixels_per_point,
                            n,
                            RichText::new(Self::dpi_repr(n)),
                        );
                    }
                });

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                egui::widgets::global_dark_light_mode_buttons(ui);
            });
        });

        ui.horizontal(|ui| {
            ui.monospace("Theme");

            ComboBox::from_id_source("wheel_theme")
                .selected_text(self.persist.theme.as_str())
                .show_ui(ui, |ui| {
                    for name in self.themes {
                        ui.selectable_value(&mut self.persist.theme, name.clone(), name.as_str());
                    }
                });
        });

        let ppp = self.persist.pixels_per_point;
        if ui.ctx().pixels_per_point() != ppp {
            ui.ctx().set_pixels_per_point(ppp);
        }
    }

    fn dpi_repr(f: f32) -> String {
        format!("{f:.2}")
    }

    fn dpi_range() -> impl Iterator<Item = f32> {
        std::iter::successors(Some(1.0_f32), |a| Some(a + 0.25)).take(9)
    }
}
