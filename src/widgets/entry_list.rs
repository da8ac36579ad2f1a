use std::collections::HashSet;

use egui::{Align, Button, Key, Layout, RichText, ScrollArea, TextEdit};

use crate::{font_icon, Wheel};

const SAMPLE_NAMES: &[&str] = &[
    "Alice", "Bob", "Charlie", "Dana", "Eve", "Frank", "Grace", "Heidi", "Ivan", "Judy",
    "Mallory", "Niaj", "Olivia", "Peggy", "Rupert", "Sybil", "Trent", "Victor", "Walter",
];

/// `count` distinct names from the sample list, in random order.
pub fn sample_names(rng: &fastrand::Rng, count: usize) -> Vec<&'static str> {
    let mut names = SAMPLE_NAMES.to_vec();
    rng.shuffle(&mut names);
    names.truncate(count);
    names
}

/// `count` sample names that do not clash with `existing`. Clashing names get
/// the lowest free number appended, e.g. `Alice 2`.
pub fn sample_batch(rng: &fastrand::Rng, existing: &[String], count: usize) -> Vec<String> {
    let mut taken = existing.iter().cloned().collect::<HashSet<_>>();
    sample_names(rng, count)
        .into_iter()
        .map(|name| {
            let name = std::iter::once(name.to_string())
                .chain((2..).map(|n| format!("{name} {n}")))
                .find(|candidate| !taken.contains(candidate))
                .unwrap_or_else(|| name.to_string());
            taken.insert(name.clone());
            name
        })
        .collect()
}

/// The name input plus the list of entries on the wheel.
pub struct EntryList<'a> {
    wheel: &'a mut Wheel,
    input: &'a mut String,
    focus_input: bool,
}

impl<'a> EntryList<'a> {
    pub fn new(wheel: &'a mut Wheel, input: &'a mut String) -> Self {
        Self {
            wheel,
            input,
            focus_input: false,
        }
    }

    pub fn focus_input(self, focus_input: bool) -> Self {
        Self {
            focus_input,
            ..self
        }
    }

    fn add_samples(&mut self, rng: &fastrand::Rng) {
        let count = rng.usize(3..=6);
        for name in sample_batch(rng, self.wheel.entries(), count) {
            if let Err(err) = self.wheel.add_entry(&name) {
                log::warn!("cannot add '{name}': {err}");
                break;
            }
        }
    }

    fn try_add(&mut self) {
        let name = std::mem::take(self.input);
        if let Err(err) = self.wheel.add_entry(&name) {
            log::warn!("cannot add '{name}': {err}");
            *self.input = name;
        }
    }
}

impl<'a> egui::Widget for EntryList<'a> {
    fn ui(mut self, ui: &mut egui::Ui) -> egui::Response {
        let idle = !self.wheel.is_spinning();

        ui.vertical(|ui| {
            ui.horizontal(|ui| {
                let resp = ui.add_enabled(
                    idle,
                    TextEdit::singleline(&mut *self.input)
                        .hint_text("Add a name")
                        .desired_width(ui.available_width() - 32.0),
                );
                if self.focus_input {
                    resp.request_focus();
                }

                let submit = resp.lost_focus() && ui.input().key_pressed(Key::Enter);
                let clicked = ui
                    .add_enabled(idle, Button::new(font_icon::ADD))
                    .on_hover_text_at_pointer("Add this name")
                    .clicked();

                if submit || clicked {
                    self.try_add();
                    resp.request_focus();
                }
            });

            ui.horizontal(|ui| {
                ui.small(format!("{} entries", self.wheel.entries().len()));
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    if ui
                        .add_enabled(idle, Button::new(font_icon::CLEAR).small())
                        .on_hover_text_at_pointer("Remove every name")
                        .clicked()
                    {
                        let _ = self.wheel.clear_entries();
                    }

                    if ui
                        .add_enabled(idle, Button::new(font_icon::SHUFFLE).small())
                        .on_hover_text_at_pointer("Add a few sample names")
                        .clicked()
                    {
                        self.add_samples(&fastrand::Rng::new());
                    }
                });
            });

            ui.separator();

            let winner = self.wheel.last_result().map(|r| r.index);
            let mut remove = None;

            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    for (i, entry) in self.wheel.entries().iter().enumerate() {
                        ui.horizontal(|ui| {
                            let mut text = RichText::new(entry);
                            if winner == Some(i) {
                                text = text.strong().color(ui.visuals().selection.stroke.color);
                            }
                            ui.label(text);

                            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                                if ui
                                    .add_enabled(idle, Button::new(font_icon::REMOVE).small())
                                    .on_hover_text_at_pointer(format!("Remove {entry}"))
                                    .clicked()
                                {
                                    remove.replace(i);
                                }
                            });
                        });
                    }
                });

            if let Some(index) = remove {
                let _ = self.wheel.remove_entry(index);
            }
        })
        .response
    }
}
