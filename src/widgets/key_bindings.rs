use std::collections::BTreeSet;

use egui::{Grid, RichText};

use crate::{KeyAction, KeyMapping};

/// Read-only table of the active key bindings, one row per action.
pub struct KeyBindings<'a> {
    key_mapping: &'a KeyMapping,
}

impl<'a> KeyBindings<'a> {
    pub const fn new(key_mapping: &'a KeyMapping) -> Self {
        Self { key_mapping }
    }

    fn rows(&self) -> Vec<(KeyAction, String)> {
        self.key_mapping
            .iter()
            .map(|&(_, action)| action)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(|action| {
                let chords = self
                    .key_mapping
                    .chords_for(action)
                    .map(|chord| chord.display())
                    .collect::<Vec<_>>()
                    .join(", ");
                (action, chords)
            })
            .collect()
    }
}

impl<'a> egui::Widget for KeyBindings<'a> {
    fn ui(self, ui: &mut egui::Ui) -> egui::Response {
        Grid::new("key_bindings")
            .num_columns(3)
            .striped(true)
            .show(ui, |ui| {
                for (action, chords) in self.rows() {
                    ui.monospace(chords);
                    ui.label(RichText::new(action.display()).strong());
                    ui.label(action.help());
                    ui.end_row();
                }
            })
            .response
    }
}
