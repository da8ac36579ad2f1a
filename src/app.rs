use std::collections::BTreeMap;

use egui::{
    Align, Button, CentralPanel, Event, Layout, RichText, SidePanel, TopBottomPanel, Window,
};

use crate::{
    font_icon,
    logger::Record,
    theme,
    widgets::{DisplaySettings, EntryList, KeyBindings, LogWindow, WheelView},
    EnvConfig, KeyAction, PersistState, Queue, SpinRequest, SpinResult, Theme, Wheel,
};

const HISTORY: usize = 10;

pub struct App {
    context: egui::Context,

    wheel: Wheel,
    results: flume::Receiver<SpinResult>,
    history: Queue<SpinResult>,

    themes: BTreeMap<String, Theme>,
    theme_names: Vec<String>,
    active_theme: String,
    persist: PersistState,

    input: String,
    focus_input: bool,

    logs: flume::Receiver<Record>,
    log_window: LogWindow,
    show_logs: bool,
    show_settings: bool,
}

impl App {
    pub fn new(
        context: egui::Context,
        config: EnvConfig,
        mut persist: PersistState,
        logs: flume::Receiver<Record>,
    ) -> Self {
        let mut themes = Theme::builtin_names()
            .filter_map(|name| Theme::builtin(name).map(|theme| (name.to_string(), theme)))
            .collect::<BTreeMap<_, _>>();

        if let Some(path) = &config.themes_file {
            match theme::load_themes(path) {
                Ok(loaded) => themes.extend(loaded),
                Err(err) => log::error!("{err:#}"),
            }
        }

        if !themes.contains_key(&persist.theme) {
            log::warn!("unknown theme '{}', using 'light'", persist.theme);
            persist.theme = String::from("light");
        }

        let wheel = Wheel::default().with_config(config.spin);
        let results = wheel.results();

        let mut this = Self {
            context,

            wheel,
            results,
            history: Queue::with_capacity(HISTORY),

            theme_names: themes.keys().cloned().collect(),
            themes,
            active_theme: String::new(),
            persist,

            input: String::new(),
            focus_input: true,

            logs,
            log_window: LogWindow::default(),
            show_logs: false,
            show_settings: false,
        };

        this.try_apply_theme();
        this
    }

    fn try_read_logs(&mut self) {
        for record in self.logs.try_iter() {
            self.log_window.push(record);
        }
    }

    fn try_read_results(&mut self) {
        for result in self.results.try_iter() {
            if let Some(old) = self.history.push(result) {
                log::trace!("'{}' fell out of the history", old.label);
            }
        }
    }

    fn try_apply_theme(&mut self) {
        if self.persist.theme == self.active_theme {
            return;
        }

        match self.themes.get(&self.persist.theme) {
            Some(theme) => {
                log::debug!("switching to theme '{}'", self.persist.theme);
                self.wheel.set_theme(theme.clone());
                self.active_theme = self.persist.theme.clone();
            }
            None => {
                log::warn!("unknown theme '{}'", self.persist.theme);
                self.persist.theme = self.active_theme.clone();
            }
        }
    }

    fn spin(&mut self) {
        let now = self.context.input().time;
        if self.wheel.spin(SpinRequest::Random, now).is_ok() {
            self.context.request_repaint();
        }
    }

    fn try_handle_key_press(&mut self) {
        if self.context.input().events.is_empty() {
            return;
        }

        let typing = self.context.memory().focus().is_some();

        let ctx = self.context.clone();
        let keys = ctx
            .input()
            .events
            .iter()
            .filter_map(|c| match c {
                &Event::Key {
                    key,
                    pressed,
                    modifiers,
                } if !pressed => Some((key, modifiers)),
                _ => None,
            })
            .collect::<Vec<_>>();

        for (key, modifiers) in keys {
            let bare = !(modifiers.ctrl || modifiers.alt || modifiers.shift || modifiers.mac_cmd);
            // plain keys belong to the focused text input
            if typing && bare {
                continue;
            }

            if let Some(action) = self.persist.key_mapping.find(key, modifiers) {
                log::trace!("action: {action:?}");

                use KeyAction::*;
                match action {
                    Spin => self.spin(),
                    FocusInput => self.focus_input = true,
                    ToggleLogs => self.show_logs = !self.show_logs,
                    ClearEntries => {
                        let _ = self.wheel.clear_entries();
                    }
                }
            }
        }
    }

    fn display_top_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("Spin the Wheel");
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                ui.toggle_value(&mut self.show_settings, font_icon::SETTINGS)
                    .on_hover_text_at_pointer("Settings");
                ui.toggle_value(&mut self.show_logs, font_icon::LOGS)
                    .on_hover_text_at_pointer("Logs");
            });
        });
    }

    fn display_result_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let spinning = self.wheel.is_spinning();
            let can_spin = !spinning && !self.wheel.entries().is_empty();

            if ui.add_enabled(can_spin, Button::new("Spin")).clicked() {
                self.spin();
            }

            match (spinning, self.wheel.last_result()) {
                (true, _) => ui.label("Spinning..."),
                (false, Some(result)) => {
                    ui.label(RichText::new(format!("Winner: {}", result.label)).strong())
                }
                (false, None) => ui.weak("Add some names and spin"),
            };

            if !self.history.is_empty() {
                ui.separator();
                let recent = self
                    .history
                    .newest()
                    .map(|r| r.label.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                ui.small(format!("{} {recent}", font_icon::HISTORY));
            }
        });
    }

    fn try_display_settings(&mut self) {
        if !self.show_settings {
            return;
        }

        let Self {
            context,
            persist,
            theme_names,
            show_settings,
            ..
        } = self;

        Window::new("settings")
            .collapsible(false)
            .resizable(false)
            .open(show_settings)
            .show(context, |ui| {
                DisplaySettings::new(persist, theme_names).display(ui);
                ui.separator();
                ui.add(KeyBindings::new(&persist.key_mapping));
            });
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _: &mut eframe::Frame) {
        self.try_read_logs();
        self.try_read_results();
        self.try_handle_key_press();

        TopBottomPanel::top("top")
            .resizable(false)
            .show(ctx, |ui| self.display_top_bar(ui));

        TopBottomPanel::bottom("result")
            .resizable(false)
            .show(ctx, |ui| self.display_result_bar(ui));

        SidePanel::left("entries")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                let focus = std::mem::take(&mut self.focus_input);
                ui.add(EntryList::new(&mut self.wheel, &mut self.input).focus_input(focus));
            });

        CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| ui.add(WheelView::new(&mut self.wheel)));
        });

        self.try_display_settings();
        self.try_apply_theme();

        self.log_window.display(&mut self.show_logs, ctx);
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.persist.save(storage);
    }

    fn persist_native_window(&self) -> bool {
        true
    }
}
