use egui::{ScrollArea, Window};

use crate::{font_icon, logger::Record, Queue};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Level {
    #[default]
    All,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl Level {
    const fn as_log(self) -> Option<log::Level> {
        Some(match self {
            Self::All => return None,
            Self::Error => log::Level::Error,
            Self::Warn => log::Level::Warn,
            Self::Info => log::Level::Info,
            Self::Debug => log::Level::Debug,
            Self::Trace => log::Level::Trace,
        })
    }
}

pub struct LogWindow {
    trace: Queue<Record>,
    debug: Queue<Record>,
    info: Queue<Record>,
    warn: Queue<Record>,
    error: Queue<Record>,

    active_log: Level,
    show_target: bool,
}

impl Default for LogWindow {
    fn default() -> Self {
        Self::with_caps(100, 100, 200, 50, 50)
    }
}

impl LogWindow {
    pub fn with_caps(trace: usize, debug: usize, info: usize, warn: usize, error: usize) -> Self {
        Self {
            trace: Queue::with_capacity(trace),
            debug: Queue::with_capacity(debug),
            info: Queue::with_capacity(info),
            warn: Queue::with_capacity(warn),
            error: Queue::with_capacity(error),
            active_log: Level::default(),
            show_target: false,
        }
    }

    const fn queue(&self, level: log::Level) -> &Queue<Record> {
        match level {
            log::Level::Error => &self.error,
            log::Level::Warn => &self.warn,
            log::Level::Info => &self.info,
            log::Level::Debug => &self.debug,
            log::Level::Trace => &self.trace,
        }
    }

    pub fn push(&mut self, record: Record) {
        let queue = match record.level {
            log::Level::Error => &mut self.error,
            log::Level::Warn => &mut self.warn,
            log::Level::Info => &mut self.info,
            log::Level::Debug => &mut self.debug,
            log::Level::Trace => &mut self.trace,
        };
        queue.push(record);
    }

    pub fn iter(
        &self,
        level: log::Level,
    ) -> impl Iterator<Item = &Record> + ExactSizeIterator + '_ {
        self.queue(level).iter()
    }

    /// Every retained record, oldest first.
    pub fn all(&self) -> Vec<&Record> {
        let mut list = [
            &self.trace,
            &self.debug,
            &self.info,
            &self.warn,
            &self.error,
        ]
        .into_iter()
        .flat_map(Queue::iter)
        .collect::<Vec<_>>();

        list.sort_by_key(|k| k.timestamp);
        list
    }

    fn visible(&self) -> Vec<&Record> {
        match self.active_log.as_log() {
            Some(level) => self.iter(level).collect(),
            None => self.all(),
        }
    }

    pub fn display(&mut self, show_logs: &mut bool, ctx: &egui::Context) {
        Window::new("logs")
            .default_height(200.0)
            .resizable(true)
            .collapsible(true)
            .open(show_logs)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    for (repr, level) in [
                        ("trace", Level::Trace),
                        ("debug", Level::Debug),
                        ("info", Level::Info),
                        ("warn", Level::Warn),
                        ("error", Level::Error),
                        ("all", Level::All),
                    ] {
                        ui.selectable_value(&mut self.active_log, level, repr);
                    }

                    ui.toggle_value(&mut self.show_target, font_icon::TARGET)
                        .on_hover_text_at_pointer("Toggle target");
                });

                ui.separator();

                let show_target = self.show_target;
                ScrollArea::vertical()
                    .stick_to_bottom(true)
                    .auto_shrink([false, true])
                    .show(ui, |ui| {
                        ui.vertical(|ui| {
                            for record in self.visible() {
                                record.display(show_target, ui);
                            }
                        })
                    });
            });
    }
}
