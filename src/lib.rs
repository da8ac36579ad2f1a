pub trait RequestPaint: Send + Sync {
    fn request_repaint(&self) {}
}

impl RequestPaint for egui::Context {
    fn request_repaint(&self) {
        Self::request_repaint(self)
    }
}

pub struct NoopRepaint;
impl RequestPaint for NoopRepaint {}

mod error;
pub use error::WheelError;

pub mod geometry;

pub mod theme;
pub use theme::Theme;

mod config;
pub use config::{EnvConfig, SpinConfig};

pub mod spin;
pub use spin::{Phase, SpinRequest, SpinResult};

pub mod render;

mod wheel;
pub use wheel::Wheel;

mod key_mapping;
pub use key_mapping::{Chord, KeyAction, KeyHelper, KeyMapping};

mod queue;
pub use queue::Queue;

pub mod logger;

mod state;
pub use state::{PersistState, SETTINGS_KEY};

pub mod widgets;

mod app;
pub use app::App;

pub mod font_icon {
    pub const ADD: &str = "➕";
    pub const REMOVE: &str = "✖";
    pub const CLEAR: &str = "🗑";
    pub const SHUFFLE: &str = "🔀";
    pub const HISTORY: &str = "⏰";
    pub const SETTINGS: &str = "🔧";
    pub const LOGS: &str = "📜";
    pub const TARGET: &str = "🎯";
}
