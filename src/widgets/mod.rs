mod entry_list;
pub use entry_list::{sample_batch, sample_names, EntryList};

mod key_bindings;
pub use key_bindings::KeyBindings;

mod log_window;
pub use log_window::LogWindow;

mod wheel_view;
pub use wheel_view::WheelView;

mod display_settings;
pub use display_settings::DisplaySettings;
