#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum WheelError {
    #[error("the wheel has no entries")]
    EmptyWheel,

    #[error("a spin is already in progress")]
    AlreadySpinning,

    #[error("index {index} is out of range for {len} entries")]
    InvalidIndex { index: usize, len: usize },

    #[error("geometry requires at least one entry")]
    InvalidState,

    #[error("entries cannot change while the wheel is spinning")]
    Busy,

    #[error("entry labels cannot be blank")]
    EmptyLabel,
}
