mod clock;
mod controller;
mod display;
mod mode;
mod settings;

pub use clock::{Clock, InstantClock, IntervalClock, TICK_PERIOD};
pub use controller::SessionController;
pub use display::{format_clock, title_line};
pub use mode::{Mode, ParseModeError};
pub use settings::{
    Settings, LONG_BREAK_MINUTES_MAX, ROUNDS_PER_CYCLE_MAX, SHORT_BREAK_MINUTES_MAX,
    WORK_MINUTES_MAX,
};
