pub mod input;
pub mod logging;
pub mod time;
pub mod timer;
