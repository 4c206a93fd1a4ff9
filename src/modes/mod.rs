pub mod headless;
pub mod play;

pub use headless::{GameReport, HeadlessMode};
pub use play::PlayMode;
