pub mod headless;
pub mod human;

pub use headless::{HeadlessConfig, HeadlessMode, HeadlessReport, RunSummary};
pub use human::HumanMode;
