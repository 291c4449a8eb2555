pub mod client;
pub mod types;

pub use client::ScheduleClient;
pub use types::RawScheduleEvent;
