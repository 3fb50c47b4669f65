//! Application Layer

pub mod events;

pub use events::CalendarUseCase;
