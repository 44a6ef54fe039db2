pub mod calendar;
pub mod mood_modal;
