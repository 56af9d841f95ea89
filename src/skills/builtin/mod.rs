//! Built-in deterministic skills.

pub mod calendar;
pub mod current_date;
pub mod preferences;

pub use calendar::GetCalendarEventsSkill;
pub use current_date::GetCurrentDateSkill;
pub use preferences::GetUserPreferencesSkill;
