//! Persistence collaborator traits and the in-memory backend.

pub mod memory;
pub mod traits;

pub use memory::MemoryStore;
pub use traits::{CalendarEvent, CalendarStore, OnboardingStore, PreferencesStore, UserPreferences};
