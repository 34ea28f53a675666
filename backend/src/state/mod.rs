// State management module
// Handles the shared handles passed to request handlers

pub mod app_state;

pub use app_state::AppState;
