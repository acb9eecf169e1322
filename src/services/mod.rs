/// Quiz catalog browsing.
pub mod catalog_service;
/// OpenAPI documentation generation.
pub mod documentation;
/// Game lifecycle, polling snapshots, and phase advancement.
pub mod game_service;
/// Guess recording against the current answer window.
pub mod guess_service;
/// Health check service.
pub mod health_service;
/// Roster management for joining and kicking participants.
pub mod roster_service;
