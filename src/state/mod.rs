/// State management module
///
/// This module handles all application state, including:
/// - The launch data model (data.rs)
/// - The favourites collection owned by the app root (favourites.rs)
/// - Favourites persistence in SQLite (library.rs)
/// - Page counter and fetched pages for the launch list (pages.rs)

pub mod data;
pub mod favourites;
pub mod library;
pub mod pages;
