pub mod formatters;
pub mod palette;
pub mod pagination;
pub mod search_grid;
pub mod service;
pub mod settings;
