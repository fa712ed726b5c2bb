//! Baseline menu data and the loader that writes it into the catalog.

pub mod dataset;
mod seeder;

pub use seeder::{MenuSeeder, SeedError, SeedReport};
