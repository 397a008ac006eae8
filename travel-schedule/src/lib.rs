//! Train schedule search over the Yandex Rasp API.
//!
//! Looks up cities and stations in the Rasp directory, searches trips
//! between two stations, and turns raw search results into filtered,
//! sorted, display-ready trip cards.

pub mod cache;
pub mod directory;
pub mod rasp;
pub mod trips;
pub mod web;
