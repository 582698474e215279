//! Public transit departure board server.
//!
//! Fetches upcoming departures for a fixed set of stops from the
//! Digitransit API and shows them as tram and bus tables, refreshed every
//! minute.

pub mod board;
pub mod config;
pub mod digitransit;
pub mod web;
