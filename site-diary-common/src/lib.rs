#![cfg(not(doctest))]

#[macro_use]
extern crate diesel;

pub mod cards;
pub mod db;
pub mod fetch;
pub mod list_state;
pub mod models;
pub mod request_io;
pub mod resource_picker;
pub mod schema;
pub mod validators;
pub mod weather;
