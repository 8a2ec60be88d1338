#![allow(clippy::too_many_arguments, clippy::type_complexity)]

pub mod error;
pub mod validation;
pub mod model;
pub mod clock;
pub mod overlap;
pub mod ranking;
pub mod classes;
pub mod avatar;
pub mod session;
pub mod db;
pub mod ops;
pub mod queries;
pub mod migrate;
pub mod cli;
