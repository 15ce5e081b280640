extern crate serde;

pub mod config;
pub mod packet;
pub mod stats;
pub mod utils;
