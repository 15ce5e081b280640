#[macro_use]
extern crate enum_primitive_derive;

pub mod dissectors;
