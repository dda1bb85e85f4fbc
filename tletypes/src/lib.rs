extern crate nalgebra as na;

pub mod constants;
pub mod elements;
pub mod prelude;
pub mod time;
pub mod tle;
