#![allow(dead_code)]

pub mod factory;
pub mod test_state;

#[allow(unused_imports)]
pub use test_state::{build_test_state, build_test_state_with};
