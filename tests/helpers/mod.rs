#![allow(dead_code)]

pub mod app;
pub mod builders;

#[allow(unused_imports)]
pub use app::{data, error_code, TestApp};
#[allow(unused_imports)]
pub use builders::{PostBuilder, ProjetBuilder, UserBuilder};
