pub mod common;
pub mod post_gen;
