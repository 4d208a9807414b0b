//src/model/mod.rs
pub mod dataset;
pub mod elements;
pub mod property;
