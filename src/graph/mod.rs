pub mod catalog;
pub mod combinations;
pub mod paths;
