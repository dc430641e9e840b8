pub mod aco;
pub mod evaluation;
pub mod exhaustive;
pub mod ranking;
pub mod supply;
