pub mod balance;
pub mod cancel;
pub mod carrier;
pub mod error;
pub mod node;
pub mod route;
