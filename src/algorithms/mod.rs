pub mod common;
pub mod ordering;
pub mod route;
pub mod search;
