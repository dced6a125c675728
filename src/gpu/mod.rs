pub mod collector;
pub mod parse;
pub mod power;
pub mod severity;
pub mod snapshot;
