pub mod expand;
pub mod serve;
