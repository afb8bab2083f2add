mod arith;
pub mod engine;
pub mod fp;
pub mod ntt;
pub mod poly;
mod series;
