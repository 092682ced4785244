pub mod delay;

pub use delay::{delay_series, jitter_series, DelayComputer};
