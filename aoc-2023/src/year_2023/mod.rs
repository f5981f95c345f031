pub mod day_18;
pub mod day_19;
pub mod day_21;
pub mod day_23;
pub mod day_24;
pub mod day_25;
