mod timezone;
pub use timezone::*;

mod datetime;
pub use datetime::*;
