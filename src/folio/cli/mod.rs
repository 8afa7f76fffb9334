mod commands;
mod external;
mod print;
mod setup;

pub use commands::run;
