pub mod analysis;
pub mod fundamentals;
pub mod history;
pub mod holders;
pub mod info;
pub mod macros;
pub mod options;
