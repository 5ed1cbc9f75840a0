//! `ffc`: manage forgetting-curve reminders for files in a vault.

pub mod lang;
pub mod remind;

pub use remind::Cli;
pub use remind::describe_error;
pub use remind::run;
