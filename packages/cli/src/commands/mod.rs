pub mod check;
pub mod generate;
pub mod init;

pub use check::{check, CheckArgs};
pub use generate::{generate, GenerateArgs};
pub use init::{init, InitArgs};
