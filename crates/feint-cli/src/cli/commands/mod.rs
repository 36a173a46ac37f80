pub mod dispatch;
pub mod filegen;
pub mod jwt;
pub mod otp;
pub mod token;

pub use dispatch::dispatch;
