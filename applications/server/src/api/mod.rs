/// API route modules
pub mod audio;
pub mod chat;
pub mod health;
