pub mod application;
pub mod job;
mod lenient;
