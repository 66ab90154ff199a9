//! numbox-cli: demonstration entry points for numbox-core.
pub mod config;
pub mod demo;
