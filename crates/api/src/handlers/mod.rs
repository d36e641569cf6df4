//! Request handlers, one submodule per resource.

pub mod catalog;
pub mod devices;
pub mod readings;
pub mod sensors;
