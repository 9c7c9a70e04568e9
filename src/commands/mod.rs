pub mod registry;

pub use registry::get_all_commands;
