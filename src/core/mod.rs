pub mod module;

pub use module::ModuleId;
