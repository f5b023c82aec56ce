pub mod javascript;
pub mod scripts;

pub use javascript::ScriptRunner;
