//! Renderers consuming the view-model accessors

pub mod console;

pub use console::ConsoleReporter;
