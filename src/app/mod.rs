// Application layer: turns a generation run into console output and an exit code.

pub mod runner;
