pub mod check;
pub mod manifest_loader;
pub mod plan;
pub mod roots;
pub mod run_common;
