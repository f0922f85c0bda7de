//! The assembled example module.

use crate::config::ModuleConfig;
use crate::dispatch::Module;
use crate::{functions, linalg};

/// Build the example module with every function demo and linear-algebra demo
/// registered
pub fn hello_module(config: ModuleConfig) -> Module {
    let mut m = Module::new(config);
    functions::register(&mut m);
    linalg::register(&mut m);
    tracing::debug!(
        module = m.name(),
        functions = m.function_names().count(),
        "module initialised"
    );
    m
}
