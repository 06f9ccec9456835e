/*!
 * Built-in auxiliary modules for the shipped rule files.
 *
 * Each submodule registers the helpers its rule file refers to with
 * `name(in)`.
 */

use std::sync::Arc;

use crate::phonetics::PhonemeProducer;
use crate::rules::FunctionRegistry;

pub mod en;

/// Registry with every built-in language helper
pub fn builtin_registry(producer: Arc<dyn PhonemeProducer>) -> FunctionRegistry {
    let mut registry = FunctionRegistry::new();
    en::register(&mut registry, producer);
    registry
}
