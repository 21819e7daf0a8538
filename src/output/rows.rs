//! Built-in row extractors, one submodule per resource family.

use super::registry::OutputRegistry;

pub mod apps;
pub mod linkages;
pub mod reviews;
pub mod signing;
pub mod testflight;
pub mod users;
pub mod webhooks;

/// Populate `registry` with every built-in handler, in a fixed order.
pub fn register_builtin(registry: &mut OutputRegistry) {
    apps::register(registry);
    testflight::register(registry);
    signing::register(registry);
    users::register(registry);
    reviews::register(registry);
    webhooks::register(registry);
    linkages::register(registry);
}

fn headers(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}
