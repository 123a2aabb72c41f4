mod always_cache;

pub use always_cache::*;
