pub(crate) mod builder;
pub(crate) mod json;
pub(crate) mod model;
