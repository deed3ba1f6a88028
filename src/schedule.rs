pub(crate) mod config;
pub(crate) mod cue;
pub(crate) mod scheduler;
pub(crate) mod validate;
