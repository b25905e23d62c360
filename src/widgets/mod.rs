pub(crate) mod arrow;
pub(crate) mod label;
pub(crate) mod library;
pub(crate) mod timers;
