#[cfg(feature = "cpu")]
pub(crate) mod cpu;
pub(crate) mod debug;
pub(crate) mod recording;
pub(crate) mod surface;
