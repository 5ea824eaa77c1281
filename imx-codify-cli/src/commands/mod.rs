pub(crate) mod codify;
pub(crate) mod config;
pub(crate) mod describe;
pub(crate) mod verify;
