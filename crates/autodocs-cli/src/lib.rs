//! Library side of the `autodocs` command: logging, settings and the
//! generation pipeline.

pub mod logging;
pub mod pipeline;
pub mod settings;
pub mod types;
