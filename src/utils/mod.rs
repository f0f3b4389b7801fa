pub mod encodings;
pub mod logging;
pub mod timer;
