pub mod logging;
pub mod offset;
pub mod text;
