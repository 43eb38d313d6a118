pub mod codec;
pub mod errors;
pub mod read;
pub mod stream;
pub mod write;
