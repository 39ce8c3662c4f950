pub mod audio;
pub mod scrubber;
pub mod transport;
pub mod volume;
