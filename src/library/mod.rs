mod scan;

pub use scan::{is_supported_audio, read_track, scan_paths};
