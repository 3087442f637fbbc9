pub mod format;
pub mod summary;
pub mod video;
pub mod video_ref;
pub mod view;

pub use summary::*;
pub use video::*;

#[cfg(any(test, feature = "testing"))]
pub mod testing;
