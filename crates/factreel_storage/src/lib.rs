//! Scoped per-run working directories.
//!
//! An [`ArtifactStore`] hands out one [`WorkingDirectory`] per pipeline run.
//! The working directory owns every transient file the run produces
//! (downloaded images, the narration track, the encoder's temporary output)
//! and deletes all of them when released or dropped.
//!
//! ```text
//! <base>/factreel-<uuid>/
//! ├── images/
//! │   ├── generated_image_0.png
//! │   └── generated_image_1.png
//! └── narration.mp3
//! ```

mod cleanup;
mod store;
mod working_dir;

pub use cleanup::delete_if_exists;
pub use store::ArtifactStore;
pub use working_dir::WorkingDirectory;
