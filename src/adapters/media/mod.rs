//! Media adapter. Maps files on disk into domain clips.

pub mod video_file;

pub use video_file::{load_clip, mime_from_extension};
