mod walk;

pub use walk::list_audio_files;
