//! Document sources

mod directory;

pub use directory::DirectorySource;
