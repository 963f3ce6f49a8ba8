//! Command-line workflow, independent of argument parsing

pub mod orchestration;

pub use orchestration::{
    resolve_base_dir, run_release, select_version_source, ReleaseArgs, ReleaseReport,
    VersionSource,
};
