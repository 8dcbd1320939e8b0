//! Constants for the download module (storage location, eligibility).

/// Directory, relative to the working directory, that receives downloaded images.
///
/// The directory must already exist; it is never created on demand.
pub const DEFAULT_DOWNLOAD_DIR: &str = "download";

/// Filename suffix a URL must resolve to before it is fetched.
pub const ELIGIBLE_SUFFIX: &str = ".jpg";
