//! Single-item download path: filename resolution, eligibility, HTTP, disk.
//!
//! Every concurrency strategy funnels each URL through [`Fetcher::fetch`],
//! which never fails as a whole: network, HTTP and filesystem faults are
//! captured in the returned [`DownloadResult`].
//!
//! # Example
//!
//! ```no_run
//! use imgfetch_core::download::{Fetcher, HttpClient};
//!
//! # async fn example() {
//! let fetcher = Fetcher::new(HttpClient::new(), "./download");
//! let result = fetcher.fetch("https://example.com/cat.jpg").await;
//! println!("{}: success={}", result.filename, result.is_success());
//! # }
//! ```

mod client;
mod constants;
mod error;
mod fetcher;
pub mod filename;
mod result;

pub use client::HttpClient;
pub use constants::{DEFAULT_DOWNLOAD_DIR, ELIGIBLE_SUFFIX};
pub use error::DownloadError;
pub use fetcher::Fetcher;
pub use filename::{is_eligible, resolve_filename};
pub use result::{DownloadResult, Outcome};
