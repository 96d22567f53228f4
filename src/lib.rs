//! # iceberg-fixtures
//!
//! Local fixtures for the Iceberg integration tests: the Spark runtime jar the
//! test Spark session loads, and the warehouse directory tables are written to.
//!
//! ## Usage
//!
//! ```bash
//! iceberg-fixtures [download-jar] [--url URL | --coordinate GAV]
//! iceberg-fixtures warehouse
//! ```
//!
//! ## Modules
//!
//! - `artifact` - Download URL and Maven coordinate handling
//! - `config` - TOML + environment configuration
//! - `download` - Streaming jar download that never overwrites an existing jar
//! - `error` - Library error type
//! - `layout` - Where fixtures live on disk
//! - `warehouse` - Idempotent creation of the test warehouse directory
pub mod artifact;
pub mod config;
pub mod download;
pub mod error;
pub mod layout;
pub mod warehouse;

pub use artifact::{jar_file_name, MavenCoordinate, JAR_URL};
pub use config::Config;
pub use download::{DownloadOutcome, JarDownloader, EXIT_ALREADY_EXISTS};
pub use error::{Error, Result};
pub use layout::FixtureLayout;
pub use warehouse::{ensure_warehouse, warehouse_dir};
