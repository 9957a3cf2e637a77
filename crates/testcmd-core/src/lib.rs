//! # testcmd-core
//!
//! Works out how to run a Swift or Xcode project's test suite.
//!
//! Given the top-level entries of a project directory, this crate decides
//! which build system the project uses and produces the executable and
//! argument list a mutation-testing run should invoke after each mutation.
//! It never runs the tests itself.
//!
//! ## Modules
//!
//! - [`classify`] - Build-system detection from file names
//! - [`locate`] - Tool lookup through `which`
//! - [`scheme`] - Scheme names and base argument skeletons
//! - [`destination`] - Simulator and local-machine `-destination` resolution
//! - [`generate`] - Assembles the final [`Configuration`]
//! - [`probe`] - The [`Probe`] trait and its process-backed implementation
//!
//! ## External Dependencies
//!
//! [`SystemProbe`] expects `which`, and for Xcode projects `xcrun simctl` and
//! `xcodebuild`, to be available on the host.
//!
//! ## Example
//!
//! ```no_run
//! use testcmd_core::{generate, SystemProbe};
//!
//! let listing = ["/work/App/App.xcodeproj", "/work/App/Sources"];
//! let probe = SystemProbe::new("/work/App");
//! match generate(&listing, &probe) {
//!     Ok(config) if config.is_empty() => println!("not a Swift or Xcode project"),
//!     Ok(config) => println!("{} {}", config.executable, config.arguments.join(" ")),
//!     Err(e) => eprintln!("{}", e),
//! }
//! ```

pub mod classify;
pub mod destination;
pub mod generate;
pub mod locate;
pub mod probe;
pub mod scheme;

pub use classify::{classify, ProjectDescriptor, ProjectKind};
pub use generate::{generate, generate_with_preferences, Configuration, GenerateError};
pub use probe::{Probe, ProbeError, SystemProbe};
