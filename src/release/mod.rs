//! Podspec release building blocks
//!
//! - **version**: `<major>.<minor>` arithmetic and the tag/version pair
//! - **podspec**: Podspec discovery, field extraction and rewriting
//! - **plan**: Resolution of pods, target version and commit message
//!
//! # Example podspec
//!
//! ```ruby
//! Pod::Spec.new do |s|
//!   s.name    = "EthosUtil"
//!   s.version = "0.1.4"
//!   s.source  = { :git => "https://github.com/example/Ethos.git", :tag => "v0.1.4" }
//! end
//! ```

pub mod plan;
pub mod podspec;
pub mod version;

pub use plan::{ReleaseArgs, ReleasePlan};
