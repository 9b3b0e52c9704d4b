// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Animated insertion sort: bars glide into place while two index markers
//! track the scan and short tones mark every swap and every finished pass.
//!
//! The crate is the engine behind the visualization, not the page around
//! it. The rendering layer supplies position sinks (one per bar, one per
//! marker), the host supplies a clock by calling
//! [`sort::SortSession::tick`] every frame, and the crate keeps the visible
//! board in lockstep with the logical one.
//!
//! # Key entry points
//!
//! - [`sort::SortSession`] - shuffle, start a run, tick, abort
//! - [`animation::TweenScheduler`] - frame-driven tweens with awaitable
//!   [`animation::Completion`]s
//! - [`sinks::SinkRegistry`] - the table the rendering layer registers (and
//!   rebinds) its position callbacks in
//! - [`options::VisualizerOptions`] - board size, timing, layout, tones
//!
//! # Architecture
//!
//! The driver is an `async fn` that walks insertion sort and awaits one
//! animation per step; a swap awaits both bar tweens together before the
//! logical swap and the marker move. Nothing runs on another thread: each
//! [`sort::SortSession::tick`] first advances the scheduler (delivering
//! values and resolving finished tweens) and then resumes the driver if it
//! was woken.

pub mod animation;
pub mod audio;
pub mod error;
pub mod options;
pub mod permutation;
pub mod sinks;
pub mod sort;
pub mod util;
#[cfg(feature = "web")]
pub mod web;

pub use error::VisualizerError;
