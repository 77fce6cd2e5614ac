//! # benchdiff
//!
//! Compare before/after results from Go-style benchmark reports.
//!
//! Both runs appear in one input stream, one measurement per line,
//! distinguished only by benchmark name. Two regular expressions select
//! the "before" and "after" groups; matched records are paired up and
//! each of the four metrics (ns/op, MB/s, allocs/op, B/op) gets a
//! formatted delta.
//!
//! ## Quick Start
//!
//! ```
//! use benchdiff::{correlate, parse};
//!
//! let report = "\
//! BenchmarkOld 1000 1200 ns/op
//! BenchmarkNew 1000 600 ns/op
//! ";
//!
//! let records = parse(report.as_bytes()).unwrap();
//! let cmps = correlate(&records, "Old$", "New$").unwrap();
//!
//! assert_eq!(cmps[0].delta_ns_per_op().percent(), "-50.00%");
//! assert_eq!(cmps[0].delta_ns_per_op().multiple(), "0.50x");
//! ```
//!
//! ## Sub-benchmarks
//!
//! When both patterns match several sub-benchmarks (names with a `/`),
//! pairing aligns on the suffix after the first `/`, so
//! `BenchmarkOld/4KB` compares against `BenchmarkNew/4KB`. A pattern
//! that matches several records including a top-level one is rejected
//! as ambiguous.
//!
//! Lines that do not parse as measurements are skipped, so the output
//! of `go test -bench` can be piped in unfiltered.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

mod compare;
mod error;
mod parse;
mod report;

pub use compare::{BenchCmp, Delta, by_delta, by_parse_order, correlate};
pub use error::{BenchDiffError, Group, Result};
pub use parse::{
    ALLOCED_BYTES_PER_OP, ALLOCS_PER_OP, Benchmark, MB_PER_S, NS_PER_OP, parse,
};
pub use report::{Options, format_ns, write_report};
