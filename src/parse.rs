//! Line-oriented parser for Go-style benchmark reports.
//!
//! Each measurement occupies one line:
//!
//! ```text
//! BenchmarkDecode   1000   1234 ns/op   98.45 MB/s   512 B/op   4 allocs/op
//! ```
//!
//! The name and iteration count are positional; the metric fields are
//! identified by their unit keyword, so any subset may be present.

use std::io::BufRead;

use crate::error::Result;

/// Flag for a measured ns/op value.
pub const NS_PER_OP: u8 = 1 << 0;

/// Flag for a measured MB/s value.
pub const MB_PER_S: u8 = 1 << 1;

/// Flag for a measured B/op value.
pub const ALLOCED_BYTES_PER_OP: u8 = 1 << 2;

/// Flag for a measured allocs/op value.
pub const ALLOCS_PER_OP: u8 = 1 << 3;

/// One parsed benchmark measurement.
///
/// The name doubles as a hierarchical key: everything after the first `/`
/// names a sub-benchmark of the parent before it. Records are immutable
/// once parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct Benchmark {
    /// Benchmark name, e.g. `BenchmarkDecode/4KB`.
    pub name: String,
    /// Number of iterations the measurement averaged over.
    pub n: u64,
    /// Nanoseconds per iteration.
    pub ns_per_op: f64,
    /// Throughput in megabytes per second.
    pub mb_per_s: f64,
    /// Bytes allocated per iteration.
    pub alloced_bytes_per_op: u64,
    /// Allocations per iteration.
    pub allocs_per_op: u64,
    /// Bitmask of which metrics were present on the line.
    pub measured: u8,
    /// Position among successfully parsed records, in input order.
    pub ord: usize,
}

impl Benchmark {
    /// Returns true if the name contains no `/` hierarchy separator.
    pub fn is_top_level(&self) -> bool {
        !self.name.contains('/')
    }
}

/// Parses a benchmark report from a reader.
///
/// Lines that do not parse as benchmark measurements are silently
/// skipped; one garbled line never fails the run. I/O errors on the
/// underlying stream do propagate.
///
/// # Errors
///
/// Returns [`BenchDiffError::StreamRead`](crate::BenchDiffError::StreamRead)
/// if reading from the stream fails.
pub fn parse<R: BufRead>(reader: R) -> Result<Vec<Benchmark>> {
    let mut benchmarks = Vec::new();

    for line in reader.lines() {
        let line = line?;
        if let Some(mut b) = parse_line(&line) {
            b.ord = benchmarks.len();
            benchmarks.push(b);
        }
    }

    Ok(benchmarks)
}

/// Parses a single report line, or `None` if it is not a measurement.
///
/// A measurement has at least four fields, a name starting with
/// `Benchmark`, and an integral iteration count. Metric values attach by
/// the field preceding each recognized unit keyword; a malformed value
/// simply leaves that metric unmeasured.
fn parse_line(line: &str) -> Option<Benchmark> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 4 {
        return None;
    }
    if !fields[0].starts_with("Benchmark") {
        return None;
    }
    let n: u64 = fields[1].parse().ok()?;

    let mut b = Benchmark {
        name: fields[0].to_string(),
        n,
        ns_per_op: 0.0,
        mb_per_s: 0.0,
        alloced_bytes_per_op: 0,
        allocs_per_op: 0,
        measured: 0,
        ord: 0,
    };

    for pair in fields.windows(2).skip(1) {
        match pair[1] {
            "ns/op" => {
                if let Ok(v) = pair[0].parse::<f64>() {
                    b.ns_per_op = v;
                    b.measured |= NS_PER_OP;
                }
            }
            "MB/s" => {
                if let Ok(v) = pair[0].parse::<f64>() {
                    b.mb_per_s = v;
                    b.measured |= MB_PER_S;
                }
            }
            "B/op" => {
                if let Ok(v) = pair[0].parse::<u64>() {
                    b.alloced_bytes_per_op = v;
                    b.measured |= ALLOCED_BYTES_PER_OP;
                }
            }
            "allocs/op" => {
                if let Ok(v) = pair[0].parse::<u64>() {
                    b.allocs_per_op = v;
                    b.measured |= ALLOCS_PER_OP;
                }
            }
            _ => {}
        }
    }

    Some(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_line() {
        let b = parse_line("BenchmarkDecode 1000 1234 ns/op 98.45 MB/s 512 B/op 4 allocs/op")
            .unwrap();
        assert_eq!(b.name, "BenchmarkDecode");
        assert_eq!(b.n, 1000);
        assert_eq!(b.ns_per_op, 1234.0);
        assert_eq!(b.mb_per_s, 98.45);
        assert_eq!(b.alloced_bytes_per_op, 512);
        assert_eq!(b.allocs_per_op, 4);
        assert_eq!(
            b.measured,
            NS_PER_OP | MB_PER_S | ALLOCED_BYTES_PER_OP | ALLOCS_PER_OP
        );
    }

    #[test]
    fn test_parse_time_only() {
        let b = parse_line("BenchmarkEncode-8 2000 567 ns/op").unwrap();
        assert_eq!(b.measured, NS_PER_OP);
        assert_eq!(b.ns_per_op, 567.0);
        assert_eq!(b.mb_per_s, 0.0);
    }

    #[test]
    fn test_rejects_non_benchmark_lines() {
        assert!(parse_line("PASS").is_none());
        assert!(parse_line("ok  \tgithub.com/foo/bar\t2.034s").is_none());
        assert!(parse_line("BenchmarkShort 1000 x").is_none());
        assert!(parse_line("NotABenchmark 1000 1234 ns/op").is_none());
        assert!(parse_line("BenchmarkBadCount abc 1234 ns/op").is_none());
    }

    #[test]
    fn test_bad_metric_value_leaves_metric_unmeasured() {
        let b = parse_line("BenchmarkOdd 1000 oops ns/op 98.45 MB/s").unwrap();
        assert_eq!(b.measured, MB_PER_S);
    }

    #[test]
    fn test_parse_skips_garbage_and_assigns_ord() {
        let input = "\
goos: linux
BenchmarkA 100 10 ns/op
some log line
BenchmarkB 100 20 ns/op
";
        let benchmarks = parse(input.as_bytes()).unwrap();
        assert_eq!(benchmarks.len(), 2);
        assert_eq!(benchmarks[0].name, "BenchmarkA");
        assert_eq!(benchmarks[0].ord, 0);
        assert_eq!(benchmarks[1].name, "BenchmarkB");
        assert_eq!(benchmarks[1].ord, 1);
    }

    #[test]
    fn test_parse_empty_input() {
        let benchmarks = parse(&b""[..]).unwrap();
        assert!(benchmarks.is_empty());
    }

    #[test]
    fn test_is_top_level() {
        let top = parse_line("BenchmarkA 100 10 ns/op").unwrap();
        let sub = parse_line("BenchmarkA/small 100 10 ns/op").unwrap();
        assert!(top.is_top_level());
        assert!(!sub.is_top_level());
    }
}
