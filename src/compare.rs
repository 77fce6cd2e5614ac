//! Correlation of before/after benchmark runs and delta math.
//!
//! Both runs live in the same report, distinguished only by name. Two
//! regular expressions select the candidate groups; [`correlate`] pairs
//! them up, either as a single top-level pair or as a set of
//! sub-benchmark pairs aligned by their post-`/` suffix.

use regex::Regex;

use crate::error::{BenchDiffError, Group, Result};
use crate::parse::Benchmark;

/// A before/after pair of benchmark records denoting the same benchmark
/// across two runs.
#[derive(Debug, Clone, Copy)]
pub struct BenchCmp<'a> {
    /// The baseline record.
    pub before: &'a Benchmark,
    /// The candidate record.
    pub after: &'a Benchmark,
}

impl<'a> BenchCmp<'a> {
    /// Name identifying the pair; the before record's name.
    pub fn name(&self) -> &'a str {
        &self.before.name
    }

    /// Returns true if both records measured all metrics in `flag`.
    pub fn measured(&self, flag: u8) -> bool {
        self.before.measured & self.after.measured & flag != 0
    }

    /// Delta over ns/op.
    pub fn delta_ns_per_op(&self) -> Delta {
        Delta {
            before: self.before.ns_per_op,
            after: self.after.ns_per_op,
        }
    }

    /// Delta over MB/s.
    pub fn delta_mb_per_s(&self) -> Delta {
        Delta {
            before: self.before.mb_per_s,
            after: self.after.mb_per_s,
        }
    }

    /// Delta over allocs/op.
    pub fn delta_allocs_per_op(&self) -> Delta {
        Delta {
            before: self.before.allocs_per_op as f64,
            after: self.after.allocs_per_op as f64,
        }
    }

    /// Delta over B/op.
    pub fn delta_alloced_bytes_per_op(&self) -> Delta {
        Delta {
            before: self.before.alloced_bytes_per_op as f64,
            after: self.after.alloced_bytes_per_op as f64,
        }
    }
}

/// Correlates benchmarks into before/after pairs.
///
/// A record joins the before group iff `before` matches anywhere in its
/// name, and independently the after group for `after`. Single-member
/// groups pair directly. Multi-member groups must consist solely of
/// sub-benchmarks; each before record then pairs with the after record(s)
/// whose name contains its post-`/` suffix. Pairs come out in scan order;
/// no sorting happens here.
///
/// # Errors
///
/// - [`BenchDiffError::BadPattern`] if a pattern fails to compile.
/// - [`BenchDiffError::GroupNotFound`] if a pattern matches nothing.
/// - [`BenchDiffError::GroupAmbiguous`] if a group has several members
///   including a top-level one.
/// - [`BenchDiffError::AlignmentMismatch`] if the groups differ in size
///   or suffix pairing does not yield exactly one pair per before record.
pub fn correlate<'a>(
    benchmarks: &'a [Benchmark],
    before: &str,
    after: &str,
) -> Result<Vec<BenchCmp<'a>>> {
    let before_re = Regex::new(before)?;
    let after_re = Regex::new(after)?;

    let mut before_list: Vec<&Benchmark> = Vec::new();
    let mut before_has_top = false;
    let mut after_list: Vec<&Benchmark> = Vec::new();
    let mut after_has_top = false;

    for b in benchmarks {
        if before_re.is_match(&b.name) {
            before_list.push(b);
            before_has_top |= b.is_top_level();
        }
        if after_re.is_match(&b.name) {
            after_list.push(b);
            after_has_top |= b.is_top_level();
        }
    }

    if before_list.is_empty() {
        return Err(BenchDiffError::GroupNotFound(Group::Before));
    }
    if after_list.is_empty() {
        return Err(BenchDiffError::GroupNotFound(Group::After));
    }
    if before_list.len() > 1 && before_has_top {
        return Err(BenchDiffError::GroupAmbiguous {
            group: Group::Before,
            candidates: names(&before_list),
        });
    }
    if after_list.len() > 1 && after_has_top {
        return Err(BenchDiffError::GroupAmbiguous {
            group: Group::After,
            candidates: names(&after_list),
        });
    }
    if before_list.len() != after_list.len() {
        return Err(BenchDiffError::AlignmentMismatch {
            before: names(&before_list),
            after: names(&after_list),
        });
    }

    if before_list.len() == 1 {
        return Ok(vec![BenchCmp {
            before: before_list[0],
            after: after_list[0],
        }]);
    }

    // Sub-benchmark groups: align on the suffix after the first `/`.
    // Containment, not equality, so a before record may pair more than
    // once; the count check below catches any over- or under-match.
    let mut cmps = Vec::with_capacity(before_list.len());
    for &b in &before_list {
        if let Some((_, suffix)) = b.name.split_once('/') {
            for &a in &after_list {
                if a.name.contains(suffix) {
                    cmps.push(BenchCmp { before: b, after: a });
                }
            }
        }
    }

    if cmps.len() != before_list.len() {
        return Err(BenchDiffError::AlignmentMismatch {
            before: names(&before_list),
            after: names(&after_list),
        });
    }

    Ok(cmps)
}

fn names(list: &[&Benchmark]) -> Vec<String> {
    list.iter().map(|b| b.name.clone()).collect()
}

/// The before and after value for one benchmark measurement. Both must
/// be non-negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Delta {
    /// Baseline reading.
    pub before: f64,
    /// Candidate reading.
    pub after: f64,
}

impl Delta {
    /// Reports whether the two readings differ.
    pub fn changed(&self) -> bool {
        self.before != self.after
    }

    /// Returns after / before. If before is 0, the ratio is 1 when
    /// after is also 0, and +inf otherwise.
    pub fn ratio(&self) -> f64 {
        if self.before != 0.0 {
            self.after / self.before
        } else if self.after == 0.0 {
            1.0
        } else {
            f64::INFINITY
        }
    }

    /// Magnitude of the change regardless of direction. Intended for
    /// sorting only; it has no independent meaning.
    pub fn magnitude(&self) -> f64 {
        match (self.before != 0.0, self.after != 0.0) {
            (true, true) if self.before >= self.after => self.after / self.before,
            (true, true) => self.before / self.after,
            (false, false) => 1.0,
            // A value appearing from or vanishing to nothing is worth
            // surfacing as maximally significant.
            _ => f64::INFINITY,
        }
    }

    /// Formats the delta as a percent change, ranging from -100% up.
    pub fn percent(&self) -> String {
        format!("{:+.2}%", 100.0 * self.ratio() - 100.0)
    }

    /// Formats the delta as a multiplier, ranging from 0.00x up.
    pub fn multiple(&self) -> String {
        format!("{:.2}x", self.ratio())
    }
}

/// Sorts pairs to match the order in which the before records were
/// parsed. This is the default output order.
pub fn by_parse_order(cmps: &mut [BenchCmp<'_>]) {
    cmps.sort_by_key(|c| c.before.ord);
}

/// Sorts pairs by magnitude of change in the extracted metric,
/// descending, with ties broken alphabetically by name. One routine
/// serves all four metrics via the extractor.
pub fn by_delta<'a, F>(cmps: &mut [BenchCmp<'a>], metric: F)
where
    F: Fn(&BenchCmp<'a>) -> Delta,
{
    cmps.sort_by(|a, b| {
        let (ma, mb) = (metric(a).magnitude(), metric(b).magnitude());
        mb.total_cmp(&ma).then_with(|| a.name().cmp(b.name()))
    });
}
