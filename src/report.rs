//! Tab-aligned rendering of comparison results.
//!
//! Four independently-headered tables, one per metric. A table's header
//! only appears when at least one row survives filtering, and every
//! table past the first is preceded by a blank line.

use std::io::{self, Write};

use crate::compare::{BenchCmp, Delta, by_delta, by_parse_order};
use crate::parse::{ALLOCED_BYTES_PER_OP, ALLOCS_PER_OP, MB_PER_S, NS_PER_OP};

/// Spaces between aligned columns.
const PADDING: usize = 5;

/// Rendering options. Immutable for the run; one-shot tool, no
/// process-wide state.
#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    /// Show only rows whose metric changed.
    pub changed_only: bool,
    /// Sort each table by magnitude of change in its own metric instead
    /// of parse order.
    pub mag_sort: bool,
}

/// Writes the full comparison report.
///
/// The slice is re-sorted in place: once by parse order, or per table by
/// that table's metric when [`Options::mag_sort`] is set.
///
/// # Errors
///
/// Propagates write failures on `w`.
pub fn write_report<W: Write>(
    w: &mut W,
    cmps: &mut [BenchCmp<'_>],
    opts: &Options,
) -> io::Result<()> {
    if opts.mag_sort {
        by_delta(cmps, BenchCmp::delta_ns_per_op);
    } else {
        by_parse_order(cmps);
    }
    section(
        w,
        cmps,
        opts,
        NS_PER_OP,
        ["benchmark", "old ns/op", "new ns/op", "delta"],
        false,
        BenchCmp::delta_ns_per_op,
        |c| (format_ns(c.before.ns_per_op), format_ns(c.after.ns_per_op)),
        Delta::percent,
    )?;

    if opts.mag_sort {
        by_delta(cmps, BenchCmp::delta_mb_per_s);
    }
    section(
        w,
        cmps,
        opts,
        MB_PER_S,
        ["benchmark", "old MB/s", "new MB/s", "speedup"],
        true,
        BenchCmp::delta_mb_per_s,
        |c| {
            (
                format!("{:.2}", c.before.mb_per_s),
                format!("{:.2}", c.after.mb_per_s),
            )
        },
        Delta::multiple,
    )?;

    if opts.mag_sort {
        by_delta(cmps, BenchCmp::delta_allocs_per_op);
    }
    section(
        w,
        cmps,
        opts,
        ALLOCS_PER_OP,
        ["benchmark", "old allocs", "new allocs", "delta"],
        true,
        BenchCmp::delta_allocs_per_op,
        |c| {
            (
                c.before.allocs_per_op.to_string(),
                c.after.allocs_per_op.to_string(),
            )
        },
        Delta::percent,
    )?;

    if opts.mag_sort {
        by_delta(cmps, BenchCmp::delta_alloced_bytes_per_op);
    }
    section(
        w,
        cmps,
        opts,
        ALLOCED_BYTES_PER_OP,
        ["benchmark", "old bytes", "new bytes", "delta"],
        true,
        BenchCmp::delta_alloced_bytes_per_op,
        |c| {
            (
                c.before.alloced_bytes_per_op.to_string(),
                c.after.alloced_bytes_per_op.to_string(),
            )
        },
        Delta::percent,
    )
}

/// Renders one metric table. Rows are pairs that measured the metric on
/// both sides and, under `changed_only`, actually changed.
#[allow(clippy::too_many_arguments)]
fn section<'a, W, M, V, D>(
    w: &mut W,
    cmps: &[BenchCmp<'a>],
    opts: &Options,
    flag: u8,
    header: [&str; 4],
    leading_blank: bool,
    metric: M,
    values: V,
    delta_fmt: D,
) -> io::Result<()>
where
    W: Write,
    M: Fn(&BenchCmp<'a>) -> Delta,
    V: Fn(&BenchCmp<'a>) -> (String, String),
    D: Fn(&Delta) -> String,
{
    let mut tab = Tab::default();
    tab.row(header.map(String::from));

    for cmp in cmps {
        if !cmp.measured(flag) {
            continue;
        }
        let delta = metric(cmp);
        if opts.changed_only && !delta.changed() {
            continue;
        }
        let (old, new) = values(cmp);
        tab.row([cmp.name().to_string(), old, new, delta_fmt(&delta)]);
    }

    // Header only; nothing measured this metric.
    if tab.rows.len() == 1 {
        return Ok(());
    }
    if leading_blank {
        writeln!(w)?;
    }
    tab.flush(w)
}

/// Buffers rows and writes them with columns left-aligned to the widest
/// cell plus padding. The last column is written as-is.
#[derive(Default)]
struct Tab {
    rows: Vec<[String; 4]>,
}

impl Tab {
    fn row(&mut self, cells: [String; 4]) {
        self.rows.push(cells);
    }

    fn flush<W: Write>(&self, w: &mut W) -> io::Result<()> {
        // Width in chars, not bytes; formatter padding counts chars and
        // benchmark names are not guaranteed ASCII.
        let mut widths = [0usize; 3];
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row.iter()) {
                *width = (*width).max(cell.chars().count());
            }
        }
        for row in &self.rows {
            for (width, cell) in widths.iter().zip(row.iter()) {
                write!(w, "{:<1$}", cell, width + PADDING)?;
            }
            writeln!(w, "{}", row[3])?;
        }
        Ok(())
    }
}

/// Formats a ns measurement to expose a useful amount of precision,
/// mirroring conventional benchmark-timer display: two decimals below
/// 10, one below 100, none from 100 up.
pub fn format_ns(ns: f64) -> String {
    let prec = if ns < 10.0 {
        2
    } else if ns < 100.0 {
        1
    } else {
        0
    };
    format!("{ns:.prec$}")
}
