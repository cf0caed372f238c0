//! Brute-force traveling salesman command.
//!
//! Reads city coordinates, one `x, y` pair per line, and prints the length
//! of the shortest closed tour visiting every city once. Exact search over
//! all `(n-1)!` orders with the first city fixed; only useful for the small
//! instances the exhaustive approach is meant for.

use crate::output::LineWriter;
use crate::scanner::{LineError, LineScanner, ReadPool, Result};
use rayon::prelude::*;
use std::io::{Read, Write};

/// TSP command configuration.
#[derive(Debug, Clone, Default)]
pub struct TspCommand;

impl TspCommand {
    pub fn new() -> Self {
        Self
    }

    /// Read cities from `input`, solve, and print the tour length with two
    /// decimal places.
    pub fn run<R: Read, W: Write>(&self, input: R, output: &mut W) -> Result<()> {
        let cities = read_cities(input)?;
        let best = shortest_tour(&cities);

        let mut writer = LineWriter::new(output);
        writer.write_float_2dp(best)?;
        writer.write_newline()?;
        writer.flush()?;
        Ok(())
    }
}

/// Parse `x, y` coordinate lines into city positions.
///
/// Input is drained line by line through the scanner; blank lines are
/// skipped, anything else must be two comma-separated floats.
pub fn read_cities<R: Read>(input: R) -> Result<Vec<[f32; 2]>> {
    let mut pool = ReadPool::new();
    let handle = pool.register(input);
    let mut scanner = LineScanner::new(pool);

    let mut cities = Vec::new();
    let mut line_no = 0usize;
    while let Some(line) = scanner.next_line(handle)? {
        line_no += 1;
        let text = std::str::from_utf8(&line).map_err(|_| LineError::Parse {
            line: line_no,
            message: "coordinates must be valid UTF-8".to_string(),
        })?;
        let text = text.trim();
        if text.is_empty() {
            continue;
        }
        cities.push(parse_city(text, line_no)?);
    }
    Ok(cities)
}

fn parse_city(text: &str, line_no: usize) -> Result<[f32; 2]> {
    let (x, y) = text.split_once(',').ok_or_else(|| LineError::Parse {
        line: line_no,
        message: format!("expected 'x, y', got '{}'", text),
    })?;
    let parse = |s: &str| -> Result<f32> {
        s.trim().parse().map_err(|_| LineError::Parse {
            line: line_no,
            message: format!("invalid coordinate '{}'", s.trim()),
        })
    };
    Ok([parse(x)?, parse(y)?])
}

/// Euclidean distance between two cities.
#[inline]
fn distance(a: [f32; 2], b: [f32; 2]) -> f32 {
    let dx = b[0] - a[0];
    let dy = b[1] - a[1];
    (dx * dx + dy * dy).sqrt()
}

/// Length of the shortest closed tour over `cities`.
///
/// City 0 is fixed as the start (a cycle's length does not depend on where
/// it begins), and the search fans out in parallel over the choice of the
/// second city; each branch then extends depth-first.
pub fn shortest_tour(cities: &[[f32; 2]]) -> f32 {
    let n = cities.len();
    if n <= 1 {
        return 0.0;
    }

    (1..n)
        .into_par_iter()
        .map(|second| {
            let mut visited = vec![false; n];
            visited[0] = true;
            visited[second] = true;
            extend(cities, &mut visited, second, distance(cities[0], cities[second]), 2)
        })
        .reduce(|| f32::INFINITY, f32::min)
}

/// Depth-first extension of a partial tour ending at `last` with `placed`
/// cities placed so far.
fn extend(cities: &[[f32; 2]], visited: &mut [bool], last: usize, dist: f32, placed: usize) -> f32 {
    let n = cities.len();
    if placed == n {
        return dist + distance(cities[last], cities[0]);
    }

    let mut best = f32::INFINITY;
    for next in 1..n {
        if !visited[next] {
            visited[next] = true;
            let total = extend(
                cities,
                visited,
                next,
                dist + distance(cities[last], cities[next]),
                placed + 1,
            );
            if total < best {
                best = total;
            }
            visited[next] = false;
        }
    }
    best
}
