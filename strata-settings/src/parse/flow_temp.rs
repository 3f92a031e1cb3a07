//! Flow/temperature curve parsing
//!
//! The curve is written as bracketed pairs, e.g. `[[3.5,200],[7.0,210]]`, but
//! the text is not required to be a well-formed list: every substring of the
//! form `[first,second]` is picked up, left to right. `first` may not contain
//! `,` or `[`; `second` may not contain `,` or `]`.

use super::number::leading_float;
use serde::{Deserialize, Serialize};

/// One control point of a flow/temperature curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlowTempPoint {
    /// Flow rate in mm³/s
    pub flow: f64,
    /// Nozzle temperature in °C
    pub temperature: f64,
}

/// Ordered flow/temperature control points, in the order they appear in the text
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FlowTempGraph {
    pub data: Vec<FlowTempPoint>,
}

impl FlowTempGraph {
    /// Parse the curve held by setting `key`.
    ///
    /// Pairs whose numbers cannot be read are dropped with a warning; scanning
    /// continues after them.
    pub fn parse(text: &str, key: &str) -> Self {
        let mut graph = FlowTempGraph::default();
        let mut pos = 0;
        while let Some(pair) = next_pair(text, pos) {
            pos = pair.end;
            match (leading_float(pair.first), leading_float(pair.second)) {
                (Some(flow), Some(temperature)) => {
                    graph.data.push(FlowTempPoint { flow, temperature });
                }
                _ => {
                    log::warn!(
                        "Couldn't read 2D graph element [{},{}] in setting '{}'. Ignored.",
                        pair.first,
                        pair.second,
                        key
                    );
                }
            }
        }
        graph
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Temperature to print at for the given flow.
    ///
    /// Falls back to `default_temperature` when flow-dependent temperature is
    /// off or the curve is empty. Between control points the temperature is
    /// interpolated linearly; outside the curve the nearest end point is used.
    pub fn temperature_at(
        &self,
        flow: f64,
        default_temperature: f64,
        flow_dependent: bool,
    ) -> f64 {
        let (first, last) = match (self.data.first(), self.data.last()) {
            (Some(first), Some(last)) if flow_dependent => (first, last),
            _ => return default_temperature,
        };
        if self.data.len() == 1 {
            return first.temperature;
        }
        if flow < first.flow {
            log::warn!("Flow {} is below the flow/temperature curve", flow);
            return first.temperature;
        }

        for window in self.data.windows(2) {
            let (low, high) = (&window[0], &window[1]);
            if high.flow >= flow {
                return low.temperature
                    + (high.temperature - low.temperature) * (flow - low.flow)
                        / (high.flow - low.flow);
            }
        }

        log::warn!("Flow {} is above the flow/temperature curve", flow);
        last.temperature
    }
}

struct RawPair<'t> {
    first: &'t str,
    second: &'t str,
    /// Byte offset just past the closing bracket
    end: usize,
}

/// Find the leftmost `[first,second]` substring starting at or after `from`.
fn next_pair(text: &str, from: usize) -> Option<RawPair<'_>> {
    let bytes = text.as_bytes();
    let mut open = from;
    while open < bytes.len() {
        if bytes[open] != b'[' {
            open += 1;
            continue;
        }

        let first_start = open + 1;
        let comma = scan_until(bytes, first_start, b',', b'[');
        if bytes.get(comma) == Some(&b',') {
            let second_start = comma + 1;
            let close = scan_until(bytes, second_start, b',', b']');
            if bytes.get(close) == Some(&b']') {
                return Some(RawPair {
                    first: &text[first_start..comma],
                    second: &text[second_start..close],
                    end: close + 1,
                });
            }
        }
        open += 1;
    }
    None
}

/// Index of the first `a` or `b` at or after `pos`, or `bytes.len()`.
fn scan_until(bytes: &[u8], mut pos: usize, a: u8, b: u8) -> usize {
    while pos < bytes.len() && bytes[pos] != a && bytes[pos] != b {
        pos += 1;
    }
    pos
}
