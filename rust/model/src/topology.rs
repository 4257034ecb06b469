// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Member topology-string parsing.
//!
//! A member encodes its boundary, voids, line inclusions and point inclusions
//! in a compact whitespace/parenthesis-delimited string, e.g.
//!
//! ```text
//! 7 8 9 A 10 11 7 V(12 13 A 14 15) L(16 A 18 17) 94 P 20 P(19 21 22) 84
//! ```
//!
//! Plain tokens are node ids forming the outline. `A` flags the segment
//! arriving at the next id as an arc. A marker letter immediately before an
//! opening parenthesis introduces a group: `V(...)` a void loop, `L(...)` an
//! inclusion-line chain, `P(...)` a group of inclusion points. A standalone
//! `P` followed by a single id is a one-point inclusion.

use crate::error::{Error, Result};

/// One scanned item of the member outline.
///
/// The outline is kept as a tagged sequence rather than two parallel arrays:
/// an arc flag contributes an item but no id, so id and marker projections
/// legitimately differ in length (see [`ParsedTopology::outline_ids`] and
/// [`ParsedTopology::outline_markers`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OutlineItem {
    /// A node id.
    Vertex(u32),
    /// An `A` flag: the segment arriving at the next vertex is an arc.
    ArcFlag,
}

/// A resolved id chain with per-vertex arc flags, equal-length parallel.
///
/// `arcs[i]` is true when the segment arriving at `ids[i]` should be rendered
/// as an arc rather than a straight chord.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TopoChain {
    /// Node ids in chain order.
    pub ids: Vec<u32>,
    /// Arc flag per id, same length as `ids`.
    pub arcs: Vec<bool>,
}

impl TopoChain {
    /// Number of vertices in the chain.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// True if the chain has no vertices.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Structured decoding of a member topology string.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParsedTopology {
    /// Outline items in scan order (vertices and arc flags interleaved).
    pub outline: Vec<OutlineItem>,
    /// Void loops in encounter order.
    pub voids: Vec<TopoChain>,
    /// Inclusion-line chains in encounter order.
    pub inclusion_lines: Vec<TopoChain>,
    /// Inclusion-point ids: bracketed groups first, then standalone `P n`
    /// pairs, each in encounter order.
    pub inclusion_points: Vec<u32>,
}

impl ParsedTopology {
    /// True if nothing at all was decoded.
    pub fn is_empty(&self) -> bool {
        self.outline.is_empty()
            && self.voids.is_empty()
            && self.inclusion_lines.is_empty()
            && self.inclusion_points.is_empty()
    }

    /// Outline node ids, one per vertex item.
    pub fn outline_ids(&self) -> Vec<u32> {
        self.outline
            .iter()
            .filter_map(|item| match item {
                OutlineItem::Vertex(id) => Some(*id),
                OutlineItem::ArcFlag => None,
            })
            .collect()
    }

    /// Outline curve markers, one per scanned item: `' '` for a vertex,
    /// `'A'` for an arc flag.
    ///
    /// This sequence is longer than [`Self::outline_ids`] by exactly the
    /// number of arc flags; the two must never be zipped by index.
    pub fn outline_markers(&self) -> Vec<char> {
        self.outline
            .iter()
            .map(|item| match item {
                OutlineItem::Vertex(_) => ' ',
                OutlineItem::ArcFlag => 'A',
            })
            .collect()
    }

    /// Resolve the outline to an equal-length chain: each arc flag marks the
    /// next vertex. A trailing flag with no following vertex is dropped.
    pub fn outline_chain(&self) -> TopoChain {
        let mut chain = TopoChain::default();
        let mut pending_arc = false;
        for item in &self.outline {
            match item {
                OutlineItem::ArcFlag => pending_arc = true,
                OutlineItem::Vertex(id) => {
                    chain.ids.push(*id);
                    chain.arcs.push(std::mem::take(&mut pending_arc));
                }
            }
        }
        chain
    }
}

/// Parse a member topology string.
///
/// Input is case-insensitive. An empty (or all-whitespace) string yields an
/// empty [`ParsedTopology`]; any token that is neither a node id, an `A`
/// flag nor a group marker fails with [`Error::MalformedTopology`].
pub fn parse_topology(input: &str) -> Result<ParsedTopology> {
    let upper = input.to_ascii_uppercase();

    // Split on parentheses: plain text and bracketed group bodies alternate.
    // A plain segment ending in a marker letter owns the segment that follows.
    let segments: Vec<&str> = upper.split(['(', ')']).collect();
    let mut plain = String::new();
    let mut void_bodies: Vec<&str> = Vec::new();
    let mut line_bodies: Vec<&str> = Vec::new();
    let mut point_bodies: Vec<&str> = Vec::new();

    let mut i = 0;
    while i < segments.len() {
        let segment = segments[i];
        let marker = segment
            .chars()
            .last()
            .filter(|c| matches!(c, 'V' | 'L' | 'P'));
        match (marker, segments.get(i + 1)) {
            (Some(m), Some(&body)) => {
                plain.push_str(&segment[..segment.len() - 1]);
                plain.push(' ');
                match m {
                    'V' => void_bodies.push(body),
                    'L' => line_bodies.push(body),
                    _ => point_bodies.push(body),
                }
                i += 2;
            }
            _ => {
                plain.push_str(segment);
                plain.push(' ');
                i += 1;
            }
        }
    }

    let mut parsed = ParsedTopology::default();

    for body in point_bodies {
        for token in body.split_whitespace() {
            parsed.inclusion_points.push(parse_id(token)?);
        }
    }

    // Extract standalone `P <id>` pairs with a read cursor, then scan what
    // remains into outline items.
    let tokens: Vec<&str> = plain.split_whitespace().collect();
    let mut k = 0;
    while k < tokens.len() {
        let token = tokens[k];
        if token == "P" {
            let id_token = tokens.get(k + 1).ok_or(Error::DanglingPointMarker)?;
            parsed.inclusion_points.push(parse_id(id_token)?);
            k += 2;
        } else if token == "A" {
            parsed.outline.push(OutlineItem::ArcFlag);
            k += 1;
        } else {
            parsed.outline.push(OutlineItem::Vertex(parse_id(token)?));
            k += 1;
        }
    }

    for body in void_bodies {
        parsed.voids.push(parse_chain(body)?);
    }
    for body in line_bodies {
        parsed.inclusion_lines.push(parse_chain(body)?);
    }

    Ok(parsed)
}

/// Scan a void/inclusion-line group body into a resolved chain.
///
/// An `A` token flags the next id as arc-reached. The read cursor never
/// mutates the token stream it walks, so a flag next to the end of a group
/// cannot shift ids out of the scan.
fn parse_chain(body: &str) -> Result<TopoChain> {
    let mut chain = TopoChain::default();
    let mut pending_arc = false;
    for token in body.split_whitespace() {
        if token == "A" {
            pending_arc = true;
        } else {
            chain.ids.push(parse_id(token)?);
            chain.arcs.push(std::mem::take(&mut pending_arc));
        }
    }
    Ok(chain)
}

fn parse_id(token: &str) -> Result<u32> {
    token.parse::<u32>().map_err(|_| Error::MalformedTopology {
        token: token.to_string(),
    })
}
