//! STL decoding, ASCII and binary.
//!
//! The encoding is guessed from the first bytes of the buffer (see [`classify`]),
//! then the matching parser turns the buffer into a flat list of triangles in
//! file order. ASCII input is parsed leniently: broken facets are dropped, never
//! reported. Binary input is parsed strictly against its declared triangle count.

use crate::enums::{Detection, NonFinitePolicy, StlEncoding};
use crate::float_types::Real;
use crate::io::{ConvertError, Result};
use log::{debug, warn};
use nalgebra::Point3;

/// Three corners, in file order.
pub type Triangle = [Point3<Real>; 3];

/// Bytes of the binary header preceding the triangle count.
const HEADER_LEN: usize = 80;
/// Header plus the little-endian `u32` triangle count.
const PREAMBLE_LEN: usize = HEADER_LEN + 4;
/// normal (12) + 3 corners (36) + attribute (2)
const RECORD_LEN: usize = 50;
/// How much of the buffer the text sniffer looks at.
const SNIFF_LEN: usize = 512;

pub const ASCII_NON_FINITE: NonFinitePolicy = NonFinitePolicy::SkipVertex;
pub const BINARY_NON_FINITE: NonFinitePolicy = NonFinitePolicy::Keep;

/// Triangles decoded from one buffer, plus how the encoding was chosen.
#[derive(Debug, Clone)]
pub struct DecodedStl {
    pub detection: Detection,
    pub triangles: Vec<Triangle>,
}

impl DecodedStl {
    pub fn encoding(&self) -> StlEncoding {
        self.detection.encoding()
    }
}

/// Decode an STL buffer of either encoding.
///
/// Empty or fully malformed ASCII input yields zero triangles. A binary buffer
/// shorter than its header claims is a [`ConvertError::MalformedBinaryStl`].
pub fn decode(data: &[u8]) -> Result<DecodedStl> {
    let detection = classify(data);
    if !detection.is_confident() && !data.is_empty() {
        warn!(
            "could not identify STL encoding with confidence ({detection:?}), assuming {}",
            detection.encoding()
        );
    }

    let triangles = match detection.encoding() {
        StlEncoding::Ascii => parse_ascii(&String::from_utf8_lossy(data)),
        StlEncoding::Binary => parse_binary(data)?,
    };
    debug!(
        "decoded {} triangles from {} STL ({} bytes)",
        triangles.len(),
        detection.encoding(),
        data.len()
    );

    Ok(DecodedStl { detection, triangles })
}

/// Decide how a buffer should be parsed.
///
/// Rules, in order:
/// 1. the first 512 bytes start with the token `solid` and contain the token
///    `facet` (both case-insensitive): ASCII;
/// 2. fewer than 84 bytes: ASCII, since no binary header fits;
/// 3. `84 + 50 * count` equals the buffer length: binary;
/// 4. otherwise binary.
pub fn classify(data: &[u8]) -> Detection {
    if looks_ascii(data) {
        return Detection::AsciiHeader;
    }
    match declared_count(data) {
        None => Detection::ShortBuffer,
        Some(count) if required_len(count) == data.len() => Detection::BinarySize,
        Some(_) => Detection::BinaryFallback,
    }
}

/// Text sniff over the first [`SNIFF_LEN`] bytes.
pub fn looks_ascii(data: &[u8]) -> bool {
    let window = String::from_utf8_lossy(&data[..data.len().min(SNIFF_LEN)]).to_ascii_lowercase();
    let head = window.trim_start();

    head.starts_with("solid") && is_boundary(head.as_bytes(), "solid".len()) && contains_token(&window, "facet")
}

/// The triangle count stored at byte offset 80, if the buffer is long enough.
pub fn declared_count(data: &[u8]) -> Option<u32> {
    let bytes = data.get(HEADER_LEN..PREAMBLE_LEN)?;
    Some(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

/// Byte length of a binary STL holding `count` triangles.
pub fn required_len(count: u32) -> usize {
    (count as usize).saturating_mul(RECORD_LEN).saturating_add(PREAMBLE_LEN)
}

/// Parse ASCII STL text.
///
/// A facet is `facet normal ...`, `outer loop`, up to three `vertex x y z` lines,
/// then `endloop` and `endfacet`. Only facets with exactly three usable vertex
/// lines become triangles; vertex lines with unparsable or non-finite numbers are
/// skipped (see [`ASCII_NON_FINITE`]).
pub fn parse_ascii(text: &str) -> Vec<Triangle> {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let lines: Vec<&str> = normalized.split('\n').map(str::trim).collect();

    let mut triangles = Vec::new();
    let mut skipped_vertices = 0usize;
    let mut dropped_facets = 0usize;
    let mut i = 0;

    while i < lines.len() {
        if !has_keywords(lines[i], &["facet", "normal"]) {
            i += 1;
            continue;
        }
        i += 1;

        // Without `outer loop` there is no facet body; rescan from this line.
        if i >= lines.len() || !has_keywords(lines[i], &["outer", "loop"]) {
            dropped_facets += 1;
            continue;
        }
        i += 1;

        let mut corners = Vec::with_capacity(3);
        for _ in 0..3 {
            let Some(line) = lines.get(i) else { break };
            if has_keywords(line, &["endloop"]) || has_keywords(line, &["facet"]) {
                break;
            }
            i += 1;

            match parse_vertex(line, ASCII_NON_FINITE) {
                VertexLine::Point(p) => corners.push(p),
                VertexLine::Rejected => skipped_vertices += 1,
                VertexLine::NotVertex => {}
            }
        }

        if lines.get(i).is_some_and(|l| has_keywords(l, &["endloop"])) {
            i += 1;
            if lines.get(i).is_some_and(|l| has_keywords(l, &["endfacet"])) {
                i += 1;
            }
        }

        match corners[..] {
            [a, b, c] => triangles.push([a, b, c]),
            _ => dropped_facets += 1,
        }
    }

    if skipped_vertices > 0 || dropped_facets > 0 {
        warn!(
            "ASCII STL: skipped {skipped_vertices} unusable vertex lines, dropped {dropped_facets} incomplete facets"
        );
    }

    triangles
}

/// Parse a binary STL.
///
/// Exactly the declared number of 50-byte records is read, starting at byte 84.
/// Trailing bytes past the last record are ignored. Coordinates are kept even
/// when non-finite (see [`BINARY_NON_FINITE`]).
pub fn parse_binary(data: &[u8]) -> Result<Vec<Triangle>> {
    let Some(declared) = declared_count(data) else {
        return Err(ConvertError::MalformedBinaryStl {
            declared: 0,
            required: PREAMBLE_LEN,
            actual: data.len(),
        });
    };

    let required = required_len(declared);
    if data.len() < required {
        return Err(ConvertError::MalformedBinaryStl {
            declared,
            required,
            actual: data.len(),
        });
    }

    let mut non_finite = 0usize;
    let triangles: Vec<Triangle> = data[PREAMBLE_LEN..required]
        .chunks_exact(RECORD_LEN)
        .filter_map(|record| {
            // the first 12 bytes are the facet normal
            let corner = |k: usize| {
                let base = 12 + k * 12;
                Point3::new(
                    read_f32(record, base) as Real,
                    read_f32(record, base + 4) as Real,
                    read_f32(record, base + 8) as Real,
                )
            };
            let tri = [corner(0), corner(1), corner(2)];
            if tri.iter().all(|p| p.coords.iter().all(|c| c.is_finite())) {
                return Some(tri);
            }
            non_finite += 1;
            match BINARY_NON_FINITE {
                NonFinitePolicy::Keep => Some(tri),
                // a record cannot lose a single corner, so the whole facet goes
                NonFinitePolicy::SkipVertex => None,
            }
        })
        .collect();

    if non_finite > 0 {
        warn!(
            "binary STL: {non_finite} triangles carry non-finite coordinates ({:?})",
            BINARY_NON_FINITE
        );
    }

    Ok(triangles)
}

enum VertexLine {
    Point(Point3<Real>),
    /// A `vertex` line whose coordinates could not be used.
    Rejected,
    NotVertex,
}

fn parse_vertex(line: &str, policy: NonFinitePolicy) -> VertexLine {
    let mut parts = line.split_whitespace();
    if !parts.next().is_some_and(|t| t.eq_ignore_ascii_case("vertex")) {
        return VertexLine::NotVertex;
    }

    let mut coord = || {
        parts
            .next()
            .and_then(|s| s.parse::<Real>().ok())
            .filter(|c| policy == NonFinitePolicy::Keep || c.is_finite())
    };
    match (coord(), coord(), coord()) {
        (Some(x), Some(y), Some(z)) => VertexLine::Point(Point3::new(x, y, z)),
        _ => VertexLine::Rejected,
    }
}

/// `true` if the line's leading whitespace-separated tokens are `words`
/// (case-insensitive).
fn has_keywords(line: &str, words: &[&str]) -> bool {
    let mut tokens = line.split_whitespace();
    words
        .iter()
        .all(|w| tokens.next().is_some_and(|t| t.eq_ignore_ascii_case(w)))
}

/// `token` appears in `haystack` as a whole word. Both must be lowercase.
fn contains_token(haystack: &str, token: &str) -> bool {
    let bytes = haystack.as_bytes();
    haystack
        .match_indices(token)
        .any(|(at, _)| (at == 0 || !is_word_byte(bytes[at - 1])) && is_boundary(bytes, at + token.len()))
}

/// No word character at `at` (or `at` is the end).
fn is_boundary(bytes: &[u8], at: usize) -> bool {
    bytes.get(at).map_or(true, |&b| !is_word_byte(b))
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn read_f32(bytes: &[u8], offset: usize) -> f32 {
    f32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}
