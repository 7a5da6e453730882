/// The two STL encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StlEncoding {
    Ascii,
    Binary,
}

impl std::fmt::Display for StlEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StlEncoding::Ascii => write!(f, "ASCII"),
            StlEncoding::Binary => write!(f, "binary"),
        }
    }
}

/// Which classification rule settled the encoding of a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detection {
    /// Header starts with `solid` and the window contains `facet`.
    AsciiHeader,
    /// `84 + 50 * count` equals the buffer length exactly.
    BinarySize,
    /// Text test failed and the size did not match; binary is assumed.
    BinaryFallback,
    /// Too short to hold a binary header; parsed as (probably empty) text.
    ShortBuffer,
}

impl Detection {
    pub fn encoding(self) -> StlEncoding {
        match self {
            Detection::AsciiHeader | Detection::ShortBuffer => StlEncoding::Ascii,
            Detection::BinarySize | Detection::BinaryFallback => StlEncoding::Binary,
        }
    }

    /// `false` when the encoding was picked by a fallback rule.
    pub fn is_confident(self) -> bool {
        matches!(self, Detection::AsciiHeader | Detection::BinarySize)
    }
}

/// What a decoder does with a vertex whose coordinates are NaN or infinite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NonFinitePolicy {
    /// Drop the vertex line; the facet then usually fails the 3-vertex check.
    SkipVertex,
    /// Keep the value as read.
    Keep,
}
