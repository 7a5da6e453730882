pub mod stl;

/// Everything that can stop a conversion.
///
/// Malformed ASCII facets and degenerate geometry are not errors; they
/// degrade to fewer triangles or to fallback transforms.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// A caller-supplied option is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A binary STL declares more triangles than the buffer holds.
    #[error(
        "malformed binary STL: header declares {declared} triangles ({required} bytes), buffer has {actual} bytes"
    )]
    MalformedBinaryStl {
        declared: u32,
        required: usize,
        actual: usize,
    },
}

pub type Result<T> = std::result::Result<T, ConvertError>;
