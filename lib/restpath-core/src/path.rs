//! Resource paths built one segment at a time.

use std::fmt;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

/// Characters encoded inside a single path segment.
const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'?')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b'\\')
    .add(b'%');

/// One element of a resource path.
///
/// Built from a name or an integer index; integers are kept in their decimal
/// form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Segment(String);

impl Segment {
    /// Segment text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` for the empty segment.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Segment {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Segment {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for Segment {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl From<&String> for Segment {
    fn from(name: &String) -> Self {
        Self(name.clone())
    }
}

impl From<char> for Segment {
    fn from(name: char) -> Self {
        Self(name.to_string())
    }
}

macro_rules! segment_from_integer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Segment {
                fn from(index: $ty) -> Self {
                    Self(index.to_string())
                }
            }
        )*
    };
}

segment_from_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

/// Ordered sequence of non-empty segments.
///
/// Paths are values: [`Path::child`] returns a new path and leaves the
/// receiver untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    /// The empty path, rendered as `/`.
    #[must_use]
    pub const fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// A new path with `segment` appended.
    ///
    /// An empty segment leaves the path unchanged.
    #[must_use]
    pub fn child(&self, segment: impl Into<Segment>) -> Self {
        let segment = segment.into();
        if segment.is_empty() {
            return self.clone();
        }
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend(self.segments.iter().cloned());
        segments.push(segment);
        Self { segments }
    }

    /// The segments, in access order.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns `true` for the root path.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Iterate over the segments as string slices.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(Segment::as_str)
    }

    /// URL path: `/` followed by the percent-encoded segments joined by `/`.
    #[must_use]
    pub fn to_url_path(&self) -> String {
        let mut out = String::from("/");
        for (index, segment) in self.segments.iter().enumerate() {
            if index > 0 {
                out.push('/');
            }
            out.extend(utf8_percent_encode(segment.as_str(), PATH_SEGMENT_ENCODE_SET));
        }
        out
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_url_path())
    }
}

impl<S: Into<Segment>> FromIterator<S> for Path {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        iter.into_iter().fold(Self::root(), |path, segment| path.child(segment))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_from_integers() {
        assert_eq!(Segment::from(123).as_str(), "123");
        assert_eq!(Segment::from(-7_i64).as_str(), "-7");
        assert_eq!(Segment::from(42_usize).as_str(), "42");
        assert_eq!(Segment::from(u64::MAX).as_str(), "18446744073709551615");
    }

    #[test]
    fn root_renders_slash() {
        assert_eq!(Path::root().to_url_path(), "/");
        assert!(Path::root().is_empty());
    }

    #[test]
    fn child_does_not_touch_parent() {
        let people = Path::root().child("people");
        let one = people.child(1);
        let two = people.child(2);

        assert_eq!(people.to_url_path(), "/people");
        assert_eq!(one.to_url_path(), "/people/1");
        assert_eq!(two.to_url_path(), "/people/2");
    }

    #[test]
    fn empty_segment_is_ignored() {
        let path = Path::root().child("people").child("").child("phones");
        assert_eq!(path.len(), 2);
        assert_eq!(path.to_url_path(), "/people/phones");
    }

    #[test]
    fn segments_are_percent_encoded() {
        let path = Path::root().child("files").child("a b/c?d");
        assert_eq!(path.to_url_path(), "/files/a%20b%2Fc%3Fd");
    }

    #[test]
    fn collect_path() {
        let path: Path = ["people", "123", "phones"].into_iter().collect();
        assert_eq!(path.iter().collect::<Vec<_>>(), ["people", "123", "phones"]);
        assert_eq!(path.to_string(), "/people/123/phones");
    }
}
