use std::fmt;
use std::str::FromStr;

use smallvec::SmallVec;

use crate::Error;

/// One step of a parsed path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Mapping lookup by field name.
    Field(String),
    /// Sequence lookup by position.
    Index(usize),
}

/// A parsed field path such as `spec.items[2].name`.
///
/// The grammar is dot-separated field names with optional `[n]` index
/// suffixes; a path may also begin with a bare index. Parsing rejects
/// malformed input up front so document access only ever sees valid paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    segments: SmallVec<[Segment; 8]>,
}

impl Path {
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

impl FromStr for Path {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        let syntax = |reason: &str| Error::Syntax {
            path: s.to_string(),
            reason: reason.to_string(),
        };
        if s.is_empty() {
            return Err(syntax("empty path"));
        }
        let mut segments: SmallVec<[Segment; 8]> = SmallVec::new();
        for part in s.split('.') {
            let bracket = part.find('[');
            let name = match bracket {
                Some(i) => &part[..i],
                None => part,
            };
            if name.contains(']') {
                return Err(syntax("']' without matching '['"));
            }
            if name.is_empty() && bracket.is_none() {
                return Err(syntax("empty segment"));
            }
            if !name.is_empty() {
                segments.push(Segment::Field(name.to_string()));
            }
            let mut rest = match bracket {
                Some(i) => &part[i..],
                None => "",
            };
            while !rest.is_empty() {
                if !rest.starts_with('[') {
                    return Err(syntax("unexpected characters after ']'"));
                }
                let close = match rest.find(']') {
                    Some(i) => i,
                    None => return Err(syntax("unbalanced '['")),
                };
                let digits = &rest[1..close];
                if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(syntax("index must be an unsigned integer"));
                }
                let idx = digits
                    .parse::<usize>()
                    .map_err(|_| syntax("index out of range"))?;
                segments.push(Segment::Index(idx));
                rest = &rest[close + 1..];
            }
        }
        Ok(Path { segments })
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, seg) in self.segments.iter().enumerate() {
            match seg {
                Segment::Field(name) => {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(name)?;
                }
                Segment::Index(idx) => write!(f, "[{idx}]")?,
            }
        }
        Ok(())
    }
}
