use std::fmt;

/// Hex rendering of a MIDI payload for logs and error messages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Displayable<'a>(&'a [u8]);

impl<'a> From<&'a [u8]> for Displayable<'a> {
    fn from(payload: &'a [u8]) -> Self {
        Self(payload)
    }
}

impl<'a> fmt::Display for Displayable<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut iter = self.0.iter();

        match iter.next() {
            Some(first) => write!(f, "(hex): {first:02x}")?,
            None => return f.write_str("(empty)"),
        };

        for val in iter {
            write!(f, ", {val:02x}")?;
        }

        Ok(())
    }
}
