//! 3×3 transformation matrix parsing
//!
//! The whole text must have the shape `[[f,f,f],[f,f,f],[f,f,f]]`. Whitespace
//! is allowed around every bracket, comma and number. A number token is any
//! run of characters other than `,`, `]` and space; it is read permissively,
//! so a token that is not a number becomes 0.

use super::number::float_or_zero;
use serde::{Deserialize, Serialize};

/// A 3×3 matrix, indexed `rows[row][column]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FMatrix3x3 {
    pub rows: [[f64; 3]; 3],
}

impl Default for FMatrix3x3 {
    fn default() -> Self {
        Self::identity()
    }
}

impl FMatrix3x3 {
    pub fn identity() -> Self {
        FMatrix3x3 {
            rows: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    /// Parse a matrix from setting text.
    ///
    /// Empty text is the identity. Text not matching the grammar is logged and
    /// also yields the identity.
    pub fn parse(text: &str) -> Self {
        if text.is_empty() {
            return Self::identity();
        }
        match MatrixScanner::new(text).matrix() {
            Some(rows) => FMatrix3x3 { rows },
            None => {
                log::warn!(
                    "Mesh transformation matrix could not be parsed! Format should be \
                     [[f,f,f], [f,f,f], [f,f,f]] allowing whitespace anywhere in between. \
                     While what was given was \"{}\".",
                    text
                );
                Self::identity()
            }
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    /// Multiply a column vector by this matrix.
    pub fn apply(&self, point: [f64; 3]) -> [f64; 3] {
        let mut result = [0.0; 3];
        for (out, row) in result.iter_mut().zip(self.rows.iter()) {
            *out = row[0] * point[0] + row[1] * point[1] + row[2] * point[2];
        }
        result
    }
}

/// Whitespace as matched by `\s`.
fn is_space(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

struct MatrixScanner<'t> {
    text: &'t str,
    pos: usize,
}

impl<'t> MatrixScanner<'t> {
    fn new(text: &'t str) -> Self {
        Self { text, pos: 0 }
    }

    fn bytes(&self) -> &'t [u8] {
        self.text.as_bytes()
    }

    fn skip_space(&mut self) {
        while self.pos < self.text.len() && is_space(self.bytes()[self.pos]) {
            self.pos += 1;
        }
    }

    /// Consume optional whitespace followed by `expected`.
    fn expect(&mut self, expected: u8) -> Option<()> {
        self.skip_space();
        if self.bytes().get(self.pos) == Some(&expected) {
            self.pos += 1;
            Some(())
        } else {
            None
        }
    }

    /// Consume optional whitespace and a (possibly empty) number token.
    fn number(&mut self) -> f64 {
        self.skip_space();
        let start = self.pos;
        while self.pos < self.text.len() && !matches!(self.bytes()[self.pos], b',' | b']' | b' ') {
            self.pos += 1;
        }
        // Delimiters are ASCII, so both ends sit on char boundaries.
        float_or_zero(&self.text[start..self.pos])
    }

    fn row(&mut self) -> Option<[f64; 3]> {
        self.expect(b'[')?;
        let a = self.number();
        self.expect(b',')?;
        let b = self.number();
        self.expect(b',')?;
        let c = self.number();
        self.expect(b']')?;
        Some([a, b, c])
    }

    fn matrix(mut self) -> Option<[[f64; 3]; 3]> {
        self.expect(b'[')?;
        let first = self.row()?;
        self.expect(b',')?;
        let second = self.row()?;
        self.expect(b',')?;
        let third = self.row()?;
        self.expect(b']')?;
        self.skip_space();
        if self.pos != self.text.len() {
            return None;
        }
        Some([first, second, third])
    }
}
