/// A cursor for character-by-character inline scanning.
///
/// Indexes are byte offsets into `s` and always sit on a char boundary:
/// [`bump`](Self::bump) advances by a whole character and
/// [`bump_n`](Self::bump_n) is only called with lengths of ASCII delimiters
/// or of previously matched slices.
#[derive(Clone, Copy)]
pub(crate) struct Cursor<'a> {
    /// The string being scanned.
    pub s: &'a str,
    /// Current byte index into `s`.
    pub i: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    /// Unconsumed remainder.
    pub fn rest(&self) -> &'a str {
        self.s.get(self.i..).unwrap_or("")
    }

    /// Peeks at the current character without advancing.
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Character immediately before the cursor.
    pub fn prev(&self) -> Option<char> {
        self.s.get(..self.i)?.chars().next_back()
    }

    /// Checks if the remainder starts with `pat`.
    pub fn starts_with(&self, pat: &str) -> bool {
        self.rest().starts_with(pat)
    }

    /// Advances by one character, returning it.
    pub fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.i += c.len_utf8();
        Some(c)
    }

    /// Advances by `n` bytes.
    pub fn bump_n(&mut self, n: usize) {
        self.i += n;
    }
}
