//! User-defined case folding.
//!
//! Folding is driven entirely by a user-supplied table of one-character
//! mappings, typically upper to lower case for some locale. This is not
//! Unicode case folding: the table is scanned in insertion order and the
//! first matching entry wins.

use crate::error::CatalogueError;

/// Ordered list of `from -> to` character mappings. Re-inserted characters
/// are appended but never consulted, only the first entry counts.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CaseFold {
    pairs: Vec<(char, char)>,
}

impl CaseFold {
    pub fn new() -> Self {
        CaseFold::default()
    }

    /// Parses `from:to` lines. Only the first character of each side is
    /// used; anything after it on the same side is ignored.
    pub fn parse(text: &str) -> Result<CaseFold, CatalogueError> {
        let mut fold = CaseFold::new();
        for (nr, line) in text.lines().enumerate() {
            if line.is_empty() {
                continue;
            }
            let malformed = CatalogueError::MalformedCaseMap { line: nr + 1 };
            let Some((l, r)) = line.split_once(':') else {
                return Err(malformed);
            };
            match (l.chars().next(), r.chars().next()) {
                (Some(from), Some(to)) => fold.push(from, to),
                _ => return Err(malformed),
            }
        }
        Ok(fold)
    }

    pub fn push(&mut self, from: char, to: char) {
        self.pairs.push((from, to));
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn fold_char(&self, c: char) -> char {
        self.pairs
            .iter()
            .find(|(from, _)| *from == c)
            .map_or(c, |(_, to)| *to)
    }

    /// Folds every character in place.
    pub fn fold(&self, s: &mut [char]) {
        for c in s {
            *c = self.fold_char(*c);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_entry_wins() {
        let mut fold = CaseFold::new();
        fold.push('A', 'a');
        fold.push('A', 'x');
        assert_eq!(fold.fold_char('A'), 'a');
        assert_eq!(fold.fold_char('B'), 'B');
    }

    #[test]
    fn parse_and_fold() {
        let fold = CaseFold::parse("A:a\nB:b\n\nÕ:õ\n").unwrap();
        assert_eq!(fold.len(), 3);
        let mut s: Vec<char> = "ABcÕ".chars().collect();
        fold.fold(&mut s);
        assert_eq!(s, "abcõ".chars().collect::<Vec<char>>());
    }

    #[test]
    fn parse_uses_first_character_of_each_side() {
        let fold = CaseFold::parse("AB:ab").unwrap();
        assert_eq!(fold.fold_char('A'), 'a');
        assert_eq!(fold.fold_char('B'), 'B');
    }

    #[test]
    fn parse_rejects_bad_lines() {
        assert_eq!(
            CaseFold::parse("Aa"),
            Err(CatalogueError::MalformedCaseMap { line: 1 })
        );
        assert_eq!(
            CaseFold::parse("A:a\n:x"),
            Err(CatalogueError::MalformedCaseMap { line: 2 })
        );
    }
}
