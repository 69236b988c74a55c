use crate::artifacts::branch::branch_record::{BranchRecord, Divergence, Tracking};
use crate::artifacts::branch::{AHEAD_KEYWORD, BEHIND_KEYWORD, GONE_KEYWORD};
use crate::errors::{OverviewError, OverviewResult};

/// Scanner for a single line of `git branch -vv` output.
///
/// The line is consumed left to right:
///
/// ```text
/// * main        abc1234 [origin/main: ahead 2, behind 1] subject
/// + feature     d34db33 (/path/to/worktree) [origin/feature] subject
///   (HEAD detached at abc1234) abc1234 subject
/// ```
///
/// Every field that git did not print stays `None`. A line that does not have
/// this shape yields `Ok(None)`; only a broken ahead/behind count is an error.
pub struct BranchLineParser<'l> {
    line: &'l str,
    rest: &'l str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    Active,
    OtherWorktree,
    Inactive,
}

impl<'l> BranchLineParser<'l> {
    pub fn parse(line: &'l str) -> OverviewResult<Option<BranchRecord>> {
        let line = line.trim_end_matches(['\n', '\r']);
        let mut parser = BranchLineParser { line, rest: line };
        parser.record()
    }

    fn record(&mut self) -> OverviewResult<Option<BranchRecord>> {
        let Some(marker) = self.marker() else {
            return Ok(None);
        };
        let Some(name) = self.name() else {
            return Ok(None);
        };
        let Some(commit_hash) = self.commit_hash() else {
            return Ok(None);
        };
        let worktree_path = match marker {
            Marker::OtherWorktree => self.worktree_path(),
            _ => None,
        };
        let tracking = self.tracking()?;

        Ok(Some(BranchRecord {
            name: name.to_string(),
            is_active: marker == Marker::Active,
            in_other_worktree: marker == Marker::OtherWorktree,
            commit_hash: commit_hash.to_string(),
            worktree_path: worktree_path.map(str::to_string),
            tracking,
        }))
    }

    fn marker(&mut self) -> Option<Marker> {
        let mut chars = self.rest.chars();
        let marker = match chars.next()? {
            '*' => Marker::Active,
            '+' => Marker::OtherWorktree,
            ' ' => Marker::Inactive,
            _ => return None,
        };
        if chars.next()? != ' ' {
            return None;
        }

        self.rest = &self.rest[2..];
        Some(marker)
    }

    fn name(&mut self) -> Option<&'l str> {
        let end = if self.rest.starts_with('(') {
            closing_paren(self.rest)? + 1
        } else {
            self.rest.find(' ')?
        };
        if end == 0 {
            return None;
        }

        let (name, rest) = self.rest.split_at(end);
        if !rest.starts_with(' ') {
            return None;
        }

        self.rest = rest.trim_start_matches(' ');
        Some(name)
    }

    fn commit_hash(&mut self) -> Option<&'l str> {
        let end = self
            .rest
            .find(|c: char| !c.is_ascii_hexdigit())
            .unwrap_or(self.rest.len());
        if end == 0 {
            return None;
        }

        let (hash, rest) = self.rest.split_at(end);
        self.rest = match rest.strip_prefix(' ') {
            Some(rest) => rest,
            None if rest.is_empty() => rest,
            None => return None,
        };
        Some(hash)
    }

    fn worktree_path(&mut self) -> Option<&'l str> {
        if !self.rest.starts_with('(') {
            return None;
        }

        let end = closing_paren(self.rest)?;
        let path = &self.rest[1..end];
        let rest = &self.rest[end + 1..];
        self.rest = rest.strip_prefix(' ').unwrap_or(rest);
        Some(path)
    }

    /// The bracketed clause after the hash, when it reads as one. Anything
    /// else in brackets belongs to the subject and leaves `rest` untouched.
    fn tracking(&mut self) -> OverviewResult<Option<Tracking>> {
        let Some(inner) = self.rest.strip_prefix('[') else {
            return Ok(None);
        };
        let Some(end) = inner.find(']') else {
            return Ok(None);
        };
        let after = &inner[end + 1..];
        if !(after.is_empty() || after.starts_with(' ')) {
            return Ok(None);
        }

        let clause = &inner[..end];
        let (upstream, status) = match clause.split_once(':') {
            Some((upstream, status)) => (upstream, Some(status)),
            None => (clause, None),
        };
        // multi-word brackets such as "[WIP fix]" are subject text
        if upstream.is_empty() || upstream.contains(char::is_whitespace) {
            return Ok(None);
        }

        let divergence = match status {
            None => Divergence::in_sync(),
            Some(status) => match self.divergence(status.trim_start())? {
                Some(divergence) => divergence,
                None => return Ok(None),
            },
        };

        self.rest = after.trim_start_matches(' ');
        Ok(Some(Tracking::new(upstream.to_string(), divergence)))
    }

    /// `gone`, or a comma-separated list of `ahead N` / `behind N`.
    ///
    /// The shape of every part is checked before any count is parsed, so
    /// "[feat: ahead of schedule]" is subject text while "[origin/x: ahead 2x]"
    /// is a broken count.
    fn divergence(&self, status: &str) -> OverviewResult<Option<Divergence>> {
        if status == GONE_KEYWORD {
            return Ok(Some(Divergence::Gone));
        }
        if status.is_empty() {
            return Ok(None);
        }

        let mut counts = Vec::new();
        for part in status.split(',').map(str::trim) {
            let (keyword, count) = part.split_once(' ').unwrap_or((part, ""));
            let field = match keyword {
                AHEAD_KEYWORD => AHEAD_KEYWORD,
                BEHIND_KEYWORD => BEHIND_KEYWORD,
                _ => return Ok(None),
            };
            if !looks_like_count(count) || counts.iter().any(|&(seen, _)| seen == field) {
                return Ok(None);
            }
            counts.push((field, count));
        }

        let mut ahead = None;
        let mut behind = None;
        for (field, count) in counts {
            let value = Some(self.count(field, count)?);
            if field == AHEAD_KEYWORD {
                ahead = value;
            } else {
                behind = value;
            }
        }

        Ok(Some(Divergence::Counts { ahead, behind }))
    }

    fn count(&self, field: &'static str, text: &str) -> OverviewResult<u32> {
        text.parse::<u32>()
            .map_err(|_| OverviewError::MalformedNumber {
                field,
                text: text.to_string(),
                line: self.line.to_string(),
            })
    }
}

/// A count git could have printed: nothing at all, or a single token
/// starting with a digit or a sign.
fn looks_like_count(text: &str) -> bool {
    text.is_empty()
        || (!text.contains(char::is_whitespace)
            && text.starts_with(|c: char| c.is_ascii_digit() || c == '-' || c == '+'))
}

/// Byte index of the parenthesis closing the one `text` starts with.
fn closing_paren(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (index, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(index);
                }
            }
            _ => {}
        }
    }

    None
}
