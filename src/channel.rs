//! Channels and channel filtering
//!
//! A channel is a short tag naming the subsystem that produced a message.
//! The channel filter holds a list of patterns; any channel matching one of
//! them is suppressed regardless of level.
//!
//! # Pattern syntax
//!
//! The filter spec is split on `,`, `;` and whitespace. Empty tokens are
//! ignored. Each token matches the whole channel name, case-sensitively:
//! - `*` matches any run of characters, including none
//! - `?` matches exactly one byte (channel names are expected to be ASCII)
//! - anything else matches itself
//!
//! `"GPU,CDROM"` suppresses exactly those two channels, `"Pad*"` suppresses
//! `Pad`, `PadA` and `PadMultitap`, `""` suppresses nothing.

use std::fmt;

/// Call-site channel tag
///
/// Construct once per module as a constant and pass it to the logging macros:
///
/// ```
/// use chanlog::{warning_log, Channel};
///
/// const LOG: Channel = Channel::new("CDROM");
///
/// fn seek(lba: u32) {
///     warning_log!(LOG, "seek to {} out of range", lba);
/// }
/// # seek(3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Channel(&'static str);

impl Channel {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    #[inline]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl AsRef<str> for Channel {
    #[inline]
    fn as_ref(&self) -> &str {
        self.0
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// One token of a filter spec
#[derive(Debug, Clone, PartialEq, Eq)]
enum ChannelPattern {
    Exact(String),
    Glob(String),
}

impl ChannelPattern {
    fn parse(token: &str) -> Self {
        if token.contains(['*', '?']) {
            ChannelPattern::Glob(token.to_string())
        } else {
            ChannelPattern::Exact(token.to_string())
        }
    }

    fn matches(&self, channel: &str) -> bool {
        match self {
            ChannelPattern::Exact(name) => name == channel,
            ChannelPattern::Glob(pattern) => glob_match(pattern.as_bytes(), channel.as_bytes()),
        }
    }
}

/// Parsed channel filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelFilter {
    spec: String,
    patterns: Vec<ChannelPattern>,
}

impl ChannelFilter {
    /// Filter that suppresses nothing
    pub const fn empty() -> Self {
        Self {
            spec: String::new(),
            patterns: Vec::new(),
        }
    }

    /// Parse a filter spec (see module docs for the syntax)
    pub fn parse(spec: &str) -> Self {
        let patterns = spec
            .split(|c: char| c == ',' || c == ';' || c.is_whitespace())
            .filter(|token| !token.is_empty())
            .map(ChannelPattern::parse)
            .collect();

        Self {
            spec: spec.to_string(),
            patterns,
        }
    }

    /// The spec string this filter was parsed from
    pub fn spec(&self) -> &str {
        &self.spec
    }

    /// True when no channel can be suppressed
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Check if messages from `channel` must be dropped
    pub fn is_suppressed(&self, channel: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(channel))
    }
}

/// Whole-string wildcard match with `*` and `?`
///
/// Greedy with single-point backtracking on the last `*`, so it runs in
/// O(pattern * text) worst case without recursion.
fn glob_match(pattern: &[u8], text: &[u8]) -> bool {
    let (mut p, mut t) = (0usize, 0usize);
    let mut star: Option<usize> = None;
    let mut star_t = 0usize;

    while t < text.len() {
        match pattern.get(p) {
            Some(b'*') => {
                star = Some(p);
                star_t = t;
                p += 1;
            }
            Some(&c) if c == b'?' || c == text[t] => {
                p += 1;
                t += 1;
            }
            _ => match star {
                Some(s) => {
                    p = s + 1;
                    star_t += 1;
                    t = star_t;
                }
                None => return false,
            },
        }
    }

    pattern[p..].iter().all(|&c| c == b'*')
}
