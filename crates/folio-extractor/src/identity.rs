//! Investor name and PAN extraction
//!
//! Statements print the investor as `NAME [PAN]`. Text extraction does not
//! always keep that on its own line, and some layouts only carry a
//! `PAN: XXXXX9999X` line under the name, so several strategies are tried in
//! order and the first hit wins.

use folio_domain::is_valid_pan;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

// The code is ASCII alphanumerics only; `\w` would also admit `_` and
// non-ASCII letters, which never form a valid PAN.
static ANCHORED_IDENTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*(.+) \[([A-Za-z0-9]{10})\]$").expect("valid anchored identity regex")
});

static INLINE_IDENTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(.+) \[([A-Za-z0-9]{10})\]").expect("valid inline identity regex")
});

const PAN_LABEL: &str = "PAN:";

/// Investor name and PAN; both empty when nothing was found
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    /// Investor name
    pub name: String,

    /// PAN
    pub pan: String,
}

impl Identity {
    fn new(name: &str, pan: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            pan: pan.to_string(),
        }
    }

    /// True when neither name nor PAN was found
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.pan.is_empty()
    }
}

/// One way of finding the investor identity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityStrategy {
    /// `NAME [PAN]` alone on a line
    AnchoredLine,
    /// `NAME [PAN]` anywhere, for text whose line breaks were lost
    Inline,
    /// A `PAN:` line with the name on the line above
    PanLabel,
}

impl IdentityStrategy {
    /// Strategies used by [`extract_identity`]
    pub const BRACKETED: [IdentityStrategy; 2] =
        [IdentityStrategy::AnchoredLine, IdentityStrategy::Inline];

    /// Every strategy, in precedence order
    pub const ALL: [IdentityStrategy; 3] = [
        IdentityStrategy::AnchoredLine,
        IdentityStrategy::Inline,
        IdentityStrategy::PanLabel,
    ];

    /// Run this strategy alone
    pub fn apply(&self, text: &str) -> Option<Identity> {
        match self {
            IdentityStrategy::AnchoredLine => bracketed(&ANCHORED_IDENTITY_RE, text),
            IdentityStrategy::Inline => bracketed(&INLINE_IDENTITY_RE, text),
            IdentityStrategy::PanLabel => pan_label_identity(text),
        }
    }
}

fn bracketed(re: &Regex, text: &str) -> Option<Identity> {
    let caps = re.captures(text)?;
    Some(Identity::new(&caps[1], &caps[2]))
}

/// Try strategies in order; the first one that finds anything wins
pub fn resolve_identity(text: &str, strategies: &[IdentityStrategy]) -> Identity {
    for strategy in strategies {
        if let Some(identity) = strategy.apply(text) {
            debug!("Identity resolved by {:?}", strategy);
            return identity;
        }
    }
    Identity::default()
}

/// Find `NAME [PAN]`, first as a whole line, then anywhere in the text
///
/// # Examples
///
/// ```
/// use folio_extractor::extract_identity;
///
/// let identity = extract_identity("Statement\nJOHN SMITH [ABCDE1234F]\n");
/// assert_eq!(identity.name, "JOHN SMITH");
/// assert_eq!(identity.pan, "ABCDE1234F");
/// ```
pub fn extract_identity(text: &str) -> Identity {
    resolve_identity(text, &IdentityStrategy::BRACKETED)
}

/// Read the first `PAN:` line and take the name from the line above it
///
/// The line above is used even when blank. A remainder that is not a valid
/// PAN gives no identity at all.
pub fn pan_label_identity(text: &str) -> Option<Identity> {
    let lines: Vec<&str> = text.split('\n').collect();
    let (idx, line) = lines
        .iter()
        .enumerate()
        .map(|(idx, line)| (idx, line.trim()))
        .find(|(_, line)| !line.is_empty() && line.contains(PAN_LABEL))?;

    let remainder = match line.strip_prefix(PAN_LABEL) {
        Some(rest) => rest,
        None => line.split_once(PAN_LABEL).map(|(_, rest)| rest)?,
    };
    let pan = remainder.trim();
    if !is_valid_pan(pan) {
        debug!("Ignoring malformed PAN label value '{}'", pan);
        return None;
    }

    let name = if idx > 0 { lines[idx - 1] } else { "" };
    Some(Identity::new(name, pan))
}
