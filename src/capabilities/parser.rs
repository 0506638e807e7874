// SPDX-License-Identifier: GPL-3.0-only
//! Capability string scanner
//!
//! A capability string looks like
//! `(prot(monitor)type(lcd)model(X)cmds(01 02 03)vcp(02 04 10(00-64) 12 60(0F 11))mccs_ver(2.1))`.
//! Only the top level of the `vcp(...)` list matters here: nested groups carry
//! per-code metadata and are skipped without being interpreted.

use super::FeatureSupport;
use crate::vcp::VcpFeature;

/// Keyword that opens the feature code list
const VCP_KEYWORD: &str = "vcp";

/// Result of scanning a capability string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanOutcome {
    pub support: FeatureSupport,
    /// Characters of the vcp list examined before the scan stopped
    pub consumed: usize,
    /// The scan stopped early because both features were found
    pub short_circuited: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Looking for the vcp keyword
    Seeking,
    /// Inside the vcp list at the given nesting depth
    Scanning { depth: u32 },
    Finished,
}

/// Explicit state machine over the characters of one capability string
struct VcpScanner {
    state: ScanState,
    token: String,
    support: FeatureSupport,
    consumed: usize,
    short_circuited: bool,
}

impl VcpScanner {
    fn new() -> Self {
        Self {
            state: ScanState::Seeking,
            token: String::new(),
            support: FeatureSupport::default(),
            consumed: 0,
            short_circuited: false,
        }
    }

    /// Locate the vcp list, returning the text right after `vcp(`
    fn seek<'a>(&mut self, caps: &'a str) -> Option<&'a str> {
        debug_assert_eq!(self.state, ScanState::Seeking);
        let index = caps.to_ascii_lowercase().find(VCP_KEYWORD)?;
        // Skip the character after the keyword, normally its opening paren
        let mut rest = caps[index + VCP_KEYWORD.len()..].chars();
        rest.next()?;
        let list = rest.as_str();
        self.state = ScanState::Scanning { depth: 0 };
        Some(list)
    }

    /// Interpret the buffered token, returns true once both features are known
    fn flush(&mut self) -> bool {
        for feature in [VcpFeature::Luminance, VcpFeature::Contrast] {
            if self.token == feature.token() {
                self.support.mark(feature);
            }
        }
        self.token.clear();
        self.support.is_complete()
    }

    fn finish(&mut self, short_circuited: bool) {
        self.state = ScanState::Finished;
        self.short_circuited = short_circuited;
    }

    fn step(&mut self, c: char) {
        let ScanState::Scanning { depth } = self.state else {
            return;
        };
        self.consumed += 1;

        match c {
            '(' => {
                if self.flush() {
                    self.finish(true);
                } else {
                    self.state = ScanState::Scanning { depth: depth + 1 };
                }
            }
            ')' => {
                if self.flush() {
                    self.finish(true);
                } else if depth == 0 {
                    // Closing paren without a matching open: end of the list
                    // or malformed input, either way nothing more to read.
                    self.finish(false);
                } else {
                    self.state = ScanState::Scanning { depth: depth - 1 };
                }
            }
            _ if depth > 0 => {}
            c if c.is_whitespace() => {
                if self.flush() {
                    self.finish(true);
                }
            }
            c => self.token.push(c),
        }
    }

    fn run(mut self, caps: &str) -> ScanOutcome {
        if let Some(list) = self.seek(caps) {
            for c in list.chars() {
                self.step(c);
                if self.state == ScanState::Finished {
                    break;
                }
            }
        }

        ScanOutcome {
            support: self.support,
            consumed: self.consumed,
            short_circuited: self.short_circuited,
        }
    }
}

/// Scan a capability string and report where the scan stopped
pub fn scan_vcp_codes(caps: &str) -> ScanOutcome {
    VcpScanner::new().run(caps)
}

/// Determine brightness/contrast support from a raw capability string
///
/// Missing or malformed vcp sections yield partial or no support, never an
/// error.
pub fn parse_vcp_codes(caps: &str) -> FeatureSupport {
    let outcome = scan_vcp_codes(caps);
    trace!(
        consumed = outcome.consumed,
        short_circuited = outcome.short_circuited,
        "scanned capability string"
    );
    outcome.support
}
