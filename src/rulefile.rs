//! Plain-text adjacency rule files.
//!
//! One section per tile; tile ids are assigned by order of appearance:
//!
//! ```text
//! [TILE_0]
//! up=0 1
//! down=0
//! left=0 1
//! right=0 1
//!
//! [TILE_1]
//! up=1
//! down=0 1
//! ```
//!
//! Recognized keys are `up`, `down`, `left`, `right`, each a
//! whitespace-separated list of tile ids; repeated keys accumulate.
//! Malformed `key=value` lines are skipped and reported as [`Diagnostic`]s;
//! unknown keys are ignored.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::WfcError;
use crate::grid::Direction;
use crate::tiles::{Ruleset, TileSpec};

/// A skipped or suspicious input line, with its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub line: usize,
    pub message: String,
}

/// Parse outcome: tile specs in declaration order plus any diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedRules {
    pub tiles: Vec<TileSpec>,
    pub diagnostics: Vec<Diagnostic>,
}

fn direction_for_key(key: &str) -> Option<Direction> {
    Direction::ALL.into_iter().find(|d| d.key() == key)
}

/// Parses rule-file text into raw tile specs.
///
/// Never fails: problems are reported per line and the offending line is
/// skipped. Validation of the referenced ids happens later, in
/// [`Ruleset::load`].
pub fn parse_rules(text: &str) -> ParsedRules {
    let mut parsed = ParsedRules::default();

    for (number, raw) in text.lines().enumerate() {
        let line = raw.trim();
        let number = number + 1;
        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') {
            if line.starts_with("[TILE_") && line.ends_with(']') {
                parsed.tiles.push(TileSpec::default());
            } else {
                parsed.diagnostics.push(Diagnostic {
                    line: number,
                    message: format!("unrecognized section header {line:?}"),
                });
            }
            continue;
        }

        let Some(current) = parsed.tiles.last_mut() else {
            parsed.diagnostics.push(Diagnostic {
                line: number,
                message: "content before the first [TILE_] header".to_string(),
            });
            continue;
        };

        let Some((key, value)) = line.split_once('=') else {
            parsed.diagnostics.push(Diagnostic {
                line: number,
                message: format!("expected key=value, got {line:?}"),
            });
            continue;
        };

        let Some(direction) = direction_for_key(key.trim()) else {
            // Unknown keys are ignored without a diagnostic.
            continue;
        };

        let mut ids = Vec::new();
        let mut malformed = None;
        for token in value.split_whitespace() {
            match token.parse::<usize>() {
                Ok(id) => ids.push(id),
                Err(_) => {
                    malformed = Some(token);
                    break;
                }
            }
        }

        if let Some(token) = malformed {
            parsed.diagnostics.push(Diagnostic {
                line: number,
                message: format!("invalid tile id {token:?} in {direction} list"),
            });
            continue;
        }

        current.ids_mut(direction).extend(ids);
    }

    parsed
}

/// Reads and parses a rule file, then builds a validated [`Ruleset`].
///
/// Parse diagnostics are returned alongside the ruleset so callers can
/// surface them; load-time validation failures are errors.
pub fn load_rules_file(path: &Path) -> Result<(Ruleset, Vec<Diagnostic>), WfcError> {
    let text = fs::read_to_string(path).map_err(|e| WfcError::Io {
        path: path.display().to_string(),
        error: e.to_string(),
    })?;

    let parsed = parse_rules(&text);
    let ruleset = Ruleset::load(&parsed.tiles)?;
    Ok((ruleset, parsed.diagnostics))
}
