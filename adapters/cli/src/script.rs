//! Scripted tower placements.
//!
//! One placement per line: `tick column row kind`, where `kind` is `stone`
//! or `spike`. Text after `;` is a comment.

use std::{collections::VecDeque, fs, path::Path};

use anyhow::{anyhow, bail, Context, Result};
use grid_defence_core::{CellCoord, TowerKind};

/// Placement requested at the start of a given tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Placement {
    /// Tick at whose start the request is applied.
    pub(crate) tick: u64,
    /// Cell the tower should occupy.
    pub(crate) cell: CellCoord,
    /// Kind of tower to build.
    pub(crate) kind: TowerKind,
}

/// Placements ordered by tick, consumed as the simulation advances.
#[derive(Debug, Default)]
pub(crate) struct Script {
    pending: VecDeque<Placement>,
}

impl Script {
    /// Reads a script, or yields an empty one when no path is given.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read script {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("failed to parse script {}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self> {
        let mut placements = Vec::new();
        for (index, line) in contents.lines().enumerate() {
            let line = line.split(';').next().unwrap_or_default().trim();
            if line.is_empty() {
                continue;
            }
            let placement =
                parse_line(line).with_context(|| format!("line {}: '{line}'", index + 1))?;
            placements.push(placement);
        }

        placements.sort_by_key(|placement| placement.tick);
        Ok(Self {
            pending: placements.into(),
        })
    }

    /// Removes and returns every placement due at or before `tick`.
    pub(crate) fn due(&mut self, tick: u64) -> Vec<Placement> {
        let mut due = Vec::new();
        while let Some(placement) = self.pending.front() {
            if placement.tick > tick {
                break;
            }
            if let Some(placement) = self.pending.pop_front() {
                due.push(placement);
            }
        }
        due
    }
}

fn parse_line(line: &str) -> Result<Placement> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [tick, column, row, kind] = fields.as_slice() else {
        bail!("expected `tick column row kind`, found {} fields", fields.len());
    };

    Ok(Placement {
        tick: tick.parse().context("invalid tick")?,
        cell: CellCoord::new(
            column.parse().context("invalid column")?,
            row.parse().context("invalid row")?,
        ),
        kind: parse_kind(kind)?,
    })
}

fn parse_kind(kind: &str) -> Result<TowerKind> {
    match kind.to_ascii_lowercase().as_str() {
        "stone" => Ok(TowerKind::Stone),
        "spike" => Ok(TowerKind::Spike),
        _ => Err(anyhow!("unknown tower kind '{kind}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_orders_placements() {
        let mut script = Script::parse(
            "; opening\n40 2 3 Spike\n\n1 0 1 stone ; first\n40 0 4 stone\n",
        )
        .expect("valid script");

        assert_eq!(
            script.due(1),
            vec![Placement {
                tick: 1,
                cell: CellCoord::new(0, 1),
                kind: TowerKind::Stone,
            }]
        );
        assert!(script.due(39).is_empty());
        assert_eq!(script.due(100).len(), 2);
        assert!(script.due(u64::MAX).is_empty());
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!(Script::parse("1 2 3\n").is_err());
        assert!(Script::parse("1 2 x stone\n").is_err());
        let error = Script::parse("1 2 3 cannon\n").expect_err("unknown kind");
        assert!(format!("{error:#}").contains("unknown tower kind 'cannon'"));
    }

    #[test]
    fn missing_path_yields_empty_script() {
        let mut script = Script::load(None).expect("empty script");
        assert!(script.due(u64::MAX).is_empty());
    }
}
