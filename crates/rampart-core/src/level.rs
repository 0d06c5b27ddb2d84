//! Text formats of the external interface: level definitions and
//! save-game snapshots.
//!
//! Both formats are flat whitespace-separated rows. File I/O itself is the
//! caller's concern; this module only parses and encodes strings.
//!
//! # Level format
//!
//! Blank lines are ignored. A line with a single value starts a new wave
//! with that income. A line with three values `spawn_delay row code` adds
//! an enemy to the current wave, staged `spawn_delay` columns past the map
//! edge. Any other value count, or an enemy line before the first wave, is
//! a fatal parse error.
//!
//! # Snapshot format
//!
//! A header line `level_name wave_index funds score pre_wave_flag`,
//! followed by one line per live tower (`T code row column life`) and per
//! live enemy (`E code row column life`).

use std::fmt::Write as _;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::entity::{EnemyKind, TowerKind};
use crate::error::{LevelError, SnapshotError};
use crate::grid::{TilePos, GRID_COLUMNS};
use crate::wave::{Spawn, Wave};

// =============================================================================
// Level definitions
// =============================================================================

/// Parses level definition text into its wave list.
///
/// # Errors
///
/// Any malformed line aborts the parse with a [`LevelError`] carrying the
/// 1-based line number; a level declaring no waves at all is also an error.
pub fn parse_level(text: &str) -> Result<Vec<Wave>, LevelError> {
    let mut waves: Vec<Wave> = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let line_number = index + 1;
        let values: Vec<&str> = line.split_whitespace().collect();
        match values.as_slice() {
            [] => {}
            [income] => {
                let income = parse_number(income, line_number)?;
                waves.push(Wave {
                    income,
                    spawns: Vec::new(),
                });
            }
            [delay, row, code] => {
                if waves.is_empty() {
                    return Err(LevelError::EnemyBeforeWave { line: line_number });
                }
                let delay: i32 = parse_number(delay, line_number)?;
                let row: i32 = parse_number(row, line_number)?;
                let code = code.chars().next().unwrap_or(' ');
                let kind = EnemyKind::from_code(code).ok_or(LevelError::UnknownEnemyCode {
                    line: line_number,
                    code,
                })?;
                if let Some(wave) = waves.last_mut() {
                    wave.spawns.push(Spawn {
                        kind,
                        position: TilePos::new(GRID_COLUMNS + delay, row),
                    });
                }
            }
            other => {
                return Err(LevelError::BadTokenCount {
                    line: line_number,
                    count: other.len(),
                })
            }
        }
    }
    if waves.is_empty() {
        return Err(LevelError::Empty);
    }
    Ok(waves)
}

fn parse_number<T: FromStr>(token: &str, line: usize) -> Result<T, LevelError> {
    token.parse().map_err(|_| LevelError::BadNumber {
        line,
        token: token.to_string(),
    })
}

// =============================================================================
// Snapshots
// =============================================================================

/// A saved tower row.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedTower {
    /// Kind of the saved tower.
    pub kind: TowerKind,
    /// Tile the tower stood on.
    pub position: TilePos,
    /// Life points at save time.
    pub life: i32,
}

/// A saved enemy row.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedEnemy {
    /// Kind of the saved enemy.
    pub kind: EnemyKind,
    /// Tile the enemy stood on (staging columns included).
    pub position: TilePos,
    /// Life points at save time.
    pub life: i32,
}

/// A parsed (or captured) save-game snapshot.
///
/// Round-trips with session state: [`crate::session::GameSession::snapshot`]
/// captures one, [`Snapshot::encode`] renders the text form, and
/// [`crate::session::GameSession::restore`] rebuilds a session from it plus
/// the level text the caller resolves from [`Snapshot::level_name`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Name of the level the session was created from.
    pub level_name: String,
    /// Index of the wave that was current.
    pub wave_index: usize,
    /// Player funds.
    pub funds: i64,
    /// Player score.
    pub score: u64,
    /// True when the session was saved while waiting in the pre-wave state.
    pub pre_wave: bool,
    /// Live towers at save time.
    pub towers: Vec<SavedTower>,
    /// Live enemies at save time.
    pub enemies: Vec<SavedEnemy>,
}

impl Snapshot {
    /// Renders the snapshot in its text form.
    #[must_use]
    pub fn encode(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{} {} {} {} {}",
            self.level_name,
            self.wave_index,
            self.funds,
            self.score,
            u8::from(self.pre_wave)
        );
        for tower in &self.towers {
            let _ = writeln!(
                out,
                "T {} {} {} {}",
                tower.kind.code(),
                tower.position.row,
                tower.position.column,
                tower.life
            );
        }
        for enemy in &self.enemies {
            let _ = writeln!(
                out,
                "E {} {} {} {}",
                enemy.kind.code(),
                enemy.position.row,
                enemy.position.column,
                enemy.life
            );
        }
        out
    }

    /// Parses snapshot text.
    ///
    /// # Errors
    ///
    /// [`SnapshotError::BadHeader`] for a missing or malformed header line,
    /// [`SnapshotError::BadEntity`]/[`SnapshotError::UnknownCode`] for a
    /// malformed entity row.
    pub fn parse(text: &str) -> Result<Self, SnapshotError> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(index, line)| (index + 1, line))
            .filter(|(_, line)| !line.trim().is_empty());

        let (_, header) = lines.next().ok_or(SnapshotError::BadHeader)?;
        let fields: Vec<&str> = header.split_whitespace().collect();
        let [level_name, wave_index, funds, score, pre_wave] = fields.as_slice() else {
            return Err(SnapshotError::BadHeader);
        };
        let mut snapshot = Self {
            level_name: (*level_name).to_string(),
            wave_index: wave_index.parse().map_err(|_| SnapshotError::BadHeader)?,
            funds: funds.parse().map_err(|_| SnapshotError::BadHeader)?,
            score: score.parse().map_err(|_| SnapshotError::BadHeader)?,
            pre_wave: match *pre_wave {
                "0" => false,
                "1" => true,
                _ => return Err(SnapshotError::BadHeader),
            },
            towers: Vec::new(),
            enemies: Vec::new(),
        };

        for (line_number, line) in lines {
            let fields: Vec<&str> = line.split_whitespace().collect();
            let [tag, code, row, column, life] = fields.as_slice() else {
                return Err(SnapshotError::BadEntity { line: line_number });
            };
            let code = code.chars().next().unwrap_or(' ');
            let position = TilePos::new(
                parse_field(column, line_number)?,
                parse_field(row, line_number)?,
            );
            let life = parse_field(life, line_number)?;
            match *tag {
                "T" => {
                    let kind = TowerKind::from_code(code).ok_or(SnapshotError::UnknownCode {
                        line: line_number,
                        code,
                    })?;
                    snapshot.towers.push(SavedTower {
                        kind,
                        position,
                        life,
                    });
                }
                "E" => {
                    let kind = EnemyKind::from_code(code).ok_or(SnapshotError::UnknownCode {
                        line: line_number,
                        code,
                    })?;
                    snapshot.enemies.push(SavedEnemy {
                        kind,
                        position,
                        life,
                    });
                }
                _ => return Err(SnapshotError::BadEntity { line: line_number }),
            }
        }
        Ok(snapshot)
    }
}

fn parse_field<T: FromStr>(token: &str, line: usize) -> Result<T, SnapshotError> {
    token.parse().map_err(|_| SnapshotError::BadEntity { line })
}

// =============================================================================
// Tests
// =============================================================================
