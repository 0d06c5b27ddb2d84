//! Error types.
//!
//! Every failure in the crate is a value: invalid placements and commands
//! fail locally and leave state untouched, malformed level or snapshot text
//! aborts session creation, and nothing ever panics on bad input.

use thiserror::Error;

use crate::entity::TowerKind;
use crate::grid::TilePos;

/// Rejection reasons for entity placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlacementError {
    /// The requested row does not exist on the map.
    #[error("row {0} is outside the map")]
    RowOutOfRange(i32),
    /// The requested tile is off the map or on the reserved last column.
    #[error("tile {0} is outside the buildable area")]
    OutsideBuildableArea(TilePos),
    /// Another entity already occupies the tile.
    #[error("tile {0} is already occupied")]
    TileOccupied(TilePos),
}

/// Rejection reasons for session commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CommandError {
    /// The underlying placement was rejected.
    #[error(transparent)]
    Placement(#[from] PlacementError),
    /// The purchase or upgrade costs more than the available funds.
    #[error("insufficient funds: need {needed}, have {available}")]
    InsufficientFunds {
        /// Amount the command would deduct.
        needed: i64,
        /// Funds currently available.
        available: i64,
    },
    /// No tower stands on the addressed tile.
    #[error("no tower at {0}")]
    NoTowerAt(TilePos),
    /// The addressed tower has no upgrade path.
    #[error("{0:?} towers cannot be upgraded")]
    NoUpgrade(TowerKind),
    /// `start_wave` is only valid while waiting in the pre-wave state.
    #[error("a wave is already running")]
    WaveInProgress,
}

/// Parse failures for level definition text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LevelError {
    /// The file declared no wave at all.
    #[error("level defines no waves")]
    Empty,
    /// An enemy line appeared before the first wave declaration.
    #[error("line {line}: enemy declared before any wave")]
    EnemyBeforeWave {
        /// 1-based line number of the offending line.
        line: usize,
    },
    /// A line held neither one token (wave) nor three (enemy).
    #[error("line {line}: expected 1 or 3 values, found {count}")]
    BadTokenCount {
        /// 1-based line number of the offending line.
        line: usize,
        /// Number of whitespace-separated values found.
        count: usize,
    },
    /// A numeric field did not parse.
    #[error("line {line}: invalid number {token:?}")]
    BadNumber {
        /// 1-based line number of the offending line.
        line: usize,
        /// The token that failed to parse.
        token: String,
    },
    /// An enemy code letter is not part of the roster.
    #[error("line {line}: unknown enemy code {code:?}")]
    UnknownEnemyCode {
        /// 1-based line number of the offending line.
        line: usize,
        /// The unrecognized code character.
        code: char,
    },
}

/// Parse and restore failures for snapshot text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    /// The snapshot text is empty or its header line is malformed.
    #[error("malformed snapshot header")]
    BadHeader,
    /// An entity line held the wrong number of fields or a bad value.
    #[error("line {line}: malformed entity entry")]
    BadEntity {
        /// 1-based line number of the offending line.
        line: usize,
    },
    /// An entity line named a code outside the roster.
    #[error("line {line}: unknown entity code {code:?}")]
    UnknownCode {
        /// 1-based line number of the offending line.
        line: usize,
        /// The unrecognized code character.
        code: char,
    },
    /// The saved wave index does not exist in the level.
    #[error("wave index {index} out of range for the level")]
    WaveOutOfRange {
        /// The saved wave index.
        index: usize,
    },
    /// The level text the snapshot refers to failed to parse.
    #[error(transparent)]
    Level(#[from] LevelError),
    /// A saved entity could not be placed back on the map.
    #[error(transparent)]
    Placement(#[from] PlacementError),
}
