//! # Rounds
//!
//! Per-round contents, length, RBE and cash for normal rounds and alternate
//! bloons rounds (ABR), plus the freeplay bloon sets and ramping the round
//! command shows past the predetermined rounds. Cumulative cash and RBE are
//! summed once when the table loads, so a range query is one subtraction.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.4.0

use anyhow::{bail, Result};
use serde::Deserialize;

use crate::commands::error::CommandError;

/// Last round with predetermined contents
pub const LAST_ROUND: u32 = 140;
/// Last predetermined ABR round
pub const LAST_ABR_ROUND: u32 = 100;
/// ABR income tables start here
pub const FIRST_ABR_CASH_ROUND: u32 = 3;
/// Highest round the round command accepts
pub const MAX_ROUND: u32 = 1_288_555;
/// Rounds after this one ramp bloon health and speed
pub const LAST_UNRAMPED_ROUND: u32 = 80;

pub const ROUNDS_UNAVAILABLE: &str = "Round data is not available right now.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gamemode {
    Normal,
    Abr,
    HalfCash,
}

impl Gamemode {
    pub const ALL: [Gamemode; 3] = [Gamemode::Normal, Gamemode::Abr, Gamemode::HalfCash];

    /// Mode from the slash option; absent or unknown values mean normal
    pub fn from_option(value: Option<i64>) -> Self {
        Self::ALL
            .into_iter()
            .find(|mode| Some(i64::from(mode.value())) == value)
            .unwrap_or(Gamemode::Normal)
    }

    pub fn value(self) -> i32 {
        match self {
            Gamemode::Normal => 0,
            Gamemode::Abr => 1,
            Gamemode::HalfCash => 2,
        }
    }

    /// Choice label in the slash declarations
    pub fn label(self) -> &'static str {
        match self {
            Gamemode::Normal => "Normal",
            Gamemode::Abr => "Alternate Bloons Rounds",
            Gamemode::HalfCash => "Half Cash",
        }
    }

    /// How the income reply names the mode
    pub fn income_label(self) -> &'static str {
        match self {
            Gamemode::Normal => "CHIMPS",
            Gamemode::Abr => "Alternate Bloons Rounds",
            Gamemode::HalfCash => "Half Cash",
        }
    }

    pub fn is_abr(self) -> bool {
        self == Gamemode::Abr
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoundRow {
    pub round: u32,
    /// Bloon groups, one line each in the embed
    pub contents: Vec<String>,
    /// Seconds until the last group finishes spawning
    pub length: f64,
    pub rbe: u64,
    /// Cash earned during the round; ABR rounds 1 and 2 have none recorded
    pub cash: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FreeplayGroup {
    pub bloon: String,
    pub number: u32,
    /// Inclusive round ranges the group can spawn in
    pub bounds: Vec<[u32; 2]>,
}

/// Linear ramping of `step` per round, starting at round `from`
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RampSegment {
    pub from: u32,
    pub step: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Ramping {
    #[serde(default)]
    pub health: Vec<RampSegment>,
    #[serde(default)]
    pub speed: Vec<RampSegment>,
}

impl Ramping {
    pub fn health(&self, round: u32) -> f64 {
        ramp(&self.health, round)
    }

    pub fn speed(&self, round: u32) -> f64 {
        ramp(&self.speed, round)
    }

    fn validate(&self) -> Result<()> {
        for segments in [&self.health, &self.speed] {
            if segments.first().is_some_and(|first| first.from == 0) {
                bail!("ramping segments start at round 1 or later");
            }
            if segments.windows(2).any(|pair| pair[0].from >= pair[1].from) {
                bail!("ramping segments must be in increasing round order");
            }
        }
        Ok(())
    }
}

/// 1 plus each segment's step for every round of that segment up to `round`
fn ramp(segments: &[RampSegment], round: u32) -> f64 {
    let mut factor = 1.0;
    for (index, segment) in segments.iter().enumerate() {
        if round < segment.from {
            break;
        }
        let end = segments
            .get(index + 1)
            .map_or(round, |next| round.min(next.from - 1));
        factor += segment.step * f64::from(end - segment.from + 1);
    }
    factor
}

/// One mode's rounds, numbered from 1 without gaps
#[derive(Debug, Clone, Default)]
pub struct RoundTable {
    rows: Vec<RoundRow>,
    /// Index `r` holds the total through round `r`
    cumulative_cash: Vec<f64>,
    cumulative_rbe: Vec<u64>,
}

impl RoundTable {
    pub fn build(rows: Vec<RoundRow>) -> Result<Self> {
        let mut cumulative_cash = vec![0.0];
        let mut cumulative_rbe = vec![0];
        let mut cash = 0.0;
        let mut rbe = 0u64;

        for (index, row) in rows.iter().enumerate() {
            let expected = index + 1;
            if row.round as usize != expected {
                bail!("expected round {expected}, found round {}", row.round);
            }
            cash += row.cash.unwrap_or(0.0);
            rbe += row.rbe;
            cumulative_cash.push(cash);
            cumulative_rbe.push(rbe);
        }

        Ok(Self {
            rows,
            cumulative_cash,
            cumulative_rbe,
        })
    }

    pub fn get(&self, round: u32) -> Option<&RoundRow> {
        let index = usize::try_from(round.checked_sub(1)?).ok()?;
        self.rows.get(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cash earned from the start of `range.start` to the end of `range.end`
    pub fn cash_between(&self, range: RoundRange) -> Option<f64> {
        let end = self.cumulative_cash.get(range.end as usize)?;
        let before = self.cumulative_cash.get(range.start.checked_sub(1)? as usize)?;
        Some(end - before)
    }

    pub fn rbe_between(&self, range: RoundRange) -> Option<u64> {
        let end = self.cumulative_rbe.get(range.end as usize)?;
        let before = self.cumulative_rbe.get(range.start.checked_sub(1)? as usize)?;
        Some(end - before)
    }
}

/// `rounds.yaml` as written by the operator
#[derive(Debug, Clone, Deserialize)]
pub struct RoundsFile {
    pub normal: Vec<RoundRow>,
    #[serde(default)]
    pub abr: Vec<RoundRow>,
    #[serde(default)]
    pub freeplay: Vec<FreeplayGroup>,
    #[serde(default)]
    pub ramping: Ramping,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "RoundsFile")]
pub struct Rounds {
    pub normal: RoundTable,
    pub abr: RoundTable,
    pub freeplay: Vec<FreeplayGroup>,
    pub ramping: Ramping,
}

impl TryFrom<RoundsFile> for Rounds {
    type Error = anyhow::Error;

    fn try_from(file: RoundsFile) -> Result<Self> {
        file.ramping.validate()?;
        Ok(Self {
            normal: RoundTable::build(file.normal)?,
            abr: RoundTable::build(file.abr)?,
            freeplay: file.freeplay,
            ramping: file.ramping,
        })
    }
}

impl Rounds {
    /// Half cash rounds are the normal rounds
    pub fn table(&self, mode: Gamemode) -> &RoundTable {
        if mode.is_abr() {
            &self.abr
        } else {
            &self.normal
        }
    }

    /// "<count> <bloon>" for every group that can spawn in `round`
    pub fn freeplay_sets(&self, round: u32) -> Vec<String> {
        self.freeplay
            .iter()
            .filter(|group| {
                group
                    .bounds
                    .iter()
                    .any(|[low, high]| (*low..=*high).contains(&round))
            })
            .map(|group| format!("{} {}", group.number, group.bloon))
            .collect()
    }
}

/// Whether `round` is past the predetermined rounds of `mode`
pub fn is_freeplay(round: u32, mode: Gamemode) -> bool {
    round > LAST_ROUND || (mode.is_abr() && round > LAST_ABR_ROUND)
}

/// XP for beating `round` and the running total from round 1
pub fn xp(round: u32) -> (u64, u64) {
    let round = u64::from(round.max(1));
    if round <= 20 {
        let n = round - 1;
        (20 * round + 20, 40 + 50 * n + 10 * n * n)
    } else if round <= 50 {
        let n = round - 20;
        (40 * n + 420, 4600 + 440 * n + 20 * n * n)
    } else {
        let n = round - 50;
        (90 * n + 1620, 35800 + 1665 * n + 45 * n * n)
    }
}

/// An inclusive span of rounds, `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundRange {
    pub start: u32,
    pub end: u32,
}

impl RoundRange {
    /// Order the two bounds and check them against what `mode` predetermines
    ///
    /// `end` defaults to `start` for a single round.
    pub fn new(start: i64, end: Option<i64>, mode: Gamemode) -> Result<Self, CommandError> {
        let end = end.unwrap_or(start);
        let (low, high) = (start.min(end), start.max(end));
        if low < 1 {
            return Err(CommandError::InvalidInput("Rounds start at 1.".to_string()));
        }
        let start = u32::try_from(low).unwrap_or(u32::MAX);
        let end = u32::try_from(high).unwrap_or(u32::MAX);

        if mode.is_abr() {
            if start < FIRST_ABR_CASH_ROUND {
                return Err(CommandError::InvalidInput(
                    "There is no support for rounds 1-2 ABR calculation".to_string(),
                ));
            }
            if end > LAST_ABR_ROUND {
                return Err(CommandError::InvalidInput(format!(
                    "Round {end} isn't predetermined in ABR; the calculation won't be consistent"
                )));
            }
        } else if end > LAST_ROUND {
            return Err(CommandError::InvalidInput(format!(
                "Round {end} isn't predetermined; the calculation won't be consistent"
            )));
        }

        Ok(Self { start, end })
    }
}
