//! # Lunar time: several event tables read as one clock
//!
//! This module defines [`LunarTime`], the façade a display loop talks to. It
//! owns one timestamp table per tracked [`LunarEvent`] (new moons, apogees,
//! nodal crossings, ...) and, for each of them, the [`Window`] cache of the
//! last query. Every tick the host asks for a [`snapshot`](LunarTime::snapshot)
//! and gets, per event, the dial bin and progress inside the current cycle.
//!
//! The dial resolution comes from a [`ClockConfig`]: `digits` rings of `base`
//! positions each, i.e. `base^digits` bins per cycle (`8^4 = 4096` by default).
//!
//! ## Typical usage
//!
//! ```rust, no_run
//! use camino::Utf8Path;
//! use fractonica::clock::SystemClock;
//! use fractonica::lunar_time::{ClockConfig, LunarEvent, LunarTime};
//!
//! let mut lunar = LunarTime::from_dir(
//!     ClockConfig::default(),
//!     Utf8Path::new("ephemeris"),
//!     &[LunarEvent::NewMoon, LunarEvent::Apogee, LunarEvent::NodalAscending],
//! )
//! .unwrap();
//!
//! let mut clock = SystemClock::new();
//! for info in lunar.snapshot_from(&mut clock) {
//!     println!("{}: {:04} ({:.1}%)", info.event, info.bin_octal, info.normalized * 100.0);
//! }
//! ```
//!
//! ## See also
//! ------------
//! * [`fraction_at`] – The per-table computation.
//! * [`crate::clock`] – Sources of "now".
use std::{fmt, str::FromStr};

use camino::Utf8Path;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    clock::UnixClock,
    constants::{UnixSeconds, DEFAULT_BASE, DEFAULT_DIGITS, SECONDS_PER_DAY},
    ephemeris::{fraction_at, FileSource, FractionResult, TimestampSource, Window},
    fractonica_errors::FractonicaError,
};

/// The event tables produced by the ephemeris generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LunarEvent {
    NewMoon,
    FullMoon,
    Perigee,
    Apogee,
    SolsticeSummer,
    SolsticeWinter,
    EquinoxVernal,
    EquinoxAutumnal,
    NodalAscending,
    NodalDescending,
}

impl LunarEvent {
    pub const ALL: [LunarEvent; 10] = [
        LunarEvent::NewMoon,
        LunarEvent::FullMoon,
        LunarEvent::Perigee,
        LunarEvent::Apogee,
        LunarEvent::SolsticeSummer,
        LunarEvent::SolsticeWinter,
        LunarEvent::EquinoxVernal,
        LunarEvent::EquinoxAutumnal,
        LunarEvent::NodalAscending,
        LunarEvent::NodalDescending,
    ];

    /// File stem of the event table, e.g. `new_moon`.
    pub fn stem(&self) -> &'static str {
        match self {
            LunarEvent::NewMoon => "new_moon",
            LunarEvent::FullMoon => "full_moon",
            LunarEvent::Perigee => "perigee",
            LunarEvent::Apogee => "apogee",
            LunarEvent::SolsticeSummer => "solstice_summer",
            LunarEvent::SolsticeWinter => "solstice_winter",
            LunarEvent::EquinoxVernal => "equinox_vernal",
            LunarEvent::EquinoxAutumnal => "equinox_autumnal",
            LunarEvent::NodalAscending => "nodal_ascending",
            LunarEvent::NodalDescending => "nodal_descending",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LunarEvent::NewMoon => "New Moon",
            LunarEvent::FullMoon => "Full Moon",
            LunarEvent::Perigee => "Lunar Perigee",
            LunarEvent::Apogee => "Lunar Apogee",
            LunarEvent::SolsticeSummer => "Summer Solstice",
            LunarEvent::SolsticeWinter => "Winter Solstice",
            LunarEvent::EquinoxVernal => "Vernal Equinox",
            LunarEvent::EquinoxAutumnal => "Autumnal Equinox",
            LunarEvent::NodalAscending => "Ascending Node",
            LunarEvent::NodalDescending => "Descending Node",
        }
    }

    /// Name of the `.bin` table holding this event.
    pub fn file_name(&self) -> String {
        format!("{}.bin", self.stem())
    }

    /// Mean length of the event's cycle in seconds: synodic month for the
    /// phases, anomalistic month for perigee/apogee, tropical year for
    /// solstices and equinoxes, draconic month for the nodes.
    pub fn mean_period(&self) -> u64 {
        match self {
            // 29.530589 days
            LunarEvent::NewMoon | LunarEvent::FullMoon => 2_551_443,
            // 27.554550 days
            LunarEvent::Perigee | LunarEvent::Apogee => 2_380_713,
            // 365.24219 days
            LunarEvent::SolsticeSummer
            | LunarEvent::SolsticeWinter
            | LunarEvent::EquinoxVernal
            | LunarEvent::EquinoxAutumnal => 365 * SECONDS_PER_DAY + 20_925,
            // 27.212221 days
            LunarEvent::NodalAscending | LunarEvent::NodalDescending => 2_351_136,
        }
    }
}

impl fmt::Display for LunarEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LunarEvent {
    type Err = FractonicaError;

    /// Parse a table stem such as `"new_moon"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LunarEvent::ALL
            .into_iter()
            .find(|event| event.stem() == s)
            .ok_or_else(|| FractonicaError::UnknownLunarEvent(s.to_string()))
    }
}

/// Dial geometry: `digits` rings of `base` positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockConfig {
    pub base: u8,
    pub digits: u8,
}

impl Default for ClockConfig {
    fn default() -> Self {
        ClockConfig {
            base: DEFAULT_BASE,
            digits: DEFAULT_DIGITS,
        }
    }
}

impl ClockConfig {
    /// Number of bins per cycle, `base^digits`.
    ///
    /// Return
    /// ----------
    /// * [`FractonicaError::InvalidBase`] for a base below 2,
    ///   [`FractonicaError::ResolutionOverflow`] if the result exceeds `u32`.
    pub fn resolution(&self) -> Result<u32, FractonicaError> {
        if self.base < 2 {
            return Err(FractonicaError::InvalidBase(self.base));
        }
        u32::from(self.base)
            .checked_pow(u32::from(self.digits))
            .ok_or(FractonicaError::ResolutionOverflow {
                base: self.base,
                digits: self.digits,
            })
    }
}

impl fmt::Display for ClockConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}^{}", self.base, self.digits)
    }
}

impl FromStr for ClockConfig {
    type Err = FractonicaError;

    /// Parse `"<base>^<digits>"`, e.g. `"8^4"`. The resulting resolution must
    /// fit in 32 bits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || FractonicaError::InvalidClockConfig(s.to_string());

        let (base, digits) = s.trim().split_once('^').ok_or_else(invalid)?;
        let config = ClockConfig {
            base: base.trim().parse().map_err(|_| invalid())?,
            digits: digits.trim().parse().map_err(|_| invalid())?,
        };
        config.resolution()?;
        Ok(config)
    }
}

/// Dial state of one event at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LunarEventInfo {
    pub event: LunarEvent,
    pub bin: u32,
    pub bin_octal: u64,
    pub normalized: f64,
    pub progress: f64,
    pub valid: bool,
}

impl LunarEventInfo {
    fn new(event: LunarEvent, fraction: &FractionResult) -> Self {
        LunarEventInfo {
            event,
            bin: fraction.bin,
            bin_octal: fraction.bin_octal,
            normalized: fraction.normalized,
            progress: fraction.progress,
            valid: fraction.valid,
        }
    }
}

struct TrackedEvent {
    event: LunarEvent,
    source: Box<dyn TimestampSource>,
    window: Option<Window>,
}

impl fmt::Debug for TrackedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackedEvent")
            .field("event", &self.event)
            .field("entries", &self.source.entry_count())
            .field("window", &self.window)
            .finish()
    }
}

/// A set of event tables queried together at a fixed resolution.
#[derive(Debug)]
pub struct LunarTime {
    config: ClockConfig,
    resolution: u32,
    tracked: Vec<TrackedEvent>,
}

impl LunarTime {
    /// Build an empty clock; register tables with [`Self::with_source`] or
    /// [`Self::register`].
    pub fn new(config: ClockConfig) -> Result<Self, FractonicaError> {
        Ok(LunarTime {
            config,
            resolution: config.resolution()?,
            tracked: Vec::new(),
        })
    }

    /// Open the tables of `events` in `dir`, each stored as
    /// [`LunarEvent::file_name`].
    ///
    /// Arguments
    /// -----------------
    /// * `config`: dial geometry.
    /// * `dir`: directory holding the `.bin` tables.
    /// * `events`: events to track, in display order.
    ///
    /// Return
    /// ----------
    /// * The clock, [`FractonicaError::MissingEventTable`] if a table does not
    ///   exist, or the error of [`FileSource::open_checked`] if one cannot be read.
    pub fn from_dir(
        config: ClockConfig,
        dir: &Utf8Path,
        events: &[LunarEvent],
    ) -> Result<Self, FractonicaError> {
        let mut lunar = LunarTime::new(config)?;
        for event in events {
            let path = dir.join(event.file_name());
            if !path.is_file() {
                return Err(FractonicaError::MissingEventTable(*event));
            }
            lunar.register(*event, FileSource::open_checked(&path)?);
        }
        debug!(%dir, events = lunar.tracked.len(), %config, "loaded lunar tables");
        Ok(lunar)
    }

    pub fn with_source(
        mut self,
        event: LunarEvent,
        source: impl TimestampSource + 'static,
    ) -> Self {
        self.register(event, source);
        self
    }

    /// Track `event` with `source`. A table already registered for `event`
    /// is replaced and its cache dropped.
    pub fn register(&mut self, event: LunarEvent, source: impl TimestampSource + 'static) {
        let tracked = TrackedEvent {
            event,
            source: Box::new(source),
            window: None,
        };
        match self.tracked.iter_mut().find(|t| t.event == event) {
            Some(slot) => *slot = tracked,
            None => self.tracked.push(tracked),
        }
    }

    pub fn config(&self) -> ClockConfig {
        self.config
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Registered events, in registration order.
    pub fn events(&self) -> impl Iterator<Item = LunarEvent> + '_ {
        self.tracked.iter().map(|t| t.event)
    }

    /// Dial state of `event` at `now`, or `None` if the event is not tracked.
    pub fn event_info(&mut self, now: UnixSeconds, event: LunarEvent) -> Option<LunarEventInfo> {
        let resolution = self.resolution;
        let tracked = self.tracked.iter_mut().find(|t| t.event == event)?;

        let (fraction, window) = fraction_at(&tracked.source, now, resolution, tracked.window);
        tracked.window = window;
        Some(LunarEventInfo::new(event, &fraction))
    }

    /// Dial state of every tracked event at `now`.
    pub fn snapshot(&mut self, now: UnixSeconds) -> Vec<LunarEventInfo> {
        let resolution = self.resolution;
        self.tracked
            .iter_mut()
            .map(|tracked| {
                let (fraction, window) =
                    fraction_at(&tracked.source, now, resolution, tracked.window);
                tracked.window = window;
                LunarEventInfo::new(tracked.event, &fraction)
            })
            .collect()
    }

    pub fn snapshot_from(&mut self, clock: &mut dyn UnixClock) -> Vec<LunarEventInfo> {
        let now = clock.now();
        self.snapshot(now)
    }
}
