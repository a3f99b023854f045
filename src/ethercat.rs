use time::OffsetDateTime;

use thiserror::Error;

/// Size of the cyclic output (master to slave) process data image in bytes.
pub const EC_OUTPUT_FRAME_SIZE: usize = 626;
/// Size of the cyclic input (slave to master) process data image in bytes.
pub const EC_INPUT_FRAME_SIZE: usize = 2;

pub const EC_CYCLE_TIME_BASE_MICRO_SEC: u64 = 500;
pub const EC_CYCLE_TIME_BASE_NANO_SEC: u64 = EC_CYCLE_TIME_BASE_MICRO_SEC * 1000;

/// The zero point of the Distributed Clock system time (2000-01-01 0:00:00 UTC).
pub const ECAT_DC_SYS_TIME_BASE: OffsetDateTime = time::macros::datetime!(2000-01-01 0:00 UTC);

#[derive(Error, Debug, PartialEq, Clone)]
#[error("Invalid date time")]
pub struct InvalidDateTime;

/// The system time of the Distributed Clock.
///
/// The system time is expressed in 1ns units with 2000-01-01 0:00:00 UTC as
/// the reference, as a 64-bit unsigned integer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(C)]
pub struct DcSysTime {
    dc_sys_time: u64,
}

impl DcSysTime {
    /// The zero point of the DcSysTime (2000-01-01 0:00:00 UTC)
    pub const ZERO: Self = Self { dc_sys_time: 0 };

    /// Returns the system time in nanoseconds
    #[must_use]
    pub const fn sys_time(&self) -> u64 {
        self.dc_sys_time
    }

    /// Converts the system time to the UTC time
    #[must_use]
    pub fn to_utc(&self) -> OffsetDateTime {
        ECAT_DC_SYS_TIME_BASE + std::time::Duration::from_nanos(self.dc_sys_time)
    }

    /// Creates a new instance from the UTC time
    pub fn from_utc(utc: OffsetDateTime) -> Result<Self, InvalidDateTime> {
        Ok(Self {
            dc_sys_time: u64::try_from((utc - ECAT_DC_SYS_TIME_BASE).whole_nanoseconds())
                .map_err(|_| InvalidDateTime)?,
        })
    }

    /// Returns the system time of now
    #[must_use]
    pub fn now() -> Self {
        Self::from_utc(OffsetDateTime::now_utc()).unwrap()
    }
}

impl std::ops::Add<std::time::Duration> for DcSysTime {
    type Output = Self;

    fn add(self, rhs: std::time::Duration) -> Self::Output {
        Self {
            dc_sys_time: self.dc_sys_time + rhs.as_nanos() as u64,
        }
    }
}

impl std::ops::Sub<std::time::Duration> for DcSysTime {
    type Output = Self;

    fn sub(self, rhs: std::time::Duration) -> Self::Output {
        Self {
            dc_sys_time: self.dc_sys_time - rhs.as_nanos() as u64,
        }
    }
}

/// Narrow view of the EtherCAT slave controller's Distributed Clock unit.
///
/// The firmware only ever needs the current system time, the start time of
/// the next cycle, the cycle period, and a calibrated busy-wait; everything
/// else about the controller is out of scope.
pub trait DcClock {
    /// Current Distributed Clock system time.
    fn sys_time(&self) -> DcSysTime;
    /// Start time of the next SYNC0 cycle.
    fn cycle_start_time(&self) -> DcSysTime;
    /// SYNC0 cycle period in nanoseconds.
    ///
    /// Must be longer than the boundary guard window, or the boundary
    /// observation loop cannot settle.
    fn cycle_period(&self) -> u64;
    /// Busy-wait for approximately `ns` nanoseconds.
    fn wait_ns(&mut self, ns: u64);
}

/// A Distributed Clock whose time advances only when the firmware waits on it.
///
/// This is the test-harness clock: deterministic, and guaranteed to make the
/// boundary-observation loop of the sync engine converge.
#[derive(Debug, Clone)]
pub struct EmulatedDcClock {
    now: u64,
    cycle: u64,
}

impl EmulatedDcClock {
    #[must_use]
    pub const fn new(cycle_period_ns: u64) -> Self {
        Self {
            now: 0,
            cycle: cycle_period_ns,
        }
    }

    pub const fn advance(&mut self, ns: u64) {
        self.now += ns;
    }
}

impl Default for EmulatedDcClock {
    fn default() -> Self {
        Self::new(EC_CYCLE_TIME_BASE_NANO_SEC * 2)
    }
}

impl DcClock for EmulatedDcClock {
    fn sys_time(&self) -> DcSysTime {
        DcSysTime::ZERO + std::time::Duration::from_nanos(self.now)
    }

    fn cycle_start_time(&self) -> DcSysTime {
        DcSysTime::ZERO + std::time::Duration::from_nanos(self.now - self.now % self.cycle + self.cycle)
    }

    fn cycle_period(&self) -> u64 {
        self.cycle
    }

    fn wait_ns(&mut self, ns: u64) {
        self.now += ns;
    }
}
