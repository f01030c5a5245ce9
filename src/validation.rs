//! Literal checks on command line arguments.
//!
//! Everything here runs before a device is opened; a failure means the
//! invocation is wrong, not the inverter.

use crate::prelude::*;
use crate::p18::types::{
    AC_OUTPUT_RATED_VOLTAGES, RECHARGE_VOLTAGES_12V, RECHARGE_VOLTAGES_24V, RECHARGE_VOLTAGES_48V,
    REDISCHARGE_VOLTAGES_12V, REDISCHARGE_VOLTAGES_24V, REDISCHARGE_VOLTAGES_48V,
};

use chrono::NaiveDate;

/// Maximum float/absorption charging voltage range.
pub const CHARGE_VOLTAGE_RANGE: (f32, f32) = (48.0, 58.4);
pub const CUTOFF_VOLTAGE_RANGE: (f32, f32) = (40.0, 48.0);
pub const SOLAR_ID_MAX_LEN: usize = 20;

fn is_numeric(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Unsigned decimal of at most `max_len` digits.
fn number(s: &str, max_len: usize, what: &str) -> Result<u32> {
    if !is_numeric(s) || s.len() > max_len {
        bail!("invalid {}", what);
    }
    s.parse().with_context(|| format!("invalid {}", what))
}

// {{{ date and time
pub fn year(s: &str) -> Result<i32> {
    if !is_numeric(s) || s.len() != 4 {
        bail!("invalid year");
    }
    let y = number(s, 4, "year")?;
    if !(2000..=2099).contains(&y) {
        bail!("invalid year");
    }
    Ok(y as i32)
}

pub fn month(s: &str) -> Result<u32> {
    let m = number(s, 2, "month")?;
    if !(1..=12).contains(&m) {
        bail!("invalid month");
    }
    Ok(m)
}

pub fn day(s: &str) -> Result<u32> {
    let d = number(s, 2, "day")?;
    if !(1..=31).contains(&d) {
        bail!("invalid day");
    }
    Ok(d)
}

/// Validates year, month and day and that the three make a real date.
pub fn date(y: &str, m: &str, d: &str) -> Result<NaiveDate> {
    let (y, m, d) = (year(y)?, month(m)?, day(d)?);
    NaiveDate::from_ymd_opt(y, m, d).ok_or_else(|| anyhow!("invalid date"))
}

pub fn time(h: &str, m: &str, s: &str) -> Result<()> {
    if number(h, 2, "hour")? > 23 {
        bail!("invalid hour");
    }
    if number(m, 2, "minute")? > 59 {
        bail!("invalid minute");
    }
    if number(s, 2, "second")? > 59 {
        bail!("invalid second");
    }
    Ok(())
}

/// `h:mm` or `hh:mm` within a day.
pub fn time_of_day(s: &str, what: &str) -> Result<(u32, u32)> {
    let parsed = s.split_once(':').and_then(|(h, m)| {
        let h: u32 = h.trim().parse().ok()?;
        let m: u32 = m.trim().parse().ok()?;
        Some((h, m))
    });

    match parsed {
        Some((h, m)) if h <= 23 && m <= 59 => Ok((h, m)),
        _ => bail!("invalid {}", what),
    }
} // }}}

// {{{ numbers and choices
pub fn parallel_id(s: &str) -> Result<u32> {
    number(s, 1, "id")
}

pub fn amps(s: &str) -> Result<u32> {
    number(s, 3, "argument")
}

pub fn zero_or_one(s: &str, what: &str) -> Result<bool> {
    match s {
        "0" => Ok(false),
        "1" => Ok(true),
        _ => bail!("invalid {}, only 0 or 1 allowed", what),
    }
}

pub fn frequency(s: &str) -> Result<u32> {
    match s {
        "50" => Ok(50),
        "60" => Ok(60),
        _ => bail!("invalid frequency, only 50 or 60 allowed"),
    }
}

pub fn float_in_range(s: &str, (min, max): (f32, f32), what: &str) -> Result<f32> {
    match s.trim().parse::<f32>() {
        Ok(v) if (min..=max).contains(&v) => Ok(v),
        _ => bail!("invalid {}", what),
    }
}

pub fn rated_voltage(s: &str) -> Result<u16> {
    let v: u16 = s.trim().parse().map_err(|_| anyhow!("invalid argument"))?;
    if !AC_OUTPUT_RATED_VOLTAGES.contains(&v) {
        bail!("invalid voltage");
    }
    Ok(v)
}

pub fn recharge_voltage(s: &str) -> Result<()> {
    let allowed = [
        &RECHARGE_VOLTAGES_12V[..],
        &RECHARGE_VOLTAGES_24V[..],
        &RECHARGE_VOLTAGES_48V[..],
    ];
    if !allowed.iter().any(|list| list.contains(&s)) {
        bail!("invalid CV");
    }
    Ok(())
}

pub fn redischarge_voltage(s: &str) -> Result<()> {
    let allowed = [
        &REDISCHARGE_VOLTAGES_12V[..],
        &REDISCHARGE_VOLTAGES_24V[..],
        &REDISCHARGE_VOLTAGES_48V[..],
    ];
    if !allowed.iter().any(|list| list.contains(&s)) {
        bail!("invalid DV");
    }
    Ok(())
}

pub fn solar_id(s: &str) -> Result<()> {
    if !is_numeric(s) || s.len() > SOLAR_ID_MAX_LEN {
        bail!("invalid argument");
    }
    Ok(())
}

/// Raw commands are bounded by the size of a single request.
pub fn raw_command(s: &str) -> Result<()> {
    if s.is_empty() || s.len() > 127 {
        bail!("raw command must be 1 to 127 bytes long");
    }
    Ok(())
} // }}}
