use {
    anyhow::Context,
    jiff::{Timestamp, Zoned, civil, tz::TimeZone},
};

use crate::args::Mode;

/// Produces the time-zone aware instant described by the given mode.
///
/// The instant is always returned in the given time zone, which is the
/// zone the caller chose for display (UTC when `--utc` was passed, the
/// local zone otherwise). A naive datetime never escapes this function.
pub fn resolve(
    mode: &Mode,
    now: &Zoned,
    tz: &TimeZone,
) -> anyhow::Result<Zoned> {
    match *mode {
        Mode::Now => Ok(now.timestamp().to_zoned(tz.clone())),
        Mode::Today => {
            // The calendar date of "now" in the chosen zone, with the
            // time of day reset to midnight.
            let today = now.timestamp().to_zoned(tz.clone());
            today
                .date()
                .to_datetime(civil::Time::midnight())
                .to_zoned(tz.clone())
                .with_context(|| {
                    format!("failed to resolve midnight of {}", today.date())
                })
        }
        Mode::Timestamp(seconds) => {
            from_epoch_seconds(seconds).map(|ts| ts.to_zoned(tz.clone()))
        }
        Mode::DateString(ref text) => parse_date(text, tz),
    }
}

/// Converts fractional epoch seconds to an instant, rounding to whole
/// nanoseconds.
fn from_epoch_seconds(seconds: f64) -> anyhow::Result<Timestamp> {
    anyhow::ensure!(
        seconds.is_finite(),
        "timestamp `{seconds}` is not a finite number",
    );
    // The saturating f64 -> i128 cast is fine here: anything that big is
    // out of range for a Timestamp anyway and gets reported below.
    let nanos = (seconds * 1_000_000_000.0).round() as i128;
    Timestamp::from_nanosecond(nanos)
        .with_context(|| format!("timestamp `{seconds}` is out of range"))
}

/// Parses a free-form calendar date via the `parse_datetime` collaborator.
///
/// The chosen time zone always wins: the parsed wall-clock fields are
/// reinterpreted in `tz`, discarding any zone information embedded in the
/// input text.
fn parse_date(text: &str, tz: &TimeZone) -> anyhow::Result<Zoned> {
    let parsed = match parse_datetime::parse_datetime(text) {
        Ok(zdt) => zdt,
        Err(err) => {
            log::debug!("date parser rejected `{text}`: {err}");
            anyhow::bail!(
                "could not parse date string `{text}`\n\n{usage}",
                usage = crate::args::USAGE_SHORT.trim(),
            );
        }
    };
    parsed.datetime().to_zoned(tz.clone()).with_context(|| {
        format!("cannot interpret `{text}` in the chosen time zone")
    })
}
