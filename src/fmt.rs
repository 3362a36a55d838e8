use {
    anyhow::Context,
    jiff::{Zoned, fmt::strtime},
};

use crate::args::DisplayOptions;

/// Renders the given instant either as a numeric timestamp or as a
/// calendar date, according to the display options.
///
/// Timestamp rendering carries exactly three fractional digits when
/// `milliseconds` is set and a rounded whole number of seconds otherwise.
/// Calendar rendering is `HH:MM:SS` (plus `.mmm` when `milliseconds` is
/// set) with either an ISO 8601 date or a human one, and a time zone
/// annotation that depends on both the `iso` and `utc` options.
pub fn format(
    zdt: &Zoned,
    show_timestamp: bool,
    options: &DisplayOptions,
) -> anyhow::Result<String> {
    if show_timestamp {
        return Ok(epoch(zdt, options.milliseconds));
    }

    let mut time = strtime::format("%H:%M:%S", zdt)
        .context("failed to format time of day")?;
    if options.milliseconds {
        time.push_str(&format!(".{:03}", subsec_millis(zdt)));
    }

    let date = if options.iso {
        strtime::format("%Y-%m-%d", zdt).context("failed to format date")?
    } else {
        // Like `%a %d %b %Y`, except the day of the month is written
        // without a leading zero.
        format!(
            "{weekday} {day} {month_year}",
            weekday = strtime::format("%a", zdt)
                .context("failed to format weekday")?,
            day = zdt.day(),
            month_year = strtime::format("%b %Y", zdt)
                .context("failed to format month and year")?,
        )
    };

    let zone = match (options.iso, options.utc) {
        (true, true) => "Z".to_string(),
        (true, false) => strtime::format("%z", zdt)
            .context("failed to format time zone offset")?,
        (false, true) => "UTC".to_string(),
        (false, false) => {
            // Whole hours only, truncated toward zero, with no `+` on
            // positive offsets. So `EST (UTC-5)` and `CEST (UTC2)`.
            let hours = zdt.offset().seconds() / 3600;
            let abbreviation = strtime::format("%Z", zdt)
                .context("failed to look up time zone abbreviation")?;
            format!("{abbreviation} (UTC{hours})")
        }
    };

    Ok(if options.iso {
        format!("{date}T{time}{zone}")
    } else {
        format!("{date} {time} {zone}")
    })
}

/// The fixed rendering used for the "Parsed date" line.
///
/// This is deliberately independent of the display options. The chosen
/// time zone still decides what `%Z` shows.
pub fn parsed(zdt: &Zoned) -> anyhow::Result<String> {
    strtime::format("%Y-%b-%d %H:%M:%S %Z", zdt)
        .context("failed to format parsed date")
}

/// Renders epoch seconds as a decimal string, rounded (not truncated) to
/// either milliseconds or whole seconds.
fn epoch(zdt: &Zoned, milliseconds: bool) -> String {
    let nanos = zdt.timestamp().as_nanosecond();
    if milliseconds {
        let millis = round_div(nanos, 1_000_000);
        format!(
            "{sign}{secs}.{frac:03}",
            sign = if millis < 0 { "-" } else { "" },
            secs = millis.abs() / 1_000,
            frac = millis.abs() % 1_000,
        )
    } else {
        round_div(nanos, 1_000_000_000).to_string()
    }
}

/// The millisecond component of the time of day: microseconds divided by
/// 1000, rounded. Clamped so the rendered field is always three digits.
fn subsec_millis(zdt: &Zoned) -> i32 {
    let micros = zdt.subsec_nanosecond() / 1_000;
    ((micros + 500) / 1_000).min(999)
}

/// Integer division rounding half away from zero.
fn round_div(numer: i128, denom: i128) -> i128 {
    if numer >= 0 {
        (numer + denom / 2) / denom
    } else {
        (numer - denom / 2) / denom
    }
}
