use std::{env, io::Write, process::ExitCode, sync::LazyLock};

use {
    anyhow::Context,
    jiff::{Timestamp, Zoned, tz::TimeZone},
};

use crate::args::Mode;

mod args;
mod datetime;
mod fmt;
mod logger;
mod style;

static TZ: LazyLock<TimeZone> = LazyLock::new(|| TimeZone::system());

static NOW: LazyLock<Zoned> = LazyLock::new(|| {
    let ts = match read_env_timestamp_now() {
        Ok(Some(ts)) => {
            log::trace!(
                "setting current time to `{ts}` from `TIMESTAMP_NOW` \
                 environment variable",
            );
            ts
        }
        Ok(None) => {
            let now = Timestamp::now();
            log::trace!(
                "`TIMESTAMP_NOW` environment variable not set, using \
                 current time `{now}`",
            );
            now
        }
        Err(err) => {
            let now = Timestamp::now();
            log::warn!(
                "reading `TIMESTAMP_NOW` failed, using current time \
                 `{now}`: {err:#}",
            );
            now
        }
    };
    ts.to_zoned(TZ.clone())
});

fn main() -> ExitCode {
    let err = match run() {
        Ok(()) => return ExitCode::SUCCESS,
        Err(err) => err,
    };
    if let Some(help) = err.root_cause().downcast_ref::<args::Help>() {
        writeln!(&mut std::io::stdout(), "{help}").unwrap();
        return ExitCode::SUCCESS;
    }
    // Look for a broken pipe error. In this case, we generally want
    // to exit "gracefully" with a success exit code. This matches
    // existing Unix convention. We need to handle this explicitly
    // since the Rust runtime doesn't ask for PIPE signals, and thus
    // we get an I/O error instead. Traditional C Unix applications
    // quit by getting a PIPE signal that they don't handle, and thus
    // the unhandled signal causes the process to unceremoniously
    // terminate.
    for cause in err.chain() {
        if let Some(err) = cause.downcast_ref::<std::io::Error>() {
            if err.kind() == std::io::ErrorKind::BrokenPipe {
                return ExitCode::from(0);
            }
        }
    }
    if std::env::var("RUST_BACKTRACE").map_or(false, |v| v == "1")
        && std::env::var("RUST_LIB_BACKTRACE").map_or(true, |v| v == "1")
    {
        writeln!(&mut std::io::stderr(), "{:?}", err).unwrap();
    } else {
        writeln!(&mut std::io::stderr(), "{:#}", err).unwrap();
    }
    ExitCode::from(1)
}

fn run() -> anyhow::Result<()> {
    let rustlog = env::var("TIMESTAMP_LOG").unwrap_or_else(|_| String::new());
    let level = match &*rustlog {
        "" | "off" => log::LevelFilter::Off,
        "error" => log::LevelFilter::Error,
        "warn" => log::LevelFilter::Warn,
        "info" => log::LevelFilter::Info,
        "debug" => log::LevelFilter::Debug,
        "trace" => log::LevelFilter::Trace,
        unk => anyhow::bail!("unrecognized log level '{}'", unk),
    };
    log::set_max_level(level);
    // We initialize the logger without a time zone first, so that log
    // messages emitted by `TimeZone::system()` itself (run in the `TZ`
    // lazy lock above) still have somewhere to go. Early messages are
    // emitted in UTC; after that, things become local.
    let logger = logger::Logger::init()?;
    logger.set_time_zone(TZ.clone());

    let args = args::Args::parse(&mut lexopt::Parser::from_env())?;
    let options = args.options;
    let tz = if options.utc { TimeZone::UTC } else { TZ.clone() };
    let zdt = datetime::resolve(&args.mode, &NOW, &tz)?;

    let mut wtr = std::io::stdout().lock();
    match args.mode {
        Mode::Now => {
            writeln!(
                wtr,
                "Current date: {}",
                fmt::format(&zdt, false, &options)?
            )?;
            writeln!(
                wtr,
                "Current UNIX: {}",
                fmt::format(&zdt, true, &options)?
            )?;
        }
        Mode::Timestamp(_) => {
            writeln!(wtr, "{}", fmt::format(&zdt, false, &options)?)?;
        }
        Mode::Today | Mode::DateString(_) => {
            // The first line has a fixed format, on purpose. Only the
            // milliseconds option affects this output, and only on the
            // second line.
            writeln!(wtr, "Parsed date: {}", fmt::parsed(&zdt)?)?;
            writeln!(
                wtr,
                "UNIX Timestamp: {}",
                fmt::format(&zdt, true, &options)?
            )?;
        }
    }
    Ok(())
}

fn read_env_timestamp_now() -> anyhow::Result<Option<Timestamp>> {
    let Some(val) = std::env::var_os("TIMESTAMP_NOW") else {
        return Ok(None);
    };
    let Some(val) = val.to_str() else {
        anyhow::bail!(
            "`TIMESTAMP_NOW` environment variable is not valid UTF-8: {val:?}"
        )
    };
    val.parse::<Timestamp>()
        .context(
            "`TIMESTAMP_NOW` environment variable is not a valid \
             RFC 3339 timestamp",
        )
        .map(Some)
}
