use lexopt::{Arg, Parser, ValueExt};

/// The condensed usage docs, printed for `-h` and appended to terminal
/// errors.
pub const USAGE_SHORT: &'static str = r#"
Convert a calendar date to or from a UNIX timestamp.

If no timestamp or date is given, prints the current date and UNIX timestamp.

USAGE:
    timestamp [options] [<timestamp> | <date/time>...]

TIP:
    use -h for short docs and --help for long docs

ARGUMENTS:
    <timestamp>     A UNIX timestamp, i.e., the number of seconds elapsed
                    since 1 Jan 1970. Fractional seconds are allowed.
    <date/time>...  A calendar date/time. The special strings `now` and
                    `today` are also accepted.

OPTIONS:
    -h, --help   Show this help message and exit
    -m, --milis  Include milliseconds in the output date or timestamp
    -u, --utc    Interpret input and show output as UTC instead of local time
    -i, --iso    Display the output date in ISO format instead of human format
"#;

/// The long form usage docs, printed for `--help`.
pub const USAGE_LONG: &'static str = r#"
Convert a calendar date to or from a UNIX timestamp.

If no timestamp or date is given, prints the current date and UNIX timestamp.

USAGE:
    timestamp [options] [<timestamp> | <date/time>...]

ARGUMENTS:
    <timestamp>
        A UNIX timestamp, i.e., the number of seconds elapsed since
        1 Jan 1970 00:00:00 UTC. Fractional seconds are allowed, and so is
        a leading sign: `-1.5` refers to one and a half seconds before the
        epoch.

    <date/time>...
        A calendar date/time. Multiple words are joined into a single date
        string, so quoting is optional: `timestamp 1 Jan 2021` works. Most
        common date formats are recognized, e.g., `2021-01-01`,
        `2021-01-01 14:30`, `Jan 1 2021` or `1 Jan 2021 14:30:00`.

        The special strings `now` (the current date and time) and `today`
        (the current date at 00:00 hours) are also accepted, in any case.

        Any time zone information embedded in the date string is ignored.
        The date is always interpreted in the local time zone, or in UTC
        when -u/--utc is given.

OPTIONS:
    -h, --help
        Show this help message and exit. The short flag, -h, shows
        condensed docs, while the long flag, --help, shows these docs.

    -m, --milis
        Include milliseconds in the output date or timestamp. Timestamps
        are printed with exactly three fractional digits, and calendar
        dates get a `.mmm` suffix on the time of day.

    -u, --utc
        Interpret the input date and show output as UTC instead of local
        time. The local time zone comes from the `TZ` environment variable
        when set, and from the system otherwise.

    -i, --iso
        Display the output date in ISO 8601 format, e.g.,
        `2021-01-01T00:00:00Z`, instead of the default human format, e.g.,
        `Fri 1 Jan 2021 00:00:00 UTC`.

ENVIRONMENT:
    TIMESTAMP_NOW
        When set to an RFC 3339 timestamp, it is used as the current time
        instead of the system clock. Mostly useful for testing.

    TIMESTAMP_LOG
        Log level filter for diagnostics on stderr. One of `off`, `error`,
        `warn`, `info`, `debug` or `trace`. Defaults to `off`.

    TZ
        Overrides the system time zone, e.g., `TZ=America/New_York`.
"#;

/// Display options derived once from the flags and threaded into the
/// formatter. Flags only ever turn options on, so repeating one is a no-op.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct DisplayOptions {
    pub milliseconds: bool,
    pub utc: bool,
    pub iso: bool,
}

/// How the instant to display is produced, determined by the positional
/// arguments.
#[derive(Clone, Debug, PartialEq)]
pub enum Mode {
    /// No positional arguments, or the literal `now`.
    Now,
    /// The literal `today`: the current date at midnight.
    Today,
    /// A single numeric argument, in seconds since the epoch.
    Timestamp(f64),
    /// Anything else: free text handed to the date parser.
    DateString(String),
}

/// The fully classified command line.
#[derive(Debug, PartialEq)]
pub struct Args {
    pub mode: Mode,
    pub options: DisplayOptions,
}

impl Args {
    /// Classifies the command line into a mode and a set of display
    /// options.
    ///
    /// Flags are recognized case-insensitively, in both short and long
    /// form, and the long form aliases of the original tool (`--m`,
    /// `--mili`, `--u`, `--i`) are accepted too. Help is handled per
    /// token, before anything else, by returning a `Help` error that the
    /// caller is expected to sniff out and print with a success exit
    /// code.
    pub fn parse(p: &mut Parser) -> anyhow::Result<Args> {
        let mut options = DisplayOptions::default();
        let mut positional: Vec<String> = vec![];
        loop {
            // Pluck out `-1.5` and friends so that negative timestamps
            // aren't mistaken for flags.
            let arg = if let Some(arg) = parse_dash_number(p) {
                arg
            } else if let Some(arg) = p.next()? {
                arg
            } else {
                break;
            };
            match arg {
                Arg::Short(c) => match c.to_ascii_lowercase() {
                    'h' => {
                        return Err(anyhow::Error::from(Help(
                            USAGE_SHORT.trim().to_string(),
                        )));
                    }
                    'm' => options.milliseconds = true,
                    'u' => options.utc = true,
                    'i' => options.iso = true,
                    _ => return Err(unrecognized(&format!("-{c}"))),
                },
                Arg::Long(name) => {
                    match name.to_ascii_lowercase().as_str() {
                        "help" => {
                            return Err(anyhow::Error::from(Help(
                                USAGE_LONG.trim().to_string(),
                            )));
                        }
                        "m" | "mili" | "milis" => options.milliseconds = true,
                        "u" | "utc" => options.utc = true,
                        "i" | "iso" => options.iso = true,
                        _ => {
                            return Err(unrecognized(&format!("--{name}")));
                        }
                    }
                }
                Arg::Value(value) => positional.push(value.string()?),
            }
        }
        let mode = Mode::classify(positional);
        Ok(Args { mode, options })
    }
}

impl Mode {
    fn classify(positional: Vec<String>) -> Mode {
        match positional.len() {
            0 => Mode::Now,
            1 => {
                let arg = &positional[0];
                if arg.eq_ignore_ascii_case("now") {
                    Mode::Now
                } else if arg.eq_ignore_ascii_case("today") {
                    Mode::Today
                } else if let Ok(seconds) = arg.parse::<f64>() {
                    Mode::Timestamp(seconds)
                } else {
                    Mode::DateString(arg.clone())
                }
            }
            _ => Mode::DateString(positional.join(" ")),
        }
    }
}

/// Builds the terminal error for a flag we don't know, with the condensed
/// usage docs attached.
fn unrecognized(token: &str) -> anyhow::Error {
    anyhow::anyhow!(
        "unrecognized option: {token}\n\n{usage}",
        usage = USAGE_SHORT.trim(),
    )
}

/// Attempts to parse a `-[0-9.]{remaining}` token and convert it to a
/// positional argument.
///
/// Timestamps can be negative, so `-1.5` must classify as a positional
/// value and not as a flag. In exchange, no short flag can be an ASCII
/// digit or `.`.
///
/// Ref: https://docs.rs/lexopt/latest/lexopt/struct.Parser.html#method.try_raw_args
fn parse_dash_number(parser: &mut Parser) -> Option<Arg<'_>> {
    parser
        .try_raw_args()?
        .next_if(|arg| {
            let value = arg.as_encoded_bytes();
            value.len() >= 2
                && value[0] == b'-'
                && (value[1].is_ascii_digit() || value[1] == b'.')
        })
        .map(Arg::Value)
}

/// An error type indicating that the error is a `-h/--help` message.
///
/// In other words, it should be printed to stdout with a success exit code.
///
/// We sniff this out in `main` via downcasting an `anyhow::Error`.
#[derive(Debug)]
pub struct Help(String);

impl std::fmt::Display for Help {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for Help {}
