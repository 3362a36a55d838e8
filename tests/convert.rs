use crate::{command::assert_cmd_snapshot, timestamp, timestamp_bare};

/// The literal `now` behaves like no arguments at all, in any case.
#[test]
fn now() {
    assert_cmd_snapshot!(
        timestamp(["now"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Current date: Sat 20 Jul 2024 16:30:55 EDT (UTC-4)
    Current UNIX: 1721507455

    ----- stderr -----
    ",
    );
    assert_cmd_snapshot!(
        timestamp(["NOW"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Current date: Sat 20 Jul 2024 16:30:55 EDT (UTC-4)
    Current UNIX: 1721507455

    ----- stderr -----
    ",
    );
}

/// Milliseconds show up in both the calendar date and the timestamp.
#[test]
fn now_with_milliseconds() {
    assert_cmd_snapshot!(
        timestamp(["-m"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Current date: Sat 20 Jul 2024 16:30:55.123 EDT (UTC-4)
    Current UNIX: 1721507455.123

    ----- stderr -----
    ",
    );
}

#[test]
fn now_utc_iso() {
    assert_cmd_snapshot!(
        timestamp(["--utc", "--iso", "now"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Current date: 2024-07-20T20:30:55Z
    Current UNIX: 1721507455

    ----- stderr -----
    ",
    );
}

/// ISO output in local time gets a numeric offset instead of `Z`.
#[test]
fn now_iso_local() {
    assert_cmd_snapshot!(
        timestamp(["-i"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Current date: 2024-07-20T16:30:55-0400
    Current UNIX: 1721507455

    ----- stderr -----
    ",
    );
}

/// Flags are case-insensitive, and so are the special strings.
#[test]
fn shouting_works_too() {
    assert_cmd_snapshot!(
        timestamp(["--UTC", "--ISO", "NOW"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Current date: 2024-07-20T20:30:55Z
    Current UNIX: 1721507455

    ----- stderr -----
    ",
    );
}

/// A numeric argument is a UNIX timestamp and prints a single calendar
/// line, with no prefix.
#[test]
fn timestamp_local() {
    assert_cmd_snapshot!(
        timestamp(["1609459200"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Thu 31 Dec 2020 19:00:00 EST (UTC-5)

    ----- stderr -----
    ",
    );
}

#[test]
fn timestamp_utc_iso() {
    assert_cmd_snapshot!(
        timestamp(["--utc", "--iso", "1609459200"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2021-01-01T00:00:00Z

    ----- stderr -----
    ",
    );
}

/// Fractional seconds survive the numeric parse and show up with `-m`.
#[test]
fn timestamp_fractional() {
    assert_cmd_snapshot!(
        timestamp(["-m", "-u", "-i", "1609459200.5"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2021-01-01T00:00:00.500Z

    ----- stderr -----
    ",
    );
    assert_cmd_snapshot!(
        timestamp(["-m", "1609459200.25"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Thu 31 Dec 2020 19:00:00.250 EST (UTC-5)

    ----- stderr -----
    ",
    );
}

/// A leading dash on a number is a sign, not a flag.
#[test]
fn timestamp_negative() {
    assert_cmd_snapshot!(
        timestamp(["-u", "-i", "-m", "-1.5"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    1969-12-31T23:59:58.500Z

    ----- stderr -----
    ",
    );
}

/// `today` resolves to midnight of the current date, and prints in the
/// fixed "Parsed date" format.
#[test]
fn today() {
    assert_cmd_snapshot!(
        timestamp(["today"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Parsed date: 2024-Jul-20 00:00:00 EDT
    UNIX Timestamp: 1721448000

    ----- stderr -----
    ",
    );
}

#[test]
fn today_utc() {
    assert_cmd_snapshot!(
        timestamp(["--utc", "today"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Parsed date: 2024-Jul-20 00:00:00 UTC
    UNIX Timestamp: 1721433600

    ----- stderr -----
    ",
    );
}

/// The milliseconds option affects the timestamp line but never the
/// fixed-format parsed date line.
#[test]
fn today_with_milliseconds() {
    assert_cmd_snapshot!(
        timestamp(["-m", "today"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Parsed date: 2024-Jul-20 00:00:00 EDT
    UNIX Timestamp: 1721448000.000

    ----- stderr -----
    ",
    );
}

/// Multiple positional arguments are joined into one date string, so no
/// quoting is needed.
#[test]
fn date_string() {
    assert_cmd_snapshot!(
        timestamp(["Jan", "1", "2021"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Parsed date: 2021-Jan-01 00:00:00 EST
    UNIX Timestamp: 1609477200

    ----- stderr -----
    ",
    );
}

/// With `--utc`, the date string is interpreted as UTC wall clock time.
#[test]
fn date_string_utc() {
    assert_cmd_snapshot!(
        timestamp(["--utc", "Jan", "1", "2021"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Parsed date: 2021-Jan-01 00:00:00 UTC
    UNIX Timestamp: 1609459200

    ----- stderr -----
    ",
    );
}

#[test]
fn date_string_with_time() {
    assert_cmd_snapshot!(
        timestamp(["2021-01-01", "14:30"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Parsed date: 2021-Jan-01 14:30:00 EST
    UNIX Timestamp: 1609529400

    ----- stderr -----
    ",
    );
}

/// The `--iso` flag has no effect on the fixed parsed date line.
#[test]
fn date_string_ignores_iso() {
    assert_cmd_snapshot!(
        timestamp(["-i", "Jan", "1", "2021"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Parsed date: 2021-Jan-01 00:00:00 EST
    UNIX Timestamp: 1609477200

    ----- stderr -----
    ",
    );
}

/// Unparseable date text is a terminal error: message plus usage on
/// stderr and a failing exit code.
#[test]
fn date_string_parse_error() {
    assert_cmd_snapshot!(
        timestamp(["not", "a", "real", "date"]),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    could not parse date string `not a real date`

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
    ",
    );
}

/// So is a flag we don't recognize.
#[test]
fn unrecognized_option() {
    assert_cmd_snapshot!(
        timestamp(["--bogus"]),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    unrecognized option: --bogus

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
    ",
    );
}

#[test]
fn unrecognized_short_option() {
    assert_cmd_snapshot!(
        timestamp(["-x", "now"]),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    unrecognized option: -x

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
    ",
    );
}

/// Help prints to stdout and exits with success, even when other
/// arguments are present after it.
#[test]
fn help_short() {
    assert_cmd_snapshot!(
        timestamp(["-h", "1609459200"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
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

    ----- stderr -----
    ",
    );
}

/// The long help is more than a usage dump, so just sanity check it.
#[test]
fn help_long() {
    let snap = timestamp_bare().arg("--help").snapshot();
    let out = snap.snapshot();
    assert!(out.starts_with("success: true"), "{out}");
    assert!(out.contains("TIMESTAMP_NOW"), "{out}");
    assert!(out.contains("-m, --milis"), "{out}");
}
