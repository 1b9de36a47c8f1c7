mod app;
mod help;
mod jumpto;
mod theme;
use crate::app::{App, WeekLog};
use anyhow::Context;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
};
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::ffi::OsString;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use time::{format_description::FormatItem, macros::format_description, Date, OffsetDateTime};
use weekpager::{LabelFormat, WeekPager, WeekSelectorState, WeekStart, Whitelist};

static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Options {
    date: Option<Date>,
    week_start: WeekStart,
    from: Option<Date>,
    until: Option<Date>,
    day_format: Option<String>,
    month_format: Option<String>,
    log_file: Option<PathBuf>,
}

impl Options {
    fn into_pager(self, today: Date) -> anyhow::Result<WeekPager<WeekLog>> {
        let whitelist =
            Whitelist::new(self.from, self.until).context("invalid --from/--until range")?;
        let mut label_format = LabelFormat::default();
        if let Some(pattern) = self.day_format {
            label_format = label_format
                .with_day_format(&pattern)
                .with_context(|| format!("invalid --day-format {pattern:?}"))?;
        }
        if let Some(pattern) = self.month_format {
            label_format = label_format
                .with_month_format(&pattern)
                .with_context(|| format!("invalid --month-format {pattern:?}"))?;
        }
        let mut pager = WeekPager::new(today)
            .with_week_start(self.week_start)
            .with_whitelist(whitelist)
            .with_label_format(label_format)
            .with_observer(WeekLog::default());
        if let Some(date) = self.date {
            pager = pager.with_anchor(date);
        }
        Ok(pager)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(Options),
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut opts = Options::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('s') | Arg::Long("week-start") => {
                    opts.week_start = parser.value()?.parse()?;
                }
                Arg::Short('f') | Arg::Long("from") => {
                    opts.from = Some(parse_date(&parser.value()?)?);
                }
                Arg::Short('u') | Arg::Long("until") => {
                    opts.until = Some(parse_date(&parser.value()?)?);
                }
                Arg::Long("day-format") => opts.day_format = Some(parser.value()?.string()?),
                Arg::Long("month-format") => opts.month_format = Some(parser.value()?.string()?),
                Arg::Long("log-file") => opts.log_file = Some(PathBuf::from(parser.value()?)),
                Arg::Value(value) if opts.date.is_none() => opts.date = Some(parse_date(&value)?),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run(opts))
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run(opts) => {
                init_logging(opts.log_file.as_deref())?;
                let today = OffsetDateTime::now_local()
                    .context("failed to determine local date")?
                    .date();
                let pager = opts.into_pager(today)?;
                log::info!(
                    "Starting at {} with weeks beginning on {}",
                    pager.anchor(),
                    pager.week_start()
                );
                with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    App::new(WeekSelectorState::new(pager)).run(terminal)?;
                    Ok(())
                })
            }
            Command::Help => {
                println!("Usage: weekpager [OPTIONS] [YYYY-MM-DD]");
                println!();
                println!("Page through a calendar one week at a time");
                println!();
                println!("Options:");
                println!("  -s, --week-start <DAY>     Day weeks begin on: 0-6 (0 = Sunday) or a");
                println!("                             weekday name [default: monday]");
                println!("  -f, --from <YYYY-MM-DD>    Earliest date that can be paged to");
                println!("  -u, --until <YYYY-MM-DD>   Latest date that can be paged to");
                println!("      --day-format <FMT>     Format description for days [default: [day]]");
                println!("      --month-format <FMT>   Format description for months");
                println!("                             [default: [month repr:long]]");
                println!("      --log-file <PATH>      Write log messages to PATH; filter with RUST_LOG");
                println!("  -h, --help                 Display this help message and exit");
                println!("  -V, --version              Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

fn parse_date(value: &OsString) -> Result<Date, lexopt::Error> {
    value.parse_with(|s| Date::parse(s, YMD_FMT))
}

/// Log to the given file, if any.  Logging to the terminal would garble the
/// display, so nothing is logged when no file is given.
fn init_logging(path: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("failed to initialize logger")?;
    Ok(())
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = execute!(io::stdout(), EnableMouseCapture)
        .context("failed to enable mouse capture")
        .and_then(|()| func(terminal));
    release_mouse(io::stdout());
    ratatui::restore();
    r
}

/// Turn mouse reporting back off.  A failure here is only logged so that it
/// doesn't mask the result of the program proper.
fn release_mouse<W: Write>(mut out: W) -> bool {
    match execute!(out, DisableMouseCapture) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("Failed to disable mouse capture: {e}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::ErrorKind::BrokenPipe.into())
        }
    }

    fn parse_args(args: &[&str]) -> Result<Command, lexopt::Error> {
        Command::from_parser(Parser::from_iter(
            std::iter::once("weekpager").chain(args.iter().copied()),
        ))
    }

    #[test]
    fn test_no_args() {
        assert_eq!(parse_args(&[]).unwrap(), Command::Run(Options::default()));
    }

    #[test]
    fn test_all_options() {
        let cmd = parse_args(&[
            "--week-start",
            "sunday",
            "-f",
            "2021-03-01",
            "--until=2021-03-31",
            "--day-format",
            "[day padding:none]",
            "--log-file",
            "weeks.log",
            "2021-03-10",
        ])
        .unwrap();
        assert_eq!(
            cmd,
            Command::Run(Options {
                date: Some(date!(2021 - 03 - 10)),
                week_start: WeekStart::SUNDAY,
                from: Some(date!(2021 - 03 - 01)),
                until: Some(date!(2021 - 03 - 31)),
                day_format: Some(String::from("[day padding:none]")),
                month_format: None,
                log_file: Some(PathBuf::from("weeks.log")),
            })
        );
    }

    #[test]
    fn test_numeric_week_start() {
        let Command::Run(opts) = parse_args(&["-s", "3"]).unwrap() else {
            panic!("expected Command::Run");
        };
        assert_eq!(opts.week_start, WeekStart::new(time::Weekday::Wednesday));
    }

    #[test]
    fn test_bad_values() {
        assert!(parse_args(&["-s", "7"]).is_err());
        assert!(parse_args(&["--from", "March"]).is_err());
        assert!(parse_args(&["2021-03-10", "2021-03-11"]).is_err());
    }

    #[test]
    fn test_help_wins() {
        assert_eq!(parse_args(&["-s", "0", "--help"]).unwrap(), Command::Help);
    }

    #[test]
    fn test_into_pager() {
        let opts = Options {
            date: Some(date!(2021 - 04 - 15)),
            from: Some(date!(2021 - 03 - 01)),
            until: Some(date!(2021 - 03 - 31)),
            day_format: Some(String::from("[day padding:none]")),
            ..Options::default()
        };
        let pager = opts.into_pager(date!(2021 - 03 - 10)).unwrap();
        assert_eq!(pager.anchor(), date!(2021 - 03 - 31));
        assert_eq!(pager.label().unwrap(), "29 March - 4 April");
        assert!(!pager.can_go_next());
    }

    #[test]
    fn test_into_pager_rejects_inverted_range() {
        let opts = Options {
            from: Some(date!(2021 - 03 - 31)),
            until: Some(date!(2021 - 03 - 01)),
            ..Options::default()
        };
        assert!(opts.into_pager(date!(2021 - 03 - 10)).is_err());
    }

    #[test]
    fn test_release_mouse() {
        let mut out = Vec::new();
        assert!(release_mouse(&mut out));
        assert!(!out.is_empty());
        assert!(!release_mouse(BrokenPipe));
    }

    #[test]
    fn test_into_pager_rejects_bad_format() {
        let opts = Options {
            month_format: Some(String::from("[minute]")),
            ..Options::default()
        };
        assert!(opts.into_pager(date!(2021 - 03 - 10)).is_err());
    }
}
