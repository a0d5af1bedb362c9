use log::LevelFilter;
use logicore::Config;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use structopt::StructOpt;

const NAME: &str = "logicore";

const ABOUT: &str = "
logicore runs a script of logic calls against a fresh logic session.
The script is a JSON array of {\"call\": name, \"args\": [...]} objects.
Each result is reported, then an SZS status line for every theorem.
";

pub(crate) enum Output {
    Json,
    TSTP,
    Silent,
}

impl FromStr for Output {
    type Err = String;

    fn from_str(output: &str) -> Result<Self, Self::Err> {
        match output {
            "json" => Ok(Self::Json),
            "tstp" => Ok(Self::TSTP),
            "silent" => Ok(Self::Silent),
            _ => Err(format!("{}: not a valid output", output)),
        }
    }
}

fn parse_seconds(seconds: &str) -> Result<Duration, String> {
    let seconds: f64 = seconds
        .parse()
        .map_err(|_| format!("{}: not a number of seconds", seconds))?;
    if !seconds.is_finite() || seconds < 0.0 || seconds > 1e9 {
        return Err(format!("{}: out of range", seconds));
    }
    Ok(Duration::from_secs_f64(seconds))
}

#[derive(StructOpt)]
#[structopt(name = NAME, author, about = ABOUT)]
pub(crate) struct Options {
    #[structopt(parse(from_os_str), help = "path to input script")]
    pub(crate) path: PathBuf,

    #[structopt(
        long,
        help = "result output",
        possible_values = &["json", "tstp", "silent"],
        default_value = "json"
    )]
    pub(crate) output: Output,

    #[structopt(
        long,
        help = "abandon proof checks after this many seconds",
        parse(try_from_str = parse_seconds)
    )]
    pub(crate) time_limit: Option<Duration>,

    #[structopt(
        long,
        help = "warn about proof checks slower than this many seconds",
        default_value = "1",
        parse(try_from_str = parse_seconds)
    )]
    pub(crate) target: Duration,

    #[structopt(
        long,
        help = "most propositions in a truth table",
        default_value = "12"
    )]
    pub(crate) truth_table_limit: usize,

    #[structopt(
        long,
        help = "log level",
        possible_values = &["off", "error", "warn", "info", "debug", "trace"],
        default_value = "warn"
    )]
    pub(crate) log_level: LevelFilter,
}

impl Options {
    pub(crate) fn parse() -> Self {
        Self::from_args()
    }

    pub(crate) fn config(&self) -> Config {
        Config {
            verification_target: self.target,
            time_limit: self.time_limit,
            truth_table_limit: self.truth_table_limit,
        }
    }

    pub(crate) fn script_name(&self) -> String {
        self.path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "script".to_owned())
    }
}
