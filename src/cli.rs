/// Structure representing command-line arguments.
#[derive(Debug)]
pub struct Args {
    pub input: std::path::PathBuf,
    pub output: Option<std::path::PathBuf>,
    pub threads: Option<usize>,
    pub head: usize,
    pub check: bool,
}

/// Command-line arguments parser using Clap.
impl Args {
    /// Parses command-line arguments using `clap`.
    ///
    /// # Returns
    /// * `Args` - Struct containing parsed arguments.
    pub fn parse() -> Self {
        Self::from_matches(Self::command().get_matches())
    }

    fn command() -> clap::Command {
        clap::Command::new("day-table")
            .version("0.1.0")
            .about("Load daily stock CSV files into columnar tables")
            .arg(
                clap::Arg::new("input")
                    .short('i')
                    .long("input")
                    .help("Path to a daily stock CSV file or a directory of them")
                    .required(true)
                    .num_args(1),
            )
            .arg(
                clap::Arg::new("output")
                .short('o')
                .long("output")
                .help("Directory to write table snapshots (.bin) to")
                .num_args(1),
            )
            .arg(
                clap::Arg::new("threads")
                .short('t')
                .long("threads")
                .help("Number of threads to use (default: all available)")
                .num_args(1)
                .value_parser(clap::builder::ValueParser::new(parse_usize_positive)),
            )
            .arg(
                clap::Arg::new("head")
                .short('n')
                .long("head")
                .help("Number of rows to print per table")
                .num_args(1)
                .default_value("5")
                .value_parser(clap::value_parser!(usize)),
            )
            .arg(
                clap::Arg::new("check")
                .short('c')
                .long("check")
                .help("After writing snapshots, read them back and print the first rows")
                .required(false)
                .action(clap::ArgAction::SetTrue)
                .requires("output")
            )
    }

    fn from_matches(matches: clap::ArgMatches) -> Self {
        Args {
            input: matches
                .get_one::<String>("input")
                .map(std::path::PathBuf::from)
                .unwrap_or_default(),
            output: matches.get_one::<String>("output").map(std::path::PathBuf::from),
            threads: matches.get_one::<usize>("threads").cloned(),
            head: matches.get_one::<usize>("head").cloned().unwrap_or(5),
            check: matches.get_flag("check"),
        }
    }
}

/// Validates that the number of threads is a positive integer.
///
/// # Arguments
/// * `s` - String representation of the number of threads.
///
/// # Returns
/// * `Result<usize>` - Validated number of threads.
fn parse_usize_positive(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("Must be a positive integer".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(format!("Not a valid number: {}", e)),
    }
}
