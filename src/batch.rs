use crate::diagnostics;
use crate::error::LoadError;
use crate::loader;
use crate::table;

use rayon::prelude::*;

/// Lists `.csv` files directly inside `dir`, sorted by path.
pub fn list_csv_files<P: AsRef<std::path::Path>>(dir: P) -> Result<Vec<std::path::PathBuf>, LoadError> {
    let mut paths = std::fs::read_dir(dir.as_ref())?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| {
            path.extension()
                .map_or(false, |ext| ext.eq_ignore_ascii_case("csv"))
        })
        .collect::<Vec<_>>();
    paths.sort();
    Ok(paths)
}

/// Creates a progress bar for `len` files in the same style for every batch.
pub fn progress_bar(len: u64) -> indicatif::ProgressBar {
    let bar = indicatif::ProgressBar::new(len);
    let style = indicatif::ProgressStyle::with_template(
        "[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}",
    )
    .unwrap_or_else(|_| indicatif::ProgressStyle::default_bar())
    .progress_chars("#>-");
    bar.set_style(style);
    bar
}

/// Loads every daily CSV file in a directory, one stock per file.
///
/// Files are loaded in parallel on the current rayon pool. Each file gets
/// its own sink from `make_sink`, so sinks never cross threads. `progress`
/// advances once per finished file; pass `ProgressBar::hidden()` to stay quiet.
///
/// # Arguments
/// * `dir` - Directory with `.csv` files.
/// * `make_sink` - Builds the diagnostics sink for one file path.
/// * `progress` - Progress bar to advance.
///
/// # Returns
/// * `Result<Vec<DayTable>, LoadError>` - Tables sorted by stock code, or the
///   first fatal error met.
pub fn load_dir<P, F, S>(
    dir: P,
    make_sink: F,
    progress: &indicatif::ProgressBar,
) -> Result<Vec<table::DayTable>, LoadError>
where
    P: AsRef<std::path::Path>,
    F: Fn(&std::path::Path) -> S + Sync,
    S: diagnostics::DiagnosticSink,
{
    let paths = list_csv_files(dir)?;
    progress.set_length(paths.len() as u64);

    let mut tables = paths
        .par_iter()
        .map(|path| {
            let tbl = loader::read_data(path, make_sink(path))?;
            progress.inc(1);
            Ok::<_, LoadError>(tbl)
        })
        .collect::<Result<Vec<_>, _>>()?;
    progress.finish_with_message("loaded");

    tables.sort_by(|a, b| a.stock_code().cmp(b.stock_code()));
    Ok(tables)
}
