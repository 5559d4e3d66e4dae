use day_table::DayTable;

/// Configures a custom Rayon thread pool with specified size.
///
/// Used when the user asks for an explicit thread count, separate from the
/// global Rayon pool.
///
/// # Arguments
/// * `num_threads` - Desired number of threads for the pool.
///
/// # Returns
/// * `Result<ThreadPool>` - Created thread pool or an error if creation fails.
pub fn configure_thread_pool(num_threads: usize) -> anyhow::Result<rayon::ThreadPool> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build thread pool: {}", e))
}

/// Resolves the thread count to use, capped at the number of available CPUs.
///
/// # Arguments
/// * `requested` - Thread count from the command line, if any.
///
/// # Returns
/// * `anyhow::Result<usize>` - Effective thread count, or an error for zero.
pub fn effective_threads(requested: Option<usize>) -> anyhow::Result<usize> {
    match requested {
        Some(n) if n > 0 => {
            let max_threads = num_cpus::get();
            if n > max_threads {
                println!("⚠️ Warning: Limiting thread count to {} (max available)", max_threads);
                Ok(max_threads)
            } else {
                Ok(n)
            }
        }
        Some(_) => Err(anyhow::anyhow!("Number of threads must be a positive integer")),
        None => Ok(rayon::current_num_threads()),
    }
}

/// Formats one trading day as a printable line.
///
/// # Example Output
/// ```text
///  - 2020-01-02 open: 10.00, high: 10.50, low: 9.80, close: 10.20, preclose: 10.00, vol: 1000000, turn: 0.50, status: 1
/// ```
pub fn format_row(table: &DayTable, index: usize) -> Option<String> {
    let row = table.row(index)?;
    Some(format!(
        " - {} open: {:.2}, high: {:.2}, low: {:.2}, close: {:.2}, preclose: {:.2}, vol: {}, turn: {:.2}, status: {}",
        row.date.format("%Y-%m-%d"),
        row.open,
        row.high,
        row.low,
        row.close,
        row.pre_close,
        row.volume,
        row.turn,
        row.trade_status,
    ))
}

/// Prints a short summary and the first `count` rows of a table.
pub fn print_table_head(table: &DayTable, count: usize) {
    println!(
        "📄 {}: {} trading days, {} suspended, {} ex-rights",
        table.stock_code(),
        table.len(),
        table.suspended_days().len(),
        table.ex_rights_days().len(),
    );
    for i in 0..std::cmp::min(count, table.len()) {
        if let Some(line) = format_row(table, i) {
            println!("{}", line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_threads_rejected() {
        assert!(effective_threads(Some(0)).is_err());
        assert_eq!(effective_threads(Some(1)).unwrap(), 1);
        assert!(effective_threads(None).unwrap() >= 1);
    }

    #[test]
    fn test_format_row() {
        let data = "date,code,open,high,low,close,preclose,volume,amount,adjustflag,turn,tradestatus,pctChg,peTTM,pbMRQ,psTTM,pcfNcfTTM,isST\n\
            2020-01-02,sh.600000,10.0,10.5,9.8,10.2,10.0,1000000,10200000,1,0.5,1,2.0,15.3,1.2,2.1,8.4,0\n";
        let tbl = day_table::read_data_from_reader(data.as_bytes(), day_table::NullSink).unwrap();
        assert_eq!(
            format_row(&tbl, 0).unwrap(),
            " - 2020-01-02 open: 10.00, high: 10.50, low: 9.80, close: 10.20, preclose: 10.00, vol: 1000000, turn: 0.50, status: 1"
        );
        assert!(format_row(&tbl, 1).is_none());
    }
}
