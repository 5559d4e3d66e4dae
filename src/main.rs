mod cli;
mod utils;

/// Loads the input file or directory into tables.
///
/// A single file is loaded on the calling thread; a directory is loaded in
/// parallel with a progress bar. Field diagnostics are logged through
/// `tracing`, tagged with their file.
fn load_tables(input: &std::path::Path) -> anyhow::Result<Vec<day_table::DayTable>> {
    if input.is_dir() {
        let bar = day_table::batch::progress_bar(0);
        let tables = day_table::load_dir(
            input,
            |path| day_table::TracingSink::new(path.display().to_string()),
            &bar,
        )?;
        Ok(tables)
    } else {
        let sink = day_table::TracingSink::new(input.display().to_string());
        let table = day_table::read_data(input, sink)?;
        Ok(vec![table])
    }
}

/// Loads, prints, and optionally snapshots the tables.
fn run(args: &cli::Args) -> anyhow::Result<()> {
    let start = std::time::Instant::now();
    let tables = load_tables(&args.input)?;
    println!(
        "✅ Loaded {} table(s) in {:?} seconds",
        tables.len(),
        start.elapsed().as_secs_f64()
    );

    for table in &tables {
        utils::print_table_head(table, args.head);
    }

    let Some(output) = &args.output else {
        return Ok(());
    };

    for table in &tables {
        let path = day_table::snapshot::save(table, output)?;
        println!("💾 Wrote {}", path.display());
    }

    if args.check {
        println!("Start reading...");
        let start = std::time::Instant::now();
        for path in day_table::snapshot::list_snapshots(output)? {
            let table = day_table::snapshot::load(&path)?;
            utils::print_table_head(&table, args.head);
        }
        println!(
            "✅ Reading snapshots complete in {:?} seconds",
            start.elapsed().as_secs_f64()
        );
    }
    Ok(())
}

/// Main entry point of the application.
///
/// 1. Parses command-line arguments.
/// 2. Validates the input path.
/// 3. Determines the number of threads to use.
/// 4. Loads the CSV file(s) and prints the first rows of each table.
/// 5. Optionally writes snapshots and reads them back.
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("day_table=info".parse()?),
        )
        .with_target(false)
        .init();

    let total_start = std::time::Instant::now();
    let args = cli::Args::parse();
    println!("Start loading...");

    if !args.input.exists() {
        return Err(anyhow::anyhow!("Input path does not exist: {}", args.input.display()));
    }

    let effective_threads = utils::effective_threads(args.threads)?;
    println!("🚀 Using {} thread(s)", effective_threads);

    if args.threads.is_some() {
        let local_pool = utils::configure_thread_pool(effective_threads)?;
        local_pool.install(|| run(&args))?;
    } else {
        run(&args)?;
    }

    println!(
        "✅ Completed in {:?} seconds",
        total_start.elapsed().as_secs_f64()
    );
    Ok(())
}
