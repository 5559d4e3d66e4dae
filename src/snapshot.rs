use crate::error::SnapshotError;
use crate::table;

/// Extension of snapshot files.
pub const SNAPSHOT_EXTENSION: &str = "bin";

/// Path of the snapshot for `table` inside `dir`: `<stock_code>.bin`.
///
/// # Errors
/// * `SnapshotError::InvalidName` if the stock code is not a single plain
///   file name (no separators, no root, no `..`).
pub fn snapshot_path<P: AsRef<std::path::Path>>(
    dir: P,
    table: &table::DayTable,
) -> Result<std::path::PathBuf, SnapshotError> {
    let name = if table.stock_code().is_empty() {
        "unknown"
    } else {
        table.stock_code()
    };
    let mut components = std::path::Path::new(name).components();
    let plain = matches!(
        (components.next(), components.next()),
        (Some(std::path::Component::Normal(part)), None) if part == name
    );
    if !plain {
        return Err(SnapshotError::InvalidName(name.to_string()));
    }
    Ok(dir.as_ref().join(format!("{}.{}", name, SNAPSHOT_EXTENSION)))
}

/// Serializes a loaded table with `bincode` into `dir`.
///
/// # Arguments
/// * `table` - Table to persist.
/// * `dir` - Output directory; created if missing.
///
/// # Returns
/// * `Result<PathBuf, SnapshotError>` - Path of the written file.
pub fn save<P: AsRef<std::path::Path>>(
    table: &table::DayTable,
    dir: P,
) -> Result<std::path::PathBuf, SnapshotError> {
    let path = snapshot_path(dir.as_ref(), table)?;
    std::fs::create_dir_all(dir.as_ref())?;
    let data = bincode::serialize(table)?;
    std::fs::write(&path, data)?;
    tracing::debug!(path = %path.display(), rows = table.len(), "snapshot written");
    Ok(path)
}

/// Reads a snapshot back through a read-only memory map.
///
/// # Errors
/// * `SnapshotError::Io` if the file cannot be opened or mapped.
/// * `SnapshotError::Encoding` if the bytes are not a table.
/// * `SnapshotError::Misaligned` if the decoded columns differ in length.
pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<table::DayTable, SnapshotError> {
    let file = std::fs::File::open(path.as_ref())?;
    // SAFETY: the map is read-only and dropped before returning; snapshot
    // files are not modified while a load is in progress.
    let mmap = unsafe { memmap2::Mmap::map(&file)? };
    let table: table::DayTable = bincode::deserialize(&mmap)?;
    if !table.is_aligned() {
        return Err(SnapshotError::Misaligned(path.as_ref().display().to_string()));
    }
    Ok(table)
}

/// Lists snapshot files in `dir`, sorted by path.
pub fn list_snapshots<P: AsRef<std::path::Path>>(dir: P) -> Result<Vec<std::path::PathBuf>, SnapshotError> {
    let mut paths = std::fs::read_dir(dir.as_ref())?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().map_or(false, |ext| ext == SNAPSHOT_EXTENSION))
        .collect::<Vec<_>>();
    paths.sort();
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics;
    use crate::loader;

    const DATA: &str = "date,code,open,high,low,close,preclose,volume,amount,adjustflag,turn,tradestatus,pctChg,peTTM,pbMRQ,psTTM,pcfNcfTTM,isST\n\
        2020-01-02,sh.600000,10.0,10.5,9.8,10.2,10.0,1000000,10200000,1,0.5,1,2.0,15.3,1.2,2.1,8.4,0\n\
        2020-01-03,sh.600000,10.2,10.2,10.2,10.2,10.2,0,0,1,,0,0.0,15.3,1.2,2.1,8.4,0\n";

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let tbl = loader::read_data_from_reader(DATA.as_bytes(), diagnostics::NullSink).unwrap();

        let path = save(&tbl, dir.path().join("out")).unwrap();
        assert_eq!(path, dir.path().join("out").join("600000.bin"));
        assert_eq!(list_snapshots(dir.path().join("out")).unwrap(), vec![path.clone()]);

        let restored = load(&path).unwrap();
        assert_eq!(restored, tbl);
        assert_eq!(restored.suspended_days(), vec![1]);
    }

    #[test]
    fn test_load_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("junk.bin");
        std::fs::write(&path, [1u8, 2, 3]).unwrap();
        assert!(matches!(load(&path), Err(SnapshotError::Encoding(_))));
    }

    #[test]
    fn test_empty_table_name() {
        let tbl = table::DayTable::default();
        assert_eq!(
            snapshot_path("/tmp", &tbl).unwrap(),
            std::path::Path::new("/tmp/unknown.bin")
        );
    }

    fn table_with_code(code: &str) -> table::DayTable {
        let header = DATA.lines().next().unwrap();
        let data = format!("{}\n2020-01-02,{},0,0,0,0,0,0,0,1,,1,0,0,0,0,0,0\n", header, code);
        loader::read_data_from_reader(data.as_bytes(), diagnostics::NullSink).unwrap()
    }

    #[test]
    fn test_code_cannot_leave_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        for code in ["sh./tmp/evil", "sh.a/b", "sh.a/", "sh./"] {
            let tbl = table_with_code(code);
            match save(&tbl, &out) {
                Err(SnapshotError::InvalidName(_)) => {}
                other => panic!("{} gave {:?}", code, other),
            }
        }
        assert!(!out.exists());
    }

    #[test]
    fn test_dotted_code_keeps_full_name() {
        let tbl = table_with_code("sz.000001");
        assert_eq!(
            snapshot_path("/data", &tbl).unwrap(),
            std::path::Path::new("/data/000001.bin")
        );
    }
}
