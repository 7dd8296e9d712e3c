//! File-level round-trip: read a batch, merge, export, re-read.

use std::io::Write;

use trackmerge_core::{assign_sample_ids, merge, Value};
use trackmerge_io::{read_path, read_paths, write_csv_path, ReadOptions};

fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut f = std::fs::File::create(&path).unwrap();
    f.write_all(content.as_bytes()).unwrap();
    path
}

#[test]
fn test_batch_to_master_csv_and_back() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_file(
        &dir,
        "m1_p1_ctrl_d1.csv",
        "TID,PID,area\n1,0,10.0\n1,1,12.0\n",
    );
    let b = write_file(&dir, "m2_p2_drug_d1.csv", "TRACK_ID,FRAME,area\n3,0,8.0\n");

    let raw_tables = read_paths(&[a, b], &ReadOptions::default()).unwrap();
    let mut master = merge(&raw_tables).unwrap();
    assign_sample_ids(&mut master).unwrap();
    assert_eq!(master.n_rows(), 3);

    let out = dir.path().join("master.csv");
    write_csv_path(&master, &out).unwrap();

    let reread = read_path(&out, &ReadOptions::default()).unwrap();
    assert_eq!(reread.table.n_rows(), master.n_rows());
    assert_eq!(reread.table.n_columns(), master.n_columns());
    assert_eq!(
        reread.table.column("ID2").unwrap()[0],
        Value::Text("m1_1".into())
    );
    assert_eq!(reread.table.column("area").unwrap()[2], Value::Float(8.0));
}

#[test]
fn test_unreadable_file_fails_the_batch() {
    let dir = tempfile::tempdir().unwrap();
    let good = write_file(&dir, "m1_p1.csv", "a\n1\n");
    let missing = dir.path().join("nope.csv");
    assert!(read_paths(&[good, missing], &ReadOptions::default()).is_err());
}
