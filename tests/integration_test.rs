//! Integration tests for the feature-extraction pipeline

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use slickstats::batch::{run_batch, FeatureTable};
use slickstats::classification::ClassLookup;
use slickstats::io::load_band;
use slickstats::stats::extract_features;
use slickstats::stats::HEADER;

/// Fresh scratch directory for one test
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("slickstats_it_{}_{}", std::process::id(), name));
    if dir.exists() {
        fs::remove_dir_all(&dir).unwrap();
    }
    fs::create_dir_all(&dir).unwrap();
    dir
}

/// Write a band in the array CSV export format
///
/// Header line `row/col,0,1,...`, then one line per raster row with
/// the row index first. NaN samples are written as `nan`.
fn write_band_csv(path: &Path, rows: &[Vec<f64>]) {
    let mut out = String::from("row/col");
    for x in 0..rows.first().map(|r| r.len()).unwrap_or(0) {
        out.push_str(&format!(",{}", x));
    }
    out.push('\n');

    for (y, row) in rows.iter().enumerate() {
        out.push_str(&format!("{}", y));
        for v in row {
            if v.is_nan() {
                out.push_str(",nan");
            } else {
                out.push_str(&format!(",{}", v));
            }
        }
        out.push('\n');
    }

    fs::write(path, out).unwrap();
}

/// Write a band as a minimal NPY v1.0 file with `<f8` samples
fn write_band_npy(path: &Path, rows: usize, cols: usize, data: &[f64]) {
    assert_eq!(data.len(), rows * cols);

    let header = format!(
        "{{'descr': '<f8', 'fortran_order': False, 'shape': ({}, {}), }}\n",
        rows, cols
    );

    let mut file = fs::File::create(path).unwrap();
    file.write_all(b"\x93NUMPY").unwrap();
    file.write_all(&[0x01, 0x00]).unwrap();
    file.write_all(&(header.len() as u16).to_le_bytes()).unwrap();
    file.write_all(header.as_bytes()).unwrap();
    for v in data {
        file.write_all(&v.to_le_bytes()).unwrap();
    }
}

/// The 3x3-of-5 foreground with no-data corners
fn reference_foreground_rows() -> Vec<Vec<f64>> {
    let nan = f64::NAN;
    vec![
        vec![nan, 5.0, nan],
        vec![5.0, 5.0, 5.0],
        vec![nan, 5.0, nan],
    ]
}

/// The 5x5-of-10 background with a 3x3 no-data hole
fn reference_background_rows() -> Vec<Vec<f64>> {
    let nan = f64::NAN;
    vec![
        vec![10.0, 10.0, 10.0, 10.0, 10.0],
        vec![10.0, nan, nan, nan, 10.0],
        vec![10.0, nan, nan, nan, 10.0],
        vec![10.0, nan, nan, nan, 10.0],
        vec![10.0, 10.0, 10.0, 10.0, 10.0],
    ]
}

fn write_classes_csv(path: &Path) {
    fs::write(
        path,
        "ID_POLY,CLASSE,SUBCLASSE\n\
         r1,Oil,Seep\n\
         r2,Oil,Spill\n\
         r3,Lookalike,Low wind\n",
    )
    .unwrap();
}

/// Write one clip/scene pair into a batch directory
fn write_region(dir: &Path, id: &str, fg: &[Vec<f64>], bg: &[Vec<f64>]) {
    write_band_csv(&dir.join(format!("{}_background.csv", id)), fg);
    write_band_csv(&dir.join(format!("{}.csv", id)), bg);
}

#[test]
fn test_end_to_end_reference_pair() {
    let dir = scratch_dir("reference_pair");
    let fg_path = dir.join("0042_3_background.csv");
    let bg_path = dir.join("0042_3.csv");
    write_band_csv(&fg_path, &reference_foreground_rows());
    write_band_csv(&bg_path, &reference_background_rows());

    let foreground = load_band(&fg_path).unwrap();
    let background = load_band(&bg_path).unwrap();

    let mut classes = ClassLookup::empty();
    classes.insert("0042", "Oil", "Seep");

    let record = extract_features(
        &foreground,
        &background,
        "21 S1B_IW_GRDH_1SDV_20200802T001516",
        "0042_3_background.csv",
        &classes,
    )
    .unwrap();

    assert_eq!(record.fg_mean, 5.0);
    assert_eq!(record.bg_mean, 10.0);
    assert_eq!(record.fg_bg_max_contrast, 5.0);
    assert_eq!(record.power_mean_ratio, 0.5);
    assert_eq!(record.fg_var_coef, 0.0);
    assert_eq!(record.bg_var_coef, 0.0);
    assert_eq!(record.img_number, "21");
    assert_eq!(record.id_poly, "0042_3");
    assert_eq!(record.classe, "Oil");
}

#[test]
fn test_npy_band_loading() {
    let dir = scratch_dir("npy_band");
    let path = dir.join("band.npy");
    write_band_npy(&path, 2, 3, &[1.0, 2.0, f64::NAN, 4.0, 5.0, 6.0]);

    let band = load_band(&path).unwrap();
    assert_eq!(band.width(), 3);
    assert_eq!(band.height(), 2);
    assert_eq!(band.get(0, 0), Some(1.0));
    assert!(band.get(2, 0).unwrap().is_nan());
    assert_eq!(band.get(2, 1), Some(6.0));
}

#[test]
fn test_batch_skips_bad_region_and_continues() {
    let dir = scratch_dir("batch_skip");

    let fg = reference_foreground_rows();
    let bg = reference_background_rows();
    write_region(&dir, "r1", &fg, &bg);
    write_region(&dir, "r2", &fg, &bg);
    write_region(&dir, "r4", &fg, &bg);
    write_region(&dir, "r5", &fg, &bg);

    // r3 has an all-no-data background band
    let nan = f64::NAN;
    let dead_bg = vec![vec![nan; 5]; 5];
    write_region(&dir, "r3", &fg, &dead_bg);

    let classes_path = dir.join("classes.csv");
    write_classes_csv(&classes_path);
    let classes = ClassLookup::load(classes_path.to_str().unwrap()).unwrap();

    let output = dir.join("features.csv");
    let mut table = FeatureTable::open(&output).unwrap();
    let summary = run_batch(&dir, "21 scene", &classes, &mut table).unwrap();
    drop(table);

    assert_eq!(summary.written, 4);
    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].clip_name, "r3_background.csv");

    let content = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 5, "header plus four data rows");
    assert_eq!(lines[0], HEADER.join(","));

    // Clips are processed in sorted order; the failed region is absent
    let ids: Vec<&str> = lines[1..]
        .iter()
        .map(|l| l.split(',').nth(2).unwrap())
        .collect();
    assert_eq!(ids, vec!["r1", "r2", "r4", "r5"]);

    // Labeled regions carry their labels, unlabeled fall back to Unknown
    assert!(lines[1].contains("Oil,Seep"));
    assert!(lines[3].contains("Unknown,Unknown"));
}

#[test]
fn test_rerun_appends_without_duplicate_header() {
    let dir = scratch_dir("batch_rerun");

    let fg = reference_foreground_rows();
    let bg = reference_background_rows();
    write_region(&dir, "r1", &fg, &bg);
    write_region(&dir, "r2", &fg, &bg);

    let classes_path = dir.join("classes.csv");
    write_classes_csv(&classes_path);
    let classes = ClassLookup::load(classes_path.to_str().unwrap()).unwrap();

    let output = dir.join("features.csv");

    for _ in 0..2 {
        let mut table = FeatureTable::open(&output).unwrap();
        let summary = run_batch(&dir, "21 scene", &classes, &mut table).unwrap();
        assert_eq!(summary.written, 2);
    }

    let content = fs::read_to_string(&output).unwrap();
    let header_count = content
        .lines()
        .filter(|l| *l == HEADER.join(","))
        .count();
    assert_eq!(header_count, 1, "header must be written exactly once");
    assert_eq!(content.lines().count(), 5, "header plus two rows per run");
}
