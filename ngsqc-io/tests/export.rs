use std::io::Write;
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::GzEncoder;
use ndarray::{Array1, Array2};
use ndarray_npy::read_npy;
use pretty_assertions::assert_eq;
use rstest::*;

use ngsqc_core::ChromSizes;
use ngsqc_io::{
    ExportMeta, LOCAL_QC_DISPERSION_FILE, LOCAL_QC_FLAG_FILE, LOCAL_QC_INTENSITY_FILE, META_FILE,
    ProfileWrite, WIGGLES_FILE,
};
use ngsqc_profile::{ProfileConfig, ProfileStore, QcMode};

struct Inputs {
    _tempdir: tempfile::TempDir,
    dir: PathBuf,
}

impl Inputs {
    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }
}

fn write_gz(path: &Path, data: &[u8]) {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    std::fs::write(path, encoder.finish().unwrap()).unwrap();
}

#[fixture]
fn inputs() -> Inputs {
    let tempdir = tempfile::tempdir().unwrap();
    let dir = tempdir.path().to_path_buf();

    std::fs::write(dir.join("dm6.chrom.sizes"), b"chr2L\t1000\nchr4\t260\n").unwrap();

    write_gz(
        &dir.join("reads.bed.gz"),
        b"track name=reads\n\
chr2L\t100\t136\tr1\t1\t+\n\
chr2L\t100\t136\tr2\t1\t+\n\
chr2L\t164\t200\tr3\t1\t-\n\
chr2L\t950\t986\tr4\t1\t+\n\
chr4\t10\t46\tr5\t1\t-\n",
    );

    std::fs::write(
        dir.join("table.tsv"),
        b"chr2L\t0\t500\t100\t90\t70\t50\n\
chr2L\t500\t1000\t100\t70\t70\t50\n\
chr4\t0\t260\t20\t18\t14\t11\n",
    )
    .unwrap();

    std::fs::write(
        dir.join("table5.tsv"),
        b"chr2L\t500\t1000\t10\t9\t9\t9\t9\t1\t7\t7\t7\t7\t1\t5\t5\t5\t5\t1\n",
    )
    .unwrap();

    Inputs {
        _tempdir: tempdir,
        dir,
    }
}

fn run(inputs: &Inputs, table: &str, config: &ProfileConfig) -> ExportMeta {
    let chrom_sizes = ChromSizes::from_path(inputs.path("dm6.chrom.sizes")).unwrap();
    let mut store = ProfileStore::new(&chrom_sizes, config).unwrap();
    store
        .load_local_qcs_from_path(inputs.path(table), config)
        .unwrap();
    store
        .load_wiggles_from_path(inputs.path("reads.bed.gz"), config)
        .unwrap();
    store.write_npy(inputs.path("out")).unwrap()
}

#[rstest]
fn test_single_sampling_run(inputs: Inputs) {
    let config = ProfileConfig {
        span: 100,
        extension: 100,
        quiet: true,
        ..Default::default()
    };
    let meta = run(&inputs, "table.tsv", &config);

    assert_eq!(meta, ExportMeta::read(inputs.path("out").join(META_FILE)).unwrap());
    assert_eq!(meta.qc_mode, "single");
    assert_eq!(meta.chromosomes.len(), 2);
    assert_eq!(meta.chromosomes[0].chrom, "chr2L");
    assert_eq!(meta.chromosomes[0].n_wiggles, 10);
    assert_eq!(meta.chromosomes[0].n_localqcs, 2);
    assert_eq!(meta.chromosomes[1].size, 260);

    let chr2l = inputs.path("out").join("chr2L");
    let wiggles: Array2<u32> = read_npy(chr2l.join(WIGGLES_FILE)).unwrap();
    assert_eq!(wiggles.shape(), &[10, 2]);
    // r1, r2: (100, 200), r2 is a duplicate; r3: (100, 200) on the other strand
    assert_eq!(wiggles.row(1).to_vec(), vec![3, 2]);
    assert_eq!(wiggles.row(2).to_vec(), vec![3, 2]);
    assert_eq!(wiggles.row(3).to_vec(), vec![0, 0]);
    // r4: (950, 1050) runs past the chromosome end
    assert_eq!(wiggles.row(9).to_vec(), vec![1, 1]);

    let intensity: Array1<i32> = read_npy(chr2l.join(LOCAL_QC_INTENSITY_FILE)).unwrap();
    assert_eq!(intensity.to_vec(), vec![100, 0]);
    assert!(!chr2l.join(LOCAL_QC_FLAG_FILE).exists());

    let chr4 = inputs.path("out").join("chr4");
    let wiggles: Array2<u32> = read_npy(chr4.join(WIGGLES_FILE)).unwrap();
    // r5: reverse (-54, 46), clamped to 0
    assert_eq!(wiggles.column(0).to_vec(), vec![1, 0, 0]);
    let dispersion: Array1<f64> = read_npy(chr4.join(LOCAL_QC_DISPERSION_FILE)).unwrap();
    assert_eq!(dispersion.len(), 1);
    assert!((dispersion[0] - 5.0).abs() < 1e-9);
}

#[rstest]
fn test_five_replicate_run(inputs: Inputs) {
    let config = ProfileConfig {
        mode: QcMode::FiveReplicates,
        extension: 0,
        quiet: true,
        ..Default::default()
    };
    let meta = run(&inputs, "table5.tsv", &config);
    assert_eq!(meta.qc_mode, "five_replicates");
    assert_eq!(meta.span, 50);

    let chr2l = inputs.path("out").join("chr2L");
    let flags: Array1<u8> = read_npy(chr2l.join(LOCAL_QC_FLAG_FILE)).unwrap();
    assert_eq!(flags.to_vec(), vec![0, 0b1111]);

    let intensity: Array1<i32> = read_npy(chr2l.join(LOCAL_QC_INTENSITY_FILE)).unwrap();
    assert_eq!(intensity.to_vec(), vec![0, 10]);

    // chr4 had no intensity line: zero windows, flags still written
    let chr4 = inputs.path("out").join("chr4");
    let flags: Array1<u8> = read_npy(chr4.join(LOCAL_QC_FLAG_FILE)).unwrap();
    assert_eq!(flags.to_vec(), vec![0]);
}
