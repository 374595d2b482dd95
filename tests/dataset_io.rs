use copybench::domain::experiment::Implementation;
use copybench::infrastructure::{csv_store, embedded};
use pretty_assertions::assert_eq;
use std::fs;

#[test]
fn test_exported_csv_reloads_to_same_dataset() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("runs.csv");
    let embedded_ds = embedded::load().unwrap();

    csv_store::export_dataset(&embedded_ds, &path).unwrap();
    let reloaded = csv_store::load_dataset(&path).unwrap();

    assert_eq!(reloaded.len(), 48);
    assert_eq!(reloaded.records(), embedded_ds.records());
}

#[test]
fn test_csv_rows_may_arrive_in_any_implementation_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shuffled.csv");
    fs::write(
        &path,
        "implementation,threads,msg_size,duration,throughput,latency,cpu_cycles,instructions,cache_misses,branches,branch_misses,context_switches\n\
         zero_copy,1,1024,10,0.379553,15.341248,15688797235,16489576149,4073030,2736024977,34333955,670\n\
         two_copy,1,1024,10,1.330161,6.106586,22758370135,21489179381,2326676,3535239145,70538371,1520\n",
    )
    .unwrap();

    let ds = csv_store::load_dataset(&path).unwrap();
    assert_eq!(
        ds.implementations(),
        vec![Implementation::TwoCopy, Implementation::ZeroCopy]
    );
}

#[test]
fn test_missing_csv_names_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.csv");

    let err = csv_store::load_dataset(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("absent.csv"));
}
