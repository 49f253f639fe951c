//! File-based loading tests for the WordNet facade.

use std::fs;
use std::io::Write;
use tempfile::tempdir;

use taxograph_wordnet::{Outcast, WordNet};

fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = fs::File::create(&path).expect("create fixture");
    file.write_all(contents.as_bytes()).expect("write fixture");
    path
}

#[test]
fn loads_taxonomy_from_files() {
    let dir = tempdir().expect("tempdir");
    let synsets = write_file(
        &dir,
        "synsets.txt",
        "0,animal,a living organism\n1,dog,canine\n2,cat,feline\n",
    );
    let hypernyms = write_file(&dir, "hypernyms.txt", "0\n1,0\n2,0\n");

    let wn = WordNet::from_paths(&synsets, &hypernyms).expect("load");
    assert!(wn.is_rooted_dag());
    assert_eq!(wn.synset_count(), 3);
    assert_eq!(wn.distance("dog", "cat").unwrap(), 2);
}

#[test]
fn missing_file_reports_its_path() {
    let dir = tempdir().expect("tempdir");
    let synsets = write_file(&dir, "synsets.txt", "0,entity\n");
    let missing = dir.path().join("nope.txt");

    let err = WordNet::from_paths(&synsets, &missing).unwrap_err();
    assert!(format!("{err:#}").contains("nope.txt"), "{err:#}");
}

#[test]
fn malformed_file_is_rejected_before_queries() {
    let dir = tempdir().expect("tempdir");
    // Two internally rooted components, no global root.
    let synsets = write_file(&dir, "synsets.txt", "0,a\n1,b\n2,c\n3,d\n");
    let hypernyms = write_file(&dir, "hypernyms.txt", "1,0\n3,2\n");

    let err = WordNet::from_paths(&synsets, &hypernyms).unwrap_err();
    assert!(err.to_string().contains("rooted DAG"), "{err}");
}

#[test]
fn outcast_over_file_loaded_taxonomy() {
    let dir = tempdir().expect("tempdir");
    let synsets = write_file(
        &dir,
        "synsets.txt",
        "0,thing\n1,fruit\n2,tool\n3,apple\n4,pear\n5,hammer\n",
    );
    let hypernyms = write_file(&dir, "hypernyms.txt", "0\n1,0\n2,0\n3,1\n4,1\n5,2\n");

    let wn = WordNet::from_paths(&synsets, &hypernyms).expect("load");
    let got = Outcast::new(&wn)
        .outcast(&["apple", "pear", "hammer"])
        .unwrap();
    assert_eq!(got, "hammer");
}
