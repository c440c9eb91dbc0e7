//! Test helper utilities: backup archives on disk

#![allow(dead_code)]

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use flate2::write::GzEncoder;
use flate2::Compression;
use serde_json::Value;
use tempfile::TempDir;

#[path = "../../unit/helpers/mod.rs"]
mod documents;

pub use documents::*;

/// Tar up raw members.
pub fn tar_bytes(members: &[(&str, Vec<u8>)]) -> Vec<u8> {
    let mut builder = tar::Builder::new(Vec::new());
    for (name, data) in members {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder
            .append_data(&mut header, name, data.as_slice())
            .expect("Failed to append tar member");
    }
    builder.into_inner().expect("Failed to finish tar")
}

pub fn gzip(bytes: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(bytes).expect("Failed to gzip");
    encoder.finish().expect("Failed to finish gzip")
}

/// Write a `.tar.gz` backup whose members are the given JSON documents.
pub fn write_backup(dir: &TempDir, file: &str, members: &[(&str, Value)]) -> PathBuf {
    let raw: Vec<(&str, Vec<u8>)> = members
        .iter()
        .map(|(name, value)| (*name, serde_json::to_vec(value).expect("Failed to encode")))
        .collect();
    write_raw_backup(dir, file, &gzip(&tar_bytes(&raw)))
}

pub fn write_raw_backup(dir: &TempDir, file: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.path().join(file);
    fs::write(&path, bytes).expect("Failed to write backup");
    path
}

/// The sample backup split over two members the way exports do it.
pub fn sample_archive(dir: &TempDir) -> PathBuf {
    write_backup(
        dir,
        "ce2_defaultOneTime-2024-01-01T00-00-00.tar.gz",
        &[
            ("ce2_defaultOneTime_1.json", sample_backup()),
            ("ce2_defaultOneTime_2.json", pol_uni(vec![])),
        ],
    )
}
