#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use labelport::ir::{Annotation, AnnotationSet, BBox, Point};

pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// The set stored in `tests/fixtures/sample_set.json`, minus unknown fields.
pub fn street_set() -> AnnotationSet {
    AnnotationSet::new("street.jpg")
        .with_tool("object_detection")
        .with_annotation(
            Annotation::bbox("car", BBox::new(10.0, 20.0, 90.0, 60.0)).with_confidence(0.92),
        )
        .with_annotation(Annotation::polygon(
            "road",
            [
                Point::new(0.0, 400.0),
                Point::new(640.0, 400.0),
                Point::new(640.0, 480.0),
                Point::new(0.0, 480.0),
            ],
        ))
        .with_annotation(Annotation::bbox(
            "person",
            BBox::new(300.5, 120.25, 40.0, 110.5),
        ))
        .with_annotation(Annotation::bbox("car", BBox::new(500.0, 200.0, 100.0, 50.0)))
}

pub fn bmp_bytes(width: u32, height: u32) -> Vec<u8> {
    let row_stride = (width * 3).div_ceil(4) * 4;
    let pixel_array_size = row_stride * height;
    let file_size = 54 + pixel_array_size;

    let mut bytes = Vec::with_capacity(file_size as usize);
    bytes.extend_from_slice(b"BM");
    bytes.extend_from_slice(&file_size.to_le_bytes());
    bytes.extend_from_slice(&[0, 0, 0, 0]);
    bytes.extend_from_slice(&54u32.to_le_bytes());

    bytes.extend_from_slice(&40u32.to_le_bytes());
    bytes.extend_from_slice(&(width as i32).to_le_bytes());
    bytes.extend_from_slice(&(height as i32).to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&24u16.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(&pixel_array_size.to_le_bytes());
    bytes.extend_from_slice(&2835u32.to_le_bytes());
    bytes.extend_from_slice(&2835u32.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());

    bytes.resize(file_size as usize, 0);
    bytes
}

pub fn write_bmp(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, bmp_bytes(width, height)).expect("write bmp file");
}
