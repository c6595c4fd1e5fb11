//! Fuzz target for exporting parsed annotation sets.
//!
//! Every set that parses must export to every format without panicking.

#![no_main]

use labelport::export::{try_export, ExportOptions, Format};
use labelport::ir::io_json::from_json_slice;
use labelport::ir::ImageSize;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 * 1024 {
        return;
    }

    let Ok(set) = from_json_slice(data) else {
        return;
    };

    let options = [
        ExportOptions::default(),
        ExportOptions::default()
            .with_image_size(ImageSize::new(640, 480))
            .with_polygons(true),
    ];

    for format in Format::ALL {
        for opts in &options {
            let _ = try_export(&set, format, opts);
        }
    }
});
