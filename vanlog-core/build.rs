//! Build script for vanlog-core
//!
//! Captures the wall-clock time of the build into a generated source file.
//! The clock source uses this constant to calibrate an RTC that reports a
//! backup-power loss, mirroring the classic `__DATE__`/`__TIME__` idiom.

use std::env;
use std::fs;
use std::path::Path;

use chrono::{Datelike, Local, Timelike};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let now = Local::now();
    let generated = format!(
        "/// Wall-clock time at which this crate was compiled.\n\
         ///\n\
         /// Used as a one-time best-effort calibration value when the RTC\n\
         /// reports that its backup power was lost. Not a precise time source:\n\
         /// it is stale by however long ago the firmware was built.\n\
         pub const BUILD_TIME: DateTime = DateTime {{\n\
         \x20   year: {},\n\
         \x20   month: {},\n\
         \x20   day: {},\n\
         \x20   hour: {},\n\
         \x20   minute: {},\n\
         \x20   second: {},\n\
         }};\n",
        now.year(),
        now.month(),
        now.day(),
        now.hour(),
        now.minute(),
        now.second(),
    );

    let out_dir = env::var("OUT_DIR").expect("OUT_DIR not set by cargo");
    let dest = Path::new(&out_dir).join("build_time.rs");
    fs::write(&dest, generated).expect("Failed to write build_time.rs");
}
