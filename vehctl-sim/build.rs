use vehctl::*;

use std::env;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

// Must be kept in sync with the simulators wrapped in src/lib.rs
const RTL_MODULES: [(&str, u8); 2] = [("Controller", 4), ("ControllerDepth8", 8)];

fn main() -> io::Result<()> {
    let out_dir = env::var("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("controller.rs");
    let mut file = BufWriter::new(File::create(&dest_path)?);

    let c = Context::new();

    for (name, reset_sync_depth) in RTL_MODULES {
        let config = Config { reset_sync_depth };
        sim::generate(design::controller(&c, name, &config), &mut file)?;
    }

    file.flush()
}
