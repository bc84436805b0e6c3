//! `devtop --json`: poll once and print the device list.

use devtop_core::{DeviceQuery, NvidiaSmi};

pub fn run(program: &str) {
    let devices = match NvidiaSmi::with_program(program).query() {
        Ok(devices) => devices,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    match serde_json::to_string_pretty(&devices) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error serializing devices: {e}");
            std::process::exit(1);
        }
    }
}
