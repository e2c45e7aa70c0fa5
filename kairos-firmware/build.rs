//! Build script for kairos-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Parses and validates controller.toml at compile time
//! - Generates the validated configuration as a Rust constant

use std::env;
use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use kairos_core::config::ControllerConfig;

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));
    setup_linker(&out_dir);
    let config = load_config();
    generate_config(&out_dir, &config);
}

/// Set up linker search paths and scripts
fn setup_linker(out_dir: &Path) {
    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Parse and validate controller.toml
fn load_config() -> ControllerConfig {
    println!("cargo:rerun-if-changed=controller.toml");

    let config_path = Path::new("controller.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: controller.toml not found!                               ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a controller.toml configuration file      ║\n\
            ║  in the kairos-firmware directory.                               ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read controller.toml                           ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: ControllerConfig = match toml::from_str(&content) {
        Ok(config) => config,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid controller.toml                                  ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&e.to_string())
            );
        }
    };

    if let Err(e) = config.validate() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: controller.toml failed validation                        ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            format_error_lines(&e.to_string())
        );
    }

    println!("cargo:warning=controller.toml validated successfully");
    config
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.chars().count() > 64 {
                format!("{}...", line.chars().take(61).collect::<String>())
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Write the validated configuration as `CONTROLLER`
fn generate_config(out_dir: &Path, config: &ControllerConfig) {
    let b = &config.blink;
    let s = &config.sampling;
    let p = &config.priorities;
    let sys = &config.system;

    let mut code = String::new();
    writeln!(code, "/// Controller configuration from controller.toml").unwrap();
    writeln!(code, "pub const CONTROLLER: ControllerConfig = ControllerConfig {{").unwrap();
    writeln!(
        code,
        "    blink: BlinkConfig {{ period_ms: {}, debounce_ms: {} }},",
        b.period_ms, b.debounce_ms
    )
    .unwrap();
    writeln!(
        code,
        "    sampling: SamplingConfig {{ period_us: {}, adc_resolution_bits: {}, \
         adc_reference_mv: {}, differential: {}, dac_resolution_bits: {}, \
         offset_mv: {}, gain_permille: {} }},",
        s.period_us,
        s.adc_resolution_bits,
        s.adc_reference_mv,
        s.differential,
        s.dac_resolution_bits,
        s.offset_mv,
        s.gain_permille
    )
    .unwrap();
    writeln!(
        code,
        "    priorities: PriorityConfig {{ edge: {}, filter: {}, led: {} }},",
        p.edge, p.filter, p.led
    )
    .unwrap();
    writeln!(
        code,
        "    system: SystemConfig {{ heap_bytes: {} }},",
        sys.heap_bytes
    )
    .unwrap();
    writeln!(code, "}};").unwrap();

    fs::write(out_dir.join("controller_config.rs"), code).unwrap();
}
