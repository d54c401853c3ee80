//! # Voxel Walker Entry Point
//!
//! Calls into the library's `run()` function, which builds the demo scene and
//! logs one visibility pass over it.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=debug cargo run --release
//! ```

fn main() {
    if let Err(e) = voxel_walker::run() {
        log::error!("{}", e);
        eprintln!("voxel-walker: {}", e);
        std::process::exit(1);
    }
}
