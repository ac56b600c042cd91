//! Loads a rig file and prints its bones and bind pose inverse matrices
//!
//! `cargo run --example dump -- path/to/rig.skl [--strict]`
use skelrig::skl_import::{self, SklToLoad};

const FILENAME: &str = "./demos/assets/biped.skl";

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let filename = args
        .iter()
        .skip(1)
        .find(|a| !a.starts_with("--"))
        .map_or(FILENAME, String::as_str);
    let options = SklToLoad {
        filename: filename.to_string(),
        strict: args.iter().any(|a| a == "--strict"),
    };

    let skeleton = match skl_import::load(&options) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{filename}: {e}");
            std::process::exit(1);
        }
    };

    print!("{skeleton}");
    for (bone, inv) in skeleton.bones().iter().zip(skeleton.inv_transforms())
    {
        println!("{} inverse bind {:?}", bone.name, inv);
    }
}
