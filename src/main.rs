use std::path::PathBuf;
use std::process;

use gravity_od::{run_pipeline, ModelConfig};


fn main() {
    env_logger::init();
    let config_path = match std::env::args().nth(1) {
        Some(path) => PathBuf::from(path),
        None => {
            eprintln!("usage: gravity_od <config.yaml>");
            process::exit(2);
        }
    };

    let result = ModelConfig::from_file(&config_path).and_then(|cfg| run_pipeline(&cfg));
    match result {
        Ok(table) => {
            println!("{}", table.total_trips());
            println!("Process finished successfully!");
        }
        Err(err) => {
            log::error!("estimation failed: {}", err);
            eprintln!("error: {}", err);
            process::exit(1);
        }
    }
}
