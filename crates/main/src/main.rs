use std::error::Error;

use clap::Parser;

/// Writes the compliance checklist fixture to `test_checklist.pdf` in the working directory.
///
/// Set `CHECKLIST_FONTS_DIR` to a directory holding the Roboto family to control the embedded
/// font; otherwise an installed Liberation Sans, DejaVu Sans or Arial family is used.
#[derive(Parser)]
#[command(author, version, about = "Generate the checklist test PDF")]
struct Cli {}

fn main() {
    env_logger::init();
    let _cli = Cli::parse();

    match checklist_fixture::build() {
        Ok(path) => {
            println!("✅ Test PDF created: {}", checklist_fixture::OUTPUT_FILE_NAME);
            println!("📍 Location: {}", path.display());
        }
        Err(err) => {
            log::error!("checklist generation failed");
            eprintln!("Error: {}", err);
            print_error_sources(&err);
            std::process::exit(1);
        }
    }
}

fn print_error_sources(mut error: &(dyn Error + 'static)) {
    while let Some(source) = error.source() {
        eprintln!("  caused by: {}", source);
        error = source;
    }
}
