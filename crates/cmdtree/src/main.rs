//! cmdtree CLI
//!
//! Binary name: `cmdtree`

use std::process;

use cmdtree::cli::{
    build_cli,
    handlers::{format_error, run},
    setup::init_tracing,
};

fn main() {
    let matches = build_cli().get_matches();

    if let Err(e) = init_tracing(matches.get_count("verbose")) {
        #[allow(clippy::print_stderr)]
        {
            eprintln!("Warning: {e}");
        }
    }

    let code = match run(&matches) {
        Ok(status) => status.code(),
        Err(err) => {
            #[allow(clippy::print_stderr)]
            {
                eprintln!("Error: {}", format_error(&err));
            }
            2
        }
    };

    #[allow(clippy::exit)]
    process::exit(code);
}
