//! perfpay main entrypoint.

use perfpay::run;
use perfpay::ui::messages::error;

fn main() {
    println!();
    if let Err(e) = run() {
        error(format!("Error: {e}"));
        std::process::exit(1);
    }
}
