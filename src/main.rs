//! rInvoicer main entrypoint.

use rinvoicer::run;
use rinvoicer::ui::messages;

fn main() {
    if let Err(e) = run() {
        messages::error(e);
        std::process::exit(1);
    }
}
