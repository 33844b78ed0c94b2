fn main() {
    carepal_lib::init_tracing();

    if let Err(e) = carepal_lib::run() {
        tracing::error!(error = %e, "Run failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
