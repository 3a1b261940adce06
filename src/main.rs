fn main() {
    if let Err(err) = risk_matrix_renderer::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
