fn main() {
    if let Err(err) = wavedrom_rs_renderer::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
