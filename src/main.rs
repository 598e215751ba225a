use env_logger::Env;

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    if let Err(err) = auto_index_gen::app::run() {
        log::error!("{}: {:#}", env!("CARGO_PKG_NAME"), err);
        std::process::exit(1);
    }
}
