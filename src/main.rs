use clap::Parser;
use log::info;

use ime_dict::convert::convert_dir;
use ime_dict::util::cli::Cli;

fn main() -> anyhow::Result<()> {
    // 默认 info, RUST_LOG 可覆盖
    if std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", "info");
    }
    pretty_env_logger::init();

    let cli = Cli::parse();
    let opts = cli.to_options();
    info!("scanning {}", opts.root.display());

    convert_dir(&opts)?;
    Ok(())
}
