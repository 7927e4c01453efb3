// SPDX-License-Identifier: MPL-2.0
use boutique_showcase::app::{self, paths, Flags};

const HELP: &str = "\
boutique_showcase - boutique storefront and catalog admin

USAGE:
  boutique_showcase [OPTIONS]

OPTIONS:
  --lang <LOCALE>       Interface language (en-US, fr)
  --config-dir <DIR>    Directory holding settings.toml
  --data-dir <DIR>      Directory holding the catalog, accounts and media
  --admin <EMAIL>       Open with this admin account; the first one is created
  -h, --help            Print this help

ENVIRONMENT:
  RUST_LOG                       Log filter (default: info)
  BOUTIQUE_SHOWCASE_CONFIG_DIR   Same as --config-dir
  BOUTIQUE_SHOWCASE_DATA_DIR     Same as --data-dir
";

fn main() -> iced::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }

    let flags = Flags {
        lang: opt_value(&mut args, "--lang"),
        data_dir: opt_value(&mut args, "--data-dir"),
        config_dir: opt_value(&mut args, "--config-dir"),
        admin: opt_value(&mut args, "--admin"),
    };

    let remaining = args.finish();
    if !remaining.is_empty() {
        log::warn!("ignoring unexpected arguments: {remaining:?}");
    }

    paths::init_cli_overrides(flags.data_dir.clone(), flags.config_dir.clone());
    app::run(flags)
}

fn opt_value(args: &mut pico_args::Arguments, key: &'static str) -> Option<String> {
    match args.opt_value_from_str(key) {
        Ok(value) => value,
        Err(err) => {
            log::warn!("{key}: {err}");
            None
        }
    }
}
