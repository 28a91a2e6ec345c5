use anyhow::Result;
use clap::{crate_authors, crate_description, crate_version, App as ClapApp, Arg};
use form_tui::{app::App, config::Config};

fn main() -> Result<()> {
    let matches = ClapApp::new("form-tui")
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("DIR")
                .help("Sets a custom configuration directory")
                .takes_value(true),
        )
        .get_matches();

    let mut config = Config::new();
    config.load(matches.value_of("config"))?;
    App::start(config)
}
