use std::path::PathBuf;

use clap::Parser;

use crate::commands::Command;

#[derive(Debug, Parser)]
#[clap(about = env!("CARGO_PKG_DESCRIPTION"))]
pub struct Options {
    #[command(flatten)]
    pub global: Global,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Parser)]
pub struct Global {
    /// The directory to create game folders in. Images end up in
    /// `<output>/<game name>/`.
    #[clap(long, global(true), env("BBS_PIC_OUTPUT"), default_value = ".")]
    pub output: PathBuf,

    /// Base URL of the BBS post API.
    #[clap(
        long,
        global(true),
        hide(true),
        env("BBS_PIC_API_BASE"),
        default_value = bbs_pic::bbs_api::DEFAULT_API_BASE
    )]
    pub api_base: String,

    /// Sets verbosity level. Can be specified multiple times to increase the verbosity
    /// of this program.
    #[clap(long = "verbose", short, global(true), action(clap::ArgAction::Count))]
    pub verbosity: u8,
}
