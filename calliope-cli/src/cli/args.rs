//! CLI argument definitions for `calliope-cli`.

use clap::{Arg, ArgAction, Command};

/// Build the CLI argument parser and command definitions.
pub fn build_cli() -> Command {
    Command::new("Calliope")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Play mixed triangle tones through the speaker")
        .arg_required_else_help(true)
        .arg(
            Arg::new("frequency")
                .value_name("FREQ")
                .action(ArgAction::Append)
                .required(true)
                .help("Tone frequencies in Hz; multiple tones are mixed live"),
        )
        .arg(
            Arg::new("sample-rate")
                .long("sample-rate")
                .short('r')
                .value_name("HZ")
                .help("Playback sample rate in Hz"),
        )
        .arg(
            Arg::new("buffer-size")
                .long("buffer-size")
                .short('b')
                .value_name("FRAMES")
                .help("Speaker buffer size in frames (rounded down to a power of two)"),
        )
        .arg(
            Arg::new("duration")
                .long("duration")
                .short('d')
                .value_name("SECONDS")
                .default_value("5")
                .help("How long to play before exiting"),
        )
        .arg(
            Arg::new("settings")
                .long("settings")
                .value_name("PATH")
                .help("Path to a JSON file containing PlaybackSettings"),
        )
}
