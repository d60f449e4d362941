//! Command-line front end of the `infolog` binary.
//!
//! The binary performs the startup logging sequence of a host program: it
//! registers a fixed set of sections, attaches the session log file, writes
//! the section report and banners, and emits one sample message per section
//! so the log shows what the active filter lets through.

use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use clap::{Arg, ArgAction, Command, value_parser};
use logging::{
    LogOutput, LogSettings, Profile, SECTIONS_ENV, SectionLayer, SectionRegistry, SystemInfo,
    env_sections, exception_line, log_config_info, log_section_info, log_system_info,
    section_debug, section_error, section_info, section_warn, version_line,
};
use logging_sink::FileSink;
use tracing_subscriber::layer::SubscriberExt;

/// Sections the binary registers before activation.
pub const DEMO_SECTIONS: &[&str] = &[
    "Sound",
    "VFS",
    "Net",
    "DedicatedServer",
    "unitsync",
    "ArchiveScanner",
];

/// Parsed command line.
#[derive(Debug)]
struct Options {
    show_help: bool,
    show_version: bool,
    profile: Profile,
    directory: Option<PathBuf>,
    file_name: Option<String>,
    settings: LogSettings,
}

/// Builds the `clap` command used for parsing.
fn clap_command() -> Command {
    Command::new("infolog")
        .disable_help_flag(true)
        .disable_version_flag(true)
        .arg(
            Arg::new("help")
                .long("help")
                .short('h')
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("version")
                .long("version")
                .short('V')
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("profile")
                .long("profile")
                .value_name("PROFILE")
                .value_parser(|value: &str| value.parse::<Profile>()),
        )
        .arg(
            Arg::new("dir")
                .long("dir")
                .value_name("DIR")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("file")
                .long("file")
                .value_name("NAME")
                .value_parser(value_parser!(String)),
        )
        .arg(
            Arg::new("sections")
                .long("sections")
                .value_name("LIST")
                .value_parser(value_parser!(String)),
        )
        .arg(
            Arg::new("rotate")
                .long("rotate")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("flush-level")
                .long("flush-level")
                .value_name("LEVEL")
                .value_parser(value_parser!(i32)),
        )
        .arg(
            Arg::new("repeat-limit")
                .long("repeat-limit")
                .value_name("COUNT")
                .value_parser(value_parser!(u32)),
        )
}

fn parse_args<I, S>(args: I) -> Result<Options, clap::Error>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString> + Clone,
{
    let mut matches = clap_command().try_get_matches_from(args)?;

    let defaults = LogSettings::default();
    let settings = LogSettings {
        rotate_on_start: matches.get_flag("rotate"),
        sections: matches.remove_one::<String>("sections").unwrap_or_default(),
        flush_level: matches
            .remove_one::<i32>("flush-level")
            .unwrap_or(defaults.flush_level),
        repeat_limit: matches
            .remove_one::<u32>("repeat-limit")
            .unwrap_or(defaults.repeat_limit),
    };

    Ok(Options {
        show_help: matches.get_flag("help"),
        show_version: matches.get_flag("version"),
        profile: matches
            .remove_one::<Profile>("profile")
            .unwrap_or_else(Profile::from_build),
        directory: matches.remove_one::<PathBuf>("dir"),
        file_name: matches.remove_one::<String>("file"),
        settings,
    })
}

/// Static help text.
fn render_help() -> String {
    format!(
        "\
infolog {version}
Set up the session log: rotate, attach, report sections and banners.

Usage: infolog [OPTIONS]

Options:
  -h, --help                Show this help message and exit.
  -V, --version             Output version information and exit.
      --profile PROFILE     Startup profile: debug, release, headless or tooling.
      --dir DIR             Write the log into DIR instead of the working directory.
      --file NAME           Log file name (default infolog.txt).
      --sections LIST       Comma separated section[:level] list to enable.
      --rotate              Archive an existing log into log/ before starting.
      --flush-level LEVEL   Flush the log at records of LEVEL and above.
      --repeat-limit COUNT  Allow COUNT identical messages in a row (0 = no limit).

Environment:
  {SECTIONS_ENV}  Extra sections appended to --sections, or \"none\".
",
        version = logging::VERSION,
    )
}

/// One message per demo section at a spread of levels.
fn emit_samples() {
    section_debug!("VFS", "scanning archive directories");
    section_info!("VFS", "archive cache up to date");
    section_info!("Sound", "mixer started");
    section_warn!("Sound", "no audio device, sound disabled");
    section_info!("Net", "listening for connections");
    section_error!("Net", "handshake with peer failed");
    section_info!("DedicatedServer", "server ready");
    section_debug!("unitsync", "unit definitions loaded");
    section_info!("ArchiveScanner", "archives scanned");
}

/// Runs the binary with `args` and the process's [`SECTIONS_ENV`] value,
/// returning the exit code.
pub fn run<I, S, Out, ErrOut>(args: I, stdout: &mut Out, stderr: &mut ErrOut) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString> + Clone,
    Out: Write,
    ErrOut: Write,
{
    run_with_env(args, env_sections().as_deref(), stdout, stderr)
}

/// Runs the binary with an explicit sections override in place of the
/// environment.
pub fn run_with_env<I, S, Out, ErrOut>(
    args: I,
    sections_env: Option<&str>,
    stdout: &mut Out,
    stderr: &mut ErrOut,
) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString> + Clone,
    Out: Write,
    ErrOut: Write,
{
    let options = match parse_args(args) {
        Ok(options) => options,
        Err(error) => {
            let _ = write!(stderr, "{error}");
            return 1;
        }
    };

    if options.show_help {
        let _ = stdout.write_all(render_help().as_bytes());
        return 0;
    }
    if options.show_version {
        let _ = writeln!(stdout, "{}", version_line(options.profile));
        return 0;
    }

    let registry = Arc::new(SectionRegistry::with_sections(DEMO_SECTIONS));
    let sink = Arc::new(Mutex::new(FileSink::new()));
    let subscriber = tracing_subscriber::registry()
        .with(SectionLayer::new(Arc::clone(&registry), Arc::clone(&sink)));
    let _guard = tracing::subscriber::set_default(subscriber);

    let mut output = LogOutput::new();
    if let Some(directory) = options.directory {
        output.set_directory(directory);
    }
    if let Some(file_name) = options.file_name {
        output.set_file_name(file_name);
    }

    let path = match output.initialize(&options.settings, &mut Arc::clone(&sink)) {
        Ok(path) => path.to_path_buf(),
        Err(error) => {
            let _ = writeln!(stderr, "{}", exception_line("infolog", &error.to_string()));
            return 1;
        }
    };

    log_section_info(
        &registry,
        &options.settings,
        sections_env,
        options.profile,
    );
    log_config_info(&options.settings);
    log_system_info(&SystemInfo::detect(options.profile));
    emit_samples();

    let flushed = sink.lock().unwrap_or_else(PoisonError::into_inner).flush();
    if let Err(error) = flushed {
        let _ = writeln!(
            stderr,
            "{}",
            exception_line("infolog", &format!("failed to flush {}: {error}", path.display()))
        );
        return 1;
    }

    let _ = writeln!(stdout, "{}", path.display());
    0
}
