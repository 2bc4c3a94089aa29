use clap::Parser;
use patch_runner::{run_patch_client, PatchError};
use std::ffi::OsString;
use std::path::PathBuf;

/// Run the `Patch` export of a patch client library, rundll32 style, while
/// letting its output through to our stdout.
#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about,
    long_about = None,
    disable_help_flag = true,
    disable_version_flag = true
)]
struct Args {
    /// Path to patchclient.dll
    library: OsString,
    /// Everything for patchclient.dll, as one argument
    arguments: OsString,
}

/// Parse the command line with every token after the binary name taken as a
/// value, `-`/`--` prefixed ones and a bare `--` included.
fn parse_args<I, T>(args: I) -> Result<Args, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let mut args = args.into_iter().map(Into::<OsString>::into);
    let bin = args.next();
    Args::try_parse_from(
        bin.into_iter()
            .chain(std::iter::once(OsString::from("--")))
            .chain(args),
    )
}

fn run<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args = match parse_args(args) {
        Ok(args) => args,
        Err(e) => {
            log::debug!("{}", e);
            eprintln!("{}", PatchError::Usage);
            return 1;
        }
    };

    match run_patch_client(&PathBuf::from(args.library), &args.arguments) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("{}", e);
            1
        }
    }
}

fn main() {
    env_logger::init();
    std::process::exit(run(std::env::args_os()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn wrong_argument_count() {
        assert_eq!(1, run(["run_ptch_client"]));
        assert_eq!(1, run(["run_ptch_client", "patchclient.dll"]));
        assert_eq!(1, run(["run_ptch_client", "patchclient.dll", "a", "b"]));
        assert_eq!(1, run(["run_ptch_client", "--help"]));
        assert_eq!(1, run(["run_ptch_client", "--version"]));
    }

    #[test]
    fn hyphenated_values() {
        let args = parse_args([
            "run_ptch_client",
            "-patchclient.dll",
            "--filesonly --language English",
        ])
        .unwrap();
        assert_eq!(args.library, "-patchclient.dll");
        assert_eq!(args.arguments, "--filesonly --language English");

        let args = parse_args(["run_ptch_client", "patchclient.dll", "--help"]).unwrap();
        assert_eq!(args.arguments, "--help");
    }

    #[test]
    fn bare_double_dash_is_a_value() {
        let args = parse_args(["run_ptch_client", "patchclient.dll", "--"]).unwrap();
        assert_eq!(args.library, "patchclient.dll");
        assert_eq!(args.arguments, "--");

        let args = parse_args(["run_ptch_client", "--", "--"]).unwrap();
        assert_eq!(args.library, "--");
        assert_eq!(args.arguments, "--");

        assert!(parse_args(["run_ptch_client", "--"]).is_err());
        assert!(parse_args(["run_ptch_client", "--", "a", "b"]).is_err());
    }

    #[test]
    fn empty_values() {
        let args = parse_args(["run_ptch_client", "", ""]).unwrap();
        assert!(args.library.is_empty());
        assert!(args.arguments.is_empty());
    }

    #[test]
    fn empty_library_path() {
        assert_eq!(1, run(["run_ptch_client", "", "hello"]));
    }
}
