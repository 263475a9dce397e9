use std::path::PathBuf;

use crate::Args;
use clap::Parser;

use super::test_utils::parse_test_args;

/// Test default argument values
#[test]
fn test_args_defaults() {
    let args = parse_test_args(&["devindex"]);
    assert!(args.config.is_none());
    assert!(!args.verbose);
    assert!(!args.info);
    assert!(!args.man);
    assert!(!args.schema);
    assert!(args.completions.is_none());
    assert!(args.command.is_none());
}

/// Test global flags placed after the subcommand
#[test]
fn test_global_flags_after_subcommand() {
    let args = parse_test_args(&["devindex", "list", "--verbose", "--config", "/etc/devindex.toml"]);
    assert!(args.verbose);
    assert_eq!(args.config, Some(PathBuf::from("/etc/devindex.toml")));
}

/// Test that unknown arguments are rejected
#[test]
fn test_invalid_arguments() {
    assert!(Args::try_parse_from(["devindex", "--no-such-flag"]).is_err());
    assert!(Args::try_parse_from(["devindex", "publish"]).is_err());
    assert!(Args::try_parse_from(["devindex", "list", "--output", "x.html"]).is_err());
}

/// Test that the clap definition is consistent
#[test]
fn test_command_debug_assert() {
    use clap::CommandFactory;
    Args::command().debug_assert();
}
