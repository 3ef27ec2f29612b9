use std::path::PathBuf;

use clap::Parser;
use exactonline_store::cli::{Cli, Commands};
use exactonline_store::CredentialKey;

#[test]
fn test_parse_get() {
    let cli = Cli::try_parse_from(["exactonline-store", "get", "access_token", "--reveal"]).unwrap();

    match cli.command {
        Commands::Get(args) => {
            assert_eq!(args.key, CredentialKey::AccessToken);
            assert!(args.reveal);
        }
        _ => panic!("Wrong top-level command"),
    }
    assert!(!cli.json);
}

#[test]
fn test_parse_get_unknown_key() {
    let result = Cli::try_parse_from(["exactonline-store", "get", "client_secret"]);
    assert!(result.is_err());
}

#[test]
fn test_parse_set() {
    let cli =
        Cli::try_parse_from(["exactonline-store", "set", "access_expiry", "1426492503", "--json"])
            .unwrap();

    match cli.command {
        Commands::Set(args) => {
            assert_eq!(args.key, CredentialKey::AccessExpiry);
            assert_eq!(args.value, "1426492503");
        }
        _ => panic!("Wrong top-level command"),
    }
    assert!(cli.json);
}

#[test]
fn test_parse_init_with_global_config() {
    let cli = Cli::try_parse_from([
        "exactonline-store",
        "--config",
        "/etc/exactonline/config.yaml",
        "init",
        "--skip-endpoints",
        "/srv/app",
    ])
    .unwrap();

    assert_eq!(cli.config, Some(PathBuf::from("/etc/exactonline/config.yaml")));
    match cli.command {
        Commands::Init(args) => {
            assert!(args.skip_endpoints);
            assert!(!args.force);
            assert_eq!(args.path, PathBuf::from("/srv/app"));
        }
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_parse_show_defaults() {
    let cli = Cli::try_parse_from(["exactonline-store", "show"]).unwrap();
    match cli.command {
        Commands::Show(args) => assert!(!args.reveal),
        _ => panic!("Wrong top-level command"),
    }
}
