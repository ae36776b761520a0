use super::*;

#[test]
fn parses_watch_without_interval() {
    let cli = Cli::try_parse_from(["folio", "watch"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Watch { interval: None }));
}

#[test]
fn parses_watch_with_interval() {
    let cli = Cli::try_parse_from(["folio", "watch", "--interval", "5"])
        .expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Watch { interval: Some(5) }));
}

#[test]
fn rejects_zero_interval() {
    assert!(Cli::try_parse_from(["folio", "watch", "--interval", "0"]).is_err());
}

#[test]
fn parses_snapshot_pretty() {
    let cli =
        Cli::try_parse_from(["folio", "snapshot", "--pretty"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Snapshot { pretty: true }));
}

#[test]
fn parses_profile_defaults_to_fetch() {
    let cli = Cli::try_parse_from(["folio", "profile"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Profile { cached: false }));
}

#[test]
fn parses_profile_cached() {
    let cli =
        Cli::try_parse_from(["folio", "profile", "--cached"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Profile { cached: true }));
}

#[test]
fn subcommand_is_required() {
    assert!(Cli::try_parse_from(["folio"]).is_err());
}
