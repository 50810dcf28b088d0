use super::*;

#[test]
fn parses_refine_with_input() {
    let cli = Cli::try_parse_from(["tagtrend", "refine", "--input", "bronze.json"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Refine { ref input } if input == &PathBuf::from("bronze.json")
    ));
}

#[test]
fn refine_requires_input() {
    assert!(Cli::try_parse_from(["tagtrend", "refine"]).is_err());
}

#[test]
fn parses_step_commands() {
    for (arg, expected) in [
        ("trends", "Trends"),
        ("matrix", "Matrix"),
        ("evolution", "Evolution"),
        ("promote", "Promote"),
        ("evaluate", "Evaluate"),
    ] {
        let cli = Cli::try_parse_from(["tagtrend", arg]).expect("expected valid cli args");
        assert_eq!(format!("{:?}", cli.command), expected);
    }
}

#[test]
fn parses_weekly_with_input() {
    let cli = Cli::try_parse_from(["tagtrend", "weekly", "--input", "w.json"]).unwrap();
    assert!(matches!(cli.command, Commands::Weekly { .. }));
}

#[test]
fn parses_dedupe_tags() {
    let cli = Cli::try_parse_from(["tagtrend", "dedupe", "Football, football"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Dedupe { ref tags } if tags == "Football, football"
    ));
}

#[test]
fn command_is_required() {
    assert!(Cli::try_parse_from(["tagtrend"]).is_err());
}
