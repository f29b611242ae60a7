use super::*;

fn parse_args(argv: &[&str]) -> Args {
    Args::try_parse_from(argv)
        .unwrap_or_else(|err| panic!("argv={argv:?} should parse successfully: {err}"))
}

#[test]
fn no_subcommand_means_chat() {
    let args = parse_args(&["parley"]);
    assert!(args.command.is_none());
    assert!(!args.verbose);
    assert!(args.relay_url.is_none());
}

#[test]
fn global_flags_parse_after_subcommand() {
    let argv = [
        "parley",
        "chat",
        "--relay-url",
        "http://relay:3000",
        "-v",
        "--log-file",
        "parley.log",
    ];
    let args = parse_args(&argv);
    assert!(matches!(args.command, Some(Commands::Chat)));
    assert_eq!(args.relay_url.as_deref(), Some("http://relay:3000"));
    assert!(args.verbose);
    assert_eq!(args.log_file, Some(PathBuf::from("parley.log")));
}

#[test]
fn serve_accepts_bind_and_backend() {
    let argv = [
        "parley",
        "serve",
        "--bind",
        "0.0.0.0:8080",
        "--backend-url",
        "http://localhost:8000/chat",
    ];
    match parse_args(&argv).command {
        Some(Commands::Serve { bind, backend_url }) => {
            assert_eq!(bind.as_deref(), Some("0.0.0.0:8080"));
            assert_eq!(backend_url.as_deref(), Some("http://localhost:8000/chat"));
        }
        _ => panic!("expected serve subcommand for argv={argv:?}"),
    }
}

#[test]
fn say_collects_all_words() {
    let argv = ["parley", "say", "what", "is", "-1", "plus", "one"];
    match parse_args(&argv).command {
        Some(Commands::Say { text }) => assert_eq!(text.join(" "), "what is -1 plus one"),
        _ => panic!("expected say subcommand for argv={argv:?}"),
    }
}

#[test]
fn set_requires_key_and_value() {
    assert!(Args::try_parse_from(["parley", "set", "bind"]).is_err());
    match parse_args(&["parley", "set", "bind", "0.0.0.0:3000"]).command {
        Some(Commands::Set { key, value }) => {
            assert_eq!(key, "bind");
            assert_eq!(value, "0.0.0.0:3000");
        }
        _ => panic!("expected set subcommand"),
    }
}

#[test]
fn chat_logs_nowhere_unless_asked() {
    assert!(matches!(
        log_target(&Commands::Chat, None),
        LogTarget::Disabled
    ));
    assert!(matches!(
        log_target(&Commands::Chat, Some(PathBuf::from("chat.log"))),
        LogTarget::File(_)
    ));
    let serve = Commands::Serve {
        bind: None,
        backend_url: None,
    };
    assert!(matches!(log_target(&serve, None), LogTarget::Stderr));
}
