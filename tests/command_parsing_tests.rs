use teloxide::utils::command::BotCommands;

use z1_gray_bot::bot::commands::Command;

#[test]
fn parses_start_and_help() {
    assert_eq!(Command::parse("/start", "z1graybot").unwrap(), Command::Start);
    assert_eq!(Command::parse("/help", "z1graybot").unwrap(), Command::Help);
}

#[test]
fn parses_commands_addressed_to_the_bot() {
    assert_eq!(
        Command::parse("/start@z1graybot", "z1graybot").unwrap(),
        Command::Start
    );
}

#[test]
fn rejects_unknown_commands_and_plain_text() {
    assert!(Command::parse("/unlock", "z1graybot").is_err());
    assert!(Command::parse("hello there", "z1graybot").is_err());
}

#[test]
fn descriptions_mention_both_commands() {
    let descriptions = Command::descriptions().to_string();
    assert!(descriptions.contains("/help"));
    assert!(descriptions.contains("/start"));
}
