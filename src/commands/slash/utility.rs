//! Utility slash commands: /ping, /invite, /github

use serenity::builder::CreateApplicationCommand;

/// Creates utility commands
pub fn create_commands() -> Vec<CreateApplicationCommand> {
    vec![
        create_ping_command(),
        create_invite_command(),
        create_github_command(),
    ]
}

fn create_ping_command() -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name("ping")
        .description("Reply with pong")
        .to_owned()
}

fn create_invite_command() -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name("invite")
        .description("Invite Sober Quinze to your server")
        .to_owned()
}

fn create_github_command() -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name("github")
        .description("Links the CQ GitHub repo")
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_utility_commands() {
        let names: Vec<String> = create_commands()
            .iter()
            .map(|cmd| cmd.0.get("name").unwrap().as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["ping", "invite", "github"]);
    }
}
