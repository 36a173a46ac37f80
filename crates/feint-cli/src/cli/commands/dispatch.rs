use super::super::args::{Cli, Command};

pub async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        Command::Jwt(args) => super::jwt::run(args),
        Command::Otp(args) => super::otp::run(args),
        Command::Filegen(args) => super::filegen::run(args),
        Command::Token(args) => super::token::run(args).await,
    }
}
