mod adapter;
mod cli;
mod domain;
mod ports;
mod usecase;
mod wiring;

#[cfg(test)]
mod tests;

use std::process;
use common::error::Error;
use common::ports::outbound::{LogLevel, LogRecord};
use cli::{config_to_command, parse_args, print_completion, Config, ParseOutcome};
use domain::KaleidoCommand;
use ports::inbound::UseCaseRunner;
use usecase::chat::SubmitOutcome;
use usecase::repl::Repl;
use wiring::{wire, App};

/// Command をディスパッチする Runner（match は main レイヤーに集約）
struct Runner {
    app: App,
}

impl UseCaseRunner for Runner {
    fn run(&mut self, config: Config) -> Result<i32, Error> {
        let cmd = config_to_command(&config)?;
        let command_name = cmd_name_for_log(&cmd);
        let _ = self.app.logger.log(
            &LogRecord::new(LogLevel::Info, "cli", "lifecycle", "command started")
                .with_field("command", command_name),
        );

        let result = self.dispatch(cmd);

        let code = match &result {
            Ok(code) => *code,
            Err(e) => e.exit_code(),
        };
        let _ = self.app.logger.log(
            &LogRecord::new(LogLevel::Info, "cli", "lifecycle", "command finished")
                .with_field("command", command_name)
                .with_field("exit_code", code),
        );
        if let Err(ref e) = result {
            let _ = self
                .app
                .logger
                .log(&LogRecord::new(LogLevel::Error, "cli", "error", e.to_string()));
        }
        result
    }
}

impl Runner {
    fn dispatch(&mut self, cmd: KaleidoCommand) -> Result<i32, Error> {
        let app = &mut self.app;
        match cmd {
            KaleidoCommand::Help => {
                print_help();
                Ok(0)
            }
            KaleidoCommand::DryRun { message } => {
                let prompt = app.chat.preview_prompt(&app.session, &message);
                app.text_sink.info(&prompt)?;
                Ok(0)
            }
            KaleidoCommand::Ask { message } => {
                let outcome = app.chat.submit(
                    &mut app.session,
                    &message,
                    app.text_sink.as_mut(),
                    app.diagram_sink.as_mut(),
                )?;
                // 失敗内容はインライン表示済みなので終了コードだけ返す
                Ok(match outcome {
                    SubmitOutcome::Answered | SubmitOutcome::Ignored => 0,
                    SubmitOutcome::AnsweredWithRenderError(e) | SubmitOutcome::Failed(e) => {
                        e.exit_code()
                    }
                })
            }
            KaleidoCommand::Interactive => {
                Repl::new(&app.chat, app.logger.clone()).run(
                    &mut app.session,
                    app.line_reader.as_mut(),
                    app.text_sink.as_mut(),
                    app.diagram_sink.as_mut(),
                )?;
                Ok(0)
            }
        }
    }
}

fn cmd_name_for_log(cmd: &KaleidoCommand) -> &'static str {
    match cmd {
        KaleidoCommand::Help => "help",
        KaleidoCommand::Interactive => "interactive",
        KaleidoCommand::Ask { .. } => "ask",
        KaleidoCommand::DryRun { .. } => "dry-run",
    }
}

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            if e.is_usage() {
                print_usage();
            }
            eprintln!("kaleido: {}", e);
            e.exit_code()
        }
    };
    process::exit(exit_code);
}

pub fn run() -> Result<i32, Error> {
    let config = match parse_args()? {
        ParseOutcome::Config(c) => c,
        ParseOutcome::GenerateCompletion(shell) => {
            print_completion(shell);
            return Ok(0);
        }
    };
    // 設定ファイルが壊れていてもヘルプは出せるようにする
    if config_to_command(&config)? == KaleidoCommand::Help {
        print_help();
        return Ok(0);
    }
    let app = wire(&config)?;
    let mut runner = Runner { app };
    runner.run(config)
}

fn print_usage() {
    eprintln!("Usage: kaleido [options] [message...]");
}

fn print_help() {
    println!("Usage: kaleido [options] [message...]");
    println!("Options:");
    println!("  -h, --help                    Show this help message");
    println!("  -p, --profile <profile>       Model provider: gemini (default) or echo (offline, no API key)");
    println!("  -m, --model <model>           Model name. Default: gemini-flash-latest");
    println!("  -i, --interest <interest>     bollywood (default), cricket, video-games, farming, cooking");
    println!("  -l, --language <language>     hinglish (default), english, marathi-mix");
    println!("  -s, --style <style>           stories-and-analogies (default), visual-flowcharts, code-examples");
    println!("  --diagram-dir <dir>           Where rendered diagrams are written. Default: $KALEIDO_HOME/state/diagrams");
    println!("  --diagram-format <format>     svg (default) or png");
    println!("  --dry-run                     Print the prompt that would be sent and exit");
    println!("  -v, --verbose                 Also print structured logs to stderr");
    println!("  --generate <shell>            Generate shell completion script (bash, zsh, fish)");
    println!();
    println!("Environment:");
    println!("  GOOGLE_API_KEY  API key for Gemini (GEMINI_API_KEY and a .env file in the current directory also work)");
    println!("  KALEIDO_HOME    Home directory. Settings: $KALEIDO_HOME/config/settings.json; logs: $KALEIDO_HOME/state/logs/");
    println!("                 If unset, $XDG_CONFIG_HOME/kaleido and $XDG_STATE_HOME/kaleido are used.");
    println!();
    println!("Description:");
    println!("  Kaleido explains things using analogies from what you love, in your language.");
    println!("  With a message, answers once and exits. Without one, starts an interactive session (type /help).");
    println!("  Visual Flowcharts answers include a Graphviz diagram rendered with the `dot` command.");
    println!();
    println!("Examples:");
    println!("  kaleido How does the Internet work?");
    println!("  kaleido -i cricket -l english Explain Gravity");
    println!("  kaleido -s visual-flowcharts What is Inflation?");
    println!("  kaleido --profile echo --dry-run Explain Gravity");
}
