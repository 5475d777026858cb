use crate::domain::{KaleidoCommand, SettingsOverrides};
use clap::builder::ArgAction;
use clap::value_parser;
use clap_complete::Shell;
use common::domain::{ModelName, ProviderName};
use common::error::Error;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    pub help: bool,
    /// --dry-run: モデルを呼ばず、送信予定のプロンプトを表示する
    pub dry_run: bool,
    /// -v / --verbose: 構造化ログを stderr にも出す
    pub verbose: bool,
    pub profile: Option<ProviderName>,
    pub model: Option<ModelName>,
    pub interest: Option<String>,
    pub language: Option<String>,
    pub style: Option<String>,
    pub diagram_dir: Option<PathBuf>,
    pub diagram_format: Option<String>,
    pub message_args: Vec<String>,
}

impl Config {
    /// 設定ファイルより優先する CLI 指定値
    pub fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            provider: self.profile.clone(),
            model: self.model.clone(),
            interest: self.interest.clone(),
            language: self.language.clone(),
            style: self.style.clone(),
            diagram_format: self.diagram_format.clone(),
            diagram_dir: self.diagram_dir.clone(),
        }
    }
}

/// 解析結果: 通常の Config / 補完スクリプト生成
#[derive(Debug, Clone)]
pub enum ParseOutcome {
    Config(Config),
    GenerateCompletion(Shell),
}

fn build_clap_command() -> clap::Command {
    clap::Command::new("kaleido")
        .about("The AI Tutor that adapts to YOU")
        .disable_help_flag(true)
        .arg(
            clap::Arg::new("help")
                .short('h')
                .long("help")
                .help("Show this help message")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("profile")
                .short('p')
                .long("profile")
                .value_name("profile")
                .help("Model provider (gemini, echo)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("model")
                .short('m')
                .long("model")
                .value_name("model")
                .help("Model name (e.g. gemini-flash-latest)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("interest")
                .short('i')
                .long("interest")
                .value_name("interest")
                .help("Interest used for analogies (bollywood, cricket, video-games, farming, cooking)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("language")
                .short('l')
                .long("language")
                .value_name("language")
                .help("Explanation language (hinglish, english, marathi-mix)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("style")
                .short('s')
                .long("style")
                .value_name("style")
                .help("Learning style (stories-and-analogies, visual-flowcharts, code-examples)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("diagram-dir")
                .long("diagram-dir")
                .value_name("dir")
                .help("Directory for rendered diagrams")
                .value_parser(value_parser!(PathBuf))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("diagram-format")
                .long("diagram-format")
                .value_name("format")
                .help("Rendered diagram format (svg, png)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("dry-run")
                .long("dry-run")
                .help("Print the prompt that would be sent and exit")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Also print structured logs to stderr")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("generate")
                .long("generate")
                .value_name("shell")
                .help("Generate shell completion script")
                .value_parser(value_parser!(Shell))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("message")
                .index(1)
                .help("Question to explain (omit to start the interactive session)")
                .num_args(0..)
                .trailing_var_arg(true),
        )
}

fn matches_to_config(matches: &clap::ArgMatches) -> Config {
    let text = |id: &str| matches.get_one::<String>(id).cloned();
    Config {
        help: matches.get_flag("help"),
        dry_run: matches.get_flag("dry-run"),
        verbose: matches.get_flag("verbose"),
        profile: text("profile").map(ProviderName::new),
        model: text("model").map(ModelName::new),
        interest: text("interest"),
        language: text("language"),
        style: text("style"),
        diagram_dir: matches.get_one::<PathBuf>("diagram-dir").cloned(),
        diagram_format: text("diagram-format"),
        message_args: matches
            .get_many::<String>("message")
            .map(|i| i.cloned().collect())
            .unwrap_or_default(),
    }
}

/// コマンドラインを解析する。補完生成が要求された場合は ParseOutcome::GenerateCompletion を返す。
pub fn parse_args() -> Result<ParseOutcome, Error> {
    let matches = build_clap_command()
        .try_get_matches()
        .map_err(|e| Error::invalid_argument(e.to_string()))?;

    if let Some(&shell) = matches.get_one::<Shell>("generate") {
        return Ok(ParseOutcome::GenerateCompletion(shell));
    }

    Ok(ParseOutcome::Config(matches_to_config(&matches)))
}

/// テスト用: 引数スライスから解析する
#[allow(dead_code)]
pub fn parse_args_from(args: &[String]) -> Result<Config, Error> {
    let matches = build_clap_command()
        .try_get_matches_from(args)
        .map_err(|e| Error::invalid_argument(e.to_string()))?;
    Ok(matches_to_config(&matches))
}

/// 補完スクリプトを標準出力に出力する。
pub fn print_completion(shell: Shell) {
    let mut cmd = build_clap_command();
    clap_complete::generate(shell, &mut cmd, "kaleido", &mut std::io::stdout());
}

/// Config を KaleidoCommand に変換する
pub fn config_to_command(config: &Config) -> Result<KaleidoCommand, Error> {
    if config.help {
        return Ok(KaleidoCommand::Help);
    }
    let message = config.message_args.join(" ");
    if message.trim().is_empty() {
        if config.dry_run {
            return Err(Error::invalid_argument("--dry-run needs a message"));
        }
        return Ok(KaleidoCommand::Interactive);
    }
    if config.dry_run {
        Ok(KaleidoCommand::DryRun { message })
    } else {
        Ok(KaleidoCommand::Ask { message })
    }
}
