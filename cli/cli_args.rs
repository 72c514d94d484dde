use clap::{Args, Parser, Subcommand};
use fib_core::{BundleRequest, RESPONSE_FILE_NAME};
use std::path::PathBuf;

#[derive(Args, Debug, Clone, Default)]
pub struct ProjectConfigOpts {
    #[arg(
        long,
        help = "Directory to bundle (default: $PROJECT_ROOT or the current dir).",
        help_heading = "Project Setup",
        value_name = "PATH"
    )]
    pub project_root: Option<PathBuf>,

    #[arg(
        long,
        help = "Path or name of the TOML config file (default: .fib/fib.toml).",
        value_name = "CONFIG_FILE",
        conflicts_with = "disable_config_file",
        help_heading = "Project Setup"
    )]
    pub config_file: Option<String>,

    #[arg(
        long,
        help = "Disable loading any TOML config file.",
        conflicts_with = "config_file",
        help_heading = "Project Setup"
    )]
    pub disable_config_file: bool,
}

#[derive(Parser, Debug)]
#[command(
    name = "fib",
    author,
    version,
    about = "Bundle code files into a single file.",
    long_about = "fib walks the project directory, skips build output, tooling folders and \nnon-source files, and concatenates the selected files into one bundle for \nsharing or review. Options can be saved to a response file with `create-rsp` \nand replayed with `fib bundle @responseFile.rsp`.",
    help_template = "{about-section}\nUsage: {usage}\n\n{all-args}{after-help}",
    after_help = "EXAMPLES:\n  fib bundle -o bundle.txt -a author -l \"js html\" -r -n -s type\n  fib create-rsp\n  fib bundle @responseFile.rsp",
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[arg(
        short,
        long,
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase message verbosity (-v, -vv)."
    )]
    pub verbose: u8,

    #[arg(
        short,
        long,
        global = true,
        help = "Silence informational messages and warnings."
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    #[command(visible_alias = "b", about = "Bundle code files to a single file.")]
    Bundle(BundleArgs),

    #[command(
        visible_alias = "rsp",
        about = "Interactively create a response file for the bundle command."
    )]
    CreateRsp(CreateRspArgs),

    #[command(about = "Generate or save shell completion scripts.")]
    Completion(CompletionArgs),

    #[command(about = "Show or save the default exclusion configuration.")]
    Config(ConfigArgs),
}

#[derive(Args, Debug, Clone)]
pub struct BundleArgs {
    #[clap(flatten)]
    pub project_config: ProjectConfigOpts,

    #[arg(
        short = 'o',
        long,
        value_name = "PATH",
        help = "File path and name of the bundle.",
        help_heading = "Bundle"
    )]
    pub output: Option<PathBuf>,

    #[arg(
        short = 'a',
        long,
        value_name = "NAME",
        help = "Author name written in the bundle header.",
        help_heading = "Bundle"
    )]
    pub author: Option<String>,

    #[arg(
        short = 'l',
        long,
        value_name = "LANGUAGES",
        help = "Extensions to include, separated by spaces (e.g. \"js html\"), or \"all\".",
        help_heading = "Bundle"
    )]
    pub languages: Option<String>,

    #[arg(
        short = 's',
        long,
        value_name = "type|name",
        help = "Sort files by extension (type) or file name (name) [default: name].",
        help_heading = "Bundle"
    )]
    pub sort: Option<String>,

    #[arg(
        short = 'r',
        long,
        help = "Delete empty lines from the bundled files.",
        help_heading = "Bundle"
    )]
    pub remove_empty_lines: bool,

    #[arg(
        short = 'n',
        long,
        help = "Add a note with the source file's relative path after each file.",
        help_heading = "Bundle"
    )]
    pub note: bool,
}

impl BundleArgs {
    pub fn to_request(&self) -> BundleRequest {
        BundleRequest {
            output: self.output.clone(),
            author: self.author.clone(),
            languages: self.languages.clone(),
            sort: self.sort.clone(),
            remove_empty_lines: self.remove_empty_lines,
            include_note: self.note,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct CreateRspArgs {
    #[arg(
        long,
        value_name = "PATH",
        default_value = RESPONSE_FILE_NAME,
        help = "Where to write the response file."
    )]
    pub file: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct CompletionArgs {
    #[arg(
        long,
        value_name = "SHELL",
        help = "Shell to generate completions for (fish, bash, zsh) [default: fish]"
    )]
    pub shell: Option<String>,
    #[arg(
        long,
        help = "Save completion script to default location (prompts overwrite)."
    )]
    pub save: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[clap(flatten)]
    pub project_config: ProjectConfigOpts,

    #[arg(
        long,
        help = "Save the configuration to .fib/fib.toml under the project root (prompts overwrite)."
    )]
    pub save: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_short_bundle_flags() {
        let cli = Cli::try_parse_from([
            "fib", "bundle", "-o", "file.txt", "-a", "author", "-l", "js html", "-r", "-n", "-s",
            "type",
        ])
        .unwrap();
        let Some(Commands::Bundle(args)) = cli.command else {
            panic!("expected bundle command");
        };
        let request = args.to_request();
        assert_eq!(request.output, Some(PathBuf::from("file.txt")));
        assert_eq!(request.author.as_deref(), Some("author"));
        assert_eq!(request.languages.as_deref(), Some("js html"));
        assert_eq!(request.sort.as_deref(), Some("type"));
        assert!(request.remove_empty_lines);
        assert!(request.include_note);
    }

    #[test]
    fn create_rsp_defaults_to_response_file_name() {
        let cli = Cli::try_parse_from(["fib", "create-rsp"]).unwrap();
        let Some(Commands::CreateRsp(args)) = cli.command else {
            panic!("expected create-rsp command");
        };
        assert_eq!(args.file, PathBuf::from(RESPONSE_FILE_NAME));
    }
}
