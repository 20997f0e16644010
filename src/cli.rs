use crate::domain::constants::{DEFAULT_SAMPLE_PASSWORD, DEFAULT_SAMPLE_ZIP, DEFAULT_YARA_OUTPUT};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "malpedia_cli", version, about = "Malpedia REST API client")]
pub struct Cli {
    #[arg(short, long, global = true, help = "Print JSON instead of tables")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        env = "MALPEDIA_APIKEY",
        hide_env_values = true,
        help = "Malpedia API key (40 hex characters)"
    )]
    pub apikey: Option<String>,
    #[arg(long, global = true, help = "Config file holding the API key (yaml or toml)")]
    pub config: Option<PathBuf>,
    #[arg(long, global = true, env = "MALPEDIA_BASE_URL", hide = true)]
    pub base_url: Option<String>,
    #[arg(short, long, global = true, help = "Enable debug logging")]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show a threat actor
    #[command(alias = "getActor")]
    Actor { name: String },
    /// List all actor ids
    #[command(alias = "getActors")]
    Actors,
    /// Show a malware family
    #[command(alias = "getFamily")]
    Family {
        name: String,
        #[arg(short, long, help = "Also list the family's samples")]
        samples: bool,
    },
    /// List all family ids
    #[command(alias = "getFamilies")]
    Families,
    /// List a family's samples grouped by status
    #[command(alias = "familySamples")]
    FamilySamples { name: String },
    /// Download one sample by MD5 or SHA-256
    #[command(alias = "getSample")]
    GetSample {
        hash: String,
        #[command(flatten)]
        pack: PackArgs,
        #[arg(short, long, default_value = DEFAULT_SAMPLE_ZIP, help = "Zip archive path")]
        output: PathBuf,
    },
    /// Download every sample of a family
    #[command(alias = "downloadFamily")]
    DownloadFamily {
        name: String,
        #[command(flatten)]
        pack: PackArgs,
        #[arg(short, long, default_value = ".", help = "Target directory")]
        dir: PathBuf,
    },
    /// Download Yara rules by TLP level or family
    #[command(alias = "getYara")]
    GetYara {
        #[command(subcommand)]
        command: YaraCommands,
    },
    /// Scan a local binary against all Yara rules
    #[command(alias = "scanBinary")]
    ScanBinary { file: PathBuf },
    /// Scan all samples with a local Yara rule
    #[command(alias = "scanYara")]
    ScanYara { rule: PathBuf },
    /// Scan one family's samples with a local Yara rule
    #[command(alias = "scanYaraAgainstFamily")]
    ScanYaraFamily { family: String, rule: PathBuf },
    /// Show the Malpedia data version
    Version,
}

#[derive(Args, Debug, Clone)]
pub struct PackArgs {
    #[arg(short, long, help = "Write each state as a separate file instead of zipping")]
    pub raw: bool,
    #[arg(
        short = 'p',
        long = "samplePassword",
        default_value = DEFAULT_SAMPLE_PASSWORD,
        help = "Zip password; empty disables encryption"
    )]
    pub password: String,
}

impl PackArgs {
    pub fn password(&self) -> Option<&str> {
        (!self.password.is_empty()).then_some(self.password.as_str())
    }
}

#[derive(Subcommand, Debug)]
pub enum YaraCommands {
    /// Rules of a TLP level (white, green, amber)
    Tlp {
        level: String,
        #[command(flatten)]
        out: YaraOutputArgs,
    },
    /// Rules of a single family
    Family {
        name: String,
        #[command(flatten)]
        out: YaraOutputArgs,
    },
}

#[derive(Args, Debug, Clone)]
pub struct YaraOutputArgs {
    #[arg(short, long, help = "Keep the zip instead of extracting it")]
    pub zip: bool,
    #[arg(short, long, default_value = DEFAULT_YARA_OUTPUT, help = "Output directory, or file with --zip")]
    pub output: PathBuf,
}
