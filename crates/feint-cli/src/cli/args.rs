use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use feint_core::otp::{NumberFormat, SortPolicy};
use feint_core::synth::{ContentMode, FileKind, SizeUnit, DEFAULT_CHUNK_SIZE};

#[derive(Parser)]
#[command(
    name = "feint",
    version,
    about = "Red-team utility belt — unsigned-JWT forgery, OTP wordlists, decoy files, and token replay probes"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Forge an unsigned (alg:none) variant of a JWT
    Jwt(JwtArgs),
    /// Generate OTP candidate wordlists
    Otp(OtpArgs),
    /// Generate a synthetic file with a format-specific header
    Filegen(FilegenArgs),
    /// Acquire, tamper, and replay an opaque bearer token
    Token(TokenArgs),
}

#[derive(Args, Debug, Clone)]
pub struct JwtArgs {
    /// Three-part dot-separated JWT to rework
    pub token: String,

    /// Extra claim override as KEY=VALUE (VALUE parsed as JSON, else kept
    /// as a string); repeatable, applied after the built-in overrides
    #[arg(long = "claim", value_name = "KEY=VALUE")]
    pub claims: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct OtpArgs {
    /// Candidate width in digits (prompted when omitted)
    #[arg(long)]
    pub digits: Option<usize>,

    /// Digit to exclude from candidates
    #[arg(long, value_name = "DIGIT")]
    pub exclude: Option<char>,

    /// 0-based positions the exclusion applies at, comma separated;
    /// omit to exclude the digit everywhere
    #[arg(long, value_delimiter = ',', requires = "exclude")]
    pub positions: Option<Vec<usize>>,

    /// Base name for the output files
    #[arg(long)]
    pub base: Option<String>,

    /// Candidate rendering
    #[arg(long, value_enum)]
    pub format: Option<FormatChoice>,

    /// Which orderings to write
    #[arg(long, value_enum)]
    pub sort: Option<SortChoice>,

    /// Directory the list files are written into
    #[arg(long, default_value = ".")]
    pub out: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct FilegenArgs {
    /// File format to fake (prompted when omitted)
    #[arg(long, value_enum)]
    pub kind: Option<KindChoice>,

    /// Size value, e.g. 10 or 0.5
    #[arg(long)]
    pub size: Option<f64>,

    /// Unit the size value is expressed in
    #[arg(long, value_enum)]
    pub unit: Option<UnitChoice>,

    /// Body content after the signature
    #[arg(long, value_enum)]
    pub content: Option<ContentChoice>,

    /// Directory to write into (a leading ~ expands)
    #[arg(long)]
    pub dir: Option<String>,

    /// File name; the format extension is appended when missing
    #[arg(long)]
    pub name: Option<String>,

    /// Upper bound in bytes on a single write buffer
    #[arg(long = "chunk-size", value_name = "BYTES", default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,

    /// Overwrite an existing target without asking
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Debug, Clone)]
pub struct TokenArgs {
    /// Target API endpoint
    #[arg(long)]
    pub url: String,

    /// Test email address for the request body
    #[arg(long, env = "FEINT_EMAIL", default_value = "test@example.com")]
    pub email: String,

    /// Origin header value
    #[arg(long)]
    pub origin: String,

    /// Referer header value
    #[arg(long)]
    pub referer: String,

    /// Fire the tampered request N times concurrently
    #[arg(long, value_name = "N")]
    pub replay: Option<usize>,

    /// Corrupt the sign field with a constant sentinel
    #[arg(long = "tamper-sign")]
    pub tamper_sign: bool,

    /// Set the expiry one minute into the past
    #[arg(long = "expire-back", conflicts_with = "custom_expires")]
    pub expire_back: bool,

    /// Set the expiry to an exact epoch value
    #[arg(long = "custom-expires", value_name = "EPOCH")]
    pub custom_expires: Option<i64>,

    /// Override the token uuid field
    #[arg(long, value_name = "VALUE")]
    pub uuid: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 5)]
    pub timeout: u64,

    /// Dump response headers and bodies
    #[arg(long)]
    pub verbose: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatChoice {
    /// Fixed width with leading zeros
    Padded,
    /// Plain integers, no leading zeros
    Plain,
}

impl From<FormatChoice> for NumberFormat {
    fn from(choice: FormatChoice) -> Self {
        match choice {
            FormatChoice::Padded => NumberFormat::Padded,
            FormatChoice::Plain => NumberFormat::Plain,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortChoice {
    Ascending,
    Descending,
    Random,
    /// Write all three orderings
    All,
}

impl SortChoice {
    /// The orderings this choice expands to.
    pub fn policies(self) -> Vec<SortPolicy> {
        match self {
            SortChoice::Ascending => vec![SortPolicy::Ascending],
            SortChoice::Descending => vec![SortPolicy::Descending],
            SortChoice::Random => vec![SortPolicy::Shuffled],
            SortChoice::All => vec![
                SortPolicy::Ascending,
                SortPolicy::Descending,
                SortPolicy::Shuffled,
            ],
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindChoice {
    Jpg,
    Png,
    Pdf,
    Txt,
    Bin,
}

impl From<KindChoice> for FileKind {
    fn from(choice: KindChoice) -> Self {
        match choice {
            KindChoice::Jpg => FileKind::Jpg,
            KindChoice::Png => FileKind::Png,
            KindChoice::Pdf => FileKind::Pdf,
            KindChoice::Txt => FileKind::Txt,
            KindChoice::Bin => FileKind::Bin,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitChoice {
    Bytes,
    Kb,
    Mb,
    Gb,
}

impl From<UnitChoice> for SizeUnit {
    fn from(choice: UnitChoice) -> Self {
        match choice {
            UnitChoice::Bytes => SizeUnit::Bytes,
            UnitChoice::Kb => SizeUnit::Kb,
            UnitChoice::Mb => SizeUnit::Mb,
            UnitChoice::Gb => SizeUnit::Gb,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentChoice {
    Random,
    Zeros,
    Pattern,
}

impl From<ContentChoice> for ContentMode {
    fn from(choice: ContentChoice) -> Self {
        match choice {
            ContentChoice::Random => ContentMode::Random,
            ContentChoice::Zeros => ContentMode::Zeros,
            ContentChoice::Pattern => ContentMode::Pattern,
        }
    }
}
