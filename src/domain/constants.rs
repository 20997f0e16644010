pub const DEFAULT_API_BASE: &str = "https://malpedia.caad.fkie.fraunhofer.de/api";

pub const HOME_CONFIG_FILE: &str = ".malpedia_cli.yaml";

pub const DEFAULT_SAMPLE_PASSWORD: &str = "infected";
pub const DEFAULT_SAMPLE_ZIP: &str = "samples.zip";
pub const DEFAULT_YARA_OUTPUT: &str = "yara_rules";

/// Form field name the scan endpoint expects for binary uploads.
pub const MULTIPART_FIELD: &str = "file";

/// TLP level accepted on the command line → backend category string.
pub const TLP_CATEGORIES: [(&str, &str); 3] = [
    ("white", "tlp_white"),
    ("green", "tlp_green"),
    ("amber", "tlp_amber"),
];
