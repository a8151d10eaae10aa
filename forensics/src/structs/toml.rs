use crate::error::TomlError;
use log::error;
use serde::Deserialize;
use std::str::from_utf8;

#[derive(Debug, Deserialize, Clone)]
pub struct RegalyzerToml {
    #[serde(default)]
    pub output: Output,
    pub analysis: Analysis,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Output {
    /**Directory for report files and the log file. Nothing is written when missing */
    pub directory: Option<String>,
    /**json or jsonl */
    #[serde(default = "default_format")]
    pub format: String,
    pub logging: Option<String>,
}

impl Default for Output {
    fn default() -> Self {
        Output {
            directory: None,
            format: default_format(),
            logging: None,
        }
    }
}

fn default_format() -> String {
    String::from("json")
}

#[derive(Debug, Deserialize, Clone)]
pub struct Analysis {
    /**Mounted Windows image */
    pub image_root: String,
    /**Reports to run. All of them when missing */
    pub reports: Option<Vec<String>>,
    /**Pre-extracted `user:rid:lm:nt:::` hash file */
    pub hashes: Option<String>,
}

impl RegalyzerToml {
    /// Parse the Regalyzer TOML file
    pub fn parse_regalyzer_toml(toml_data: &[u8]) -> Result<RegalyzerToml, TomlError> {
        let text = match from_utf8(toml_data) {
            Ok(result) => result,
            Err(err) => {
                error!("[regalyzer] TOML data is not UTF8: {err:?}");
                return Err(TomlError::BadToml);
            }
        };

        let toml_results = toml::from_str(text);
        let config: RegalyzerToml = match toml_results {
            Ok(results) => results,
            Err(err) => {
                error!("[regalyzer] Failed to parse TOML data. Error: {err:?}");
                return Err(TomlError::BadToml);
            }
        };
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::RegalyzerToml;
    use crate::error::TomlError;

    #[test]
    fn test_parse_regalyzer_toml() {
        let data = br#"
[output]
directory = "./tmp"
format = "jsonl"
logging = "info"

[analysis]
image_root = "/mnt/img"
reports = ["system", "accounts"]
hashes = "/cases/sam.pwdump"
"#;
        let result = RegalyzerToml::parse_regalyzer_toml(data).unwrap();
        assert_eq!(result.output.directory.as_deref(), Some("./tmp"));
        assert_eq!(result.output.format, "jsonl");
        assert_eq!(result.analysis.image_root, "/mnt/img");
        assert_eq!(result.analysis.reports.unwrap().len(), 2);
        assert_eq!(result.analysis.hashes.as_deref(), Some("/cases/sam.pwdump"));
    }

    #[test]
    fn test_parse_regalyzer_toml_defaults() {
        let data = b"[analysis]\nimage_root = \"/mnt/img\"\n";
        let result = RegalyzerToml::parse_regalyzer_toml(data).unwrap();
        assert_eq!(result.output.format, "json");
        assert!(result.output.directory.is_none());
        assert!(result.analysis.reports.is_none());
    }

    #[test]
    fn test_parse_regalyzer_bad_toml() {
        let data = b"[output]\nformat = \"json\"\n";
        assert_eq!(
            RegalyzerToml::parse_regalyzer_toml(data).unwrap_err(),
            TomlError::BadToml
        );
    }
}
