use secrecy::SecretString;
use serde::Deserialize;

/// Validation parameters for bearer tokens issued by the external auth service.
/// Tokens are never minted here.
#[derive(Debug, Deserialize)]
pub struct JwtSettings {
    pub secret: SecretString,
    #[serde(default = "default_audience")]
    pub audience: String,
}

fn default_audience() -> String {
    "authenticated".to_string()
}
