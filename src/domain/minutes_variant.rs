use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which kind of minutes the model is asked to draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MinutesVariant {
    #[default]
    General,
    Formal,
    Condominium,
}

impl MinutesVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            MinutesVariant::General => "general",
            MinutesVariant::Formal => "formal",
            MinutesVariant::Condominium => "condominium",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            MinutesVariant::General => "ATA DE REUNIÃO",
            MinutesVariant::Formal => "ATA OFICIAL",
            MinutesVariant::Condominium => "ATA DA ASSEMBLEIA DE CONDÓMINOS",
        }
    }

    pub fn filename_stem(&self) -> &'static str {
        match self {
            MinutesVariant::General => "Ata_Reuniao_AtaPro",
            MinutesVariant::Formal => "Ata_Oficial",
            MinutesVariant::Condominium => "Ata_Condominio",
        }
    }
}

impl FromStr for MinutesVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "general" | "geral" => Ok(MinutesVariant::General),
            "formal" | "oficial" => Ok(MinutesVariant::Formal),
            "condominium" | "condominio" | "condomínio" => Ok(MinutesVariant::Condominium),
            other => Err(format!(
                "Invalid minutes variant: {}. Expected: general, formal, or condominium",
                other
            )),
        }
    }
}

impl fmt::Display for MinutesVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
