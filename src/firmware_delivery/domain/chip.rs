use std::fmt;

/// ESP target chip accepted by `idf.py` as `IDF_TARGET`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chip {
    Esp32,
    Esp32c3,
    Esp32s2,
    Esp32s3,
    Esp32c6,
    Esp32h2,
}

impl Chip {
    pub const ALL: [Chip; 6] = [
        Chip::Esp32,
        Chip::Esp32c3,
        Chip::Esp32s2,
        Chip::Esp32s3,
        Chip::Esp32c6,
        Chip::Esp32h2,
    ];

    /// Target name as understood by ESP-IDF and esptool
    pub fn as_str(&self) -> &'static str {
        match self {
            Chip::Esp32 => "esp32",
            Chip::Esp32c3 => "esp32c3",
            Chip::Esp32s2 => "esp32s2",
            Chip::Esp32s3 => "esp32s3",
            Chip::Esp32c6 => "esp32c6",
            Chip::Esp32h2 => "esp32h2",
        }
    }
}

impl std::str::FromStr for Chip {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Chip::ALL
            .iter()
            .copied()
            .find(|chip| chip.as_str() == normalized)
            .ok_or_else(|| {
                let supported: Vec<&str> = Chip::ALL.iter().map(Chip::as_str).collect();
                format!(
                    "Invalid chip: {}. Supported chips: {}",
                    s,
                    supported.join(", ")
                )
            })
    }
}

impl fmt::Display for Chip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
